//! LocalStorage helpers

use serde::Serialize;
use serde::de::DeserializeOwned;
use web_sys::Storage;

fn local_storage() -> Option<Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}

/// Raw string value under `key`
pub fn get_item(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

/// Deserialize the JSON stored under `key`; corrupt data reads as absent
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = get_item(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Discarding unreadable {}: {}", key, e);
            None
        }
    }
}

/// Store `value` as JSON under `key`. Returns false if nothing was written.
pub fn save_json<T: Serialize>(key: &str, value: &T) -> bool {
    let Some(storage) = local_storage() else {
        return false;
    };
    match serde_json::to_string(value) {
        Ok(json) => storage.set_item(key, &json).is_ok(),
        Err(e) => {
            log::warn!("Could not serialize {}: {}", key, e);
            false
        }
    }
}
