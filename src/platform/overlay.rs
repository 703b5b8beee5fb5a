//! Game overlay: container, readouts, canvas and close button
//!
//! Dropping the overlay fades it out and then removes everything it added to
//! the page.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlCanvasElement};

use crate::sim::SessionSummary;

const ROOT_ID: &str = "codeCatcherOverlay";
const STYLE_ID: &str = "codeCatcherStyles";
const CLOSE_ID: &str = "codeCatcherClose";
const ROOT_CLASS: &str = "catcher-overlay";
/// Matches the `catcherFadeIn` reverse animation on `.closing`
const FADE_OUT_MS: i32 = 300;

const STYLES: &str = "
.catcher-overlay {
    position: fixed; inset: 0; z-index: 99999;
    display: flex; align-items: center; justify-content: center;
    background: rgba(0, 0, 0, 0.92); backdrop-filter: blur(12px);
    animation: catcherFadeIn 0.4s ease;
}
@keyframes catcherFadeIn { from { opacity: 0; } to { opacity: 1; } }
.catcher-overlay.closing { animation: catcherFadeIn 0.3s ease reverse forwards; pointer-events: none; }
.catcher-box {
    position: relative; max-width: 600px; width: 90vw; padding: 1.5rem;
    background: rgba(15, 15, 25, 0.95); border: 1px solid rgba(0, 232, 157, 0.3);
    border-radius: 20px; box-shadow: 0 0 60px rgba(0, 232, 157, 0.15);
}
.catcher-header { display: flex; align-items: center; justify-content: space-between; gap: 1rem; margin-bottom: 1rem; }
.catcher-header h2 { margin: 0; font-size: 1.3rem; font-weight: 800; color: #00e89d; white-space: nowrap; }
.catcher-stats { display: flex; gap: 1.5rem; font-family: 'IBM Plex Mono', monospace; color: #aaa; font-size: 0.9rem; }
.catcher-stats strong { color: #00e89d; }
#codeCatcherClose {
    width: 36px; height: 36px; flex-shrink: 0; cursor: pointer; color: #fff; font-size: 1.1rem;
    background: rgba(255, 255, 255, 0.08); border: 1px solid rgba(255, 255, 255, 0.1); border-radius: 10px;
}
#codeCatcherClose:hover { background: rgba(255, 70, 70, 0.3); border-color: rgba(255, 70, 70, 0.5); }
.catcher-box canvas { display: block; width: 100%; border-radius: 12px; background: #0a0a14; }
.catcher-help { margin-top: 0.75rem; text-align: center; color: rgba(255, 255, 255, 0.4); font: 0.8rem 'IBM Plex Mono', monospace; }
.catcher-over {
    position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%);
    text-align: center; color: #fff; z-index: 10;
}
.catcher-over h3 { font-size: 2rem; margin-bottom: 0.5rem; color: #00e89d; }
.catcher-over .score { font-size: 1.4rem; margin-bottom: 0.25rem; }
.catcher-over .score strong { color: #7b61ff; }
.catcher-over .message { color: #aaa; font-size: 0.95rem; }
.catcher-over .hint { color: #555; font-size: 0.8rem; margin-top: 1rem; }
";

/// The open game's DOM
pub struct Overlay {
    root: Element,
    container: Element,
    score: Element,
    time: Element,
    best: Element,
    canvas: HtmlCanvasElement,
}

fn element(document: &Document, tag: &str, class: &str, text: &str) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    if !text.is_empty() {
        el.set_text_content(Some(text));
    }
    Ok(el)
}

impl Overlay {
    /// Build the overlay and attach it to the page
    pub fn open(
        document: &Document,
        session_secs: u32,
        best: Option<u32>,
    ) -> Result<Self, JsValue> {
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        let head = document
            .head()
            .ok_or_else(|| JsValue::from_str("document has no head"))?;

        let root = element(document, "div", ROOT_CLASS, "")?;
        root.set_id(ROOT_ID);
        let container = element(document, "div", "catcher-box", "")?;

        let header = element(document, "div", "catcher-header", "")?;
        header.append_child(&element(document, "h2", "", "CODE CATCHER")?)?;

        let stats = element(document, "div", "catcher-stats", "")?;
        let score_label = element(document, "span", "", "Score: ")?;
        let score = element(document, "strong", "", "0")?;
        score_label.append_child(&score)?;
        let time_label = element(document, "span", "", "Time: ")?;
        let time = element(document, "strong", "", &session_secs.to_string())?;
        time_label.append_child(&time)?;
        time_label.append_child(&document.create_text_node("s"))?;
        let best_label = element(document, "span", "", "Best: ")?;
        let best = element(document, "strong", "", &best_text(best))?;
        best_label.append_child(&best)?;
        stats.append_child(&score_label)?;
        stats.append_child(&time_label)?;
        stats.append_child(&best_label)?;
        header.append_child(&stats)?;

        let close = element(document, "button", "", "✕")?;
        close.set_id(CLOSE_ID);
        close.set_attribute("aria-label", "Close game")?;
        header.append_child(&close)?;

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")?
            .dyn_into()
            .map_err(JsValue::from)?;

        container.append_child(&header)?;
        container.append_child(&canvas)?;
        container.append_child(&element(
            document,
            "div",
            "catcher-help",
            "Use ← → arrow keys to catch falling code symbols!",
        )?)?;
        root.append_child(&container)?;

        // A previous overlay may still be fading out and sharing the styles
        if document.get_element_by_id(STYLE_ID).is_none() {
            let style = element(document, "style", "", STYLES)?;
            style.set_id(STYLE_ID);
            head.append_child(&style)?;
        }
        body.append_child(&root)?;

        Ok(Self {
            root,
            container,
            score,
            time,
            best,
            canvas,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn set_score(&self, score: u32) {
        self.score.set_text_content(Some(&score.to_string()));
    }

    pub fn set_time(&self, secs: u32) {
        self.time.set_text_content(Some(&secs.to_string()));
    }

    pub fn set_best(&self, best: Option<u32>) {
        self.best.set_text_content(Some(&best_text(best)));
    }

    /// Show the game-over panel over the playfield
    pub fn show_summary(&self, summary: &SessionSummary) -> Result<(), JsValue> {
        let document = self
            .root
            .owner_document()
            .ok_or_else(|| JsValue::from_str("overlay is detached"))?;

        let panel = element(&document, "div", "catcher-over", "")?;
        panel.append_child(&element(&document, "h3", "", "Game Over!")?)?;

        let score = element(&document, "p", "score", "Score: ")?;
        score.append_child(&element(&document, "strong", "", &summary.score.to_string())?)?;
        panel.append_child(&score)?;
        panel.append_child(&element(&document, "p", "message", &summary.message)?)?;
        if let Some(rank) = summary.rank {
            let text = if rank == 1 {
                "New best!".to_string()
            } else {
                format!("#{} on your leaderboard", rank)
            };
            panel.append_child(&element(&document, "p", "message", &text)?)?;
        }
        panel.append_child(&element(&document, "p", "hint", "Press ESC to close")?)?;

        self.container.append_child(&panel)?;
        Ok(())
    }

    /// Whether a click landed on the close button
    pub fn is_close_click(event: &Event) -> bool {
        event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(&format!("#{}", CLOSE_ID)).ok().flatten())
            .is_some()
    }
}

fn best_text(best: Option<u32>) -> String {
    best.map_or_else(|| "-".to_string(), |score| score.to_string())
}

/// Remove a closed overlay's root, and the shared styles unless a newer
/// overlay has opened since
fn remove_closed(root: &Element) {
    let document = root.owner_document();
    root.remove();
    if let Some(document) = document {
        if document.get_element_by_id(ROOT_ID).is_none() {
            if let Some(style) = document.get_element_by_id(STYLE_ID) {
                style.remove();
            }
        }
    }
}

impl Drop for Overlay {
    fn drop(&mut self) {
        // Hand the id over so a reopened game never collides with the fading one
        self.root.remove_attribute("id").ok();
        self.root.set_class_name(&format!("{} closing", ROOT_CLASS));

        let root = self.root.clone();
        let cleanup = Closure::once_into_js(move || remove_closed(&root));
        let scheduled = web_sys::window().is_some_and(|window| {
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    cleanup.unchecked_ref(),
                    FADE_OUT_MS,
                )
                .is_ok()
        });
        if !scheduled {
            log::debug!("No timer for the fade out, removing overlay now");
            remove_closed(&self.root);
        }
    }
}
