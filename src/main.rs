//! Code Catcher entry point
//!
//! On the web this installs the page-wide key listeners that watch for the
//! activation sequence. Natively it plays one scripted session headlessly.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::KeyboardEvent;

    use code_catcher::platform::{CanvasSurface, FrameLoop, Overlay};
    use code_catcher::{Arcade, FrameStatus, GameConfig, HighScores, KeyOutcome, SessionEvent};

    /// DOM and frame loop of the open game. Dropping it tears everything down.
    struct View {
        overlay: Overlay,
        surface: CanvasSurface,
        frames: Option<FrameLoop>,
    }

    struct App {
        arcade: Arcade,
        view: Option<View>,
    }

    impl App {
        /// Run one frame and push readout changes into the overlay
        fn on_frame(&mut self, time: f64) -> FrameStatus {
            let Some(view) = self.view.as_mut() else {
                return FrameStatus::Exit;
            };
            let status = self.arcade.on_frame(time, &mut view.surface);

            for event in self.arcade.drain_events() {
                match event {
                    SessionEvent::ScoreChanged(score) => view.overlay.set_score(score),
                    SessionEvent::TimeChanged(secs) => view.overlay.set_time(secs),
                    SessionEvent::Ended(summary) => {
                        view.overlay.set_best(self.arcade.highscores().best());
                        if let Err(e) = view.overlay.show_summary(&summary) {
                            log::warn!("Could not show summary: {:?}", e);
                        }
                    }
                }
            }
            status
        }

        fn close(&mut self) {
            self.arcade.dismiss();
            self.view = None;
        }
    }

    fn open_view(app: &Rc<RefCell<App>>, config: &GameConfig) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let best = app.borrow().arcade.highscores().best();
        let overlay = Overlay::open(&document, config.session_secs, best)?;
        let surface = CanvasSurface::new(overlay.canvas(), config.width, config.height)?;
        app.borrow_mut().view = Some(View {
            overlay,
            surface,
            frames: None,
        });

        let weak = Rc::downgrade(app);
        let frames = FrameLoop::start(move |time| match weak.upgrade() {
            Some(app) => app.borrow_mut().on_frame(time),
            None => FrameStatus::Exit,
        })?;
        if let Some(view) = app.borrow_mut().view.as_mut() {
            view.frames = Some(frames);
        }
        Ok(())
    }

    fn on_key(app: &Rc<RefCell<App>>, config: &GameConfig, event: &KeyboardEvent, pressed: bool) {
        let outcome = app.borrow_mut().arcade.handle_key(&event.key(), pressed);
        match outcome {
            KeyOutcome::Started => {
                log::info!("Code Catcher unlocked!");
                if let Err(e) = open_view(app, config) {
                    log::error!("Could not open game: {:?}", e);
                    app.borrow_mut().close();
                }
            }
            KeyOutcome::Dismissed => {
                event.prevent_default();
                app.borrow_mut().view = None;
            }
            KeyOutcome::Steered => event.prevent_default(),
            KeyOutcome::Ignored => {}
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document, Code Catcher disabled");
            return;
        };

        let config = GameConfig::load();
        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            arcade: Arcade::new(config.clone(), HighScores::load(), seed),
            view: None,
        }));

        // Page-lifetime listeners: keys drive both activation and play
        for (kind, pressed) in [("keydown", true), ("keyup", false)] {
            let app = app.clone();
            let config = config.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                on_key(&app, &config, &event, pressed);
            });
            if let Err(e) =
                document.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            {
                log::error!("Could not listen for {}: {:?}", kind, e);
            }
            closure.forget();
        }

        // Close button (delegated so the overlay owns no listeners)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                if Overlay::is_close_click(&event) {
                    app.borrow_mut().close();
                }
            });
            if let Err(e) = document
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            {
                log::error!("Could not listen for clicks: {:?}", e);
            }
            closure.forget();
        }

        log::info!("Code Catcher armed (seed {})", seed);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    web_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use code_catcher::activation::KONAMI_CODE;
    use code_catcher::renderer::RecordingSurface;
    use code_catcher::sim::Direction;
    use code_catcher::{Arcade, FrameStatus, GameConfig, HighScores, SessionEvent};

    env_logger::init();
    log::info!("Code Catcher (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to play in the browser");

    let mut arcade = Arcade::new(GameConfig::load(), HighScores::load(), 0xC0DE);
    for key in KONAMI_CODE {
        arcade.handle_key(key, true);
        arcade.handle_key(key, false);
    }

    // Autopilot: chase the lowest uncaught symbol at 60 fps
    let mut surface = RecordingSurface::default();
    let mut now = 0.0;
    loop {
        let target = arcade.session().and_then(|s| {
            let state = s.state();
            let mid = state.paddle.x + state.paddle.width / 2.0;
            state
                .items
                .iter()
                .filter(|item| !item.caught)
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                .map(|item| item.pos.x - mid)
        });
        if let Some(offset) = target {
            arcade.handle_input(Direction::Left, offset < -4.0);
            arcade.handle_input(Direction::Right, offset > 4.0);
        }

        surface.commands.clear();
        let status = arcade.on_frame(now, &mut surface);
        for event in arcade.drain_events() {
            match event {
                SessionEvent::ScoreChanged(score) => log::debug!("Score: {}", score),
                SessionEvent::TimeChanged(secs) => log::debug!("Time: {}s", secs),
                SessionEvent::Ended(summary) => println!(
                    "Game Over! Score: {} - {}",
                    summary.score, summary.message
                ),
            }
        }
        if status == FrameStatus::Exit {
            break;
        }
        now += 1000.0 / 60.0;
    }

    log::info!("Rendered {} frames", surface.frames);
    if let Some(best) = arcade.highscores().best() {
        log::info!("Best this run: {}", best);
    }
    arcade.dismiss();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
