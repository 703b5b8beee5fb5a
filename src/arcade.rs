//! Controller owning the (at most one) open game
//!
//! The host feeds it key events and animation frames. It opens a session when
//! the activation sequence is typed, forwards controls while one is open, and
//! files finished runs in the leaderboard.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

use crate::activation::SequenceDetector;
use crate::config::GameConfig;
use crate::highscores::{HighScores, wall_clock_ms};
use crate::input::Control;
use crate::renderer::Surface;
use crate::session::{FrameStatus, Session, SessionEvent};
use crate::sim::Direction;

/// What a key event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Nothing for the game to do
    Ignored,
    /// Completed the activation sequence and opened a session
    Started,
    /// Changed a held direction
    Steered,
    /// Closed the open session
    Dismissed,
}

/// Game controller
#[derive(Debug)]
pub struct Arcade {
    config: GameConfig,
    detector: SequenceDetector,
    session: Option<Session>,
    highscores: HighScores,
    /// Events moved out of the session, with leaderboard ranks filled in
    events: Vec<SessionEvent>,
    seeder: Pcg32,
}

impl Arcade {
    pub fn new(config: GameConfig, highscores: HighScores, seed: u64) -> Self {
        Self {
            config,
            detector: SequenceDetector::default(),
            session: None,
            highscores,
            events: Vec::new(),
            seeder: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn highscores(&self) -> &HighScores {
        &self.highscores
    }

    /// Open a session. No-op (false) if one is already open or the config is invalid.
    pub fn start(&mut self, config: GameConfig) -> bool {
        if self.session.is_some() {
            log::debug!("Session already open, ignoring start");
            return false;
        }
        let seed = self.seeder.next_u64();
        match Session::start(config, seed) {
            Ok(session) => {
                self.session = Some(session);
                self.collect_events();
                true
            }
            Err(e) => {
                log::warn!("Refusing to start session: {}", e);
                false
            }
        }
    }

    /// Route a key press (`pressed`) or release.
    ///
    /// Without a session, presses feed the activation sequence. With one,
    /// Escape dismisses it and the arrow keys steer.
    pub fn handle_key(&mut self, key: &str, pressed: bool) -> KeyOutcome {
        if self.session.is_none() {
            if pressed && self.detector.feed(key) {
                let config = self.config.clone();
                if self.start(config) {
                    return KeyOutcome::Started;
                }
            }
            return KeyOutcome::Ignored;
        }

        match Control::from_key(key) {
            Some(Control::Dismiss) if pressed => {
                self.dismiss();
                KeyOutcome::Dismissed
            }
            Some(Control::Move(direction)) => {
                self.handle_input(direction, pressed);
                KeyOutcome::Steered
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Record a held/released direction. No-op without a session.
    pub fn handle_input(&mut self, direction: Direction, pressed: bool) {
        if let Some(session) = self.session.as_mut() {
            session.handle_input(direction, pressed);
        }
    }

    /// Cancel the session's tickers and halt it. No-op without a session.
    pub fn stop(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.stop();
        }
    }

    /// Close the session unconditionally. Returns false if none was open.
    pub fn dismiss(&mut self) -> bool {
        let Some(mut session) = self.session.take() else {
            return false;
        };
        session.stop();
        self.events.clear();
        self.detector.reset();
        log::info!("Session dismissed");
        true
    }

    /// Run one frame of the open session
    pub fn on_frame(&mut self, now_ms: f64, surface: &mut dyn Surface) -> FrameStatus {
        let Some(session) = self.session.as_mut() else {
            return FrameStatus::Exit;
        };
        let status = session.on_frame(now_ms, surface);
        self.collect_events();
        status
    }

    /// Take readout events produced since the last call
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    fn collect_events(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        for mut event in session.drain_events() {
            if let SessionEvent::Ended(summary) = &mut event {
                self.highscores.file(summary, wall_clock_ms());
            }
            self.events.push(event);
        }
    }
}
