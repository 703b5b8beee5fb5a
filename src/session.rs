//! A running game and the timers it owns
//!
//! The spawn and countdown timers are logical [`Ticker`]s advanced by the
//! frame clock, so a session never leaves a host timer behind: dropping the
//! `Session` drops everything it scheduled.

use crate::config::{ConfigError, GameConfig};
use crate::consts::MAX_FRAME_GAP_MS;
use crate::renderer::{Surface, draw_frame};
use crate::sim::{self, CountdownOutcome, Direction, GameSession, SessionSummary};

/// Fixed-interval timer driven by elapsed milliseconds
#[derive(Debug, Clone, PartialEq)]
pub struct Ticker {
    interval_ms: f64,
    elapsed_ms: f64,
}

impl Ticker {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: f64::from(interval_ms.max(1)),
            elapsed_ms: 0.0,
        }
    }

    /// Add elapsed time and return how many intervals completed
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        self.elapsed_ms += dt_ms.max(0.0);
        let mut fires = 0;
        while self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms -= self.interval_ms;
            fires += 1;
        }
        fires
    }
}

/// Readout changes for the host UI, in the order they happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    ScoreChanged(u32),
    TimeChanged(u32),
    /// Time ran out
    Ended(SessionSummary),
}

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Exit,
}

/// One game from activation to dismissal
#[derive(Debug)]
pub struct Session {
    state: GameSession,
    spawn: Option<Ticker>,
    countdown: Option<Ticker>,
    last_frame_ms: Option<f64>,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Validate the config and begin a session.
    ///
    /// One item is spawned right away; the spawn and countdown tickers start
    /// counting from the first frame.
    pub fn start(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let spawn = Ticker::new(config.spawn_interval_ms);
        let countdown = Ticker::new(config.countdown_interval_ms);
        let mut state = GameSession::new(config, seed);
        state.spawn_item();

        log::info!("Session started with seed: {}", seed);

        Ok(Self {
            events: vec![
                SessionEvent::ScoreChanged(0),
                SessionEvent::TimeChanged(state.time_remaining),
            ],
            state,
            spawn: Some(spawn),
            countdown: Some(countdown),
            last_frame_ms: None,
        })
    }

    pub fn state(&self) -> &GameSession {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// True while either ticker is still scheduled
    pub fn has_timers(&self) -> bool {
        self.spawn.is_some() || self.countdown.is_some()
    }

    /// Record a held/released direction. Ignored once stopped.
    pub fn handle_input(&mut self, direction: Direction, pressed: bool) {
        if self.state.running {
            self.state.set_held(direction, pressed);
        }
    }

    /// Cancel both tickers and halt physics. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.cancel_timers();
        if self.state.halt() {
            log::info!("Session stopped (score {})", self.state.score);
        }
    }

    fn cancel_timers(&mut self) {
        self.spawn = None;
        self.countdown = None;
    }

    /// Take pending readout events
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Run one display refresh at host time `now_ms`.
    ///
    /// Timers fire first (countdown before spawn), then the frame step, then
    /// drawing. Returns [`FrameStatus::Exit`] once the session has stopped and
    /// the last caught item finished fading.
    pub fn on_frame(&mut self, now_ms: f64, surface: &mut dyn Surface) -> FrameStatus {
        let dt_ms = match self.last_frame_ms {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_GAP_MS),
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);

        self.run_timers(dt_ms);

        let score_before = self.state.score;
        let report = sim::frame(&mut self.state);
        if self.state.score != score_before {
            self.events.push(SessionEvent::ScoreChanged(self.state.score));
        }

        draw_frame(&self.state, &report, surface);

        if !self.state.running && self.state.items.is_empty() {
            FrameStatus::Exit
        } else {
            FrameStatus::Continue
        }
    }

    fn run_timers(&mut self, dt_ms: f64) {
        let countdown_fires = self.countdown.as_mut().map_or(0, |t| t.advance(dt_ms));
        for _ in 0..countdown_fires {
            match sim::countdown(&mut self.state) {
                CountdownOutcome::Remaining(secs) => {
                    self.events.push(SessionEvent::TimeChanged(secs));
                }
                CountdownOutcome::Expired => {
                    self.cancel_timers();
                    self.events.push(SessionEvent::TimeChanged(0));
                    let summary =
                        SessionSummary::from_score(self.state.score, &self.state.config.tiers);
                    log::info!("Time up! Score {}: {}", summary.score, summary.message);
                    self.events.push(SessionEvent::Ended(summary));
                    break;
                }
                CountdownOutcome::Idle => break,
            }
        }

        let spawn_fires = self.spawn.as_mut().map_or(0, |t| t.advance(dt_ms));
        for _ in 0..spawn_fires {
            if sim::spawn(&mut self.state).is_none() {
                break;
            }
        }
    }
}
