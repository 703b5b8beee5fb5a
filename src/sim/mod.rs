//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, one decrement per countdown tick
//! - Seeded RNG only
//! - Stable iteration order (arrival order, by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod summary;
pub mod tick;

pub use collision::CatchZone;
pub use state::{Direction, FallingItem, GameSession, HeldControls, Paddle};
pub use summary::{SessionSummary, tier_message};
pub use tick::{Catch, CountdownOutcome, FrameReport, RemovalReason, countdown, frame, spawn};
