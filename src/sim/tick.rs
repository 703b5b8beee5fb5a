//! Per-frame and per-tick game logic
//!
//! `frame` runs once per display refresh; `countdown` and `spawn` run once per
//! fixed-interval timer tick.

use super::collision::CatchZone;
use super::state::GameSession;

/// Why an item left the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    /// Caught and fully faded out
    Faded,
    /// Fell past the bottom edge
    Missed,
    /// Still falling when the session stopped
    Expired,
}

/// An item caught this frame
#[derive(Debug, Clone, PartialEq)]
pub struct Catch {
    pub id: u32,
    pub color: String,
}

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub caught: Vec<Catch>,
    /// Items removed this frame, in arrival order
    pub removed: Vec<(u32, RemovalReason)>,
}

/// Result of one countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownOutcome {
    /// Time left after the decrement
    Remaining(u32),
    /// This tick hit zero; the session is no longer running
    Expired,
    /// The session had already stopped
    Idle,
}

/// Advance the game by one frame.
///
/// Paddle movement comes first, then per-item motion and catch checks in
/// arrival order, then removal. Removed items are gone before anything is drawn.
pub fn frame(state: &mut GameSession) -> FrameReport {
    state.frame_count += 1;
    let mut report = FrameReport::default();

    if state.running {
        let max_x = state.config.max_paddle_x();
        state
            .paddle
            .steer(state.held, state.config.paddle_step, max_x);
    }

    let zone = CatchZone::new(&state.paddle, &state.config);
    let fade_step = state.config.fade_step;
    let floor = state.config.height + state.config.miss_margin;

    for item in state.items.iter_mut() {
        if state.running && !item.caught {
            item.pos.y += item.speed;
            if zone.catches(item.pos) {
                item.caught = true;
                state.score += 1;
                log::debug!("Caught {} (score {})", item.label, state.score);
                report.caught.push(Catch {
                    id: item.id,
                    color: item.color.clone(),
                });
            }
        }

        if item.caught {
            item.fade -= fade_step;
            if item.fade <= 0.0 {
                item.fade = 0.0;
                report.removed.push((item.id, RemovalReason::Faded));
            }
        } else if item.pos.y > floor {
            report.removed.push((item.id, RemovalReason::Missed));
        } else if !state.running {
            report.removed.push((item.id, RemovalReason::Expired));
        }
    }

    if !report.removed.is_empty() {
        let removed = &report.removed;
        state
            .items
            .retain(|item| !removed.iter().any(|(id, _)| *id == item.id));
    }

    report
}

/// Decrement the remaining time by one tick, stopping the session at zero
pub fn countdown(state: &mut GameSession) -> CountdownOutcome {
    if !state.running {
        return CountdownOutcome::Idle;
    }
    state.time_remaining = state.time_remaining.saturating_sub(1);
    if state.time_remaining == 0 {
        state.halt();
        CountdownOutcome::Expired
    } else {
        CountdownOutcome::Remaining(state.time_remaining)
    }
}

/// Spawn one item if the session is still running
pub fn spawn(state: &mut GameSession) -> Option<u32> {
    state.spawn_item()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::Direction;
    use proptest::prelude::*;

    fn session() -> GameSession {
        GameSession::new(GameConfig::default(), 12345)
    }

    #[test]
    fn test_centered_catch_then_fade_out() {
        let mut state = session();
        let id = state.push_item(280.0, 5.0, "=>", "#00e89d");

        // Catch point reaches the paddle top (371) on frame 76
        for _ in 0..75 {
            let report = frame(&mut state);
            assert!(report.caught.is_empty());
        }
        assert_eq!(state.score, 0);

        let report = frame(&mut state);
        assert_eq!(report.caught.len(), 1);
        assert_eq!(report.caught[0].id, id);
        assert_eq!(state.score, 1);
        let item = state.item(id).unwrap();
        assert!(item.caught);
        assert_eq!(item.pos.y, 360.0);

        // 13 frames from catch to removal, fading all the way
        let mut last_fade = item.fade;
        for _ in 0..11 {
            frame(&mut state);
            let item = state.item(id).expect("still fading");
            assert!(item.fade < last_fade);
            assert_eq!(item.pos.y, 360.0);
            last_fade = item.fade;
        }
        let report = frame(&mut state);
        assert_eq!(report.removed, vec![(id, RemovalReason::Faded)]);
        assert!(state.items.is_empty());
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_item_outside_reach_is_missed() {
        let mut state = session();
        let id = state.push_item(10.0, 5.0, "//", "#7b61ff");

        let mut removal = None;
        for n in 1..=200 {
            let report = frame(&mut state);
            assert!(report.caught.is_empty());
            if let Some(&(removed, reason)) = report.removed.first() {
                removal = Some((n, removed, reason));
                break;
            }
        }
        // y = -20 + 5n exceeds 420 at n = 89
        assert_eq!(removal, Some((89, id, RemovalReason::Missed)));
        assert_eq!(state.score, 0);
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_paddle_moves_before_catch_check() {
        let mut state = session();
        // Just right of the paddle's reach at its starting position
        let id = state.push_item(345.0, 5.0, "&&", "#ffd93d");
        for _ in 0..75 {
            frame(&mut state);
        }
        state.set_held(Direction::Right, true);
        frame(&mut state);
        assert_eq!(state.paddle.x, 237.0);
        assert!(state.item(id).unwrap().caught);
    }

    #[test]
    fn test_stopped_session_freezes_and_clears() {
        let mut state = session();
        let falling = state.push_item(100.0, 3.0, "++", "#6bddff");
        let caught = state.push_item(280.0, 5.0, "||", "#ff6b9d");
        for _ in 0..76 {
            frame(&mut state);
        }
        assert!(state.item(caught).unwrap().caught);

        state.halt();
        state.set_held(Direction::Left, true);
        let paddle_x = state.paddle.x;

        let report = frame(&mut state);
        assert_eq!(report.removed, vec![(falling, RemovalReason::Expired)]);
        assert_eq!(state.paddle.x, paddle_x);

        // The caught item still fades to completion
        let mut frames = 1;
        while !state.items.is_empty() {
            frame(&mut state);
            frames += 1;
        }
        assert_eq!(frames, 12);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_countdown_reaches_zero_exactly_once() {
        let mut state = session();
        for expected in (1..30).rev() {
            assert_eq!(countdown(&mut state), CountdownOutcome::Remaining(expected));
            assert!(state.running);
        }
        assert_eq!(countdown(&mut state), CountdownOutcome::Expired);
        assert_eq!(state.time_remaining, 0);
        assert!(!state.running);
        assert_eq!(countdown(&mut state), CountdownOutcome::Idle);
        assert_eq!(state.time_remaining, 0);
    }

    #[test]
    fn test_spawn_only_while_running() {
        let mut state = session();
        assert!(spawn(&mut state).is_some());
        state.halt();
        assert!(spawn(&mut state).is_none());
        assert_eq!(state.items.len(), 1);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed should produce identical results
        let mut a = GameSession::new(GameConfig::default(), 99999);
        let mut b = GameSession::new(GameConfig::default(), 99999);

        for n in 0..600 {
            if n % 36 == 0 {
                spawn(&mut a);
                spawn(&mut b);
            }
            if n == 100 {
                a.set_held(Direction::Left, true);
                b.set_held(Direction::Left, true);
            }
            frame(&mut a);
            frame(&mut b);
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.items, b.items);
        assert_eq!(a.paddle, b.paddle);
    }

    proptest! {
        #[test]
        fn paddle_stays_in_bounds(moves in proptest::collection::vec((any::<bool>(), any::<bool>()), 1..400)) {
            let mut state = session();
            let max_x = state.config.max_paddle_x();
            for (left, right) in moves {
                state.set_held(Direction::Left, left);
                state.set_held(Direction::Right, right);
                frame(&mut state);
                prop_assert!(state.paddle.x >= 0.0 && state.paddle.x <= max_x);
            }
        }

        #[test]
        fn score_counts_each_catch_once(
            seed in any::<u64>(),
            moves in proptest::collection::vec(0u8..3, 50..300),
        ) {
            let mut state = GameSession::new(GameConfig::default(), seed);
            let mut caught_ids = Vec::new();
            let mut removed_ids = Vec::new();
            let mut last_score = 0;

            for (n, mv) in moves.iter().enumerate() {
                if n % 36 == 0 {
                    spawn(&mut state);
                }
                state.set_held(Direction::Left, *mv == 1);
                state.set_held(Direction::Right, *mv == 2);

                let report = frame(&mut state);
                prop_assert_eq!(state.score, last_score + report.caught.len() as u32);
                last_score = state.score;

                for catch in &report.caught {
                    prop_assert!(!caught_ids.contains(&catch.id));
                    caught_ids.push(catch.id);
                }
                for (id, _) in &report.removed {
                    prop_assert!(!removed_ids.contains(id));
                    prop_assert!(state.item(*id).is_none());
                    removed_ids.push(*id);
                }
                for item in &state.items {
                    prop_assert_eq!(item.caught, caught_ids.contains(&item.id));
                }
            }

            // Everything drains once the session stops
            state.halt();
            let limit = state.config.fade_frames() + 1;
            for _ in 0..limit {
                frame(&mut state);
            }
            prop_assert!(state.items.is_empty());
        }
    }
}
