//! Fixed timestep simulation tick
//!
//! Core game loop that advances the scene deterministically. Per step:
//! sensor smoothing, spawn timer, fire actions, scheduled translations
//! (the physics stand-in), contact dispatch, natural expiry, player
//! motion integration, delayed removals.

use glam::Vec2;
use rand::Rng;

use super::contact::{self, Contact, ContactBody, TorpedoHit};
use super::state::{AlienKind, EntityId, EntityKind, GameEvent, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Raw horizontal tilt reading for this step; `None` means the sensor
    /// produced no sample
    pub tilt: Option<f32>,
    /// Fire action (tap/click). Each action launches exactly one torpedo;
    /// there is no rate limiting
    pub fire: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    state.time_ticks += 1;
    let now = state.time_ticks;

    // Sensor cadence: fold the raw sample into the smoothed tilt value.
    // An absent sample leaves the previous value in place.
    if now.is_multiple_of(SENSOR_PERIOD_TICKS)
        && let Some(raw) = input.tilt
    {
        state.tilt.sample(raw);
    }

    // Spawn timer
    if now.is_multiple_of(SPAWN_PERIOD_TICKS) {
        spawn_random_alien(state);
    }

    // Fire action
    if input.fire {
        let id = state.fire_torpedo();
        log::debug!("torpedo {id} fired at x={:.1}", state.player.pos.x);
    }

    // Physics: advance scheduled translations
    let moves: Vec<(EntityId, Vec2)> = state.scheduler.positions_at(now).collect();
    for (id, pos) in moves {
        state.set_position(id, pos);
    }

    // Contacts for this step, resolved before completed bodies leave the
    // world so the final sweep of a torpedo still counts
    dispatch_contacts(state);

    // Natural expiry: translations that ran to completion off-screen
    expire_completed(state, now);

    // Player motion integration (after physics, before the frame is
    // presented)
    integrate_player(state);

    // Delayed removals (explosion linger)
    for id in state.scheduler.drain_due_removals(now) {
        state.remove_explosion(id);
    }
}

/// Spawn one alien: uniform random variant, uniform random x in
/// [0, screen width]
fn spawn_random_alien(state: &mut GameState) {
    let kind = AlienKind::ALL[state.rng.random_range(0..AlienKind::ALL.len())];
    let x = state.rng.random_range(0.0..=SCREEN_WIDTH);
    let id = state.spawn_alien(kind, x);
    log::debug!("alien {id} ({}) spawned at x={x:.1}", kind.sprite_name());
}

/// Detect overlap onsets between tracked bodies and dispatch them through
/// the contact resolver
fn dispatch_contacts(state: &mut GameState) {
    // Current overlap set, in (torpedo id, alien id) iteration order
    let mut current: Vec<(EntityId, EntityId)> = Vec::new();
    for torpedo in &state.torpedoes {
        for alien in &state.aliens {
            // Both bodies must ask to be tested against the other's category
            if torpedo.contact_mask & alien.category == 0
                || alien.contact_mask & torpedo.category == 0
            {
                continue;
            }
            let hit = if torpedo.precise {
                contact::swept_circle_rect_overlap(
                    torpedo.prev_pos,
                    torpedo.pos,
                    torpedo.radius,
                    alien.pos,
                    alien.size,
                )
            } else {
                contact::circle_rect_overlap(torpedo.pos, torpedo.radius, alien.pos, alien.size)
            };
            if hit {
                current.push((torpedo.id, alien.id));
            }
        }
    }

    // Report each overlap episode once, at onset
    let began: Vec<(EntityId, EntityId)> = current
        .iter()
        .copied()
        .filter(|pair| !state.overlaps.contains(pair))
        .collect();
    state.overlaps = current;

    for (torpedo_id, alien_id) in began {
        // An earlier contact this step may already have consumed a body
        let (Some(torpedo), Some(alien)) = (state.torpedo(torpedo_id), state.alien(alien_id))
        else {
            continue;
        };
        let contact = Contact {
            body_a: ContactBody { entity: torpedo.id, category: torpedo.category },
            body_b: ContactBody { entity: alien.id, category: alien.category },
        };
        if let Some(hit) = contact::resolve_contact(&contact) {
            apply_torpedo_hit(state, hit);
        }
    }
}

/// Collision effects for a confirmed (torpedo, alien) pair: explosion
/// effect at the alien's last position, audio cue, both bodies removed,
/// effect removal scheduled, score bumped
fn apply_torpedo_hit(state: &mut GameState, hit: TorpedoHit) {
    let Some(alien) = state.alien(hit.alien).copied() else {
        return;
    };

    let explosion = state.spawn_explosion(alien.pos);
    state.remove_torpedo(hit.torpedo);
    state.remove_alien(hit.alien);
    state
        .scheduler
        .schedule_removal(explosion, state.time_ticks + EXPLOSION_LINGER_TICKS);
    state.score.add(HIT_SCORE);

    state.events.push(GameEvent::AlienDestroyed { kind: alien.kind, pos: alien.pos });
    state.events.push(GameEvent::ScoreChanged { value: state.score.value() });
    log::info!(
        "alien {} destroyed at ({:.1}, {:.1}), {}",
        hit.alien,
        alien.pos.x,
        alien.pos.y,
        state.score.label()
    );
}

/// Remove entities whose translation ran to completion (reached the far
/// edge of the screen without colliding). Never affects the score.
fn expire_completed(state: &mut GameState, now: u64) {
    for id in state.scheduler.drain_completed(now) {
        match state.kind_of(id) {
            Some(EntityKind::Alien) => {
                state.remove_alien(id);
                state.events.push(GameEvent::AlienEscaped { id });
            }
            Some(EntityKind::Torpedo) => {
                state.remove_torpedo(id);
                state.events.push(GameEvent::TorpedoExpired { id });
            }
            _ => {}
        }
    }
}

/// Apply the smoothed tilt signal to the player's horizontal position.
///
/// Wrap is a hard reset, not a modulo: past the left edge snaps to the
/// right edge and vice versa; landing exactly on the edge stays put.
fn integrate_player(state: &mut GameState) {
    let accel = state.tilt.smoothed;
    let player = &mut state.player;
    player.pos.x += accel * TILT_GAIN;

    if player.pos.x < 0.0 {
        player.pos.x = SCREEN_WIDTH;
    } else if player.pos.x > SCREEN_WIDTH {
        player.pos.x = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::contact::{CATEGORY_ALIEN, CATEGORY_TORPEDO};
    use crate::sim::state::Alien;
    use proptest::prelude::*;

    /// Park an alien at a fixed position with no scheduled descent, so a
    /// test can aim at a stationary target
    fn hover_alien(state: &mut GameState, pos: Vec2) -> EntityId {
        let id = state.next_entity_id();
        state.aliens.push(Alien {
            id,
            kind: AlienKind::Alien3,
            pos,
            size: Vec2::new(ALIEN_WIDTH, ALIEN_HEIGHT),
            category: CATEGORY_ALIEN,
            contact_mask: CATEGORY_TORPEDO,
            collision_mask: 0,
        });
        id
    }

    fn run_ticks(state: &mut GameState, input: &TickInput, n: u64) {
        for _ in 0..n {
            tick(state, input);
        }
    }

    #[test]
    fn test_sensor_cadence_and_persistence() {
        let mut state = GameState::new(1);
        let tilted = TickInput { tilt: Some(0.8), fire: false };

        // Samples land on the 6-tick cadence only
        run_ticks(&mut state, &tilted, 5);
        assert_eq!(state.tilt.smoothed, 0.0);
        tick(&mut state, &tilted);
        assert!((state.tilt.smoothed - 0.6).abs() < 1e-6);

        run_ticks(&mut state, &tilted, 6);
        assert!((state.tilt.smoothed - 0.75).abs() < 1e-6);

        // Sensor unavailable: the last smoothed value persists
        run_ticks(&mut state, &TickInput::default(), 12);
        assert!((state.tilt.smoothed - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_player_integration_gain() {
        let mut state = GameState::new(1);
        state.player.pos.x = 100.0;
        state.tilt.smoothed = 0.3;
        integrate_player(&mut state);
        assert!((state.player.pos.x - 115.0).abs() < 1e-4);
        assert_eq!(state.player.pos.y, PLAYER_HEIGHT / 2.0 + PLAYER_BOTTOM_MARGIN);
    }

    #[test]
    fn test_player_wrap_is_hard_reset() {
        let mut state = GameState::new(1);

        // 310 + 15 = 325 > 320: snaps to 0, not to 5
        state.player.pos.x = 310.0;
        state.tilt.smoothed = 0.3;
        integrate_player(&mut state);
        assert_eq!(state.player.pos.x, 0.0);

        // 5 - 15 = -10 < 0: snaps to the full width
        state.player.pos.x = 5.0;
        state.tilt.smoothed = -0.3;
        integrate_player(&mut state);
        assert_eq!(state.player.pos.x, SCREEN_WIDTH);
    }

    #[test]
    fn test_player_wrap_boundary_equality_stays() {
        let mut state = GameState::new(1);
        // 319 + 1 = 320 is not > 320, so the player stays on the edge
        state.player.pos.x = 319.0;
        state.tilt.smoothed = 0.02;
        integrate_player(&mut state);
        assert_eq!(state.player.pos.x, SCREEN_WIDTH);
    }

    proptest! {
        #[test]
        fn player_stays_within_bounds(p in 0.0f32..=320.0, a in -1.0f32..1.0) {
            let mut state = GameState::new(1);
            state.player.pos.x = p;
            state.tilt.smoothed = a;
            integrate_player(&mut state);
            prop_assert!(state.player.pos.x >= 0.0);
            prop_assert!(state.player.pos.x <= SCREEN_WIDTH);
        }
    }

    #[test]
    fn test_spawn_timer_four_firings_over_three_seconds() {
        let mut state = GameState::new(42);
        // 180 ticks = 3 s = spawn firings at 0.75, 1.5, 2.25 and 3.0 s
        run_ticks(&mut state, &TickInput::default(), SPAWN_PERIOD_TICKS * 4);

        assert_eq!(state.aliens.len(), 4);
        for alien in &state.aliens {
            assert!(alien.pos.x >= 0.0 && alien.pos.x <= SCREEN_WIDTH);
            assert!(AlienKind::ALL.contains(&alien.kind));
        }
        // Stable id order
        for pair in state.aliens.windows(2) {
            assert!(pair[0].id < pair[1].id);
        }
    }

    #[test]
    fn test_torpedo_hits_hovering_alien() {
        let mut state = GameState::new(7);
        let alien = hover_alien(&mut state, Vec2::new(SCREEN_WIDTH / 2.0, 300.0));

        tick(&mut state, &TickInput { tilt: None, fire: true });
        run_ticks(&mut state, &TickInput::default(), 11);

        assert_eq!(state.score.value(), 5);
        assert_eq!(state.score.label(), "Score: 5");
        assert!(state.alien(alien).is_none());
        assert!(state.torpedoes.is_empty());
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].pos, Vec2::new(SCREEN_WIDTH / 2.0, 300.0));
    }

    #[test]
    fn test_three_hits_score_fifteen() {
        let mut state = GameState::new(7);

        // Three rounds, one hovering target each, all inside the first
        // spawn interval so no random alien interferes
        for round in 0..3u32 {
            hover_alien(&mut state, Vec2::new(SCREEN_WIDTH / 2.0, 300.0));
            tick(&mut state, &TickInput { tilt: None, fire: true });
            run_ticks(&mut state, &TickInput::default(), 11);
            assert_eq!(state.score.value(), (round + 1) * HIT_SCORE);
        }

        assert!(state.time_ticks < SPAWN_PERIOD_TICKS);
        assert_eq!(state.score.value(), 15);
        assert_eq!(state.score.label(), "Score: 15");
    }

    #[test]
    fn test_hit_emits_events_and_cue_data() {
        let mut state = GameState::new(3);
        hover_alien(&mut state, Vec2::new(SCREEN_WIDTH / 2.0, 300.0));

        tick(&mut state, &TickInput { tilt: None, fire: true });
        assert!(matches!(state.events.as_slice(), [GameEvent::TorpedoFired { .. }]));

        let mut destroyed = None;
        for _ in 0..11 {
            tick(&mut state, &TickInput::default());
            if let Some(event) = state
                .events
                .iter()
                .find(|e| matches!(e, GameEvent::AlienDestroyed { .. }))
            {
                destroyed = Some(event.clone());
                assert!(state.events.contains(&GameEvent::ScoreChanged { value: 5 }));
                break;
            }
        }
        assert!(matches!(
            destroyed,
            Some(GameEvent::AlienDestroyed { kind: AlienKind::Alien3, .. })
        ));
    }

    #[test]
    fn test_explosion_removed_after_linger() {
        let mut state = GameState::new(7);
        hover_alien(&mut state, Vec2::new(SCREEN_WIDTH / 2.0, 300.0));
        tick(&mut state, &TickInput { tilt: None, fire: true });
        run_ticks(&mut state, &TickInput::default(), 11);
        assert_eq!(state.explosions.len(), 1);

        run_ticks(&mut state, &TickInput::default(), EXPLOSION_LINGER_TICKS);
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn test_torpedo_expires_at_top_without_scoring() {
        let mut state = GameState::new(5);
        tick(&mut state, &TickInput { tilt: None, fire: true });
        let id = state.torpedoes[0].id;

        run_ticks(&mut state, &TickInput::default(), TORPEDO_FLIGHT_TICKS);
        assert!(state.torpedo(id).is_none());
        assert!(state.events.contains(&GameEvent::TorpedoExpired { id }));
        assert_eq!(state.score.value(), 0);
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn test_alien_expires_at_bottom_without_scoring() {
        let mut state = GameState::new(5);
        let id = state.spawn_alien(AlienKind::Alien, 160.0);

        run_ticks(&mut state, &TickInput::default(), ALIEN_FALL_TICKS);
        assert!(state.alien(id).is_none());
        assert!(state.events.contains(&GameEvent::AlienEscaped { id }));
        assert_eq!(state.score.value(), 0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        for frame in 0..200u64 {
            let input = TickInput {
                tilt: Some((frame as f32 * 0.05).sin()),
                fire: frame.is_multiple_of(30),
            };
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score.value(), state2.score.value());
        assert_eq!(state1.aliens.len(), state2.aliens.len());
        for (a, b) in state1.aliens.iter().zip(&state2.aliens) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.pos, b.pos);
        }
        assert_eq!(state1.player.pos, state2.player.pos);
    }
}
