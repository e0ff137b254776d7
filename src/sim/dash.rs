//! Dash state machine
//!
//! Idle -> Dashing -> (Idle | Cooldown) -> Idle. One charge per dash; the
//! replenish cooldown starts only once every charge is spent. While dashing
//! the player ignores movement input and wraps across field edges instead of
//! clamping.

use glam::Vec2;
use rand_pcg::Pcg32;

use crate::consts::*;

use super::particles::{self, Particle};
use super::state::{DashState, Player, ScreenShake};

/// Wrap a coordinate so an entity fully off one edge re-enters the opposite
/// edge.
fn wrap(value: f32, extent: f32, size: f32) -> f32 {
    let span = extent + size;
    (value + size).rem_euclid(span) - size
}

/// Try to start a dash in `dir`. Refused while already dashing, without
/// charges, or with a zero direction. Diagonals are normalized to unit
/// length. Returns whether the dash started.
pub fn try_start(
    player: &mut Player,
    dir: Vec2,
    rng: &mut Pcg32,
    particles: &mut Vec<Particle>,
    shake: &mut ScreenShake,
) -> bool {
    if player.dash_state == DashState::Dashing
        || player.dashes_available == 0
        || dir == Vec2::ZERO
    {
        return false;
    }

    player.dash_state = DashState::Dashing;
    player.dash_dir = dir.normalize();
    player.dash_timer.start(DASH_DURATION_TICKS);
    player.dashes_available -= 1;

    particles::spawn_dash_burst(particles, rng, player.center(), player.dash_dir);
    shake.pulse(0.3);
    true
}

/// Advance dash movement and the dash/cooldown timers one tick.
pub fn update(player: &mut Player) {
    if player.dash_cooldown.tick() {
        player.dashes_available = MAX_DASHES;
        player.dash_state = DashState::Idle;
    }

    if player.dash_state != DashState::Dashing {
        return;
    }

    player.pos += player.dash_dir * DASH_SPEED;
    player.pos.x = wrap(player.pos.x, FIELD_WIDTH, player.size);
    player.pos.y = wrap(player.pos.y, FIELD_HEIGHT, player.size);

    if player.dash_timer.tick() {
        if player.dashes_available == 0 {
            player.dash_state = DashState::Cooldown;
            player.dash_cooldown.start(DASH_COOLDOWN_TICKS);
        } else {
            player.dash_state = DashState::Idle;
        }
    }
}

/// Apply normal directional movement, clamped to the field. Ignored while
/// dashing.
pub fn apply_movement(player: &mut Player, move_vec: Vec2) {
    if player.is_dashing() {
        return;
    }
    player.pos += move_vec * player.speed;
    player.pos.x = player.pos.x.clamp(0.0, FIELD_WIDTH - player.size);
    player.pos.y = player.pos.y.clamp(0.0, FIELD_HEIGHT - player.size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn fixtures() -> (Player, Pcg32, Vec<Particle>, ScreenShake) {
        (
            Player::default(),
            Pcg32::seed_from_u64(7),
            Vec::new(),
            ScreenShake::default(),
        )
    }

    #[test]
    fn right_trigger_consumes_one_charge() {
        let (mut player, mut rng, mut pool, mut shake) = fixtures();
        assert!(try_start(
            &mut player,
            Vec2::new(1.0, 0.0),
            &mut rng,
            &mut pool,
            &mut shake
        ));
        assert_eq!(player.dash_state, DashState::Dashing);
        assert_eq!(player.dashes_available, 1);
        assert_eq!(player.dash_dir, Vec2::new(1.0, 0.0));
        assert!(!pool.is_empty());
        assert!(shake.intensity > 0.0);
    }

    #[test]
    fn diagonal_direction_is_normalized() {
        let (mut player, mut rng, mut pool, mut shake) = fixtures();
        assert!(try_start(
            &mut player,
            Vec2::new(1.0, 1.0),
            &mut rng,
            &mut pool,
            &mut shake
        ));
        assert!((player.dash_dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cannot_retrigger_while_dashing() {
        let (mut player, mut rng, mut pool, mut shake) = fixtures();
        assert!(try_start(
            &mut player,
            Vec2::new(1.0, 0.0),
            &mut rng,
            &mut pool,
            &mut shake
        ));
        assert!(!try_start(
            &mut player,
            Vec2::new(-1.0, 0.0),
            &mut rng,
            &mut pool,
            &mut shake
        ));
        assert_eq!(player.dashes_available, 1);
    }

    #[test]
    fn cooldown_starts_only_when_charges_exhausted() {
        let (mut player, mut rng, mut pool, mut shake) = fixtures();

        assert!(try_start(
            &mut player,
            Vec2::new(1.0, 0.0),
            &mut rng,
            &mut pool,
            &mut shake
        ));
        for _ in 0..DASH_DURATION_TICKS {
            update(&mut player);
        }
        // One charge left: straight back to Idle, no cooldown
        assert_eq!(player.dash_state, DashState::Idle);
        assert!(!player.dash_cooldown.is_active());

        assert!(try_start(
            &mut player,
            Vec2::new(-1.0, 0.0),
            &mut rng,
            &mut pool,
            &mut shake
        ));
        for _ in 0..DASH_DURATION_TICKS {
            update(&mut player);
        }
        assert_eq!(player.dash_state, DashState::Cooldown);
        assert!(player.dash_cooldown.is_active());
        assert_eq!(player.dashes_available, 0);

        // No charges mid-cooldown, so triggers are refused
        assert!(!try_start(
            &mut player,
            Vec2::new(1.0, 0.0),
            &mut rng,
            &mut pool,
            &mut shake
        ));

        for _ in 0..DASH_COOLDOWN_TICKS {
            update(&mut player);
        }
        assert_eq!(player.dash_state, DashState::Idle);
        assert_eq!(player.dashes_available, MAX_DASHES);
    }

    #[test]
    fn dashing_wraps_across_field_edges() {
        let (mut player, mut rng, mut pool, mut shake) = fixtures();
        player.pos.x = FIELD_WIDTH - player.size;
        assert!(try_start(
            &mut player,
            Vec2::new(1.0, 0.0),
            &mut rng,
            &mut pool,
            &mut shake
        ));
        for _ in 0..3 {
            update(&mut player);
        }
        // Fully exited the right edge and re-entered from the left
        assert!(player.pos.x < 0.0);
    }

    #[test]
    fn movement_ignored_while_dashing_and_clamped_otherwise() {
        let (mut player, mut rng, mut pool, mut shake) = fixtures();
        player.pos.x = 2.0;
        apply_movement(&mut player, Vec2::new(-1.0, 0.0));
        assert_eq!(player.pos.x, 0.0);

        assert!(try_start(
            &mut player,
            Vec2::new(1.0, 0.0),
            &mut rng,
            &mut pool,
            &mut shake
        ));
        let before = player.pos;
        apply_movement(&mut player, Vec2::new(-1.0, -1.0));
        assert_eq!(player.pos, before);
    }
}
