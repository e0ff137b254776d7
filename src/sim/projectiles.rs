//! Falling projectile lifecycle
//!
//! Spawning, motion, despawn past the bottom edge, and player-overlap
//! resolution. Collisions are reported as events; the orchestrator routes
//! them into the combo/streak/ability subsystems.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

use super::state::{GameState, Player, Projectile};

/// A resolved player/projectile overlap, carrying the projectile center for
/// particle and zone tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitEvent {
    Bonus { center: Vec2 },
    Penalty { center: Vec2 },
}

/// Axis-aligned overlap between two squares addressed by top-left corner.
pub fn aabb_overlap(a_pos: Vec2, a_size: f32, b_pos: Vec2, b_size: f32) -> bool {
    a_pos.x < b_pos.x + b_size
        && a_pos.x + a_size > b_pos.x
        && a_pos.y < b_pos.y + b_size
        && a_pos.y + a_size > b_pos.y
}

/// Each tick: with fixed probability, drop one projectile at a random column.
pub fn try_spawn(state: &mut GameState) {
    if !state.rng.random_bool(PROJECTILE_SPAWN_CHANCE) {
        return;
    }
    let bonus = state.rng.random_bool(BONUS_CHANCE);
    let x = state.rng.random_range(0.0..(FIELD_WIDTH - PROJECTILE_SIZE));
    let speed = state.rng.random_range(PROJECTILE_MIN_SPEED..PROJECTILE_MAX_SPEED);
    let id = state.next_entity_id();
    state.projectiles.push(Projectile {
        id,
        pos: Vec2::new(x, 0.0),
        size: PROJECTILE_SIZE,
        speed,
        bonus,
        chained: false,
    });
}

/// Move every projectile down by its speed, dropping any past the bottom edge.
pub fn advance(projectiles: &mut Vec<Projectile>) {
    projectiles.retain_mut(|p| {
        p.pos.y += p.speed;
        p.pos.y <= FIELD_HEIGHT
    });
}

/// Resolve every player overlap this tick, in back-to-front index order.
/// Overlapping projectiles are removed and reported; there is no early exit,
/// so several hits can land in one tick.
pub fn resolve_collisions(player: &Player, projectiles: &mut Vec<Projectile>) -> Vec<HitEvent> {
    let mut events = Vec::new();
    let mut i = projectiles.len();
    while i > 0 {
        i -= 1;
        if aabb_overlap(player.pos, player.size, projectiles[i].pos, projectiles[i].size) {
            let hit = projectiles.remove(i);
            let center = hit.center();
            events.push(if hit.bonus {
                HitEvent::Bonus { center }
            } else {
                HitEvent::Penalty { center }
            });
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projectile(id: u32, pos: Vec2, bonus: bool) -> Projectile {
        Projectile {
            id,
            pos,
            size: PROJECTILE_SIZE,
            speed: 3.0,
            bonus,
            chained: false,
        }
    }

    #[test]
    fn advance_removes_past_bottom() {
        let mut projectiles = vec![
            projectile(1, Vec2::new(10.0, FIELD_HEIGHT - 1.0), true),
            projectile(2, Vec2::new(10.0, 10.0), false),
        ];
        advance(&mut projectiles);
        assert_eq!(projectiles.len(), 1);
        assert_eq!(projectiles[0].id, 2);
        assert!((projectiles[0].pos.y - 13.0).abs() < f32::EPSILON);
    }

    #[test]
    fn all_overlaps_resolve_back_to_front() {
        let player = Player::default();
        let on_player = player.pos;
        let mut projectiles = vec![
            projectile(1, on_player, true),
            projectile(2, Vec2::new(0.0, 0.0), false),
            projectile(3, on_player + Vec2::splat(4.0), false),
        ];
        let events = resolve_collisions(&player, &mut projectiles);
        // Both overlapping projectiles resolved in one tick, last index first
        assert_eq!(
            events,
            vec![
                HitEvent::Penalty {
                    center: on_player + Vec2::splat(4.0 + PROJECTILE_SIZE / 2.0)
                },
                HitEvent::Bonus {
                    center: on_player + Vec2::splat(PROJECTILE_SIZE / 2.0)
                },
            ]
        );
        assert_eq!(projectiles.len(), 1);
        assert_eq!(projectiles[0].id, 2);
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let player = Player::default();
        let beside = player.pos + Vec2::new(player.size, 0.0);
        assert!(!aabb_overlap(
            player.pos,
            player.size,
            beside,
            PROJECTILE_SIZE
        ));
    }

    #[test]
    fn spawn_rate_is_roughly_two_percent() {
        let mut state = GameState::new(1234);
        for _ in 0..10_000 {
            try_spawn(&mut state);
        }
        let spawned = state.projectiles.len();
        assert!((100..400).contains(&spawned), "spawned {spawned}");
        assert!(state.projectiles.iter().any(|p| p.bonus));
        assert!(state.projectiles.iter().any(|p| !p.bonus));
        for p in &state.projectiles {
            assert!((PROJECTILE_MIN_SPEED..PROJECTILE_MAX_SPEED).contains(&p.speed));
            assert!((0.0..=FIELD_WIDTH - PROJECTILE_SIZE).contains(&p.pos.x));
        }
    }
}
