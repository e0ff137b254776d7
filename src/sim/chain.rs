//! Chain-reaction propagator
//!
//! Flood-fill over the proximity graph of live bonus projectiles: every
//! unchained bonus projectile within range of the frontier is flagged,
//! linked with a jittered bolt, and becomes part of the frontier itself.
//! The flag doubles as the visited set, so a projectile joins at most one
//! cascade even when the proximity graph has cycles.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::*;

use super::state::{LightningBolt, Projectile};
use super::timer::Cooldown;

/// One projectile consumed by a cascade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainLink {
    pub projectile_id: u32,
    pub center: Vec2,
}

/// Build a jittered polyline bolt between two points. Also used for the
/// storm's decorative bolts.
pub fn bolt_between(rng: &mut Pcg32, from: Vec2, to: Vec2) -> LightningBolt {
    let delta = to - from;
    let perp = Vec2::new(-delta.y, delta.x).normalize_or_zero();

    let mut points = Vec::with_capacity(CHAIN_SEGMENTS + 1);
    points.push(from);
    for i in 1..CHAIN_SEGMENTS {
        let t = i as f32 / CHAIN_SEGMENTS as f32;
        points.push(from + delta * t + perp * rng.random_range(-15.0..15.0));
    }
    points.push(to);

    let mut timer = Cooldown::idle();
    timer.start(CHAIN_BOLT_TICKS);
    LightningBolt { points, timer }
}

/// Cascade outward from `origin`, flagging every reachable unchained bonus
/// projectile. Each new link gets a bolt from the projectile that reached it.
/// Returns the links in the order they were chained.
pub fn propagate(
    origin: Vec2,
    projectiles: &mut [Projectile],
    rng: &mut Pcg32,
    bolts: &mut Vec<LightningBolt>,
) -> Vec<ChainLink> {
    let mut links = Vec::new();
    let mut frontier = vec![origin];

    while let Some(from) = frontier.pop() {
        for p in projectiles.iter_mut() {
            if !p.bonus || p.chained {
                continue;
            }
            let center = p.center();
            if center.distance_squared(from) > CHAIN_RADIUS * CHAIN_RADIUS {
                continue;
            }
            p.chained = true;
            bolts.push(bolt_between(rng, from, center));
            links.push(ChainLink {
                projectile_id: p.id,
                center,
            });
            frontier.push(center);
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn bonus_at(id: u32, x: f32, y: f32) -> Projectile {
        Projectile {
            id,
            pos: Vec2::new(x, y),
            size: PROJECTILE_SIZE,
            speed: 3.0,
            bonus: true,
            chained: false,
        }
    }

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(99)
    }

    #[test]
    fn cascade_reaches_transitively_but_marks_once() {
        // A tight cycle near the origin plus a projectile reachable only
        // through the cascade, all inside each other's radius.
        let mut projectiles = vec![
            bonus_at(1, 50.0, 50.0),
            bonus_at(2, 100.0, 50.0),
            bonus_at(3, 50.0, 100.0),
            bonus_at(4, 250.0, 50.0), // >150 from origin, <150 from id 2
        ];
        let mut bolts = Vec::new();
        let links = propagate(
            Vec2::new(40.0, 40.0),
            &mut projectiles,
            &mut rng(),
            &mut bolts,
        );

        assert_eq!(links.len(), 4);
        assert_eq!(bolts.len(), 4);
        let mut ids: Vec<u32> = links.iter().map(|l| l.projectile_id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(projectiles.iter().all(|p| p.chained));
    }

    #[test]
    fn out_of_range_and_penalty_projectiles_untouched() {
        let mut projectiles = vec![
            bonus_at(1, 700.0, 500.0),
            Projectile {
                bonus: false,
                ..bonus_at(2, 50.0, 50.0)
            },
        ];
        let mut bolts = Vec::new();
        let links = propagate(
            Vec2::new(40.0, 40.0),
            &mut projectiles,
            &mut rng(),
            &mut bolts,
        );
        assert!(links.is_empty());
        assert!(bolts.is_empty());
        assert!(projectiles.iter().all(|p| !p.chained));
    }

    #[test]
    fn already_chained_projectiles_never_rejoin() {
        let mut projectiles = vec![bonus_at(1, 50.0, 50.0)];
        projectiles[0].chained = true;
        let mut bolts = Vec::new();
        let links = propagate(
            Vec2::new(40.0, 40.0),
            &mut projectiles,
            &mut rng(),
            &mut bolts,
        );
        assert!(links.is_empty());
    }

    #[test]
    fn bolts_span_the_linked_centers() {
        let mut projectiles = vec![bonus_at(1, 100.0, 40.0)];
        let origin = Vec2::new(40.0, 40.0);
        let mut bolts = Vec::new();
        let _ = propagate(origin, &mut projectiles, &mut rng(), &mut bolts);

        assert_eq!(bolts.len(), 1);
        let points = &bolts[0].points;
        assert_eq!(points.len(), CHAIN_SEGMENTS + 1);
        assert_eq!(points[0], origin);
        assert_eq!(*points.last().unwrap(), projectiles[0].center());
    }
}
