//! Unit tests for mob-world.

use mob_core::{AgentHandle, Vec3};

use crate::{BlockInfo, FlatWorld, WorldQuery};

// ── BlockInfo ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod block_info {
    use super::*;

    #[test]
    fn footing_requires_solid_and_dry() {
        assert!(BlockInfo::SOLID.is_footing());
        assert!(!BlockInfo::AIR.is_footing());
        assert!(!BlockInfo::LIQUID.is_footing());
        assert!(!BlockInfo { solid: true, liquid: true }.is_footing());
    }
}

// ── FlatWorld terrain ─────────────────────────────────────────────────────────

#[cfg(test)]
mod terrain {
    use super::*;

    #[test]
    fn default_ground_surface_at_zero() {
        let world = FlatWorld::new();
        assert_eq!(world.classify_block(Vec3::new(0.0, -1.0, 0.0)), BlockInfo::SOLID);
        assert_eq!(world.classify_block(Vec3::new(0.0, 0.0, 0.0)), BlockInfo::AIR);
        assert_eq!(world.classify_block(Vec3::new(0.0, 5.0, 0.0)), BlockInfo::AIR);
    }

    #[test]
    fn raised_column() {
        let mut world = FlatWorld::new();
        world.set_ground(2, 0, 3);
        assert_eq!(world.classify_block(Vec3::new(2.0, 2.0, 0.0)), BlockInfo::SOLID);
        assert_eq!(world.classify_block(Vec3::new(2.0, 3.0, 0.0)), BlockInfo::AIR);
        // Neighboring column unaffected.
        assert_eq!(world.classify_block(Vec3::new(3.0, 2.0, 0.0)), BlockInfo::AIR);
    }

    #[test]
    fn obstacle_overrides_air() {
        let mut world = FlatWorld::new();
        world.set_obstacle(1, 0, 1);
        assert_eq!(world.classify_block(Vec3::new(1.5, 0.5, 1.5)), BlockInfo::SOLID);
    }

    #[test]
    fn liquid_wins_over_column_solid() {
        let mut world = FlatWorld::new();
        world.set_liquid(0, -1, 0);
        assert_eq!(world.classify_block(Vec3::new(0.0, -1.0, 0.0)), BlockInfo::LIQUID);
        assert!(!world.classify_block(Vec3::new(0.0, -1.0, 0.0)).is_footing());
    }

    #[test]
    fn negative_coordinates_floor_correctly() {
        let world = FlatWorld::new();
        // -0.5 floors to cell -1, which is below ground level 0 → solid.
        assert_eq!(world.classify_block(Vec3::new(-0.5, -0.5, -0.5)), BlockInfo::SOLID);
    }
}

// ── FlatWorld agents ──────────────────────────────────────────────────────────

#[cfg(test)]
mod agents {
    use super::*;

    #[test]
    fn spawn_assigns_sequential_handles() {
        let mut world = FlatWorld::new();
        let a = world.spawn(Vec3::ZERO);
        let b = world.spawn(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(a, AgentHandle(0));
        assert_eq!(b, AgentHandle(1));
        assert_eq!(world.agent_count(), 2);
    }

    #[test]
    fn query_nearby_is_inclusive_box_in_handle_order() {
        let mut world = FlatWorld::new();
        let a = world.spawn(Vec3::new(0.0, 0.0, 0.0));
        let b = world.spawn(Vec3::new(3.0, 0.0, 0.0));
        let c = world.spawn(Vec3::new(0.0, 0.0, 2.0));

        let found = world.query_nearby(Vec3::ZERO, 2.0, 1.0, 2.0);
        assert_eq!(found, vec![a, c]);

        // Box edge is inclusive.
        let found = world.query_nearby(Vec3::ZERO, 3.0, 1.0, 2.0);
        assert_eq!(found, vec![a, b, c]);
    }

    #[test]
    fn query_nearby_includes_caller_position() {
        let mut world = FlatWorld::new();
        let a = world.spawn(Vec3::ZERO);
        assert_eq!(world.query_nearby(Vec3::ZERO, 1.0, 1.0, 1.0), vec![a]);
    }

    #[test]
    fn set_velocity_and_integrate() {
        let mut world = FlatWorld::new();
        let a = world.spawn(Vec3::ZERO);
        world.set_velocity(a, Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(world.velocity(a), Vec3::new(0.5, 0.0, 0.0));
        world.integrate();
        world.integrate();
        assert_eq!(world.position(a), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn teleport_clears_velocity() {
        let mut world = FlatWorld::new();
        let a = world.spawn(Vec3::ZERO);
        world.set_velocity(a, Vec3::new(1.0, 0.0, 0.0));
        world.teleport(a, Vec3::new(9.0, 0.0, 9.0));
        assert_eq!(world.position(a), Vec3::new(9.0, 0.0, 9.0));
        assert_eq!(world.velocity(a), Vec3::ZERO);
    }
}
