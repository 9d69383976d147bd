//! Unit tests for mob-nav.

use mob_core::{AgentHandle, Vec3};
use mob_world::{FlatWorld, WorldQuery};

use crate::{MovementConstraints, NavError, SteeringNavigator};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn navigator(speed: f64, precision: f64) -> SteeringNavigator {
    SteeringNavigator::new(speed, precision, MovementConstraints::default()).unwrap()
}

fn assert_vec_close(got: Vec3, want: Vec3) {
    assert!(
        got.distance(want) < 1e-9,
        "expected {want}, got {got}"
    );
}

/// Carve a pit (no footing) in the column containing `(x, z)`.
fn dig_pit(world: &mut FlatWorld, x: i64, z: i64) {
    world.set_ground(x, z, -10);
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use super::*;

    #[test]
    fn valid_params_accepted() {
        assert!(SteeringNavigator::new(0.5, 1.0, MovementConstraints::default()).is_ok());
        assert!(SteeringNavigator::new(0.1, 0.0, MovementConstraints { max_climb: 0.0, max_fall: 0.0 }).is_ok());
    }

    #[test]
    fn invalid_speed_rejected() {
        for speed in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = SteeringNavigator::new(speed, 1.0, MovementConstraints::default());
            assert!(matches!(err, Err(NavError::Config(_))), "speed {speed} accepted");
        }
    }

    #[test]
    fn invalid_precision_rejected() {
        assert!(matches!(
            SteeringNavigator::new(1.0, -0.1, MovementConstraints::default()),
            Err(NavError::Config(_))
        ));
    }

    #[test]
    fn negative_constraints_rejected() {
        assert!(matches!(
            SteeringNavigator::new(1.0, 1.0, MovementConstraints { max_climb: -1.0, max_fall: 3.0 }),
            Err(NavError::Config(_))
        ));
        assert!(matches!(
            SteeringNavigator::new(1.0, 1.0, MovementConstraints { max_climb: 1.0, max_fall: f64::NAN }),
            Err(NavError::Config(_))
        ));
    }
}

// ── Step validity ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod step_validity {
    use super::*;

    #[test]
    fn flat_ground_step_is_valid() {
        let world = FlatWorld::new();
        let nav = navigator(0.5, 1.0);
        assert!(nav.step_valid(&world, Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0)));
    }

    #[test]
    fn missing_footing_invalid() {
        let mut world = FlatWorld::new();
        dig_pit(&mut world, 1, 0);
        let nav = navigator(0.5, 1.0);
        assert!(!nav.step_valid(&world, Vec3::ZERO, Vec3::new(1.5, 0.0, 0.0)));
    }

    #[test]
    fn liquid_footing_invalid() {
        let mut world = FlatWorld::new();
        world.set_liquid(1, -1, 0);
        let nav = navigator(0.5, 1.0);
        assert!(!nav.step_valid(&world, Vec3::ZERO, Vec3::new(1.5, 0.0, 0.5)));
    }

    #[test]
    fn feet_obstruction_invalid() {
        let mut world = FlatWorld::new();
        world.set_obstacle(1, 0, 0);
        let nav = navigator(0.5, 1.0);
        assert!(!nav.step_valid(&world, Vec3::ZERO, Vec3::new(1.5, 0.0, 0.5)));
    }

    #[test]
    fn head_obstruction_invalid() {
        let mut world = FlatWorld::new();
        world.set_obstacle(1, 1, 0);
        let nav = navigator(0.5, 1.0);
        assert!(!nav.step_valid(&world, Vec3::ZERO, Vec3::new(1.5, 0.0, 0.5)));
    }

    #[test]
    fn climb_limit_enforced() {
        let mut world = FlatWorld::new();
        world.set_ground(1, 0, 2); // plateau with surface at y = 2
        let nav = SteeringNavigator::new(
            1.0,
            0.5,
            MovementConstraints { max_climb: 1.0, max_fall: 3.0 },
        )
        .unwrap();
        // Landing on the plateau means a 2.0 vertical delta — beyond max_climb.
        assert!(!nav.step_valid(&world, Vec3::ZERO, Vec3::new(1.5, 2.0, 0.5)));

        let tall = SteeringNavigator::new(
            1.0,
            0.5,
            MovementConstraints { max_climb: 2.0, max_fall: 3.0 },
        )
        .unwrap();
        assert!(tall.step_valid(&world, Vec3::ZERO, Vec3::new(1.5, 2.0, 0.5)));
    }

    #[test]
    fn fall_limit_enforced() {
        let mut world = FlatWorld::new();
        world.set_ground(0, 0, 4); // pillar under the agent, surface at y = 4
        let from = Vec3::new(0.5, 4.0, 0.5);
        let landing = Vec3::new(1.5, 0.0, 0.5); // drop of 4.0 onto flat ground

        let cautious = SteeringNavigator::new(
            1.0,
            0.5,
            MovementConstraints { max_climb: 1.0, max_fall: 3.0 },
        )
        .unwrap();
        assert!(!cautious.step_valid(&world, from, landing));

        let daring = SteeringNavigator::new(
            1.0,
            0.5,
            MovementConstraints { max_climb: 1.0, max_fall: 5.0 },
        )
        .unwrap();
        assert!(daring.step_valid(&world, from, landing));
    }
}

// ── move_to ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod move_to {
    use super::*;

    #[test]
    fn within_precision_applies_no_velocity() {
        // Spec scenario: precision 1.0, speed 0.5, target 0.5 away.
        let mut world = FlatWorld::new();
        let agent = world.spawn(Vec3::ZERO);
        let mut nav = navigator(0.5, 1.0);

        nav.move_to(agent, Vec3::new(0.0, 0.0, 0.5), &mut world).unwrap();
        assert_eq!(world.velocity(agent), Vec3::ZERO);
        assert!(nav.has_reached_destination(agent, &world));
    }

    #[test]
    fn direct_path_full_speed() {
        let mut world = FlatWorld::new();
        let agent = world.spawn(Vec3::ZERO);
        let mut nav = navigator(0.5, 1.0);

        nav.move_to(agent, Vec3::new(0.0, 0.0, 10.0), &mut world).unwrap();
        assert_vec_close(world.velocity(agent), Vec3::new(0.0, 0.0, 0.5));
        assert!(!nav.has_reached_destination(agent, &world));
    }

    #[test]
    fn blocked_direct_takes_first_probe_at_reduced_speed() {
        // Pit straight ahead (+z); the first probe offset (+x) is clear.
        let mut world = FlatWorld::new();
        let agent = world.spawn(Vec3::new(0.5, 0.0, 0.5));
        dig_pit(&mut world, 0, 1);
        let mut nav = navigator(1.0, 0.5);

        nav.move_to(agent, Vec3::new(0.5, 0.0, 10.0), &mut world).unwrap();

        let expected_dir = Vec3::new(1.0, 0.0, 1.0).normalized().unwrap();
        assert_vec_close(world.velocity(agent), expected_dir * 0.8);
    }

    #[test]
    fn probe_order_is_fixed() {
        // Block the direct step and the +x probe; -x must win even though
        // later probes would also be valid.
        let mut world = FlatWorld::new();
        let agent = world.spawn(Vec3::new(0.5, 0.0, 0.5));
        dig_pit(&mut world, 0, 1);
        dig_pit(&mut world, 1, 1); // where the +x probe candidate lands
        let mut nav = navigator(1.0, 0.5);

        nav.move_to(agent, Vec3::new(0.5, 0.0, 10.0), &mut world).unwrap();

        let expected_dir = Vec3::new(-1.0, 0.0, 1.0).normalized().unwrap();
        assert_vec_close(world.velocity(agent), expected_dir * 0.8);
    }

    #[test]
    fn fully_blocked_returns_blocked_and_preserves_state() {
        // Pits in every column except the one under the agent.
        let mut world = FlatWorld::new();
        let agent = world.spawn(Vec3::new(0.5, 0.0, 0.5));
        for x in -2..=2 {
            for z in -2..=2 {
                if (x, z) != (0, 0) {
                    dig_pit(&mut world, x, z);
                }
            }
        }
        let prior = Vec3::new(0.1, 0.0, 0.0);
        world.set_velocity(agent, prior);

        let mut nav = navigator(1.0, 0.5);
        let target = Vec3::new(0.5, 0.0, 10.0);
        let err = nav.move_to(agent, target, &mut world).unwrap_err();

        assert!(matches!(err, NavError::Blocked { .. }));
        assert_eq!(world.velocity(agent), prior);
        assert_eq!(nav.destination().unwrap().target, target);

        // Terrain opens up: the retry succeeds with the same destination.
        world.set_ground(0, 1, 0);
        nav.move_to(agent, target, &mut world).unwrap();
        assert_vec_close(world.velocity(agent), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn destination_recorded_even_when_arrived() {
        let mut world = FlatWorld::new();
        let agent = world.spawn(Vec3::ZERO);
        let mut nav = navigator(0.5, 1.0);

        assert!(nav.destination().is_none());
        nav.move_to(agent, Vec3::new(0.2, 0.0, 0.2), &mut world).unwrap();
        assert!(nav.destination().is_some());
    }

    #[test]
    fn walks_to_goal_over_ticks() {
        let mut world = FlatWorld::new();
        let agent = world.spawn(Vec3::new(0.5, 0.0, 0.5));
        let mut nav = navigator(0.5, 0.75);
        let target = Vec3::new(0.5, 0.0, 4.5);

        for _ in 0..16 {
            if nav.has_reached_destination(agent, &world) {
                break;
            }
            nav.move_to(agent, target, &mut world).unwrap();
            world.integrate();
        }
        assert!(nav.has_reached_destination(agent, &world));
        assert!(world.position(agent).distance(target) <= 0.75);
    }
}

// ── stop / has_reached_destination ───────────────────────────────────────────

#[cfg(test)]
mod stop {
    use super::*;

    #[test]
    fn stop_zeroes_velocity_and_clears_destination() {
        let mut world = FlatWorld::new();
        let agent = world.spawn(Vec3::ZERO);
        let mut nav = navigator(0.5, 1.0);

        nav.move_to(agent, Vec3::new(0.0, 0.0, 10.0), &mut world).unwrap();
        assert!(world.velocity(agent) != Vec3::ZERO);

        nav.stop(agent, &mut world);
        assert_eq!(world.velocity(agent), Vec3::ZERO);
        assert!(nav.destination().is_none());
        assert!(!nav.has_reached_destination(agent, &world));

        // Idempotent.
        nav.stop(agent, &mut world);
        assert_eq!(world.velocity(agent), Vec3::ZERO);
    }

    #[test]
    fn no_destination_means_not_reached() {
        let world = FlatWorld::new();
        let nav = navigator(0.5, 1.0);
        assert!(!nav.has_reached_destination(AgentHandle(0), &world));
    }
}
