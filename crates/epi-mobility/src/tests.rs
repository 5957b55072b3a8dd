//! Unit tests for epi-mobility.

#[cfg(test)]
mod helpers {
    use epi_agent::{AgentStore, PopulationBuilder, PopulationParams, RadiusDistribution};
    use epi_core::SimRng;

    pub fn population(n: usize, plane: f64, move_radius: f64) -> AgentStore {
        let params = PopulationParams {
            move_radius: RadiusDistribution::fixed(move_radius),
            ..Default::default()
        };
        PopulationBuilder::new(n, plane).params(params).build(&mut SimRng::new(11)).unwrap()
    }
}

#[cfg(test)]
mod state {
    use epi_core::Position;

    use crate::MotionState;

    #[test]
    fn orbit_passes_through_start() {
        let start = Position::new(4.0, 7.0);
        let s = MotionState::orbit_through(start, 2.5, 1.1);
        let back = s.orbit_point(2.5);
        assert!((back.x - start.x).abs() < 1e-12);
        assert!((back.y - start.y).abs() < 1e-12);
    }

    #[test]
    fn center_is_radius_away() {
        let start = Position::new(10.0, 10.0);
        let s = MotionState::orbit_through(start, 3.0, 0.0);
        assert_eq!(s.orbit_center, Position::new(7.0, 10.0));
    }
}

#[cfg(test)]
mod static_policy {
    use epi_core::SimRng;

    use super::helpers::population;
    use crate::{MobilityEngine, Static};

    #[test]
    fn positions_never_change() {
        let mut agents = population(50, 20.0, 1.0);
        let before = agents.position.clone();
        let mut rng = SimRng::new(1);
        let mut engine = MobilityEngine::new(Static, 20.0, &agents, &mut rng).unwrap();
        assert!(engine.is_static());
        for _ in 0..10 {
            engine.advance(&mut agents, &mut rng);
        }
        assert_eq!(agents.position, before);
    }

    #[test]
    fn consumes_no_randomness() {
        let mut agents = population(50, 20.0, 1.0);
        let mut rng = SimRng::new(1);
        let mut engine = MobilityEngine::new(Static, 20.0, &agents, &mut rng).unwrap();
        engine.advance(&mut agents, &mut rng);
        let a: u64 = rng.random();
        let b: u64 = SimRng::new(1).random();
        assert_eq!(a, b);
    }
}

#[cfg(test)]
mod random_walk {
    use epi_core::{EpiError, Position, SimRng};

    use super::helpers::population;
    use crate::{MobilityEngine, MotionState, MovementPolicy, RandomWalk};

    #[test]
    fn step_length_matches_fixed_mean() {
        let walk = RandomWalk::new(1.5, 0.0).unwrap();
        let mut rng = SimRng::new(4);
        let mut state = MotionState::default();
        let from = Position::new(50.0, 50.0);
        for _ in 0..100 {
            let to = walk.step(from, &mut state, 0.0, 100.0, &mut rng);
            assert!((from.distance(to) - 1.5).abs() < 1e-9);
        }
    }

    #[test]
    fn corner_steps_clamp_to_boundary() {
        let walk = RandomWalk::new(5.0, 0.0).unwrap();
        let mut rng = SimRng::new(8);
        let mut state = MotionState::default();
        for _ in 0..200 {
            let to = walk.step(Position::new(0.0, 10.0), &mut state, 0.0, 10.0, &mut rng);
            assert!(to.within_plane(10.0));
        }
    }

    #[test]
    fn all_agents_stay_on_plane() {
        let mut agents = population(200, 10.0, 0.0);
        let mut rng = SimRng::new(2);
        let mut engine = MobilityEngine::new(RandomWalk::new(3.0, 1.0).unwrap(), 10.0, &agents, &mut rng).unwrap();
        for _ in 0..50 {
            engine.advance(&mut agents, &mut rng);
            assert!(agents.position.iter().all(|p| p.within_plane(10.0)));
        }
    }

    #[test]
    fn out_of_plane_lands_exactly_on_edge() {
        let walk = RandomWalk::new(100.0, 0.0).unwrap();
        let mut rng = SimRng::new(3);
        let mut state = MotionState::default();
        let to = walk.step(Position::new(5.0, 5.0), &mut state, 0.0, 10.0, &mut rng);
        // A 100-unit step from the middle leaves the plane on at least one axis.
        assert!(to.x == 0.0 || to.x == 10.0 || to.y == 0.0 || to.y == 10.0);
    }

    #[test]
    fn negative_mean_rejected() {
        let err = RandomWalk::new(-1.0, 0.5).unwrap_err();
        assert_eq!(err, EpiError::Negative { name: "move_mean", value: -1.0 });
    }

    #[test]
    fn deterministic_with_seed() {
        let run = || {
            let mut agents = population(30, 10.0, 0.0);
            let mut rng = SimRng::new(99);
            let mut engine = MobilityEngine::new(RandomWalk::new(1.0, 0.5).unwrap(), 10.0, &agents, &mut rng).unwrap();
            for _ in 0..5 {
                engine.advance(&mut agents, &mut rng);
            }
            agents.position
        };
        assert_eq!(run(), run());
    }
}

#[cfg(test)]
mod periodic {
    use epi_core::{AgentId, EpiError, SimRng};

    use super::helpers::population;
    use crate::{MobilityEngine, PeriodicOrbit, DEFAULT_ORBIT_DIVISOR};

    #[test]
    fn defaults() {
        let p = PeriodicOrbit::default();
        assert_eq!(p.divisor(), DEFAULT_ORBIT_DIVISOR);
        assert!((p.std_dev() - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
    }

    #[test]
    fn zero_divisor_is_config_error() {
        assert!(matches!(PeriodicOrbit::new(0.0, 1.0), Err(EpiError::Config(_))));
        assert!(matches!(PeriodicOrbit::new(-2.0, 1.0), Err(EpiError::Negative { .. })));
    }

    #[test]
    fn center_is_fixed_and_radius_held() {
        // Large plane so clamping never bends the orbit.
        let mut agents = population(20, 1_000.0, 2.0);
        for p in agents.position.iter_mut() {
            p.x = p.x * 0.5 + 250.0;
            p.y = p.y * 0.5 + 250.0;
        }
        let mut rng = SimRng::new(6);
        let mut engine = MobilityEngine::new(PeriodicOrbit::default(), 1_000.0, &agents, &mut rng).unwrap();
        let centers: Vec<_> = engine.states.iter().map(|s| s.orbit_center).collect();
        for _ in 0..12 {
            engine.advance(&mut agents, &mut rng);
            for (i, c) in centers.iter().enumerate() {
                assert_eq!(engine.state(AgentId(i as u32)).orbit_center, *c);
                assert!((agents.position[i].distance(*c) - 2.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn zero_std_dev_advances_exactly() {
        let mut agents = population(3, 1_000.0, 1.0);
        let mut rng = SimRng::new(7);
        let mut engine = MobilityEngine::new(PeriodicOrbit::new(4.0, 0.0).unwrap(), 1_000.0, &agents, &mut rng).unwrap();
        let theta0 = engine.states[0].heading;
        assert!((theta0 - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        engine.advance(&mut agents, &mut rng);
        assert!((engine.states[0].heading - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn clamped_on_small_plane() {
        let mut agents = population(100, 2.0, 5.0);
        let mut rng = SimRng::new(5);
        let mut engine = MobilityEngine::new(PeriodicOrbit::default(), 2.0, &agents, &mut rng).unwrap();
        for _ in 0..20 {
            engine.advance(&mut agents, &mut rng);
            assert!(agents.position.iter().all(|p| p.within_plane(2.0)));
        }
    }
}
