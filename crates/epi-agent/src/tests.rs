//! Unit tests for epi-agent.

#[cfg(test)]
mod store {
    use epi_core::{AgentId, EpiError, SimRng};

    use crate::{PopulationBuilder, PopulationParams, RadiusDistribution};

    fn small_store() -> crate::AgentStore {
        let params = PopulationParams {
            high_transmission_prob: 0.5,
            kernel_radius:          RadiusDistribution::fixed(2.0),
            move_radius:            RadiusDistribution::fixed(1.0),
        };
        PopulationBuilder::new(10, 20.0).params(params).build(&mut SimRng::new(1)).unwrap()
    }

    #[test]
    fn soa_lengths_match_count() {
        let store = small_store();
        assert_eq!(store.count, 10);
        assert_eq!(store.position.len(), 10);
        assert_eq!(store.high_transmission.len(), 10);
        assert_eq!(store.kernel_radius.len(), 10);
        assert_eq!(store.move_radius.len(), 10);
    }

    #[test]
    fn agent_view_reads_every_array() {
        let store = small_store();
        let a = store.agent(AgentId(3));
        assert_eq!(a.id, AgentId(3));
        assert_eq!(a.position, store.position[3]);
        assert_eq!(a.high_transmission, store.high_transmission[3]);
        assert_eq!(a.kernel_radius, 2.0);
        assert_eq!(a.move_radius, 1.0);
    }

    #[test]
    fn try_agent_out_of_range() {
        let store = small_store();
        let err = store.try_agent(AgentId(10)).unwrap_err();
        assert_eq!(err, EpiError::AgentNotFound { agent: AgentId(10), population: 10 });
        assert!(store.try_agent(AgentId(9)).is_ok());
    }

    #[test]
    fn drawn_store_validates() {
        assert!(small_store().validate(20.0).is_ok());
    }

    #[test]
    fn validate_rejects_malformed_store() {
        let mut store = small_store();
        store.high_transmission.pop();
        assert!(matches!(store.validate(20.0), Err(EpiError::Config(msg)) if msg.contains("high_transmission")));

        let mut store = small_store();
        store.position[0].y = f64::NAN;
        assert!(matches!(store.validate(20.0), Err(EpiError::NotFinite { name: "position.y", .. })));

        let store = small_store();
        assert!(matches!(store.validate(1.0), Err(EpiError::Config(msg)) if msg.contains("outside")));

        let mut store = small_store();
        store.kernel_radius[9] = f64::NEG_INFINITY;
        assert!(matches!(store.validate(20.0), Err(EpiError::NotFinite { name: "kernel_radius", .. })));
    }

    #[test]
    fn agent_ids_ascending() {
        let store = small_store();
        let ids: Vec<AgentId> = store.agent_ids().collect();
        assert_eq!(ids.first(), Some(&AgentId(0)));
        assert_eq!(ids.last(), Some(&AgentId(9)));
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}

#[cfg(test)]
mod builder {
    use epi_core::{EpiError, SimRng};

    use crate::{PopulationBuilder, PopulationParams, RadiusDistribution};

    #[test]
    fn positions_inside_plane() {
        let store = PopulationBuilder::new(500, 50.0).build(&mut SimRng::new(3)).unwrap();
        assert!(store.position.iter().all(|p| p.within_plane(50.0)));
    }

    #[test]
    fn same_seed_same_population() {
        let params = PopulationParams {
            high_transmission_prob: 0.2,
            kernel_radius:          RadiusDistribution::normal(2.0, 0.5),
            move_radius:            RadiusDistribution::normal(1.0, 0.1),
        };
        let a = PopulationBuilder::new(200, 30.0).params(params).build(&mut SimRng::new(9)).unwrap();
        let b = PopulationBuilder::new(200, 30.0).params(params).build(&mut SimRng::new(9)).unwrap();
        assert_eq!(a.position, b.position);
        assert_eq!(a.high_transmission, b.high_transmission);
        assert_eq!(a.kernel_radius, b.kernel_radius);
        assert_eq!(a.move_radius, b.move_radius);
    }

    #[test]
    fn zero_ss_probability_flags_nobody() {
        let store = PopulationBuilder::new(300, 10.0).build(&mut SimRng::new(4)).unwrap();
        assert_eq!(store.high_transmission_count(), 0);
    }

    #[test]
    fn certain_ss_probability_flags_everybody() {
        let params = PopulationParams { high_transmission_prob: 1.0, ..Default::default() };
        let store = PopulationBuilder::new(300, 10.0).params(params).build(&mut SimRng::new(4)).unwrap();
        assert_eq!(store.high_transmission_count(), 300);
    }

    #[test]
    fn ss_fraction_roughly_matches() {
        let params = PopulationParams { high_transmission_prob: 0.25, ..Default::default() };
        let store = PopulationBuilder::new(20_000, 10.0).params(params).build(&mut SimRng::new(8)).unwrap();
        let frac = store.high_transmission_count() as f64 / 20_000.0;
        assert!((frac - 0.25).abs() < 0.02, "fraction {frac}");
    }

    #[test]
    fn fixed_radius_is_exact() {
        let params = PopulationParams {
            kernel_radius: RadiusDistribution::fixed(3.5),
            ..Default::default()
        };
        let store = PopulationBuilder::new(50, 10.0).params(params).build(&mut SimRng::new(2)).unwrap();
        assert!(store.kernel_radius.iter().all(|&r| r == 3.5));
    }

    #[test]
    fn empty_population_is_fine() {
        let store = PopulationBuilder::new(0, 10.0).build(&mut SimRng::new(2)).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn bad_probability_rejected() {
        let params = PopulationParams { high_transmission_prob: 1.2, ..Default::default() };
        let err = PopulationBuilder::new(5, 10.0).params(params).build(&mut SimRng::new(0)).unwrap_err();
        assert!(matches!(err, EpiError::Probability { name: "high_transmission_prob", .. }));
    }

    #[test]
    fn negative_radius_rejected() {
        let params = PopulationParams {
            move_radius: RadiusDistribution::normal(-1.0, 0.0),
            ..Default::default()
        };
        let err = PopulationBuilder::new(5, 10.0).params(params).build(&mut SimRng::new(0)).unwrap_err();
        assert!(matches!(err, EpiError::Negative { name: "move_radius.mean", .. }));
    }

    #[test]
    fn negative_plane_rejected() {
        let err = PopulationBuilder::new(5, -1.0).build(&mut SimRng::new(0)).unwrap_err();
        assert!(matches!(err, EpiError::Negative { name: "plane_size", .. }));
    }
}
