//! Unit tests for epi-kernel.
//!
//! Agents are built by hand so distances are exact.

#[cfg(test)]
mod helpers {
    use epi_agent::Agent;
    use epi_core::{AgentId, Position};

    pub fn agent_at(id: u32, x: f64, y: f64) -> Agent {
        Agent {
            id:                AgentId(id),
            position:          Position::new(x, y),
            high_transmission: false,
            kernel_radius:     0.0,
            move_radius:       0.0,
        }
    }

    pub fn spreader_at(id: u32, x: f64, y: f64) -> Agent {
        Agent { high_transmission: true, ..agent_at(id, x, y) }
    }
}

#[cfg(test)]
mod falloff {
    use crate::falloff;

    #[test]
    fn zero_distance_is_w0() {
        assert_eq!(falloff(0.7, 2.0, 0.0, 3.0), 0.7);
    }

    #[test]
    fn at_radius_is_exactly_zero() {
        assert_eq!(falloff(0.7, 2.0, 3.0, 3.0), 0.0);
        // alpha = 0 would give w0 without the gate.
        assert_eq!(falloff(0.7, 0.0, 3.0, 3.0), 0.0);
    }

    #[test]
    fn zero_radius_never_infects() {
        assert_eq!(falloff(1.0, 2.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn quadratic_midpoint() {
        let p = falloff(1.0, 2.0, 1.0, 2.0);
        assert!((p - 0.25).abs() < 1e-12);
    }
}

#[cfg(test)]
mod hub {
    use super::helpers::{agent_at, spreader_at};
    use crate::{HubKernel, KernelParams, SpatialKernel, DEFAULT_HUB_CONSTANT};

    #[test]
    fn ordinary_agent_uses_base_radius() {
        let k = HubKernel::with_radius(2.0).unwrap();
        let i = agent_at(0, 0.0, 0.0);
        assert_eq!(k.reach(&i), 2.0);
        assert_eq!(k.probability(&i, &agent_at(1, 2.5, 0.0)), 0.0);
        assert!(k.probability(&i, &agent_at(1, 1.0, 0.0)) > 0.0);
    }

    #[test]
    fn spreader_reach_is_scaled() {
        let k = HubKernel::with_radius(2.0).unwrap();
        let i = spreader_at(0, 0.0, 0.0);
        assert!((k.reach(&i) - 2.0 * DEFAULT_HUB_CONSTANT).abs() < 1e-12);
        // Outside the base radius, inside the hub radius.
        assert!(k.probability(&i, &agent_at(1, 3.0, 0.0)) > 0.0);
    }

    #[test]
    fn custom_constant() {
        let k = HubKernel::new(KernelParams::new(0.5, 1.0, 1.0), 4.0).unwrap();
        let p = k.probability(&spreader_at(0, 0.0, 0.0), &agent_at(1, 2.0, 0.0));
        assert!((p - 0.25).abs() < 1e-12);
    }

    #[test]
    fn invalid_params_rejected() {
        assert!(HubKernel::new(KernelParams::new(1.5, 2.0, 1.0), 2.0).is_err());
        assert!(HubKernel::new(KernelParams::new(0.5, -1.0, 1.0), 2.0).is_err());
        assert!(HubKernel::new(KernelParams::new(0.5, 2.0, -1.0), 2.0).is_err());
        assert!(HubKernel::new(KernelParams::new(0.5, 2.0, 1.0), -2.0).is_err());
        assert!(HubKernel::new(KernelParams::new(f64::NAN, 2.0, 1.0), 2.0).is_err());
    }
}

#[cfg(test)]
mod strong {
    use super::helpers::{agent_at, spreader_at};
    use crate::{KernelParams, SpatialKernel, StrongInfectiousKernel};

    #[test]
    fn spreader_is_flat_inside_radius() {
        let k = StrongInfectiousKernel::with_radius(4.0).unwrap();
        let i = spreader_at(0, 0.0, 0.0);
        assert_eq!(k.probability(&i, &agent_at(1, 0.1, 0.0)), 0.5);
        assert_eq!(k.probability(&i, &agent_at(1, 3.9, 0.0)), 0.5);
        assert_eq!(k.probability(&i, &agent_at(1, 4.0, 0.0)), 0.0);
    }

    #[test]
    fn ordinary_agent_falls_off() {
        let k = StrongInfectiousKernel::new(KernelParams::new(0.8, 1.0, 4.0)).unwrap();
        let p = k.probability(&agent_at(0, 0.0, 0.0), &agent_at(1, 2.0, 0.0));
        assert!((p - 0.4).abs() < 1e-12);
    }

    #[test]
    fn reach_ignores_flag() {
        let k = StrongInfectiousKernel::with_radius(4.0).unwrap();
        assert_eq!(k.reach(&spreader_at(0, 0.0, 0.0)), 4.0);
    }
}

#[cfg(test)]
mod flat {
    use super::helpers::{agent_at, spreader_at};
    use crate::{FlatRadiusKernel, SpatialKernel};

    #[test]
    fn uses_infector_radius() {
        let k = FlatRadiusKernel::new(1.0, 2.0).unwrap();
        let mut i = agent_at(0, 0.0, 0.0);
        i.kernel_radius = 2.0;
        let mut s = agent_at(1, 1.0, 0.0);
        s.kernel_radius = 0.0;
        assert!((k.probability(&i, &s) - 0.25).abs() < 1e-12);
        assert_eq!(k.reach(&i), 2.0);
    }

    #[test]
    fn flag_does_not_matter() {
        let k = FlatRadiusKernel::new(1.0, 2.0).unwrap();
        let mut a = agent_at(0, 0.0, 0.0);
        a.kernel_radius = 3.0;
        let mut b = spreader_at(0, 0.0, 0.0);
        b.kernel_radius = 3.0;
        let s = agent_at(1, 1.0, 1.0);
        assert_eq!(k.probability(&a, &s), k.probability(&b, &s));
    }

    #[test]
    fn negative_personal_radius_is_inert() {
        let k = FlatRadiusKernel::new(1.0, 2.0).unwrap();
        let mut i = agent_at(0, 0.0, 0.0);
        i.kernel_radius = -0.5;
        assert_eq!(k.probability(&i, &agent_at(1, 0.0, 0.0)), 0.0);
    }
}

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::helpers::{agent_at, spreader_at};
    use crate::{HubKernel, KernelParams, SpatialKernel, StrongInfectiousKernel};

    proptest! {
        #[test]
        fn hub_probability_in_unit_interval(
            w0 in 0.0f64..=1.0,
            alpha in 0.0f64..6.0,
            radius in 0.0f64..20.0,
            x in -30.0f64..30.0,
            y in -30.0f64..30.0,
            ss in any::<bool>(),
        ) {
            let k = HubKernel::new(KernelParams::new(w0, alpha, radius), 2.0).unwrap();
            let i = if ss { spreader_at(0, 0.0, 0.0) } else { agent_at(0, 0.0, 0.0) };
            let p = k.probability(&i, &agent_at(1, x, y));
            prop_assert!((0.0..=1.0).contains(&p));
        }

        #[test]
        fn hub_monotone_in_distance(
            w0 in 0.0f64..=1.0,
            alpha in 0.0f64..6.0,
            radius in 0.1f64..20.0,
            a in 0.0f64..25.0,
            b in 0.0f64..25.0,
        ) {
            let k = HubKernel::new(KernelParams::new(w0, alpha, radius), 1.0).unwrap();
            let i = agent_at(0, 0.0, 0.0);
            let (near, far) = if a <= b { (a, b) } else { (b, a) };
            let p_near = k.probability(&i, &agent_at(1, near, 0.0));
            let p_far = k.probability(&i, &agent_at(1, far, 0.0));
            prop_assert!(p_near >= p_far);
        }

        #[test]
        fn strong_zero_outside_reach(
            radius in 0.0f64..10.0,
            extra in 0.0f64..10.0,
            ss in any::<bool>(),
        ) {
            let k = StrongInfectiousKernel::with_radius(radius).unwrap();
            let i = if ss { spreader_at(0, 0.0, 0.0) } else { agent_at(0, 0.0, 0.0) };
            let s = agent_at(1, 0.0, k.reach(&i) + extra);
            prop_assert_eq!(k.probability(&i, &s), 0.0);
        }
    }
}

#[cfg(test)]
mod contact {
    use epi_core::{AgentId, Position};

    use crate::ContactIndex;

    fn line_index() -> ContactIndex {
        // Agents 0..10 on the x axis at x = id.
        ContactIndex::build((0..10u32).map(|i| (AgentId(i), Position::new(i as f64, 0.0))))
    }

    #[test]
    fn within_returns_sorted_ids() {
        let idx = line_index();
        let ids = idx.within(Position::new(5.0, 0.0), 2.0);
        assert_eq!(ids, vec![AgentId(3), AgentId(4), AgentId(5), AgentId(6), AgentId(7)]);
    }

    #[test]
    fn zero_radius_hits_coincident_only() {
        let idx = line_index();
        assert_eq!(idx.within(Position::new(4.0, 0.0), 0.0), vec![AgentId(4)]);
        assert!(idx.within(Position::new(4.5, 0.0), 0.0).is_empty());
    }

    #[test]
    fn negative_radius_matches_nothing() {
        assert!(line_index().within(Position::new(4.0, 0.0), -1.0).is_empty());
    }

    #[test]
    fn empty_index() {
        let idx = ContactIndex::build(std::iter::empty());
        assert!(idx.is_empty());
        assert!(idx.within(Position::new(0.0, 0.0), 100.0).is_empty());
    }

    #[test]
    fn len_counts_entries() {
        assert_eq!(line_index().len(), 10);
    }
}
