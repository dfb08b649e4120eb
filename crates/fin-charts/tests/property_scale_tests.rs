use approx::assert_relative_eq;
use fin_charts::{AxisTickGenerator, LinearScale, Scale};
use fin_core::{ValueKind, format_magnitude};
use proptest::prelude::*;

proptest! {
    #[test]
    fn linear_scale_maps_domain_endpoints_exactly(
        d_min in -1.0e12f64..1.0e12,
        span in 1.0e-3f64..1.0e12,
        p_min in -2_000.0f64..2_000.0,
        p_max in -2_000.0f64..2_000.0
    ) {
        let d_max = d_min + span;
        prop_assume!(d_max > d_min);

        let scale = LinearScale::new().domain(d_min, d_max).range(p_min, p_max);
        prop_assert_eq!(scale.scale(d_min), p_min);
        prop_assert_eq!(scale.scale(d_max), p_max);
    }

    #[test]
    fn degenerate_domain_maps_to_range_midpoint(
        domain in -1.0e9f64..1.0e9,
        value in -1.0e9f64..1.0e9,
        p_min in -2_000.0f64..2_000.0,
        p_max in -2_000.0f64..2_000.0
    ) {
        let scale = LinearScale::new().domain(domain, domain).range(p_min, p_max);
        prop_assert_eq!(scale.scale(value), (p_min + p_max) / 2.0);
    }

    #[test]
    fn ticks_are_inclusive_and_evenly_spaced(
        d_min in -1.0e6f64..1.0e6,
        span in 1.0f64..1.0e6,
        count in 1usize..12
    ) {
        let d_max = d_min + span;
        let ticks = LinearScale::new().domain(d_min, d_max).ticks(count);

        prop_assert_eq!(ticks.len(), count + 1);
        prop_assert_eq!(ticks[0], d_min);
        prop_assert_eq!(ticks[count], d_max);

        let step = span / count as f64;
        for pair in ticks.windows(2) {
            assert_relative_eq!(pair[1] - pair[0], step, epsilon = 1e-6, max_relative = 1e-6);
        }
    }

    #[test]
    fn value_ticks_label_every_tick(max in 1.0f64..1.0e12) {
        let scale = LinearScale::new().domain(0.0, max).range(260.0, 20.0);
        let ticks = AxisTickGenerator::new().value_ticks(&scale);

        prop_assert_eq!(ticks.len(), 5);
        prop_assert!(ticks.iter().all(|t| t.label.starts_with('$')));
        prop_assert!(ticks.windows(2).all(|w| w[1].position < w[0].position));
    }

    #[test]
    fn currency_labels_never_carry_a_sign(value in -1.0e13f64..1.0e13) {
        let label = format_magnitude(Some(value), ValueKind::Currency);
        prop_assert!(label.starts_with('$'));
    }
}

#[test]
fn magnitude_formatter_reference_values() {
    assert_eq!(format_magnitude(Some(1_500_000_000.0), ValueKind::Currency), "$1.5B");
    assert_eq!(format_magnitude(Some(0.021), ValueKind::Percentage), "2.10%");
    assert_eq!(format_magnitude(None, ValueKind::Currency), "N/A");
}
