use approx::assert_relative_eq;
use fin_charts::{
    ChartDimensions, ChartLayout, LineSeriesLayout, MIN_SEGMENT_HEIGHT, PieLayout, RadarLayout,
    Scale, StackedBarLayout, LinearScale,
};
use fin_core::{
    AssetBreakdown, AssetClass, ExpenseCategory, ExpenseRecord, RatioMetric, RatioSnapshot,
    TimeSeriesPoint,
};
use proptest::prelude::*;

fn breakdown_strategy() -> impl Strategy<Value = AssetBreakdown> {
    prop::collection::vec(0.0f64..1_000.0, 5).prop_filter_map("needs a positive total", |values| {
        let entries = AssetClass::Current
            .categories()
            .iter()
            .copied()
            .zip(values);
        AssetBreakdown::new(AssetClass::Current, entries)
            .ok()
            .filter(|b| b.total() > 0.0)
    })
}

proptest! {
    #[test]
    fn pie_wedges_cover_full_circle(breakdown in breakdown_strategy()) {
        let geometry = PieLayout::default().layout(&breakdown).expect("pie layout");
        let total = breakdown.total();

        assert_relative_eq!(geometry.total_sweep(), 360.0, epsilon = 1e-6);
        prop_assert_eq!(geometry.wedges.len(), breakdown.non_zero().count());
        for wedge in &geometry.wedges {
            assert_relative_eq!(wedge.sweep, wedge.value / total * 360.0, epsilon = 1e-9);
            prop_assert!(wedge.sweep > 0.0);
        }
    }

    #[test]
    fn stacked_heights_match_scaled_total(
        values in prop::collection::vec(1.0e8f64..1.0e11, 4),
        others in prop::collection::vec((1.0e8f64..1.0e11, 1.0e8f64..1.0e11, 1.0e8f64..1.0e11, 1.0e8f64..1.0e11), 1..6)
    ) {
        let mut records = vec![ExpenseRecord::new(2020, values[0], values[1], values[2], values[3])];
        records.extend(
            others
                .into_iter()
                .enumerate()
                .map(|(i, (a, b, c, d))| ExpenseRecord::new(2021 + i as i32, a, b, c, d)),
        );

        let dims = ChartDimensions::bars();
        let geometry = StackedBarLayout::new(dims).layout(records.as_slice()).expect("stacked layout");
        let scale = LinearScale::new()
            .domain(0.0, geometry.max_total)
            .range(dims.axis_bottom(), dims.plot_top());

        for (stack, record) in geometry.stacks.iter().zip(&records) {
            let floored = stack.segments.iter().any(|s| s.height == MIN_SEGMENT_HEIGHT);
            if !floored {
                let expected = dims.axis_bottom() - scale.scale(record.total());
                assert_relative_eq!(stack.height(), expected, epsilon = 1e-6);
            }
            for segment in &stack.segments {
                if record.value(segment.category) > 0.0 {
                    prop_assert!(segment.height >= MIN_SEGMENT_HEIGHT);
                }
            }
            prop_assert_eq!(stack.segments.len(), ExpenseCategory::STACK_ORDER.len());
        }
    }

    #[test]
    fn radar_clamps_values_beyond_ceiling(index in 0usize..7, factor in 1.0f64..10.0) {
        let metric = RatioMetric::ALL[index];
        let base: Vec<_> = RatioMetric::ALL.iter().map(|&m| (m, m.ceiling() / 3.0)).collect();

        let at_max = RatioSnapshot::new(
            base.iter().map(|&(m, v)| if m == metric { (m, m.ceiling()) } else { (m, v) }),
        ).expect("snapshot");
        let beyond = RatioSnapshot::new(
            base.iter().map(|&(m, v)| if m == metric { (m, m.ceiling() * factor) } else { (m, v) }),
        ).expect("snapshot");

        let a = RadarLayout::default().layout(&at_max).expect("radar");
        let b = RadarLayout::default().layout(&beyond).expect("radar");
        prop_assert_eq!(a.axes[index].vertex, b.axes[index].vertex);
    }

    #[test]
    fn line_markers_increase_in_x(prices in prop::collection::vec(0.0f64..1_000.0, 2..20)) {
        let points: Vec<_> = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| TimeSeriesPoint::new(2000 + i as i32, p))
            .collect();
        let geometry = LineSeriesLayout::default().layout(points.as_slice()).expect("line layout");

        prop_assert_eq!(geometry.markers.len(), points.len());
        prop_assert!(geometry.markers.windows(2).all(|w| w[0].x < w[1].x));
        prop_assert_eq!(geometry.commands.len(), points.len());
    }

    #[test]
    fn layouts_are_deterministic(prices in prop::collection::vec(0.0f64..1_000.0, 1..10)) {
        let points: Vec<_> = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| TimeSeriesPoint::new(2010 + i as i32, p))
            .collect();
        let layout = LineSeriesLayout::default().area(true);

        let first = layout.layout(points.as_slice()).expect("line layout");
        let second = layout.layout(points.as_slice()).expect("line layout");
        prop_assert_eq!(first, second);
    }
}
