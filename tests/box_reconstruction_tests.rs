use indexmap::IndexSet;
use unchart::DigitizeError;
use unchart::axes::{
    AxesInfo, AxisValues, DataValue, LabelId, LabelRole, ScaleType, TextLabel, Tick, TicksType,
    ValuesType,
};
use unchart::chart::{
    BoxChartData, BoxValues, MarkGeometry, SeriesLayout, SeriesPoint, reconstruct_box,
};
use unchart::core::{BoundingBox, Orientation, Polygon};

const RATIO_MIN: f64 = 0.8;

fn tick_label(id: u32, y: f64, text: &str) -> TextLabel {
    TextLabel {
        id: LabelId(id),
        polygon: Polygon::rectangle(BoundingBox::new(-20.0, y - 4.0, -4.0, y + 4.0)),
        role: LabelRole::TickLabel,
        text: text.to_owned(),
    }
}

/// 100x100 box, linear 0..10 primary vertical axis, categorical horizontal.
fn box_axes() -> AxesInfo {
    let mut axes = AxesInfo::default();
    axes.bounding_box = Some(BoundingBox::new(0.0, 0.0, 100.0, 100.0));
    axes.tick_labels.insert(LabelId(1), tick_label(1, 100.0, "0"));
    axes.tick_labels.insert(LabelId(2), tick_label(2, 0.0, "10"));
    let mut vertical =
        AxisValues::new(ValuesType::Numerical, TicksType::Markers, ScaleType::Linear);
    vertical.ticks = Some(vec![
        Tick::labeled(100.0, LabelId(1)),
        Tick::labeled(0.0, LabelId(2)),
    ]);
    vertical.labels = Some([LabelId(1), LabelId(2)].into_iter().collect());
    axes.primary_vertical = Some(vertical);

    let mut horizontal =
        AxisValues::new(ValuesType::Categorical, TicksType::Markers, ScaleType::None);
    horizontal.ticks = Some(Vec::new());
    horizontal.labels = Some(IndexSet::new());
    axes.primary_horizontal = Some(horizontal);
    axes
}

fn box_data(name: Option<&str>) -> BoxChartData {
    BoxChartData {
        series_names: vec![name.map(str::to_owned)],
        categories: vec!["c0".to_owned()],
        values: vec![vec![BoxValues {
            whisker_low: 10.0,
            quartile_first: 20.0,
            median: 30.0,
            quartile_third: 40.0,
            whisker_high: 50.0,
        }]],
        layout: SeriesLayout {
            offset: 10.0,
            width: 20.0,
            inner_gap: 0.0,
            outer_gap: 0.0,
            orientation: Orientation::Vertical,
        },
    }
}

fn numbers(points: &[SeriesPoint]) -> Vec<f64> {
    points
        .iter()
        .map(|point| match &point.y {
            Some(DataValue::Number(number)) => *number,
            other => panic!("expected a number, got {other:?}"),
        })
        .collect()
}

#[test]
fn box_segments_sit_at_their_quantity_offsets() {
    let reconstruction =
        reconstruct_box(&box_axes(), &box_data(Some("alpha")), RATIO_MIN).expect("reconstruct");

    assert_eq!(reconstruction.marks.len(), 1);
    let MarkGeometry::BoxSegments(segments) = &reconstruction.marks[0] else {
        panic!("expected box segments, got {:?}", reconstruction.marks[0]);
    };
    // Degenerate rectangles across the slot, whisker-low first.
    let expected_y = [90.0, 80.0, 70.0, 60.0, 50.0];
    for (segment, y) in segments.iter().zip(expected_y) {
        assert_eq!(*segment, BoundingBox::new(10.0, y, 30.0, y));
    }
}

#[test]
fn five_quantity_series_per_annotated_series() {
    let reconstruction =
        reconstruct_box(&box_axes(), &box_data(Some("alpha")), RATIO_MIN).expect("reconstruct");

    let names: Vec<_> = reconstruction
        .series
        .iter()
        .map(|series| series.name.as_deref())
        .collect();
    assert_eq!(
        names,
        vec![
            Some("alpha (whisker low)"),
            Some("alpha (q1)"),
            Some("alpha (median)"),
            Some("alpha (q3)"),
            Some("alpha (whisker high)"),
        ]
    );
    let values: Vec<f64> = reconstruction
        .series
        .iter()
        .map(|series| numbers(&series.points)[0])
        .collect();
    for (value, expected) in values.iter().zip([1.0, 2.0, 3.0, 4.0, 5.0]) {
        assert!((value - expected).abs() < 1e-9);
    }
    for series in &reconstruction.series {
        assert_eq!(
            series.points[0].x,
            DataValue::Category("c0".to_owned())
        );
    }
}

#[test]
fn unnamed_series_yield_unnamed_quantities() {
    let reconstruction =
        reconstruct_box(&box_axes(), &box_data(None), RATIO_MIN).expect("reconstruct");
    assert_eq!(reconstruction.series.len(), 5);
    assert!(reconstruction.series.iter().all(|series| series.name.is_none()));
}

#[test]
fn boxes_never_stack_across_series() {
    let mut data = box_data(Some("alpha"));
    data.add_series(Some("beta".to_owned()));
    data.values[1][0] = BoxValues {
        whisker_low: 5.0,
        quartile_first: 15.0,
        median: 25.0,
        quartile_third: 35.0,
        whisker_high: 45.0,
    };
    data.layout.inner_gap = 4.0;

    let reconstruction = reconstruct_box(&box_axes(), &data, RATIO_MIN).expect("reconstruct");
    assert_eq!(reconstruction.marks.len(), 2);
    let MarkGeometry::BoxSegments(second) = &reconstruction.marks[1] else {
        panic!("expected box segments");
    };
    // Second slot starts one width plus the inner gap after the first.
    assert_eq!(second[0], BoundingBox::new(34.0, 95.0, 54.0, 95.0));
    assert_eq!(reconstruction.series.len(), 10);
}

#[test]
fn horizontal_boxes_extend_from_the_left_edge() {
    let mut axes = box_axes();
    let vertical = axes.primary_vertical.take();
    let horizontal = axes.primary_horizontal.take();
    axes.primary_horizontal = vertical;
    axes.primary_vertical = horizontal;
    // Reuse the 0/10 labels; their polygons are irrelevant to marker ticks.

    let mut data = box_data(Some("alpha"));
    data.layout.orientation = Orientation::Horizontal;

    let reconstruction = reconstruct_box(&axes, &data, RATIO_MIN).expect("reconstruct");
    let MarkGeometry::BoxSegments(segments) = &reconstruction.marks[0] else {
        panic!("expected box segments");
    };
    assert_eq!(segments[0], BoundingBox::new(10.0, 10.0, 10.0, 30.0));
    assert_eq!(segments[4], BoundingBox::new(50.0, 10.0, 50.0, 30.0));
}

#[test]
fn non_finite_box_offsets_are_rejected() {
    let mut data = box_data(Some("alpha"));
    data.values[0][0].whisker_high = f64::NAN;
    let err = reconstruct_box(&box_axes(), &data, RATIO_MIN).expect_err("NaN offset");
    assert!(matches!(err, DigitizeError::InvalidData(_)));
}

#[test]
fn missing_dependent_axis_is_reported() {
    let mut axes = box_axes();
    axes.primary_vertical = None;
    let err =
        reconstruct_box(&axes, &box_data(None), RATIO_MIN).expect_err("no dependent slot");
    assert!(matches!(err, DigitizeError::NoDependentAxis));
}
