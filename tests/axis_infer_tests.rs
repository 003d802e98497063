use unchart::axes::infer::{
    auto_assign_tick_labels, suggest_slot_for_label, suggest_unclaimed_labels,
};
use unchart::axes::{
    AxesInfo, AxisSlot, AxisValues, LabelId, LabelRole, ScaleType, TextLabel, Tick, TicksType,
    ValuesType,
};
use unchart::core::{BoundingBox, Polygon};

const BOUNDS: BoundingBox = BoundingBox::new(0.0, 0.0, 100.0, 100.0);

fn label_at(id: u32, x: f64, y: f64, text: &str) -> TextLabel {
    TextLabel {
        id: LabelId(id),
        polygon: Polygon::rectangle(BoundingBox::new(x - 8.0, y - 4.0, x + 8.0, y + 4.0)),
        role: LabelRole::TickLabel,
        text: text.to_owned(),
    }
}

#[test]
fn labels_suggest_the_nearest_edge_slot() {
    let cases = [
        (label_at(1, 50.0, 108.0, "below"), AxisSlot::PrimaryHorizontal),
        (label_at(2, -10.0, 50.0, "left"), AxisSlot::PrimaryVertical),
        (label_at(3, 50.0, -8.0, "above"), AxisSlot::SecondaryHorizontal),
        (label_at(4, 108.0, 50.0, "right"), AxisSlot::SecondaryVertical),
    ];
    for (label, expected) in cases {
        assert_eq!(suggest_slot_for_label(BOUNDS, &label), expected);
    }
}

#[test]
fn edge_distance_ties_prefer_primary_slots() {
    // Dead center: equidistant to all four edge lines.
    let label = label_at(1, 50.0, 50.0, "center");
    assert_eq!(
        suggest_slot_for_label(BOUNDS, &label),
        AxisSlot::PrimaryHorizontal
    );
}

#[test]
fn unclaimed_suggestions_skip_owned_and_non_tick_labels() {
    let mut axes = AxesInfo::default();
    axes.bounding_box = Some(BOUNDS);
    axes.tick_labels.insert(LabelId(1), label_at(1, -10.0, 80.0, "2"));
    axes.tick_labels.insert(LabelId(2), label_at(2, -10.0, 20.0, "8"));
    axes.tick_labels.insert(LabelId(3), label_at(3, 30.0, 108.0, "jan"));
    let mut legend = label_at(4, 80.0, 10.0, "series a");
    legend.role = LabelRole::Legend;
    axes.tick_labels.insert(LabelId(4), legend);

    // Label 1 is already claimed by the vertical axis.
    let mut vertical =
        AxisValues::new(ValuesType::Numerical, TicksType::Markers, ScaleType::Linear);
    vertical.labels = Some([LabelId(1)].into_iter().collect());
    vertical.ticks = Some(vec![Tick::labeled(80.0, LabelId(1))]);
    axes.primary_vertical = Some(vertical);

    let suggestions = suggest_unclaimed_labels(&axes).expect("suggest");
    assert_eq!(
        suggestions,
        vec![
            (LabelId(2), AxisSlot::PrimaryVertical),
            (LabelId(3), AxisSlot::PrimaryHorizontal),
        ]
    );
}

#[test]
fn suggestions_require_a_bounding_box() {
    let axes = AxesInfo::default();
    suggest_unclaimed_labels(&axes).expect_err("no bounding box");
}

#[test]
fn auto_assignment_pairs_ticks_with_nearby_labels() {
    let mut axes = AxesInfo::default();
    axes.bounding_box = Some(BOUNDS);
    axes.tick_labels.insert(LabelId(1), label_at(1, -12.0, 100.0, "0"));
    axes.tick_labels.insert(LabelId(2), label_at(2, -12.0, 0.0, "10"));
    let mut vertical =
        AxisValues::new(ValuesType::Numerical, TicksType::Markers, ScaleType::Linear);
    // Ticks annotated without label links, labels assigned to the axis.
    vertical.ticks = Some(vec![Tick::new(100.0), Tick::new(0.0)]);
    vertical.labels = Some([LabelId(2), LabelId(1)].into_iter().collect());
    axes.primary_vertical = Some(vertical);

    let ticks = auto_assign_tick_labels(&axes, AxisSlot::PrimaryVertical).expect("assign");
    assert_eq!(
        ticks,
        vec![Tick::labeled(100.0, LabelId(1)), Tick::labeled(0.0, LabelId(2))]
    );
}

#[test]
fn auto_assignment_replaces_stale_links() {
    let mut axes = AxesInfo::default();
    axes.bounding_box = Some(BOUNDS);
    axes.tick_labels.insert(LabelId(1), label_at(1, -12.0, 100.0, "0"));
    axes.tick_labels.insert(LabelId(2), label_at(2, -12.0, 0.0, "10"));
    let mut vertical =
        AxisValues::new(ValuesType::Numerical, TicksType::Markers, ScaleType::Linear);
    // Crossed links from an earlier manual pass.
    vertical.ticks = Some(vec![
        Tick::labeled(100.0, LabelId(2)),
        Tick::labeled(0.0, LabelId(1)),
    ]);
    vertical.labels = Some([LabelId(1), LabelId(2)].into_iter().collect());
    axes.primary_vertical = Some(vertical);

    let ticks = auto_assign_tick_labels(&axes, AxisSlot::PrimaryVertical).expect("assign");
    assert_eq!(
        ticks,
        vec![Tick::labeled(100.0, LabelId(1)), Tick::labeled(0.0, LabelId(2))]
    );
}

#[test]
fn extra_ticks_come_back_unlabeled() {
    let mut axes = AxesInfo::default();
    axes.bounding_box = Some(BOUNDS);
    axes.tick_labels.insert(LabelId(1), label_at(1, -12.0, 100.0, "0"));
    let mut vertical =
        AxisValues::new(ValuesType::Numerical, TicksType::Markers, ScaleType::Linear);
    vertical.ticks = Some(vec![Tick::new(100.0), Tick::new(50.0), Tick::new(0.0)]);
    vertical.labels = Some([LabelId(1)].into_iter().collect());
    axes.primary_vertical = Some(vertical);

    let ticks = auto_assign_tick_labels(&axes, AxisSlot::PrimaryVertical).expect("assign");
    assert_eq!(ticks[0], Tick::labeled(100.0, LabelId(1)));
    assert_eq!(ticks[1], Tick::new(50.0));
    assert_eq!(ticks[2], Tick::new(0.0));
}

#[test]
fn auto_assignment_requires_a_populated_slot() {
    let mut axes = AxesInfo::default();
    axes.bounding_box = Some(BOUNDS);
    auto_assign_tick_labels(&axes, AxisSlot::PrimaryVertical).expect_err("slot not populated");
}
