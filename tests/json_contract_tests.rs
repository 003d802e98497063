use unchart::DigitizeError;
use unchart::api::ChartAnnotation;
use unchart::axes::{
    AxesInfo, AxisValues, LabelId, LabelRole, ScaleType, TextLabel, Tick, TicksType, ValuesType,
};
use unchart::chart::{BarChartData, ChartData};
use unchart::core::{BoundingBox, Polygon};

/// Legacy two-axis record, as the original annotation tool wrote it.
const LEGACY_BARE: &str = r#"{
  "axes": {
    "bounding_box": {"x1": 0.0, "y1": 0.0, "x2": 100.0, "y2": 100.0},
    "tick_labels": {
      "1": {
        "id": 1,
        "polygon": {"vertices": [
          {"x": -20.0, "y": 96.0}, {"x": -4.0, "y": 96.0},
          {"x": -4.0, "y": 104.0}, {"x": -20.0, "y": 104.0}
        ]},
        "role": "TickLabel",
        "text": "0"
      },
      "2": {
        "id": 2,
        "polygon": {"vertices": [
          {"x": -20.0, "y": -4.0}, {"x": -4.0, "y": -4.0},
          {"x": -4.0, "y": 4.0}, {"x": -20.0, "y": 4.0}
        ]},
        "role": "TickLabel",
        "text": "10"
      }
    },
    "vertical": {
      "ticks": [{"position": 100.0, "label": 1}, {"position": 0.0, "label": 2}],
      "labels": [1, 2]
    },
    "horizontal": {
      "ticks": []
    }
  },
  "chart": {"Bar": {}},
  "axes_verified": true
}"#;

fn sample_annotation() -> ChartAnnotation {
    let mut axes = AxesInfo::default();
    axes.bounding_box = Some(BoundingBox::new(0.0, 0.0, 100.0, 100.0));
    axes.tick_labels.insert(
        LabelId(1),
        TextLabel {
            id: LabelId(1),
            polygon: Polygon::rectangle(BoundingBox::new(-20.0, 96.0, -4.0, 104.0)),
            role: LabelRole::TickLabel,
            text: "0".to_owned(),
        },
    );
    let mut vertical =
        AxisValues::new(ValuesType::Numerical, TicksType::Markers, ScaleType::Linear);
    vertical.ticks = Some(vec![Tick::labeled(100.0, LabelId(1))]);
    vertical.labels = Some([LabelId(1)].into_iter().collect());
    axes.primary_vertical = Some(vertical);
    ChartAnnotation::new(axes, ChartData::Bar(BarChartData::default()))
}

#[test]
fn v2_envelope_round_trips() {
    let annotation = sample_annotation();
    let json = annotation.to_json_contract_v2_pretty().expect("serialize");
    assert!(json.contains("\"schema_version\": 2"));

    let load = ChartAnnotation::from_json_compat_str(&json).expect("parse");
    assert!(!load.upgraded);
    assert_eq!(load.annotation, annotation);
}

#[test]
fn bare_current_records_parse_without_upgrade() {
    let annotation = sample_annotation();
    let json = serde_json::to_string(&annotation).expect("serialize");

    let load = ChartAnnotation::from_json_compat_str(&json).expect("parse");
    assert!(!load.upgraded);
    assert_eq!(load.annotation, annotation);
}

#[test]
fn bare_legacy_records_upgrade_to_primary_slots() {
    let load = ChartAnnotation::from_json_compat_str(LEGACY_BARE).expect("parse");
    assert!(load.upgraded);

    let axes = &load.annotation.axes;
    let horizontal = axes.primary_horizontal.as_ref().expect("horizontal slot");
    assert_eq!(horizontal.values_type, ValuesType::Categorical);
    assert_eq!(horizontal.ticks_type, TicksType::Markers);
    assert_eq!(horizontal.scale_type, ScaleType::None);
    assert_eq!(horizontal.ticks.as_deref(), Some(&[][..]));
    assert_eq!(horizontal.labels, None);

    let vertical = axes.primary_vertical.as_ref().expect("vertical slot");
    assert_eq!(vertical.values_type, ValuesType::Numerical);
    assert_eq!(vertical.scale_type, ScaleType::Linear);
    assert_eq!(
        vertical.ticks.as_deref(),
        Some(&[Tick::labeled(100.0, LabelId(1)), Tick::labeled(0.0, LabelId(2))][..])
    );

    assert_eq!(axes.secondary_horizontal, None);
    assert_eq!(axes.secondary_vertical, None);
    assert_eq!(axes.tick_labels.len(), 2);
    load.annotation.validate().expect("upgraded record is valid");
}

#[test]
fn legacy_v1_envelope_upgrades() {
    let json = format!("{{\"schema_version\": 1, \"annotation\": {LEGACY_BARE}}}");
    let load = ChartAnnotation::from_json_compat_str(&json).expect("parse");
    assert!(load.upgraded);
    assert!(load.annotation.axes.primary_vertical.is_some());
    assert_eq!(load.annotation.chart.family_name(), "bar");
}

#[test]
fn legacy_sign_off_is_dropped_on_upgrade() {
    // The fixture claims axes_verified; the upgrade must not honor it.
    let load = ChartAnnotation::from_json_compat_str(LEGACY_BARE).expect("parse");
    assert!(!load.annotation.axes_verified);
}

#[test]
fn unknown_schema_versions_are_rejected() {
    let json = "{\"schema_version\": 7, \"annotation\": {}}";
    let err = ChartAnnotation::from_json_compat_str(json).expect_err("version 7");
    match err {
        DigitizeError::InvalidData(message) => {
            assert!(message.contains("unsupported annotation schema version: 7"));
        }
        other => panic!("expected invalid data, got {other:?}"),
    }
}

#[test]
fn non_integer_schema_versions_are_rejected() {
    let json = "{\"schema_version\": \"two\"}";
    let err = ChartAnnotation::from_json_compat_str(json).expect_err("string version");
    assert!(matches!(err, DigitizeError::InvalidData(_)));
}

#[test]
fn malformed_payloads_are_rejected() {
    let err = ChartAnnotation::from_json_compat_str("not json").expect_err("not json");
    assert!(matches!(err, DigitizeError::InvalidData(_)));
}
