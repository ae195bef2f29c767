// Directive mapper tests through the public API

use imgproxy_uri::directive::*;

#[test]
fn test_exact_width_with_maximum_marker_on_height() {
    let config = ProcessingConfiguration {
        width: Some("300".parse().unwrap()),
        height: Some("m".parse().unwrap()),
        ..Default::default()
    };
    let directive = map_directive(&config, &SourceMetadata::default());

    assert_eq!(
        directive.options(),
        &[
            DirectiveOption::ResizeType {
                value: ResizeType::Fit
            },
            DirectiveOption::Width { value: 300 },
        ]
    );
}

#[test]
fn test_crop_and_focus_rectangle() {
    let config = ProcessingConfiguration {
        crop: Some(Area::new(5.0, 5.0, 100.0, 50.0)),
        focus_area: Some(FocusArea::pixels(Area::new(0.0, 0.0, 200.0, 200.0))),
        ..Default::default()
    };
    let source = SourceMetadata {
        width: 200,
        height: 200,
        sha1: None,
    };
    let directive = map_directive(&config, &source);

    let crop_and_gravity: Vec<&DirectiveOption> = directive
        .iter()
        .filter(|option| matches!(option.name(), "crop" | "gravity"))
        .collect();

    assert_eq!(
        crop_and_gravity,
        vec![
            &DirectiveOption::Crop {
                width: 100,
                height: 50,
                gravity: Gravity::TopLeft { x: 5, y: 5 },
            },
            &DirectiveOption::Gravity {
                value: Gravity::FocusPoint { x: 0.5, y: 0.5 },
            },
        ]
    );
}

#[test]
fn test_maximum_width_beats_cover_height() {
    let config = ProcessingConfiguration {
        width: Some(SizeValue::maximum(800)),
        height: Some(SizeValue::cover(600)),
        ..Default::default()
    };
    assert_eq!(resolve_resize_type(&config), ResizeType::Fit);
}

#[test]
fn test_focus_center_midpoint() {
    assert_eq!(calculate_center(10.0, 20.0), 20.0);
}

#[test]
fn test_directive_serializes_to_json() {
    let config = ProcessingConfiguration {
        width: Some(SizeValue::cover(300)),
        dpr: Some(2.0),
        ..Default::default()
    };
    let directive = map_directive(&config, &SourceMetadata::default());
    let json = serde_json::to_value(&directive).unwrap();

    assert_eq!(
        json["options"][0],
        serde_json::json!({"option": "resize-type", "value": "fill"})
    );
    assert_eq!(
        json["options"][1],
        serde_json::json!({"option": "width", "value": 300})
    );
    assert_eq!(
        json["options"][2],
        serde_json::json!({"option": "dpr", "value": 2.0})
    );
}
