// Parsing and validation of the zones and parallax files.
use stage_web::config::{DesignSpace, LayerSpec, ParallaxConfig, ParallaxPatch, ZoneKind, ZonesData};
use stage_web::error::StageError;

const ZONES: &str = include_str!("../assets/zones.json");
const PARALLAX: &str = include_str!("../assets/parallax.json");

#[test]
fn bundled_zones_parse() {
    let data = ZonesData::from_json(ZONES).unwrap();
    assert_eq!(data.design().unwrap(), DesignSpace::new(800.0, 2600.0).unwrap());
    assert_eq!(data.of_kind(ZoneKind::Control).count(), 3);
    assert_eq!(data.of_kind(ZoneKind::Apartment).count(), 4);
    let billboard = data.zones.iter().find(|z| z.id == "billboard").unwrap();
    assert_eq!(billboard.kind, ZoneKind::Other);
    assert_eq!(billboard.display_label(), "billboard");
    assert_eq!(billboard.action_or_empty(), "");
    for z in &data.zones {
        let r = z.rect;
        assert!(r.x_pct >= 0.0 && r.x_pct + r.w_pct <= 100.0, "{}", z.id);
        assert!(r.y_pct >= 0.0 && r.y_pct + r.h_pct <= 100.0, "{}", z.id);
    }
}

#[test]
fn bundled_parallax_matches_defaults() {
    let cfg = ParallaxConfig::from_json(PARALLAX).unwrap();
    assert_eq!(cfg, ParallaxConfig::default());
}

#[test]
fn zones_without_meta_are_rejected() {
    let text = r#"{"zones": [
        {"id": "a", "type": "control", "rect": {"xPct": 0, "yPct": 0, "wPct": 1, "hPct": 1}}
    ]}"#;
    assert!(matches!(
        ZonesData::from_json(text),
        Err(StageError::MissingDesignSpace)
    ));

    let data = ZonesData::default();
    assert!(matches!(data.design(), Err(StageError::MissingDesignSpace)));
    assert!(data.validate().is_err());
}

#[test]
fn duplicate_zone_ids_are_rejected() {
    let text = r#"{"meta": {"designWidth": 800, "designHeight": 2600}, "zones": [
        {"id": "a", "type": "control", "rect": {"xPct": 0, "yPct": 0, "wPct": 1, "hPct": 1}},
        {"id": "a", "type": "apartment", "rect": {"xPct": 1, "yPct": 1, "wPct": 1, "hPct": 1}}
    ]}"#;
    match ZonesData::from_json(text) {
        Err(StageError::DuplicateZone(id)) => assert_eq!(id, "a"),
        other => panic!("expected DuplicateZone, got {other:?}"),
    }
}

#[test]
fn degenerate_design_is_rejected() {
    let text = r#"{"meta": {"designWidth": 0, "designHeight": 2600}, "zones": []}"#;
    assert!(matches!(
        ZonesData::from_json(text),
        Err(StageError::InvalidDesignSpace { .. })
    ));
    assert!(DesignSpace::new(f64::NAN, 10.0).is_err());
    assert!(DesignSpace::new(10.0, -1.0).is_err());
}

#[test]
fn malformed_json_names_the_file_kind() {
    let err = ZonesData::from_json("{not json").unwrap_err();
    assert!(matches!(err, StageError::Parse { what: "zones", .. }));
    let err = ParallaxConfig::from_json("42").unwrap_err();
    assert!(err.to_string().contains("parallax"));
}

#[test]
fn layer_depth_defaults_to_one() {
    let cfg = ParallaxConfig::from_json(r#"{"layers": [{"selector": ".far"}]}"#).unwrap();
    assert_eq!(cfg.layers, vec![LayerSpec::new(".far", 1.0)]);
    assert_eq!(cfg.ratio_y, 0.6);
    assert_eq!(cfg.smooth, 0.12);
}

#[test]
fn legacy_meta_wrapper_is_read_and_top_level_wins() {
    let patch = ParallaxPatch::from_json(r#"{"meta": {"ratioY": 0.4, "smooth": 0.2}}"#).unwrap();
    assert_eq!(patch.ratio_y, Some(0.4));
    assert_eq!(patch.smooth, Some(0.2));

    let patch =
        ParallaxPatch::from_json(r#"{"ratioY": 0.9, "meta": {"ratioY": 0.4, "smooth": 0.2}}"#).unwrap();
    assert_eq!(patch.ratio_y, Some(0.9));
    assert_eq!(patch.smooth, Some(0.2));
}

#[test]
fn patch_merges_only_present_fields() {
    let mut cfg = ParallaxConfig::default();
    cfg.apply(&ParallaxPatch::from_json(r#"{"smooth": 1}"#).unwrap());
    assert_eq!(cfg.smooth, 1.0);
    assert_eq!(cfg.ratio_y, 0.6);
    assert_eq!(cfg.layers.len(), 1);

    cfg.apply(&ParallaxPatch::default().ratio_y(f64::INFINITY).smooth(2.5));
    assert_eq!(cfg.ratio_y, 0.6);
    assert_eq!(cfg.smooth, 1.0);
}
