// Animations file parsing and the sprite styling math.
use stage_web::config::{AnimationKind, AnimationsConfig, SpriteLayout};
use stage_web::error::StageError;
use stage_web::sprite::SpriteStyle;

const ANIMATIONS: &str = include_str!("../assets/animations.json");

#[test]
fn bundled_animations_parse() {
    let cfg = AnimationsConfig::from_json(ANIMATIONS).unwrap();
    let ids: Vec<&str> = cfg.sprites().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["ap-00", "ap-03"]);
    let ap03 = &cfg.entries["ap-03"];
    assert_eq!(ap03.kind, AnimationKind::SpriteSteps);
    assert_eq!(ap03.layout, SpriteLayout::Vertical);
    assert_eq!(ap03.frames, 6);
}

#[test]
fn optional_fields_take_defaults() {
    let cfg = AnimationsConfig::from_json(
        r#"{"ap-01": {"type": "sprite-steps", "frames": 12, "sprite": "a.png"}}"#,
    )
    .unwrap();
    let sheet = &cfg.entries["ap-01"];
    assert_eq!(sheet.fps, 6.0);
    assert_eq!(sheet.layout, SpriteLayout::Horizontal);
    assert_eq!(sheet.frame_width, 200.0);
    assert_eq!(sheet.frame_height, 650.0);
    assert_eq!(sheet.duration_secs(), 2.0);
}

#[test]
fn unplayable_entries_are_skipped() {
    let cfg = AnimationsConfig::from_json(
        r#"{
            "a": {"type": "css-fade", "frames": 4, "sprite": "a.png"},
            "b": {"frames": 4, "sprite": "b.png"},
            "c": {"type": "sprite-steps", "frames": 0, "sprite": "c.png"},
            "d": {"type": "sprite-steps", "frames": 4},
            "e": {"type": "sprite-steps", "frames": 4, "fps": 0, "sprite": "e.png"},
            "f": {"type": "sprite-steps", "frames": 4, "fps": 4, "sprite": "f.png"}
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.entries["a"].kind, AnimationKind::Other);
    assert_eq!(cfg.entries["b"].kind, AnimationKind::Other);
    let ids: Vec<&str> = cfg.sprites().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["f"]);
}

#[test]
fn malformed_animations_are_a_parse_error() {
    let err = AnimationsConfig::from_json(r#"{"ap-00": {"frames": "many"}}"#).unwrap_err();
    assert!(matches!(err, StageError::Parse { what: "animations", .. }));
}

#[test]
fn one_loop_lasts_frames_over_fps() {
    let cfg = AnimationsConfig::from_json(ANIMATIONS).unwrap();
    assert_eq!(cfg.entries["ap-00"].duration_secs(), 4.0 / 6.0);
    assert_eq!(cfg.entries["ap-03"].duration_secs(), 0.75);

    let style = SpriteStyle::for_sheet(&cfg.entries["ap-03"], 800.0, 2600.0);
    assert_eq!(style.duration_secs, 0.75);
}

#[test]
fn declarations_step_through_every_frame() {
    let cfg = AnimationsConfig::from_json(ANIMATIONS).unwrap();
    let style = SpriteStyle::for_sheet(&cfg.entries["ap-00"], 800.0, 2600.0);
    let decls = style.declarations();
    let get = |name: &str| {
        decls
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or_default()
            .to_string()
    };
    assert_eq!(get("width"), "800px");
    assert_eq!(get("height"), "2600px");
    assert_eq!(get("background-size"), "3200px 100%");
    assert_eq!(get("animation-name"), "sprite-anim");
    assert_eq!(get("animation-timing-function"), "steps(4)");
    assert_eq!(get("animation-iteration-count"), "infinite");
    assert_eq!(get("background-image"), "url(assets/sprites/ap-00-sheet.png)");
    assert!(decls.iter().all(|(k, _)| *k != "animation"));
}
