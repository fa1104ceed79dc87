use super::*;

#[test]
fn defaults_match_the_editor_start_state() {
    let s = SceneState::default();
    assert_eq!(s.image, None);
    assert!(s.top_text.is_empty());
    assert!(s.bottom_text.is_empty());
    assert_eq!(s.font_size, 30);
    assert_eq!(s.text_color, Rgb8::WHITE);
    assert_eq!(s.font_family, FontFamily::Arial);
    assert_eq!(s.top_text_y, 50);
    assert_eq!(s.bottom_text_y, 350);
    assert!(s.emoji_markers.is_empty());
    assert_eq!(s.filter_kind, FilterKind::None);
    assert_eq!(s.filter_intensity, 100);
}

#[test]
fn clamps_pin_to_nearest_bound() {
    assert_eq!(clamp_font_size(5), 10);
    assert_eq!(clamp_font_size(101), 100);
    assert_eq!(clamp_font_size(42), 42);
    assert_eq!(clamp_text_y(-7), 0);
    assert_eq!(clamp_text_y(900), 400);
    assert_eq!(clamp_filter_intensity(250), 200);
    assert_eq!(clamp_filter_intensity(-1), 0);
}

#[test]
fn logical_points_are_clamped_into_frame() {
    let p = clamp_logical_point(LogicalPoint::new(-3.0, 512.5));
    assert_eq!(p, LogicalPoint::new(0.0, 400.0));
    let p = clamp_logical_point(LogicalPoint::new(f64::NAN, 12.5));
    assert_eq!(p, LogicalPoint::new(0.0, 12.5));
}

#[test]
fn font_and_filter_names_parse_case_insensitively() {
    assert_eq!(
        "comic sans ms".parse::<FontFamily>().unwrap(),
        FontFamily::ComicSansMs
    );
    assert_eq!("Impact".parse::<FontFamily>().unwrap(), FontFamily::Impact);
    assert!("Papyrus".parse::<FontFamily>().is_err());

    assert_eq!("SEPIA".parse::<FilterKind>().unwrap(), FilterKind::Sepia);
    assert_eq!("none".parse::<FilterKind>().unwrap(), FilterKind::None);
    assert!("hue-rotate".parse::<FilterKind>().is_err());
}

#[test]
fn scene_json_uses_display_names_and_skips_image() {
    let mut s = SceneState::default();
    s.image = Some(ImageHandle(7));
    s.font_family = FontFamily::CourierNew;
    s.filter_kind = FilterKind::Contrast;
    let v = serde_json::to_value(&s).unwrap();
    assert_eq!(v["font_family"], "Courier New");
    assert_eq!(v["filter_kind"], "contrast");
    assert_eq!(v["text_color"], "#ffffff");
    assert!(v.get("image").is_none());
}

#[test]
fn from_json_fills_defaults_and_sanitizes() {
    let s = SceneState::from_json(
        r##"{
            "top_text": "HELLO",
            "font_size": 500,
            "bottom_text_y": 9000,
            "emoji_markers": [{ "glyph": "😎", "x": 450.0, "y": -2.0 }]
        }"##,
    )
    .unwrap();
    assert_eq!(s.top_text, "HELLO");
    assert_eq!(s.font_size, 100);
    assert_eq!(s.bottom_text_y, 400);
    assert_eq!(s.top_text_y, 50);
    assert_eq!(s.emoji_markers[0].position(), LogicalPoint::new(400.0, 0.0));
    assert_eq!(s.image, None);

    assert!(SceneState::from_json("{ not json").is_err());
}
