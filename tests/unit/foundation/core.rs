use super::*;

#[test]
fn fit_downscales_wide_image_uniformly() {
    let s = SurfaceSize::fit(2000, 800, MAX_SURFACE_DIM);
    assert_eq!(
        s,
        SurfaceSize {
            width: 1200,
            height: 480
        }
    );
}

#[test]
fn fit_downscales_tall_image_by_height() {
    let s = SurfaceSize::fit(600, 2400, MAX_SURFACE_DIM);
    assert_eq!(s.width, 300);
    assert_eq!(s.height, 1200);
}

#[test]
fn fit_keeps_small_images_untouched() {
    let s = SurfaceSize::fit(640, 480, MAX_SURFACE_DIM);
    assert_eq!(
        s,
        SurfaceSize {
            width: 640,
            height: 480
        }
    );
    let exact = SurfaceSize::fit(1200, 1200, MAX_SURFACE_DIM);
    assert_eq!(exact.width, 1200);
    assert_eq!(exact.height, 1200);
}

#[test]
fn fit_never_produces_zero_dimensions() {
    let s = SurfaceSize::fit(100_000, 1, MAX_SURFACE_DIM);
    assert_eq!(s.width, 1200);
    assert_eq!(s.height, 1);
}

#[test]
fn surface_new_rejects_zero() {
    assert!(SurfaceSize::new(0, 10).is_err());
    assert!(SurfaceSize::new(10, 0).is_err());
    assert_eq!(SurfaceSize::new(3, 4).unwrap().pixel_count(), 12);
}

#[test]
fn rgb8_parses_long_and_short_hex() {
    assert_eq!("#ffffff".parse::<Rgb8>().unwrap(), Rgb8::WHITE);
    assert_eq!("FF8000".parse::<Rgb8>().unwrap(), Rgb8::new(255, 128, 0));
    assert_eq!("#f80".parse::<Rgb8>().unwrap(), Rgb8::new(255, 136, 0));
    assert!("#12345".parse::<Rgb8>().is_err());
    assert!("#gg0000".parse::<Rgb8>().is_err());
}

#[test]
fn rgb8_rejects_signs_inside_hex() {
    assert!("#+f+f+f".parse::<Rgb8>().is_err());
    assert!("#+ff+ff".parse::<Rgb8>().is_err());
    assert!("+f0".parse::<Rgb8>().is_err());
    assert!("#-1-1-1".parse::<Rgb8>().is_err());
}

#[test]
fn rgb8_serde_uses_hex_strings() {
    let json = serde_json::to_string(&Rgb8::new(1, 2, 255)).unwrap();
    assert_eq!(json, "\"#0102ff\"");
    let back: Rgb8 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Rgb8::new(1, 2, 255));
    assert!(serde_json::from_str::<Rgb8>("\"nope\"").is_err());
}
