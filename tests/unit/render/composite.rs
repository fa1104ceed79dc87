use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over(dst, [255, 255, 255, 0]), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    assert_eq!(over([0, 0, 0, 255], [255, 0, 0, 255]), [255, 0, 0, 255]);
}

#[test]
fn over_half_black_on_white_is_mid_grey() {
    let out = over([255, 255, 255, 255], [0, 0, 0, 128]);
    assert_eq!(out, [127, 127, 127, 255]);
}

#[test]
fn premultiply_scales_color_by_alpha() {
    assert_eq!(premultiply([200, 100, 50, 255]), [200, 100, 50, 255]);
    assert_eq!(premultiply([200, 100, 50, 0]), [0, 0, 0, 0]);
    assert_eq!(premultiply([255, 255, 255, 128]), [128, 128, 128, 128]);
}

#[test]
fn straight_over_white_keeps_surface_opaque() {
    let mut dst = [255u8, 255, 255, 255].repeat(2);
    let src = [0u8, 0, 255, 255, 0, 0, 0, 0];
    straight_over_in_place(&mut dst, &src).unwrap();
    assert_eq!(&dst[0..4], &[0, 0, 255, 255]);
    assert_eq!(&dst[4..8], &[255, 255, 255, 255]);
}

#[test]
fn length_mismatch_is_an_error() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4]).is_err());
    assert!(straight_over_in_place(&mut dst, &[0u8; 7]).is_err());
}
