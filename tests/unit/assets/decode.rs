use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_keeps_dimensions_and_straight_alpha() {
    let img = image::RgbaImage::from_raw(2, 1, vec![100, 50, 200, 128, 1, 2, 3, 255]).unwrap();
    let decoded = decode_image(&png_bytes(img)).unwrap();
    assert_eq!(decoded.width, 2);
    assert_eq!(decoded.height, 1);
    assert_eq!(decoded.rgba.get_pixel(0, 0).0, [100, 50, 200, 128]);
    assert_eq!(decoded.rgba.get_pixel(1, 0).0, [1, 2, 3, 255]);
}

#[test]
fn corrupt_bytes_are_a_decode_error() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(err.is_decode(), "{err}");

    let mut truncated = png_bytes(image::RgbaImage::new(8, 8));
    truncated.truncate(20);
    assert!(decode_image(&truncated).unwrap_err().is_decode());
}

#[test]
fn empty_input_is_a_decode_error() {
    assert!(decode_image(&[]).unwrap_err().is_decode());
}

#[test]
fn zero_sized_buffers_are_rejected() {
    assert!(DecodedImage::from_rgba(image::RgbaImage::new(0, 3)).is_err());
}
