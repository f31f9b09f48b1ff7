use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn new_rejects_length_mismatch_and_empty() {
    assert!(PixelBuffer::new(2, 2, vec![0; 15]).is_err());
    assert!(PixelBuffer::new(0, 2, Vec::new()).is_err());
    assert!(PixelBuffer::new(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn decode_png_keeps_straight_alpha() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100, 50, 200, 128]).unwrap();
    let buf = PixelBuffer::decode(&png_bytes(img)).unwrap();
    assert_eq!((buf.width(), buf.height()), (1, 1));
    assert_eq!(buf.pixel(0, 0), [100, 50, 200, 128]);
}

#[test]
fn decode_garbage_is_image_decode_error() {
    let err = PixelBuffer::decode(b"definitely not an image").unwrap_err();
    assert!(matches!(err, GardenError::ImageDecode(_)));
}

#[test]
fn fit_dimensions_caps_longer_side() {
    assert_eq!(fit_dimensions(1600, 900, 800), (800, 450));
    assert_eq!(fit_dimensions(900, 1600, 800), (450, 800));
    assert_eq!(fit_dimensions(1000, 1000, 800), (800, 800));
    assert_eq!(fit_dimensions(640, 480, 800), (640, 480));
    assert_eq!(fit_dimensions(5000, 1, 800), (800, 1));
}

#[test]
fn fit_within_resizes_large_buffers() {
    let buf = PixelBuffer::filled(1000, 500, [0, 0, 0, 255]).unwrap();
    let out = buf.fit_within(800).unwrap();
    assert_eq!((out.width(), out.height()), (800, 400));
    assert_eq!(out.data().len(), 800 * 400 * 4);
}

#[test]
fn png_roundtrip_preserves_pixels() {
    let mut buf = PixelBuffer::filled(3, 2, [255, 255, 255, 255]).unwrap();
    buf.set_pixel(1, 1, [0, 0, 0, 255]);
    let back = PixelBuffer::decode(&buf.to_png().unwrap()).unwrap();
    assert_eq!(back, buf);
}
