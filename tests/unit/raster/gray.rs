use super::*;

#[test]
fn output_channels_are_equal_and_opaque() {
    let data = vec![
        255, 0, 0, 10, //
        0, 255, 0, 0, //
        0, 0, 255, 255, //
        12, 200, 77, 128,
    ];
    let src = PixelBuffer::new(2, 2, data).unwrap();
    let out = grayscale(&src);
    for px in out.data().chunks_exact(4) {
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
        assert_eq!(px[3], 255);
    }
    assert!(matches!(out.pixel(0, 0)[0], 76 | 77));
    assert_eq!(out.pixel(1, 0)[0], 150);
    assert_eq!(out.pixel(0, 1)[0], 28);
}

#[test]
fn source_is_left_untouched() {
    let src = PixelBuffer::filled(2, 1, [9, 9, 9, 3]).unwrap();
    let _ = grayscale(&src);
    assert_eq!(src.pixel(0, 0), [9, 9, 9, 3]);
}
