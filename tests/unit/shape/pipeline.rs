use std::io::Cursor;

use super::*;
use crate::foundation::core::is_normalized;
use crate::foundation::rng::garden_rng;

fn solid_png(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn opts(target: usize, sampler: SamplerKind) -> ExtractOpts {
    ExtractOpts {
        target_points: target,
        sampler,
        ..ExtractOpts::default()
    }
}

#[test]
fn black_image_direct_fills_target() {
    let ex = ShapeExtractor::new(opts(100, SamplerKind::Direct)).unwrap();
    let out = ex
        .extract(&solid_png(100, 100, [0, 0, 0, 255]), &mut garden_rng(Some(1)))
        .unwrap();
    assert!((50..=100).contains(&out.internal_points.len()));
    assert!(out.contour_points.is_empty());
    assert!(out.internal_points.iter().all(|p| is_normalized(*p)));
    assert!(!out.no_shape_detected());
}

#[test]
fn black_image_rejection_has_contour() {
    let ex = ShapeExtractor::new(opts(100, SamplerKind::Rejection)).unwrap();
    let out = ex
        .extract(&solid_png(100, 100, [0, 0, 0, 255]), &mut garden_rng(Some(2)))
        .unwrap();
    assert!((50..=100).contains(&out.internal_points.len()));
    assert!(out.contour_points.len() >= 4);
    assert!(out.contour_points.iter().all(|p| is_normalized(*p)));
}

#[test]
fn white_image_detects_no_shape() {
    for sampler in [SamplerKind::Direct, SamplerKind::Rejection] {
        let ex = ShapeExtractor::new(opts(100, sampler)).unwrap();
        let out = ex
            .extract(&solid_png(100, 100, [255, 255, 255, 255]), &mut garden_rng(Some(3)))
            .unwrap();
        assert!(out.no_shape_detected());
        assert!(out.contour_points.is_empty());
    }
}

#[test]
fn malformed_bytes_fail_fast() {
    let ex = ShapeExtractor::default();
    let err = ex.extract(b"\x89PNG broken", &mut garden_rng(Some(4))).unwrap_err();
    assert!(matches!(err, GardenError::ImageDecode(_)));
}

#[test]
fn large_input_is_capped_and_visualized() {
    let ex = ShapeExtractor::new(opts(300, SamplerKind::Direct)).unwrap();
    let out = ex
        .extract(&solid_png(1600, 400, [10, 10, 10, 255]), &mut garden_rng(Some(5)))
        .unwrap();
    assert_eq!((out.width, out.height), (800, 200));

    let vis = image::load_from_memory(&out.visualization_png).unwrap();
    assert_eq!((vis.width(), vis.height()), (800, 200));
}

#[test]
fn seeded_reruns_agree_on_point_count() {
    let png = solid_png(120, 80, [0, 0, 0, 255]);
    for sampler in [SamplerKind::Direct, SamplerKind::Rejection] {
        let ex = ShapeExtractor::new(opts(150, sampler)).unwrap();
        let a = ex.extract(&png, &mut garden_rng(Some(6))).unwrap();
        let b = ex.extract(&png, &mut garden_rng(Some(6))).unwrap();
        assert_eq!(a.internal_points.len(), b.internal_points.len());
    }
}

#[test]
fn zero_target_is_rejected() {
    assert!(ShapeExtractor::new(opts(0, SamplerKind::Direct)).is_err());
}
