use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

#[test]
fn parses_long_and_short_hex() {
    assert_eq!(parse_hex("#90ee90"), Some([144, 238, 144]));
    assert_eq!(parse_hex("FF0000"), Some([255, 0, 0]));
    assert_eq!(parse_hex("#0f8"), Some([0, 255, 136]));
    assert_eq!(parse_hex("#12345"), None);
    assert_eq!(parse_hex("#gg0000"), None);
    assert_eq!(parse_hex("#ééé"), None);
}

#[test]
fn bad_hex_falls_back_to_light_green() {
    assert_eq!(hex_or_fallback("not a color"), FALLBACK_RGB);
}

#[test]
fn hsl_primaries() {
    assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), [255, 0, 0]);
    assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), [0, 255, 0]);
    assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), [0, 0, 255]);
    assert_eq!(hsl_to_rgb(480.0, 1.0, 0.5), [0, 255, 0]);
    assert_eq!(hsl_to_rgb(42.0, 0.0, 0.5), [128, 128, 128]);
}

#[test]
fn alpha_stays_in_range() {
    let palette = Palette::new(ColorMode::Single, "#90ee90", &[]);
    let mut rng = StdRng::seed_from_u64(3);
    for i in 0..200 {
        let [r, g, b, a] = palette.pick(i, &mut rng);
        assert_eq!([r, g, b], [144, 238, 144]);
        assert!((178..=255).contains(&a), "alpha {a}");
    }
}

#[test]
fn rainbow_spreads_hues_by_golden_angle() {
    let palette = Palette::new(ColorMode::Rainbow, "#000000", &[]);
    let mut rng = StdRng::seed_from_u64(1);
    let first = palette.pick(0, &mut rng);
    assert_eq!(&first[..3], &hsl_to_rgb(0.0, 0.7, 0.6));
    let second = palette.pick(1, &mut rng);
    assert_eq!(&second[..3], &hsl_to_rgb(137.508, 0.7, 0.6));
}

#[test]
fn custom_cycles_and_empty_uses_base() {
    let custom = vec!["#ff0000".to_string(), "#0000ff".to_string()];
    let palette = Palette::new(ColorMode::Custom, "#00ff00", &custom);
    let mut rng = StdRng::seed_from_u64(9);
    assert_eq!(&palette.pick(0, &mut rng)[..3], &[255, 0, 0]);
    assert_eq!(&palette.pick(1, &mut rng)[..3], &[0, 0, 255]);
    assert_eq!(&palette.pick(2, &mut rng)[..3], &[255, 0, 0]);

    let empty = Palette::new(ColorMode::Custom, "#00ff00", &[]);
    assert_eq!(&empty.pick(5, &mut rng)[..3], &[0, 255, 0]);
}
