use super::*;
use crate::capture::clock::ManualClock;
use crate::foundation::core::Point;

fn token(target: Point) -> WordToken {
    WordToken {
        word: "seed".into(),
        start: Point::new(-500.0, -500.0),
        target,
        font_size: 16.0,
        final_scale: 0.9,
        delay_secs: 0.0,
        color: [255, 0, 0, 255],
    }
}

fn style(background: Option<[u8; 4]>) -> GardenStyle {
    GardenStyle {
        canvas: Canvas::new(64, 48).unwrap(),
        duration_secs: 1.0,
        ease: Ease::Linear,
        background,
    }
}

fn pixel(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

#[test]
fn first_frame_is_empty_stage() {
    let g = WordGarden::new(
        vec![token(Point::new(32.0, 24.0))],
        style(None),
        Rc::new(ManualClock::new()),
    );
    let f = g.frame_at(0.0, 64, 48).unwrap();
    assert!(f.premultiplied);
    assert_eq!(f.data.len(), 64 * 48 * 4);
    assert!(f.data.iter().all(|&b| b == 0));
}

#[test]
fn landed_token_covers_its_target() {
    let g = WordGarden::new(
        vec![token(Point::new(32.0, 24.0))],
        style(None),
        Rc::new(ManualClock::new()),
    );
    let f = g.frame_at(5.0, 64, 48).unwrap();
    let [r, g_, b, a] = pixel(&f, 32, 24);
    assert!(a > 200 && a < 230, "alpha {a}");
    assert!(r > 200 && g_ == 0 && b == 0);
    assert_eq!(pixel(&f, 0, 0), [0, 0, 0, 0]);
}

#[test]
fn background_fills_stage() {
    let g = WordGarden::new(Vec::new(), style(Some([0, 0, 255, 255])), Rc::new(ManualClock::new()));
    let f = g.frame_at(0.0, 64, 48).unwrap();
    assert_eq!(pixel(&f, 10, 10), [0, 0, 255, 255]);
}

#[test]
fn snapshot_time_follows_clock_from_first_capture() {
    let clock = Rc::new(ManualClock::new());
    clock.advance(Duration::from_secs(30));
    let mut g = WordGarden::new(vec![token(Point::new(32.0, 24.0))], style(None), clock.clone());

    let first = g.render_snapshot(64, 48).unwrap();
    assert!(first.data.iter().all(|&b| b == 0));

    clock.advance(Duration::from_secs(5));
    let later = g.render_snapshot(64, 48).unwrap();
    assert!(pixel(&later, 32, 24)[3] > 0);
}

#[test]
fn oversized_snapshot_is_rejected() {
    let g = WordGarden::new(Vec::new(), style(None), Rc::new(ManualClock::new()));
    assert!(g.frame_at(0.0, 70_000, 10).is_err());
    assert!(g.frame_at(0.0, 0, 10).is_err());
}
