use super::*;

fn cfg() -> StreamConfig {
    StreamConfig {
        width: 2,
        height: 2,
        fps: Fps::new(30, 1).unwrap(),
        alpha: false,
    }
}

#[test]
fn chunks_come_back_in_push_order() {
    let mut enc = InMemoryEncoder::new();
    enc.begin(cfg()).unwrap();
    for i in 0..3u8 {
        let mut f = FrameRGBA::transparent(2, 2);
        f.data[0] = i;
        enc.push_frame(FrameIndex(u64::from(i)), &f).unwrap();
    }
    let first = enc.take_chunks();
    assert_eq!(first.len(), 3);
    assert_eq!(first.iter().map(|c| c[0]).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert!(enc.take_chunks().is_empty());
    assert!(enc.finish().unwrap().is_empty());
    assert_eq!(enc.frames(), 3);
}

#[test]
fn out_of_order_frames_are_faults() {
    let mut enc = InMemoryEncoder::new();
    enc.begin(cfg()).unwrap();
    let f = FrameRGBA::transparent(2, 2);
    enc.push_frame(FrameIndex(1), &f).unwrap();
    let err = enc.push_frame(FrameIndex(1), &f).unwrap_err();
    assert!(matches!(err, GardenError::EncodingFault(_)));
}

#[test]
fn push_before_begin_and_double_finish_fail() {
    let mut enc = InMemoryEncoder::new();
    assert!(enc.push_frame(FrameIndex(0), &FrameRGBA::transparent(2, 2)).is_err());
    enc.begin(cfg()).unwrap();
    enc.finish().unwrap();
    assert!(enc.finish().is_err());
}

#[test]
fn abort_is_repeatable() {
    let mut enc = InMemoryEncoder::new();
    enc.begin(cfg()).unwrap();
    enc.abort();
    enc.abort();
    assert!(enc.config().is_none());
}
