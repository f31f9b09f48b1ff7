use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GardenError::image_decode("x")
            .to_string()
            .contains("image decode error:")
    );
    assert!(
        GardenError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        GardenError::capture_unsupported("x")
            .to_string()
            .contains("capture unsupported:")
    );
    assert!(
        GardenError::encoding_fault("x")
            .to_string()
            .contains("encoding fault:")
    );
    let small = GardenError::EncodingTooSmall {
        bytes: 12,
        floor: 1024,
    };
    assert!(small.to_string().contains("12 bytes"));
}

#[test]
fn kind_matches_variant() {
    assert_eq!(GardenError::image_decode("x").kind(), ErrorKind::ImageDecode);
    assert_eq!(GardenError::capture_busy("x").kind(), ErrorKind::CaptureBusy);
    assert_eq!(
        GardenError::EncodingTooSmall { bytes: 0, floor: 1 }.kind(),
        ErrorKind::EncodingTooSmall
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GardenError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert_eq!(err.kind(), ErrorKind::Other);
}
