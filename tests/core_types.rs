use snapocr::{BinaryImage, CandidateSet, ImageView, OcrError, Segment};

#[test]
fn image_view_rejects_invalid_dimensions() {
    let data = [0u8; 4];

    let err = ImageView::from_slice(&data, 0, 1).err().unwrap();
    assert_eq!(
        err,
        OcrError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = ImageView::from_slice(&data, 1, 0).err().unwrap();
    assert_eq!(
        err,
        OcrError::InvalidDimensions {
            width: 1,
            height: 0,
        }
    );
}

#[test]
fn image_view_rejects_invalid_stride() {
    let data = [0u8; 8];

    let err = ImageView::new(&data, 4, 1, 3).err().unwrap();
    assert_eq!(
        err,
        OcrError::InvalidStride {
            width: 4,
            stride: 3,
        }
    );
}

#[test]
fn image_view_rejects_small_buffer() {
    let data = [0u8; 3];

    let err = ImageView::new(&data, 2, 2, 2).err().unwrap();
    assert_eq!(err, OcrError::BufferTooSmall { needed: 4, got: 3 });
}

#[test]
fn roi_respects_stride() {
    let data: Vec<u8> = (0..20).collect();
    let view = ImageView::new(&data, 4, 4, 5).unwrap();
    let roi = view.roi(1, 2, 2, 2).unwrap();
    assert_eq!(roi.row(0).unwrap(), &[11, 12]);
    assert_eq!(roi.row(1).unwrap(), &[16, 17]);
    assert_eq!(roi.rows().count(), 2);
}

#[test]
fn crop_outside_image_is_an_error() {
    let img = BinaryImage::blank(10, 8).unwrap();
    let err = img.crop(6, 0, 11, 3).err().unwrap();
    assert_eq!(
        err,
        OcrError::RoiOutOfBounds {
            x: 6,
            y: 0,
            width: 6,
            height: 4,
            img_width: 10,
            img_height: 8,
        }
    );
}

#[test]
fn crop_keeps_ink_positions() {
    let img = BinaryImage::from_fn(10, 10, |x, y| x == 5 && y == 6).unwrap();
    let crop = img.crop(4, 5, 7, 8).unwrap();
    assert_eq!((crop.width(), crop.height()), (4, 4));
    assert!(crop.is_ink(1, 1));
    assert_eq!(crop.ink_count(), 1);
}

#[test]
fn segment_geometry_is_inclusive() {
    let seg = Segment::new(3, 7, 2, 2);
    assert_eq!(seg.width(), 5);
    assert_eq!(seg.height(), 1);
    assert_eq!(seg.area(), 5);
}

#[test]
fn ascii_dump_marks_ink() {
    let img = BinaryImage::from_fn(3, 2, |x, y| x == y).unwrap();
    assert_eq!(img.to_ascii(), "##....\n..##..\n");
}

#[test]
fn candidate_set_rejects_empty_input() {
    assert_eq!(
        CandidateSet::from_chars("").err(),
        Some(OcrError::EmptyCandidateSet)
    );
    let set = CandidateSet::from_chars("ABCD").unwrap();
    assert!(set.is_constrained());
    assert!(set.contains('C'));
    assert!(!set.contains('E'));
    assert!(CandidateSet::full().contains('E'));
}
