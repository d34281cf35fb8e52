use super::*;

fn clip(n: u8) -> LoopingFrames {
    let frames = (0..n)
        .map(|i| PixelFrame::filled(2, 2, [i, 0, 0, 255]).unwrap())
        .collect();
    LoopingFrames::new(frames, Fps::new(30, 1).unwrap()).unwrap()
}

fn presented_tag(src: &LoopingFrames) -> (u64, u8) {
    let (idx, f) = src.presented().unwrap();
    (idx.0, f.data[0])
}

#[test]
fn empty_and_ragged_clips_are_rejected() {
    let fps = Fps::new(30, 1).unwrap();
    assert!(LoopingFrames::new(vec![], fps).is_err());
    let frames = vec![
        PixelFrame::new(2, 2).unwrap(),
        PixelFrame::new(2, 3).unwrap(),
    ];
    assert!(LoopingFrames::new(frames, fps).is_err());
}

#[test]
fn looping_clip_wraps_but_index_keeps_increasing() {
    let mut src = clip(3);
    assert_eq!(presented_tag(&src), (0, 0));
    src.advance();
    src.advance();
    assert_eq!(presented_tag(&src), (2, 2));
    src.advance();
    assert_eq!(presented_tag(&src), (3, 0));
    assert!(src.is_playing());
}

#[test]
fn non_looping_clip_ends_on_last_frame() {
    let mut src = clip(2);
    src.set_looping(false);
    src.advance();
    src.advance();
    assert!(src.is_ended());
    assert!(!src.is_playing());
    assert_eq!(presented_tag(&src), (1, 1));
}

#[test]
fn pause_stops_playing_without_losing_frame() {
    let mut src = clip(2);
    src.advance();
    src.pause();
    assert!(!src.is_playing());
    assert_eq!(presented_tag(&src), (1, 1));
    src.play();
    assert!(src.is_playing());
}

#[test]
fn seek_uses_native_frame_rate() {
    let mut src = clip(4);
    src.seek(Duration::from_millis(100));
    assert_eq!(presented_tag(&src), (3, 3));
    src.seek(Duration::from_millis(150));
    assert_eq!(presented_tag(&src), (4, 0));
}
