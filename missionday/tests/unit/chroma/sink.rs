use super::*;
use std::sync::mpsc;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 1,
        height: 1,
        fps: Fps::new(30, 1).unwrap(),
    }
}

#[test]
fn in_memory_sink_captures_config_and_frames() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    let f = PixelFrame::filled(1, 1, [1, 2, 3, 4]).unwrap();
    sink.push_frame(FrameIndex(0), &f).unwrap();
    sink.push_frame(FrameIndex(1), &f).unwrap();
    sink.end().unwrap();
    assert_eq!(sink.config(), Some(cfg()));
    assert_eq!(sink.frames().len(), 2);
    assert_eq!(sink.frames()[1].0, FrameIndex(1));
}

#[test]
fn channel_sink_drops_when_full_and_errors_when_disconnected() {
    let (tx, rx) = mpsc::sync_channel(1);
    let mut sink = ChannelSink::new(tx);
    let f = PixelFrame::new(1, 1).unwrap();
    sink.push_frame(FrameIndex(0), &f).unwrap();
    sink.push_frame(FrameIndex(1), &f).unwrap();
    assert_eq!(sink.dropped(), 1);
    assert_eq!(rx.recv().unwrap().0, FrameIndex(0));
    drop(rx);
    assert!(sink.push_frame(FrameIndex(2), &f).is_err());
}

#[test]
fn png_sequence_sink_writes_numbered_files() {
    let dir = std::path::PathBuf::from("target").join("png_sequence_sink");
    let _ = std::fs::remove_dir_all(&dir);
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(cfg()).unwrap();
    let f = PixelFrame::filled(1, 1, [0, 255, 0, 0]).unwrap();
    sink.push_frame(FrameIndex(7), &f).unwrap();
    sink.push_frame(FrameIndex(8), &f).unwrap();
    sink.end().unwrap();
    assert_eq!(sink.written(), 2);
    let img = image::open(dir.join("frame_00001.png")).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0, [0, 255, 0, 0]);
}
