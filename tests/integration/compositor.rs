//! Compositor task driving real sources

use std::time::Duration;

use tempfile::TempDir;
use valentine::chroma::{demo_frames, key_image_file, spawn_compositor, LoopingFrames};

use super::common::fixtures::write_split_png;

#[tokio::test(start_paused = true)]
async fn test_demo_loop_is_keyed_on_the_clock() {
    let mut handle = spawn_compositor(LoopingFrames::new(demo_frames()), None);
    let mut frames = handle.subscribe();

    tokio::time::timeout(Duration::from_secs(1), frames.changed())
        .await
        .expect("no frame within a second")
        .expect("compositor dropped its sender");

    let frame = handle.latest().expect("a frame was published");
    let (width, height) = frame.dimensions();
    assert_eq!(frame.get_pixel(0, 0)[3], 0, "backdrop should be keyed");
    assert_eq!(frame.get_pixel(width / 2, height / 2)[3], 255, "heart should stay");

    handle.shutdown();
    assert!(!handle.is_running());
}

#[test]
fn test_key_image_file_writes_transparent_png() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    write_split_png(&input, 8, 4);

    let keyed = key_image_file(&input, &output).expect("keying should succeed");
    assert_eq!(keyed, 16);

    let out = image::open(&output).expect("output is a PNG").to_rgba8();
    assert_eq!(out.get_pixel(0, 0)[3], 0);
    assert_eq!(out.get_pixel(7, 3)[3], 255);
}

#[test]
fn test_key_image_file_missing_input_errors() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let result = key_image_file(&dir.path().join("nope.png"), &dir.path().join("out.png"));
    assert!(result.is_err());
}
