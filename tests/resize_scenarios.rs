//! End-to-end runs against the `image` crate backend.
//!
//! Fixtures are generated on the fly, so no binary assets live in the repository.

use image::{ImageBuffer, Rgb};
use recursive_resize::{BatchResizer, Config, ResizeError};
use std::path::Path;
use tempfile::TempDir;

fn write_image(path: &Path, width: u32, height: u32) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    ImageBuffer::from_pixel(width, height, Rgb([120u8, 60, 200]))
        .save(path)
        .unwrap();
}

fn dimensions(path: &Path) -> (u32, u32) {
    let image = image::open(path).unwrap();
    (image.width(), image.height())
}

fn scenario_tree() -> (TempDir, TempDir) {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_image(&input.path().join("a.png"), 200, 100);
    write_image(&input.path().join("sub/b.jpg"), 300, 150);
    std::fs::write(input.path().join("notes.txt"), "not an image").unwrap();
    (input, output)
}

#[tokio::test]
async fn test_resize_tree_without_thumbnails() {
    let (input, output) = scenario_tree();
    let config = Config::new(input.path(), output.path(), 100);

    let summary = BatchResizer::new(config).unwrap().run().await.unwrap();

    assert_eq!(summary.total_images, 2);
    assert_eq!(summary.total_operations, 2);
    assert_eq!(summary.completed_operations, 2);
    assert_eq!(dimensions(&output.path().join("a.png")), (100, 50));
    assert_eq!(dimensions(&output.path().join("sub/b.jpg")), (100, 50));
    assert!(!output.path().join("notes.txt").exists());
    assert!(!output.path().join("tn-a.png").exists());
}

#[tokio::test]
async fn test_resize_tree_with_thumbnails() {
    let (input, output) = scenario_tree();
    let config = Config {
        thumbnail_width: Some(20),
        ..Config::new(input.path(), output.path(), 100)
    };

    let summary = BatchResizer::new(config).unwrap().run().await.unwrap();

    assert_eq!(summary.total_operations, 4);
    assert_eq!(summary.completed_operations, 4);
    assert_eq!(dimensions(&output.path().join("a.png")), (100, 50));
    assert_eq!(dimensions(&output.path().join("tn-a.png")), (20, 10));
    assert_eq!(dimensions(&output.path().join("sub/b.jpg")), (100, 50));
    assert_eq!(dimensions(&output.path().join("sub/tn-b.jpg")), (20, 10));
}

#[tokio::test]
async fn test_corrupt_image_fails_run() {
    let (input, output) = scenario_tree();
    std::fs::write(input.path().join("bad.jpg"), b"\xFF\xD8 truncated jpeg").unwrap();
    let config = Config::new(input.path(), output.path(), 100);

    let err = BatchResizer::new(config).unwrap().run().await.unwrap_err();

    assert!(matches!(err, ResizeError::Operation { .. }));
    assert_eq!(err.failed_path(), Some("/bad.jpg"));
    assert!(err.to_string().starts_with("Problem outputting /bad.jpg: "));
}

#[tokio::test]
async fn test_rerun_keeps_unrelated_output() {
    let (input, output) = scenario_tree();
    std::fs::create_dir_all(output.path().join("sub")).unwrap();
    std::fs::write(output.path().join("sub/keep.txt"), "keep me").unwrap();
    let config = Config::new(input.path(), output.path(), 50);

    let resizer = BatchResizer::new(config).unwrap();
    resizer.run().await.unwrap();
    let summary = resizer.run().await.unwrap();

    assert_eq!(summary.completed_operations, 2);
    assert_eq!(dimensions(&output.path().join("sub/b.jpg")), (50, 25));
    assert_eq!(
        std::fs::read_to_string(output.path().join("sub/keep.txt")).unwrap(),
        "keep me"
    );
}

#[tokio::test]
async fn test_upscales_small_images() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_image(&input.path().join("tiny.PNG"), 10, 5);
    let config = Config::new(input.path(), output.path(), 40);

    BatchResizer::new(config).unwrap().run().await.unwrap();

    assert_eq!(dimensions(&output.path().join("tiny.PNG")), (40, 20));
}

#[tokio::test]
async fn test_empty_tree_is_successful() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    std::fs::create_dir_all(input.path().join("nothing/here")).unwrap();
    let config = Config::new(input.path(), output.path(), 100);

    let summary = BatchResizer::new(config).unwrap().run().await.unwrap();

    assert_eq!(summary.total_images, 0);
    assert_eq!(summary.total_operations, 0);
    assert!(output.path().join("nothing/here").is_dir());
}
