//! File round-trips: encoding, decoding, sidecars and directory batches.

use std::fs;

use imgcompose::io::writers::metadata::sidecar_path;
use imgcompose::{
    AlphaLayout, Bitmap, Error, OutputFormat, PixelFormat, ThumbnailParams, ThumbnailRecord,
    load_bitmap, process_directory_to_path, save_bitmap, thumbnail_file_to_path,
};
use tempfile::tempdir;

fn write_png(path: &std::path::Path, width: u32, height: u32) {
    let image = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 3) as u8, (y * 3) as u8, 90])
    });
    image.save(path).unwrap();
}

#[test]
fn png_keeps_alpha_straight_on_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("translucent.png");
    let bitmap = Bitmap::new(
        2,
        1,
        PixelFormat::rgba8(AlphaLayout::PremultipliedLast),
        vec![100, 50, 0, 128, 0, 0, 0, 0],
    )
    .unwrap();
    save_bitmap(&bitmap, &path, OutputFormat::Png).unwrap();

    let raw = image::open(&path).unwrap().to_rgba8();
    assert_eq!(raw.get_pixel(0, 0).0, [199, 100, 0, 128]);
    assert_eq!(raw.get_pixel(1, 0).0[3], 0);

    let loaded = load_bitmap(&path).unwrap();
    assert_eq!(loaded.format(), PixelFormat::rgba8(AlphaLayout::Last));
    assert_eq!(loaded.rgba8_at(0, 0), [100, 50, 0, 128]);
}

#[test]
fn jpeg_output_has_no_alpha() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.png");
    let output = dir.path().join("thumb.jpg");
    write_png(&input, 40, 30);

    let params = ThumbnailParams {
        size: 16,
        corner_radius: 4,
        format: OutputFormat::Jpeg,
        ..Default::default()
    };
    thumbnail_file_to_path(&input, &output, &params).unwrap();

    let loaded = load_bitmap(&output).unwrap();
    assert_eq!((loaded.width(), loaded.height()), (16, 16));
    assert!(!loaded.has_alpha());
}

#[test]
fn thumbnail_file_writes_sidecar() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("photo.png");
    let output = dir.path().join("photo_thumb.png");
    write_png(&input, 100, 100);

    let params = ThumbnailParams {
        size: 50,
        border: 5,
        corner_radius: 10,
        sidecar: true,
        ..Default::default()
    };
    let thumbnail = thumbnail_file_to_path(&input, &output, &params).unwrap();
    assert_eq!((thumbnail.width(), thumbnail.height()), (60, 60));

    let written = load_bitmap(&output).unwrap();
    assert_eq!((written.width(), written.height()), (60, 60));
    assert_eq!(written.rgba8_at(0, 0)[3], 0);
    assert_eq!(written.rgba8_at(30, 30)[3], 255);

    let json = fs::read_to_string(sidecar_path(&output)).unwrap();
    let record: ThumbnailRecord = serde_json::from_str(&json).unwrap();
    assert_eq!((record.source_width, record.source_height), (100, 100));
    assert_eq!((record.width, record.height), (60, 60));
    assert_eq!(record.params, params);
}

#[test]
fn batch_counts_processed_skipped_and_failed() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    write_png(&input_dir.path().join("a.png"), 30, 20);
    write_png(&input_dir.path().join("c.png"), 20, 30);
    fs::write(input_dir.path().join("b.png"), b"not really a png").unwrap();
    fs::write(input_dir.path().join("notes.txt"), b"hello").unwrap();
    fs::create_dir(input_dir.path().join("nested")).unwrap();

    let params = ThumbnailParams {
        size: 12,
        ..Default::default()
    };
    let report =
        process_directory_to_path(input_dir.path(), output_dir.path(), &params, true).unwrap();
    assert_eq!(report.processed, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.errors, 1);
    assert!(output_dir.path().join("a.png").is_file());
    assert!(output_dir.path().join("c.png").is_file());

    let err = process_directory_to_path(input_dir.path(), output_dir.path(), &params, false)
        .unwrap_err();
    assert!(matches!(err, Error::Image(_) | Error::Io(_)));
}

#[test]
fn batch_reports_inputs_that_share_an_output_name() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    write_png(&input_dir.path().join("a.png"), 30, 20);
    image::RgbImage::from_pixel(20, 30, image::Rgb([200, 10, 10]))
        .save(input_dir.path().join("a.jpg"))
        .unwrap();

    let params = ThumbnailParams {
        size: 12,
        ..Default::default()
    };
    let report =
        process_directory_to_path(input_dir.path(), output_dir.path(), &params, true).unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(report.errors, 1);
    // Inputs are visited in name order, so `a.jpg` wins and `a.png` is refused.
    let kept = load_bitmap(&output_dir.path().join("a.png")).unwrap();
    assert_eq!((kept.width(), kept.height()), (12, 12));
    assert_eq!(fs::read_dir(output_dir.path()).unwrap().count(), 1);

    let err = process_directory_to_path(input_dir.path(), output_dir.path(), &params, false)
        .unwrap_err();
    assert!(matches!(err, Error::Processing(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = load_bitmap(&dir.path().join("missing.png")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
