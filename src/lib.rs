#![doc = r#"
imgcompose — image compositing helpers and a thumbnail pipeline.

This crate provides a typed, ergonomic API for the everyday image chores of a
photo or asset pipeline: adding an alpha channel, surrounding an image with a
transparent border, orientation-aware aspect-fill / aspect-fit resizing,
cropping, rounded-corner clipping, and a square thumbnail that chains them.
It powers the `imgcompose` CLI and can be embedded in your own Rust
applications.

All operations are pure: they take a `Bitmap` and return a new one. Drawing
goes through the `RenderBackend` trait; the crate ships `RasterBackend`, which
draws with `tiny-skia` and resamples with `fast_image_resize`.

Add dependency
--------------
```toml
[dependencies]
imgcompose = "0.1"
```

Quick start: thumbnail a file
-----------------------------
```rust,no_run
use std::path::Path;
use imgcompose::{thumbnail_file_to_path, InterpolationQuality, OutputFormat, ThumbnailParams};

fn main() -> imgcompose::Result<()> {
    let params = ThumbnailParams {
        size: 256,
        border: 8,
        corner_radius: 24,
        quality: InterpolationQuality::High,
        format: OutputFormat::Png,
        orientation: None,
        sidecar: true,
    };

    let thumbnail = thumbnail_file_to_path(
        Path::new("/photos/IMG_0001.jpg"),
        Path::new("/out/IMG_0001.png"),
        &params,
    )?;
    assert_eq!(thumbnail.width(), 256 + 2 * 8);
    Ok(())
}
```

In-memory compositing
---------------------
```rust
use imgcompose::{AlphaLayout, Bitmap, Compositor, ContentMode, InterpolationQuality, PixelFormat, Size};

fn main() -> imgcompose::Result<()> {
    let pixels = vec![200u8; 40 * 20 * 3];
    let bitmap = Bitmap::new(40, 20, PixelFormat::rgb8(), pixels)?;
    let compositor = Compositor::raster();

    let fitted = compositor.resize_with_content_mode(
        &bitmap,
        Size::new(10.0, 10.0),
        ContentMode::AspectFit,
        InterpolationQuality::Medium,
    )?;
    assert_eq!((fitted.width(), fitted.height()), (10, 5));

    let rounded = compositor.round_corners(&fitted, 2, 0)?;
    assert_eq!(rounded.format().alpha, AlphaLayout::PremultipliedFirst);
    Ok(())
}
```

Batch helpers
-------------
```rust,no_run
use std::path::Path;
use imgcompose::{process_directory_to_path, ThumbnailParams};

fn main() -> imgcompose::Result<()> {
    let params = ThumbnailParams {
        size: 128,
        corner_radius: 16,
        ..Default::default()
    };

    let report = process_directory_to_path(
        Path::new("/photos"),
        Path::new("/out"),
        &params,
        true, // continue_on_error
    )?;

    println!("processed={} skipped={} errors={}", report.processed, report.skipped, report.errors);
    Ok(())
}
```

Error handling
--------------
All public functions return `imgcompose::Result<T>`; match on `imgcompose::Error`
to handle specific cases, e.g. backend failures or codec errors.

```rust,no_run
use std::path::Path;
use imgcompose::{thumbnail_file_to_path, Error, RenderFailure, ThumbnailParams};

fn main() {
    let params = ThumbnailParams::default();
    match thumbnail_file_to_path(Path::new("/bad/input.png"), Path::new("/out.png"), &params) {
        Ok(_) => {}
        Err(Error::Render(RenderFailure::InvalidDimensions { width, height })) => {
            eprintln!("cannot draw a {width}x{height} surface")
        }
        Err(Error::Image(e)) => eprintln!("codec error: {e}"),
        Err(other) => eprintln!("Other error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — `Compositor` and file/batch entry points.
- [`core`] — `Bitmap`, geometry and the individual compositing operations.
- [`render`] — the `RenderBackend` trait, clip paths and the raster backend.
- [`types`] — enums shared across the crate (`Orientation`, `ContentMode`, ...).
- [`io`] — image decoding, encoding and JSON sidecars.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod render;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::bitmap::{Bitmap, PixelFormat};
pub use crate::core::geometry::{Rect, Size};
pub use crate::core::params::ThumbnailParams;
pub use error::{Error, RenderFailure, Result};
pub use types::{
    AlphaLayout, ColorSpace, ContentMode, InterpolationQuality, Orientation, OutputFormat,
};

// Rendering
pub use render::{Color, RasterBackend, RenderBackend, Transform};

// Readers and writers
pub use io::reader::load_bitmap;
pub use io::writers::image::save_bitmap;
pub use io::writers::metadata::{ThumbnailRecord, write_sidecar};

// High-level API re-exports
pub use api::{
    BatchReport, Compositor, is_supported_image, iterate_input_files, process_directory_to_path,
    thumbnail_file_to_path,
};
