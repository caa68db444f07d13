//! Core building blocks: the `Bitmap` model, geometry, pixel conversion,
//! configuration parameters and the compositing operations. These are the
//! primitives consumed by the high-level `api` module.
pub mod bitmap;
pub mod geometry;
pub mod params;
pub mod pixel;
pub mod processing;
