//! I/O layer: decoding image files into `Bitmap`s (`reader`) and encoding
//! results plus their JSON metadata sidecars (`writers`).
pub mod reader;
pub use reader::load_bitmap;

pub mod writers;
pub use writers::image::save_bitmap;
