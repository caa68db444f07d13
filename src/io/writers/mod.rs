pub mod image;
pub mod metadata;
