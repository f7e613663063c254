pub mod frame;
pub mod image;
