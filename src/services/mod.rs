pub mod pipeline;
pub mod tile_writer;

pub use pipeline::{Conversion, ZxFilter};
pub use tile_writer::{tile_path, write_tiles};
