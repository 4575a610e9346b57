pub mod png_io;

pub use png_io::{decode_png, encode_preview, encode_rgba16, encode_rgba8, read_png, RgbaImage};
