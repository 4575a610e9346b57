pub mod config;

pub use config::{BrightMode, ConvertConfig};
