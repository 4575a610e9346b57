//! Public error surface of the zx-screen crate.
//!
//! [`ScreenError`] unifies the shape and algorithm errors so application
//! code can propagate any core failure with `?`.

mod error;

pub use error::{AlgorithmError, ScreenError, ShapeError};
pub(crate) use error::{check_block_aligned, check_rgba_len};
