//! Indexed representation of a ZX screen and the stages that build it.
//!
//! An [`IndexedFrame`] holds one 3-bit palette index per pixel and one
//! [`Attribute`] per 8x8 block. Every pixel of a block equals that block's
//! `ink` or `paper`; the indexer establishes this and the SCR encoder keeps it.

mod frame;
mod indexer;

pub use frame::{Attribute, IndexedFrame, BLOCK};
pub use indexer::{apply_flash_attrs, compute_bright_attrs, index, IndexOptions};
