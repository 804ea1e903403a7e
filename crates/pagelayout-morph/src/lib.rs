//! pagelayout-morph - Binary morphology for page masks
//!
//! This crate provides:
//!
//! - Structuring elements ([`Sel`]) defining operation neighborhoods
//! - Binary dilation with an arbitrary `Sel`, and a separable fast path
//!   for rectangular bricks

pub mod binary;
mod error;
pub mod sel;

pub use error::{MorphError, MorphResult};
pub use sel::{Sel, SelElement};

pub use binary::{dilate, dilate_brick};
