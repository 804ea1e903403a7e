//! pagelayout-filter - Gradient filtering
//!
//! Sobel edge maps of binary masks, plus the edge-density measure used to
//! tell thin rules from dense strips of text.

pub mod edge;
mod error;

pub use error::{FilterError, FilterResult};

pub use edge::{DEFAULT_EDGE_THRESHOLD, edge_density, edge_map};
