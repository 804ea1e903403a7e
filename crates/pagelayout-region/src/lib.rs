//! pagelayout-region - Connected component analysis
//!
//! - Labeling of 4- or 8-connected foreground components ([`conncomp`])
//! - Marking of the background reachable from the border ([`seedfill`])
//! - Outer components: those not nested inside a hole of another
//!   component ([`outer`])

pub mod conncomp;
mod error;
pub mod outer;
pub mod seedfill;

pub use error::{RegionError, RegionResult};

pub use conncomp::{
    ConnectedComponent, ConnectivityType, LabelMap, find_connected_components,
    label_connected_components,
};
pub use outer::find_outer_components;
pub use seedfill::mark_outer_background;
