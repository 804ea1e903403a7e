//! pagelayout-test - Regression test framework for pagelayout
//!
//! Every `tests/*_reg.rs` file drives a [`RegParams`]: each check bumps an
//! index, failures are collected, and `cleanup()` reports the verdict.
//! Two modes are supported:
//!
//! - **Compare**: run every check (default)
//! - **Display**: additionally write intermediate images to
//!   `tests/regout` for visual inspection
//!
//! # Usage
//!
//! ```ignore
//! use pagelayout_test::RegParams;
//!
//! let mut rp = RegParams::new("binarize");
//! rp.compare_values(1.0, regions.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Load a test image from the test data directory
///
/// # Arguments
///
/// * `name` - Image filename (e.g., "page.pgm")
pub fn load_test_image(name: &str) -> TestResult<pagelayout_core::PageImage> {
    let path = test_data_path(name);
    pagelayout_io::read_image(&path).map_err(|source| TestError::Load { path, source })
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // pagelayout-test is at crates/pagelayout-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to a test data file
pub fn test_data_path(name: &str) -> String {
    format!("{}/tests/data/images/{}", workspace_root(), name)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
