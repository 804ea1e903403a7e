//! Connected component regression test
//!
//! Component labeling, outer components and border seed fill on the ink
//! mask of the synthetic test page.

use pagelayout_color::binarize;
use pagelayout_core::Box;
use pagelayout_region::{
    ConnectivityType, find_connected_components, find_outer_components, mark_outer_background,
};
use pagelayout_test::{RegParams, load_test_image};

#[test]
fn conncomp_reg() {
    let mut rp = RegParams::new("conncomp");

    let page = load_test_image("page.pgm").expect("load page.pgm");
    let mask = binarize(&page).expect("binarize");
    let w = mask.width();
    let h = mask.height();
    let fg = mask.count_foreground();
    eprintln!("Mask size: {}x{} fg={}", w, h, fg);

    // --- Test 1: labeling ---
    // Glyphs are separated by whole columns, so both connectivities agree
    let cc8 = find_connected_components(&mask, ConnectivityType::EightWay).expect("cc8");
    let cc4 = find_connected_components(&mask, ConnectivityType::FourWay).expect("cc4");
    rp.compare_values(105.0, cc8.len() as f64, 0.0);
    rp.compare_values(105.0, cc4.len() as f64, 0.0);
    eprintln!("  components: 8-way={} 4-way={}", cc8.len(), cc4.len());

    let first = &cc8[0];
    rp.compare_values(40.0, first.pixel_count as f64, 0.0);
    rp.compare_strings(
        Box::new_unchecked(20, 12, 5, 8).to_string().as_bytes(),
        first.bounds.to_string().as_bytes(),
    );
    let total: u64 = cc8.iter().map(|c| c.pixel_count as u64).sum();
    rp.compare_values(fg as f64, total as f64, 0.0);

    // --- Test 2: outer components ---
    // The table grid encloses empty cells only, so nothing is nested
    let outer = find_outer_components(&mask).expect("outer");
    rp.compare_values(105.0, outer.len() as f64, 0.0);

    // --- Test 3: background reachable from the border ---
    // Only the four 64x49 table cells are cut off from the paper
    let paper = mark_outer_background(&mask, ConnectivityType::FourWay).expect("paper");
    let holes = (w * h) as f64 - fg as f64 - paper.count_foreground() as f64;
    rp.compare_values((4 * 64 * 49) as f64, holes, 0.0);
    rp.compare_values(1.0, if paper.is_foreground(0, 0) { 1.0 } else { 0.0 }, 0.0);
    rp.write_mask(&paper, "paper").expect("write mask");

    assert!(rp.cleanup(), "conncomp regression test failed");
}
