//! Plain-text report of an analysis

use crate::pipeline::AnalysisResult;
use std::fmt;

impl fmt::Display for AnalysisResult {
    /// One line per region, then one line per relationship:
    ///
    /// ```text
    /// Layout Analysis Results:
    ///
    /// Elements:
    /// 0: image at (116, 116, 169, 169)
    ///
    /// Relationships:
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Layout Analysis Results:")?;
        writeln!(f)?;
        writeln!(f, "Elements:")?;
        for (i, region) in self.regions.iter().enumerate() {
            writeln!(f, "{}: {} at {}", i, region.kind, region.bbox)?;
        }
        writeln!(f)?;
        writeln!(f, "Relationships:")?;
        for rel in &self.relationships {
            writeln!(f, "Element {} is {} Element {}", rel.first, rel.kind, rel.second)?;
        }
        Ok(())
    }
}
