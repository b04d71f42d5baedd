//! Genomic window to center the viewer on.

use crate::common::GenomeRelease;

use super::schema::Variant;

/// Default half-width of the window around a variant.
pub const DEFAULT_WINDOW: u64 = 100;

/// A window of `window` bases on both sides of `pos`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locus {
    /// Chromosome name without `chr` prefix.
    pub chrom: String,
    pub pos: u64,
    pub window: u64,
}

impl Locus {
    pub fn around(chrom: &str, pos: u64, window: u64) -> Self {
        let chrom = chrom.strip_prefix("chr").unwrap_or(chrom);
        Self {
            chrom: chrom.to_string(),
            pos,
            window,
        }
    }

    /// Center on `variant` in the coordinates of `genome`.
    ///
    /// The lifted-over position is only used on GRCh37, the variant's own
    /// position is in GRCh38 coordinates otherwise.
    pub fn for_variant(variant: &Variant, genome: GenomeRelease, window: u64) -> Self {
        let pos = match (genome, variant.lifted_over_pos) {
            (GenomeRelease::Grch37, Some(lifted_over_pos)) => lifted_over_pos,
            _ => variant.pos,
        };
        Self::around(&variant.chrom, pos, window)
    }

    pub fn start(&self) -> u64 {
        self.pos.saturating_sub(self.window)
    }

    pub fn end(&self) -> u64 {
        self.pos + self.window
    }
}

impl std::fmt::Display for Locus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "chr{}:{}-{}", self.chrom, self.start(), self.end())
    }
}

impl serde::Serialize for Locus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
