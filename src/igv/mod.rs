//! Configuration of the igv.js read viewer for a family.
//!
//! The tracks are derived from the family's sample files: one alignment
//! track per individual, coverage and splice junctions of the same
//! individual merged into one layer, gCNV calls batched by file, and a
//! trailing GENCODE annotation track.

pub mod assemble;
pub mod builder;
pub mod cli;
pub mod conf;
pub mod label;
pub mod locus;
pub mod schema;
pub mod tracks;
