//! Track descriptors and viewer configuration as understood by igv.js.
//!
//! The per-type rendering presets are fixed records; each track type has its
//! own struct so that a track can only ever carry the fields of its preset.

use indexmap::IndexMap;
use serde::Serialize;

use crate::common::GenomeRelease;

use super::locus::Locus;

/// Height of coverage and junction tracks.
pub const RNA_TRACK_HEIGHT: u32 = 170;

/// Height of gCNV tracks.
pub const GCNV_TRACK_HEIGHT: u32 = 200;

/// Fields shared by all tracks that point to a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    pub url: String,
    pub name: String,
}

/// A single track of the viewer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Track {
    #[serde(rename = "alignment")]
    Alignment(AlignmentTrack),
    #[serde(rename = "wig")]
    Coverage(CoverageTrack),
    #[serde(rename = "spliceJunctions")]
    Junction(JunctionTrack),
    #[serde(rename = "gcnv")]
    Gcnv(GcnvTrack),
    #[serde(rename = "merged")]
    Merged(MergedTrack),
    #[serde(rename = "annotation")]
    Annotation(AnnotationTrack),
}

impl Track {
    /// Display name of the track.
    pub fn name(&self) -> &str {
        match self {
            Track::Alignment(track) => &track.source.name,
            Track::Coverage(track) => &track.source.name,
            Track::Junction(track) => &track.source.name,
            Track::Gcnv(track) => &track.source.name,
            Track::Merged(track) => &track.name,
            Track::Annotation(track) => &track.name,
        }
    }
}

/// Shading of alignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentShading {
    Strand,
}

/// Alignment file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentFormat {
    Cram,
    Bam,
}

/// How igv.js gets at the alignment data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AlignmentAccess {
    /// CRAM on object storage, read through the index next to it.
    #[serde(rename_all = "camelCase")]
    CramIndex {
        #[serde(rename = "indexURL")]
        index_url: String,
    },
    /// CRAM elsewhere, decoded server-side.
    #[serde(rename_all = "camelCase")]
    CramProxy {
        source_type: String,
        alignment_file: String,
        reference_file: String,
    },
    /// Indexed BAM.
    Bam { indexed: bool },
}

impl AlignmentAccess {
    pub fn cram_proxy() -> Self {
        AlignmentAccess::CramProxy {
            source_type: "pysam".into(),
            alignment_file: "/placeholder.cram".into(),
            reference_file: "/placeholder.fa".into(),
        }
    }

    pub fn bam() -> Self {
        AlignmentAccess::Bam { indexed: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentTrack {
    #[serde(flatten)]
    pub source: Source,
    pub alignment_shading: AlignmentShading,
    pub format: AlignmentFormat,
    pub show_soft_clips: bool,
    #[serde(flatten)]
    pub access: AlignmentAccess,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageFormat {
    Bigwig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageTrack {
    #[serde(flatten)]
    pub source: Source,
    pub format: CoverageFormat,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JunctionFormat {
    Bed,
}

/// Coloring of splice junctions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum JunctionColorBy {
    IsAnnotatedJunction,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JunctionTrack {
    #[serde(flatten)]
    pub source: Source,
    #[serde(rename = "indexURL")]
    pub index_url: Option<String>,
    pub format: JunctionFormat,
    pub height: u32,
    pub min_uniquely_mapped_reads: u32,
    pub min_total_reads: u32,
    pub max_fraction_multi_mapped_reads: f64,
    pub min_spliced_alignment_overhang: u32,
    pub color_by: JunctionColorBy,
    pub label_unique_read_count: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GcnvFormat {
    Gcnv,
}

/// Highlight color of a sample within a gCNV track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightColor {
    Red,
    Blue,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GcnvTrack {
    #[serde(flatten)]
    pub source: Source,
    #[serde(rename = "indexURL")]
    pub index_url: Option<String>,
    pub format: GcnvFormat,
    pub height: u32,
    pub min: f64,
    pub max: f64,
    pub autoscale: bool,
    pub only_handle_clicks_for_highlighted_samples: bool,
    /// Samples of the batch to highlight, keyed by sample ID within the file.
    pub highlight_samples: Option<IndexMap<String, HighlightColor>>,
}

/// Coverage and junctions of one individual shown as one layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedTrack {
    pub name: String,
    pub height: u32,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DisplayMode {
    Squished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationTrack {
    pub url: String,
    pub name: String,
    pub display_mode: DisplayMode,
}

/// Options passed to the igv.js browser.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerConfig {
    pub locus: Option<Locus>,
    #[serde(serialize_with = "serialize_igv_genome")]
    pub genome: GenomeRelease,
    pub tracks: Vec<Track>,
    #[serde(flatten)]
    pub flags: DisplayFlags,
}

fn serialize_igv_genome<S>(genome: &GenomeRelease, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(genome.igv_genome())
}

/// Static presentation flags of the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayFlags {
    pub show_karyo: bool,
    pub show_ideogram: bool,
    pub show_navigation: bool,
    pub show_ruler: bool,
    pub show_center_guide: bool,
    pub show_cursor_tracking_guide: bool,
    pub show_command_bar: bool,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self {
            show_karyo: false,
            show_ideogram: true,
            show_navigation: true,
            show_ruler: true,
            show_center_guide: true,
            show_cursor_tracking_guide: true,
            show_command_bar: true,
        }
    }
}
