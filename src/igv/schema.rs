//! Input records as delivered by the sample, individual, and family stores.
//!
//! The JSON layout follows the camelCase keys used by the seqr frontend store
//! so that dumps of the store can be fed in unchanged.

use indexmap::IndexMap;

/// Key of an individual in the individual registry.
pub type IndividualGuid = String;

/// Key of a family in the family registry.
pub type FamilyGuid = String;

/// The kinds of tracks that can be shown for a sample.
///
/// The serialized names are the igv.js track type names.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum TrackType {
    /// Read alignments (BAM/CRAM).
    #[serde(rename = "alignment")]
    #[strum(serialize = "alignment")]
    Alignment,
    /// Coverage depth (bigWig).
    #[serde(rename = "wig")]
    #[strum(serialize = "wig")]
    Coverage,
    /// Splice junctions (BED).
    #[serde(rename = "spliceJunctions")]
    #[strum(serialize = "spliceJunctions")]
    Junction,
    /// Germline copy-number variant calls.
    #[serde(rename = "gcnv")]
    #[strum(serialize = "gcnv")]
    Gcnv,
}

/// Order in which track types are emitted, independent of input map order.
pub const TRACK_TYPE_ORDER: [TrackType; 4] = [
    TrackType::Alignment,
    TrackType::Coverage,
    TrackType::Junction,
    TrackType::Gcnv,
];

/// Sex of an individual.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Sex {
    #[serde(rename = "M", alias = "Male")]
    Male,
    #[serde(rename = "F", alias = "Female")]
    Female,
    #[default]
    #[serde(rename = "U", alias = "Unknown")]
    Unknown,
}

/// Affected status of an individual.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Affected {
    #[serde(rename = "A", alias = "Affected")]
    Affected,
    #[serde(rename = "N", alias = "Unaffected")]
    Unaffected,
    #[default]
    #[serde(rename = "U", alias = "Unknown")]
    Unknown,
}

/// One sample file attached to an individual.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    /// Project the sample belongs to, used for building the track URL.
    pub project_guid: String,
    /// Path or URI of the data file.
    pub file_path: String,
    /// Sample identifier within the data file, if any.
    #[serde(default)]
    pub sample_id: Option<String>,
}

impl Sample {
    /// Whether the file is a CRAM file.
    pub fn is_cram(&self) -> bool {
        self.file_path.ends_with(".cram")
    }
}

/// Individual registry entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Individual {
    #[serde(default)]
    pub individual_guid: IndividualGuid,
    /// Identifier of the individual within its family, e.g., as in the PED file.
    pub individual_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub sex: Sex,
    #[serde(default)]
    pub affected: Affected,
}

impl Individual {
    /// The name to display, falling back to the individual ID.
    pub fn name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.individual_id
        } else {
            &self.display_name
        }
    }

    pub fn is_affected(&self) -> bool {
        self.affected == Affected::Affected
    }
}

/// Family registry entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    #[serde(default)]
    pub family_guid: FamilyGuid,
    pub family_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// The variant to center the viewer on.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub chrom: String,
    /// 1-based position in the project's primary build.
    pub pos: u64,
    /// Position lifted over to the other build, if known.
    #[serde(default)]
    pub lifted_over_pos: Option<u64>,
    /// Families the variant was seen in.
    #[serde(default)]
    pub family_guids: Vec<FamilyGuid>,
}

/// Samples of one family, by track type and then by individual.
pub type SamplesByType = IndexMap<TrackType, IndexMap<IndividualGuid, Sample>>;

/// Individual registry.
pub type IndividualsByGuid = IndexMap<IndividualGuid, Individual>;
