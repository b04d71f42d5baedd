//! Assembly of the full track list of a family.
//!
//! Samples are first placed into a plan, one entry per track to emit, so that
//! the coverage/junction merge and the gCNV batching are decided in one pass
//! before any track is built.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::{common::GenomeRelease, err::InputError};

use super::{
    builder::{TrackBuilder, TBI_SUFFIX},
    conf::TrackConf,
    locus::Locus,
    schema::{
        Individual, IndividualsByGuid, Sample, SamplesByType, TrackType, Variant,
        TRACK_TYPE_ORDER,
    },
    tracks::{
        AnnotationTrack, DisplayFlags, DisplayMode, HighlightColor, MergedTrack, Track,
        ViewerConfig, RNA_TRACK_HEIGHT,
    },
};

/// Individuals whose gCNV calls are stored in the same file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcnvBatch<'a> {
    pub file_path: &'a str,
    /// Members sorted by individual GUID, the first one is the anchor.
    pub members: Vec<(&'a str, &'a Sample)>,
    /// Members in the order the samples were given.
    pub members_in_input_order: Vec<(&'a str, &'a Sample)>,
}

impl<'a> GcnvBatch<'a> {
    pub fn anchor(&self) -> Option<&'a str> {
        self.members.first().map(|(guid, _)| *guid)
    }
}

/// Group the gCNV samples by their file path.
pub fn gcnv_batches(samples: &SamplesByType) -> IndexMap<&str, GcnvBatch<'_>> {
    let mut by_path: IndexMap<&str, Vec<(&str, &Sample)>> = IndexMap::new();
    if let Some(gcnv_samples) = samples.get(&TrackType::Gcnv) {
        for (guid, sample) in gcnv_samples {
            by_path
                .entry(sample.file_path.as_str())
                .or_default()
                .push((guid.as_str(), sample));
        }
    }

    by_path
        .into_iter()
        .map(|(file_path, members_in_input_order)| {
            let members: BTreeMap<&str, &Sample> =
                members_in_input_order.iter().copied().collect();
            (
                file_path,
                GcnvBatch {
                    file_path,
                    members: members.into_iter().collect(),
                    members_in_input_order,
                },
            )
        })
        .collect()
}

/// What to emit for one individual (or one gCNV batch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement<'a> {
    Alignment(&'a Sample),
    /// Coverage of an individual without junctions.
    Coverage(&'a Sample),
    /// Junctions of an individual without coverage.
    Junction(&'a Sample),
    /// Coverage and junctions of the same individual.
    Merged {
        coverage: &'a Sample,
        junction: &'a Sample,
    },
    /// gCNV batch, placed at its anchor.
    Gcnv(GcnvBatch<'a>),
}

/// Plan the tracks for `samples`, in emission order.
///
/// Each entry carries the GUID of the individual whose track it is.
pub fn plan(samples: &SamplesByType) -> Vec<(&str, Placement<'_>)> {
    let coverage = samples.get(&TrackType::Coverage);
    let junction = samples.get(&TrackType::Junction);
    let mut batches = gcnv_batches(samples);

    let mut result = Vec::new();
    for track_type in TRACK_TYPE_ORDER {
        for (guid, sample) in samples.get(&track_type).into_iter().flatten() {
            let guid = guid.as_str();
            let placement = match track_type {
                TrackType::Alignment => Some(Placement::Alignment(sample)),
                TrackType::Coverage => {
                    let has_junction = junction.is_some_and(|junction| junction.contains_key(guid));
                    (!has_junction).then_some(Placement::Coverage(sample))
                }
                TrackType::Junction => Some(match coverage.and_then(|coverage| coverage.get(guid)) {
                    Some(coverage) => Placement::Merged {
                        coverage,
                        junction: sample,
                    },
                    None => Placement::Junction(sample),
                }),
                TrackType::Gcnv => {
                    let is_anchor = batches
                        .get(sample.file_path.as_str())
                        .and_then(GcnvBatch::anchor)
                        == Some(guid);
                    if is_anchor {
                        batches
                            .swap_remove(sample.file_path.as_str())
                            .map(Placement::Gcnv)
                    } else {
                        None
                    }
                }
            };
            if let Some(placement) = placement {
                result.push((guid, placement));
            }
        }
    }

    result
}

/// Infer the genome release from the alignment files.
///
/// This is an approximation until the project's genome release is passed
/// in: CRAM files are assumed to be GRCh38, anything else GRCh37, and
/// families without alignments default to GRCh38.
pub fn infer_genome_release(samples: &SamplesByType) -> GenomeRelease {
    match samples.get(&TrackType::Alignment) {
        Some(alignments) if !alignments.is_empty() => {
            if alignments.values().any(Sample::is_cram) {
                GenomeRelease::Grch38
            } else {
                GenomeRelease::Grch37
            }
        }
        _ => GenomeRelease::Grch38,
    }
}

/// The GENCODE gene annotation track for `genome`.
pub fn annotation_track(conf: &TrackConf, genome: GenomeRelease) -> Track {
    let lift_suffix = match genome {
        GenomeRelease::Grch37 => "lift37",
        GenomeRelease::Grch38 => "",
    };
    Track::Annotation(AnnotationTrack {
        url: format!(
            "{}/{}/gencode/gencode.v{}{}.annotation.sorted.gtf.gz",
            conf.reference_data_url,
            genome.name(),
            conf.gencode_version,
            lift_suffix
        ),
        name: format!("gencode {}v{}", genome.igv_genome(), conf.gencode_version),
        display_mode: DisplayMode::Squished,
    })
}

/// Check that every sample has a file and a known individual.
pub fn validate(samples: &SamplesByType, individuals: &IndividualsByGuid) -> Result<(), InputError> {
    for (track_type, by_individual) in samples {
        for (guid, sample) in by_individual {
            if !individuals.contains_key(guid) {
                return Err(InputError::UnknownIndividual(*track_type, guid.clone()));
            }
            if sample.file_path.is_empty() {
                return Err(InputError::EmptyFilePath(*track_type, guid.clone()));
            }
        }
    }
    Ok(())
}

/// Build the track for one planned placement.
fn build_placement(
    builder: &TrackBuilder,
    guid: &str,
    placement: &Placement<'_>,
    individuals: &IndividualsByGuid,
) -> Option<Track> {
    let Some(individual) = individuals.get(guid) else {
        tracing::warn!("skipping tracks of unknown individual {}", guid);
        return None;
    };

    let track = match placement {
        Placement::Alignment(sample) => builder.build(TrackType::Alignment, sample, individual),
        Placement::Coverage(sample) => builder.build(TrackType::Coverage, sample, individual),
        Placement::Junction(sample) => {
            with_tbi_index(builder.build(TrackType::Junction, sample, individual))
        }
        Placement::Merged { coverage, junction } => {
            let coverage = builder.build(TrackType::Coverage, coverage, individual);
            let junction = with_tbi_index(builder.build(TrackType::Junction, junction, individual));
            Track::Merged(MergedTrack {
                name: junction.name().to_string(),
                height: RNA_TRACK_HEIGHT,
                tracks: vec![coverage, junction],
            })
        }
        Placement::Gcnv(batch) => {
            let (_, anchor_sample) = batch.members.first()?;
            let mut track = with_tbi_index(builder.build(TrackType::Gcnv, anchor_sample, individual));
            if let Track::Gcnv(gcnv) = &mut track {
                // On shared sample IDs the member given first keeps its color.
                let mut highlight = IndexMap::new();
                for (member_guid, member_sample) in &batch.members_in_input_order {
                    let Some(member) = individuals.get(*member_guid) else {
                        tracing::warn!(
                            "skipping unknown individual {} in gCNV batch {}",
                            member_guid,
                            batch.file_path
                        );
                        continue;
                    };
                    let key = member_sample
                        .sample_id
                        .clone()
                        .unwrap_or_else(|| member.individual_id.clone());
                    let color = if member.is_affected() {
                        HighlightColor::Red
                    } else {
                        HighlightColor::Blue
                    };
                    highlight.entry(key).or_insert(color);
                }
                let names = batch
                    .members
                    .iter()
                    .filter_map(|(member_guid, _)| individuals.get(*member_guid))
                    .map(Individual::name)
                    .collect::<Vec<_>>();
                if batch.members.len() > 1 {
                    gcnv.source.name = names.join(", ");
                }
                gcnv.highlight_samples = Some(highlight);
            }
            track
        }
    };

    Some(track)
}

fn with_tbi_index(mut track: Track) -> Track {
    match &mut track {
        Track::Junction(junction) => {
            junction.index_url = Some(format!("{}{}", junction.source.url, TBI_SUFFIX))
        }
        Track::Gcnv(gcnv) => gcnv.index_url = Some(format!("{}{}", gcnv.source.url, TBI_SUFFIX)),
        _ => (),
    }
    track
}

/// Assemble the viewer configuration for one family.
pub fn assemble(
    builder: &TrackBuilder,
    variant: Option<&Variant>,
    samples: &SamplesByType,
    individuals: &IndividualsByGuid,
) -> ViewerConfig {
    let genome = infer_genome_release(samples);
    tracing::debug!("inferred genome release {}", genome);

    let placements = plan(samples);
    tracing::trace!("planned {} tracks", placements.len());

    let mut tracks = placements
        .iter()
        .filter_map(|(guid, placement)| build_placement(builder, guid, placement, individuals))
        .collect::<Vec<_>>();
    tracks.push(annotation_track(builder.conf(), genome));

    let locus = variant.map(|variant| Locus::for_variant(variant, genome, builder.conf().locus_window));

    ViewerConfig {
        locus,
        genome,
        tracks,
        flags: DisplayFlags::default(),
    }
}
