//! Selection of the families for which reads can be shown.
//!
//! A variant may be seen in several families; only those with at least one
//! sample file get a "show reads" link, and the viewer is only configured for
//! the family that was opened.

use indexmap::IndexMap;
use serde::Serialize;

use crate::igv::schema::{Family, FamilyGuid, SamplesByType, Variant};

pub mod cli;

/// Samples by family.
pub type SamplesByFamily = IndexMap<FamilyGuid, SamplesByType>;

/// Family registry.
pub type FamiliesByGuid = IndexMap<FamilyGuid, Family>;

/// Whether any track type of the family has samples.
pub fn has_reads(samples: &SamplesByType) -> bool {
    samples.values().any(|by_individual| !by_individual.is_empty())
}

/// Families of `variant` (or the single `family_guid`) that have samples.
///
/// Families are returned in the order the variant lists them, each at most
/// once. A family counts as having reads only if one of its track types has
/// at least one sample; a track type present with no samples does not count.
pub fn families_with_reads<'a>(
    variant: Option<&'a Variant>,
    family_guid: Option<&'a str>,
    samples_by_family: &SamplesByFamily,
) -> Vec<&'a str> {
    let candidates: Vec<&str> = match variant {
        Some(variant) => variant.family_guids.iter().map(String::as_str).collect(),
        None => family_guid.into_iter().collect(),
    };

    let mut result: Vec<&str> = Vec::new();
    for guid in candidates {
        if result.contains(&guid) {
            continue;
        }
        if samples_by_family.get(guid).is_some_and(has_reads) {
            result.push(guid);
        }
    }
    result
}

/// Link to show the reads of one family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyLink {
    pub family_guid: FamilyGuid,
    pub label: String,
}

/// The "show reads" controls to offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReadButtons {
    /// No family has reads.
    None,
    /// One button opening the only family with reads.
    #[serde(rename_all = "camelCase")]
    Single { family_guid: FamilyGuid },
    /// One button plus one link per family.
    Multiple { families: Vec<FamilyLink> },
}

/// Decide on the "show reads" controls.
pub fn read_buttons(
    variant: Option<&Variant>,
    family_guid: Option<&str>,
    samples_by_family: &SamplesByFamily,
    families: &FamiliesByGuid,
) -> ReadButtons {
    let with_reads = families_with_reads(variant, family_guid, samples_by_family);
    match with_reads.as_slice() {
        [] => ReadButtons::None,
        [guid] => ReadButtons::Single {
            family_guid: guid.to_string(),
        },
        guids => ReadButtons::Multiple {
            families: guids
                .iter()
                .map(|guid| {
                    let family_id = match families.get(*guid) {
                        Some(family) => family.family_id.as_str(),
                        None => {
                            tracing::warn!("family {} not in registry, using its GUID", guid);
                            *guid
                        }
                    };
                    FamilyLink {
                        family_guid: guid.to_string(),
                        label: format!("| {}", family_id),
                    }
                })
                .collect(),
        },
    }
}

/// Samples of the opened family, `None` if nothing is open or it has no reads.
pub fn samples_for_open_family<'a>(
    open_family: Option<&str>,
    samples_by_family: &'a SamplesByFamily,
) -> Option<&'a SamplesByType> {
    let samples = samples_by_family.get(open_family?)?;
    has_reads(samples).then_some(samples)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::igv::schema::{Sample, TrackType};

    fn samples(entries: &[(TrackType, &str)]) -> SamplesByType {
        let mut result = SamplesByType::new();
        for (track_type, guid) in entries {
            result.entry(*track_type).or_default().insert(
                guid.to_string(),
                Sample {
                    project_guid: "R0001_1kg".into(),
                    file_path: format!("{}.bam", guid),
                    sample_id: None,
                },
            );
        }
        result
    }

    #[rstest::fixture]
    fn samples_by_family() -> SamplesByFamily {
        let mut empty_types = SamplesByType::new();
        empty_types.insert(TrackType::Alignment, IndexMap::new());

        [
            ("F1", samples(&[(TrackType::Alignment, "I1")])),
            ("F2", SamplesByType::new()),
            ("F3", samples(&[(TrackType::Gcnv, "I3")])),
            ("F4", empty_types),
        ]
        .into_iter()
        .map(|(guid, samples)| (guid.to_string(), samples))
        .collect()
    }

    #[rstest::fixture]
    fn families() -> FamiliesByGuid {
        ["F1", "F3"]
            .into_iter()
            .enumerate()
            .map(|(i, guid)| {
                (
                    guid.to_string(),
                    Family {
                        family_guid: guid.to_string(),
                        family_id: format!("fam{}", i + 1),
                        display_name: None,
                    },
                )
            })
            .collect()
    }

    fn variant(family_guids: &[&str]) -> Variant {
        Variant {
            chrom: "1".into(),
            pos: 100,
            lifted_over_pos: None,
            family_guids: family_guids.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[rstest::rstest]
    fn variant_families(samples_by_family: SamplesByFamily) {
        let variant = variant(&["F3", "F2", "F4", "F1", "F3", "F9"]);
        assert_eq!(
            families_with_reads(Some(&variant), Some("F2"), &samples_by_family),
            vec!["F3", "F1"]
        );
    }

    #[rstest::rstest]
    #[case(Some("F1"), vec!["F1"])]
    #[case(Some("F2"), vec![])]
    #[case(None, vec![])]
    fn single_family(
        samples_by_family: SamplesByFamily,
        #[case] family_guid: Option<&str>,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(
            families_with_reads(None, family_guid, &samples_by_family),
            expected
        );
    }

    #[rstest::rstest]
    fn buttons(samples_by_family: SamplesByFamily, families: FamiliesByGuid) {
        assert_eq!(
            read_buttons(Some(&variant(&["F2"])), None, &samples_by_family, &families),
            ReadButtons::None
        );
        assert_eq!(
            read_buttons(None, Some("F3"), &samples_by_family, &families),
            ReadButtons::Single {
                family_guid: "F3".into()
            }
        );
        assert_eq!(
            read_buttons(
                Some(&variant(&["F1", "F3"])),
                None,
                &samples_by_family,
                &families
            ),
            ReadButtons::Multiple {
                families: vec![
                    FamilyLink {
                        family_guid: "F1".into(),
                        label: "| fam1".into(),
                    },
                    FamilyLink {
                        family_guid: "F3".into(),
                        label: "| fam2".into(),
                    },
                ]
            }
        );
    }

    #[rstest::rstest]
    fn buttons_serialize(samples_by_family: SamplesByFamily, families: FamiliesByGuid) -> Result<(), anyhow::Error> {
        assert_eq!(
            serde_json::to_value(read_buttons(None, Some("F1"), &samples_by_family, &families))?,
            serde_json::json!({"kind": "single", "familyGuid": "F1"})
        );
        assert_eq!(
            serde_json::to_value(ReadButtons::None)?,
            serde_json::json!({"kind": "none"})
        );

        Ok(())
    }

    #[rstest::rstest]
    #[case(Some("F1"), true)]
    #[case(Some("F2"), false)]
    #[case(Some("F4"), false)]
    #[case(Some("F9"), false)]
    #[case(None, false)]
    fn open_family(
        samples_by_family: SamplesByFamily,
        #[case] open: Option<&str>,
        #[case] expected: bool,
    ) {
        assert_eq!(
            samples_for_open_family(open, &samples_by_family).is_some(),
            expected
        );
    }
}
