//! Building of the track for a single sample.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::{
    conf::TrackConf,
    label::{LabelRenderer, PedigreeHtmlLabel},
    schema::{Individual, Sample, TrackType},
    tracks::{
        AlignmentAccess, AlignmentFormat, AlignmentShading, AlignmentTrack, CoverageFormat,
        CoverageTrack, GcnvFormat, GcnvTrack, JunctionColorBy, JunctionFormat, JunctionTrack,
        Source, Track, GCNV_TRACK_HEIGHT, RNA_TRACK_HEIGHT,
    },
};

/// Characters escaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Suffix of CRAM index URLs.
pub const CRAI_SUFFIX: &str = ".crai";

/// Suffix of tabix index URLs.
pub const TBI_SUFFIX: &str = ".tbi";

/// Builds one track per sample.
pub struct TrackBuilder {
    conf: TrackConf,
    label: Box<dyn LabelRenderer>,
}

impl Default for TrackBuilder {
    fn default() -> Self {
        Self::new(TrackConf::default(), Box::new(PedigreeHtmlLabel))
    }
}

impl std::fmt::Debug for TrackBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackBuilder")
            .field("conf", &self.conf)
            .finish_non_exhaustive()
    }
}

impl TrackBuilder {
    pub fn new(conf: TrackConf, label: Box<dyn LabelRenderer>) -> Self {
        Self { conf, label }
    }

    pub fn conf(&self) -> &TrackConf {
        &self.conf
    }

    /// Track name for `individual`.
    pub fn label(&self, individual: &Individual) -> String {
        self.label.render(individual)
    }

    /// URL under which the backend serves the sample's file.
    pub fn track_url(&self, sample: &Sample) -> String {
        format!(
            "{}/project/{}/igv_track/{}",
            self.conf.api_base,
            sample.project_guid,
            utf8_percent_encode(&sample.file_path, URI_COMPONENT)
        )
    }

    /// Build the track of type `track_type` for `sample` of `individual`.
    ///
    /// Junction and gCNV tracks come without index URL, the assembler adds
    /// them when placing the tracks.
    pub fn build(&self, track_type: TrackType, sample: &Sample, individual: &Individual) -> Track {
        let source = Source {
            url: self.track_url(sample),
            name: self.label(individual),
        };

        match track_type {
            TrackType::Alignment => {
                let (format, access) = if sample.is_cram() {
                    let access = if self.conf.is_cloud_path(&sample.file_path) {
                        AlignmentAccess::CramIndex {
                            index_url: format!("{}{}", source.url, CRAI_SUFFIX),
                        }
                    } else {
                        AlignmentAccess::cram_proxy()
                    };
                    (AlignmentFormat::Cram, access)
                } else {
                    (AlignmentFormat::Bam, AlignmentAccess::bam())
                };
                Track::Alignment(AlignmentTrack {
                    source,
                    alignment_shading: AlignmentShading::Strand,
                    format,
                    show_soft_clips: true,
                    access,
                })
            }
            TrackType::Coverage => Track::Coverage(CoverageTrack {
                source,
                format: CoverageFormat::Bigwig,
                height: RNA_TRACK_HEIGHT,
            }),
            TrackType::Junction => Track::Junction(JunctionTrack {
                source,
                index_url: None,
                format: JunctionFormat::Bed,
                height: RNA_TRACK_HEIGHT,
                min_uniquely_mapped_reads: 0,
                min_total_reads: 1,
                max_fraction_multi_mapped_reads: 1.0,
                min_spliced_alignment_overhang: 0,
                color_by: JunctionColorBy::IsAnnotatedJunction,
                label_unique_read_count: true,
            }),
            TrackType::Gcnv => Track::Gcnv(GcnvTrack {
                source,
                index_url: None,
                format: GcnvFormat::Gcnv,
                height: GCNV_TRACK_HEIGHT,
                min: 0.0,
                max: 5.0,
                autoscale: true,
                only_handle_clicks_for_highlighted_samples: true,
                highlight_samples: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::igv::{
        label::PlainTextLabel,
        schema::{Affected, Sex},
    };

    #[rstest::fixture]
    fn builder() -> TrackBuilder {
        TrackBuilder::new(TrackConf::default(), Box::new(PlainTextLabel))
    }

    #[rstest::fixture]
    fn individual() -> Individual {
        Individual {
            individual_guid: "I000001_na19675".into(),
            individual_id: "NA19675".into(),
            display_name: "NA19675_1".into(),
            sex: Sex::Male,
            affected: Affected::Affected,
        }
    }

    fn sample(file_path: &str) -> Sample {
        Sample {
            project_guid: "R0001_1kg".into(),
            file_path: file_path.into(),
            sample_id: None,
        }
    }

    #[rstest::rstest]
    #[case("sample.bam", "/api/project/R0001_1kg/igv_track/sample.bam")]
    #[case(
        "gs://bucket/dir/NA 1.cram",
        "/api/project/R0001_1kg/igv_track/gs%3A%2F%2Fbucket%2Fdir%2FNA%201.cram"
    )]
    #[case(
        "/data/a-b_c.d!~*'().bw",
        "/api/project/R0001_1kg/igv_track/%2Fdata%2Fa-b_c.d!~*'().bw"
    )]
    #[case("x?y=1&z#w", "/api/project/R0001_1kg/igv_track/x%3Fy%3D1%26z%23w")]
    #[case("ümlaut.bam", "/api/project/R0001_1kg/igv_track/%C3%BCmlaut.bam")]
    fn track_url_encodes_like_uri_component(
        builder: TrackBuilder,
        #[case] file_path: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(builder.track_url(&sample(file_path)), expected);
    }

    #[rstest::rstest]
    fn alignment_bam(builder: TrackBuilder, individual: Individual) -> Result<(), anyhow::Error> {
        let track = builder.build(TrackType::Alignment, &sample("sample.bam"), &individual);

        assert_eq!(
            serde_json::to_value(&track)?,
            json!({
                "type": "alignment",
                "url": "/api/project/R0001_1kg/igv_track/sample.bam",
                "name": "NA19675_1",
                "alignmentShading": "strand",
                "format": "bam",
                "showSoftClips": true,
                "indexed": true,
            })
        );

        Ok(())
    }

    #[rstest::rstest]
    fn alignment_cram_on_cloud(
        builder: TrackBuilder,
        individual: Individual,
    ) -> Result<(), anyhow::Error> {
        let track = builder.build(TrackType::Alignment, &sample("gs://b/s.cram"), &individual);
        let value = serde_json::to_value(&track)?;

        assert_eq!(value["format"], json!("cram"));
        assert_eq!(
            value["indexURL"],
            json!("/api/project/R0001_1kg/igv_track/gs%3A%2F%2Fb%2Fs.cram.crai")
        );
        assert!(value.get("sourceType").is_none());
        assert!(value.get("indexed").is_none());

        Ok(())
    }

    #[rstest::rstest]
    fn alignment_cram_local_uses_proxy(
        builder: TrackBuilder,
        individual: Individual,
    ) -> Result<(), anyhow::Error> {
        let track = builder.build(TrackType::Alignment, &sample("/data/s.cram"), &individual);

        match &track {
            Track::Alignment(alignment) => {
                assert_eq!(alignment.format, AlignmentFormat::Cram);
                assert_eq!(alignment.access, AlignmentAccess::cram_proxy());
            }
            _ => panic!("expected alignment track, got {:?}", track),
        }
        let value = serde_json::to_value(&track)?;
        assert_eq!(value["alignmentFile"], json!("/placeholder.cram"));
        assert!(value.get("indexURL").is_none());

        Ok(())
    }

    #[rstest::rstest]
    fn coverage(builder: TrackBuilder, individual: Individual) -> Result<(), anyhow::Error> {
        let track = builder.build(TrackType::Coverage, &sample("cov.bw"), &individual);

        assert_eq!(
            serde_json::to_value(&track)?,
            json!({
                "type": "wig",
                "url": "/api/project/R0001_1kg/igv_track/cov.bw",
                "name": "NA19675_1",
                "format": "bigwig",
                "height": 170,
            })
        );

        Ok(())
    }

    #[rstest::rstest]
    fn junction(builder: TrackBuilder, individual: Individual) -> Result<(), anyhow::Error> {
        let track = builder.build(TrackType::Junction, &sample("junc.bed"), &individual);

        assert_eq!(
            serde_json::to_value(&track)?,
            json!({
                "type": "spliceJunctions",
                "url": "/api/project/R0001_1kg/igv_track/junc.bed",
                "name": "NA19675_1",
                "format": "bed",
                "height": 170,
                "minUniquelyMappedReads": 0,
                "minTotalReads": 1,
                "maxFractionMultiMappedReads": 1.0,
                "minSplicedAlignmentOverhang": 0,
                "colorBy": "isAnnotatedJunction",
                "labelUniqueReadCount": true,
            })
        );

        Ok(())
    }

    #[rstest::rstest]
    fn gcnv(builder: TrackBuilder, individual: Individual) -> Result<(), anyhow::Error> {
        let track = builder.build(TrackType::Gcnv, &sample("batch1.gcnv.bed.gz"), &individual);

        assert_eq!(
            serde_json::to_value(&track)?,
            json!({
                "type": "gcnv",
                "url": "/api/project/R0001_1kg/igv_track/batch1.gcnv.bed.gz",
                "name": "NA19675_1",
                "format": "gcnv",
                "height": 200,
                "min": 0.0,
                "max": 5.0,
                "autoscale": true,
                "onlyHandleClicksForHighlightedSamples": true,
            })
        );

        Ok(())
    }

    #[rstest::rstest]
    fn build_leaves_inputs_alone(builder: TrackBuilder, individual: Individual) {
        let input = sample("s.bam");
        let before = (input.clone(), individual.clone());

        let first = builder.build(TrackType::Alignment, &input, &individual);
        let second = builder.build(TrackType::Alignment, &input, &individual);

        assert_eq!(first, second);
        assert_eq!((input, individual), before);
    }
}
