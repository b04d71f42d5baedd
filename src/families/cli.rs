//! Code supporting the `igv families` sub command.

use std::path::PathBuf;

use clap::Parser;

use crate::{
    common::io::{read_json, write_json},
    igv::{
        cli::{build_config, Request as TracksRequest},
        conf::TrackConf,
        label::LabelStyle,
        schema::{FamilyGuid, IndividualsByGuid, Variant},
        tracks::ViewerConfig,
    },
};

use super::{read_buttons, samples_for_open_family, FamiliesByGuid, ReadButtons, SamplesByFamily};

/// Input of `igv families`.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(default)]
    pub variant: Option<Variant>,
    /// Family to consider when there is no variant.
    #[serde(default)]
    pub family_guid: Option<FamilyGuid>,
    #[serde(default)]
    pub samples_by_family: SamplesByFamily,
    #[serde(default)]
    pub families: FamiliesByGuid,
    #[serde(default)]
    pub individuals: IndividualsByGuid,
}

/// Output of `igv families`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub read_buttons: ReadButtons,
    /// Viewer configuration of the opened family, if it has reads.
    pub viewer: Option<ViewerConfig>,
}

/// Command line arguments for `igv families` sub command.
#[derive(Parser, Debug)]
#[command(about = "Select families with reads for a variant", long_about = None)]
pub struct Args {
    /// Path to input JSON file with samples by family and the registries.
    #[arg(long)]
    pub path_input: PathBuf,
    /// Path to output JSON file.
    #[arg(long)]
    pub path_output: PathBuf,
    /// Family to build the viewer configuration for.
    #[arg(long)]
    pub open_family: Option<FamilyGuid>,
    /// Optional path to TOML configuration file.
    #[arg(long)]
    pub path_conf: Option<PathBuf>,
    /// How to render track names.
    #[arg(long, value_enum, default_value_t = LabelStyle::Html)]
    pub label: LabelStyle,
}

/// Compute the response for `request`.
pub fn respond(
    conf: TrackConf,
    label: LabelStyle,
    request: &Request,
    open_family: Option<&str>,
) -> Result<Response, anyhow::Error> {
    let read_buttons = read_buttons(
        request.variant.as_ref(),
        request.family_guid.as_deref(),
        &request.samples_by_family,
        &request.families,
    );

    let viewer = match samples_for_open_family(open_family, &request.samples_by_family) {
        Some(samples) => {
            let tracks_request = TracksRequest {
                variant: request.variant.clone(),
                samples: samples.clone(),
                individuals: request.individuals.clone(),
            };
            Some(build_config(conf, label, &tracks_request)?)
        }
        None => {
            if let Some(open_family) = open_family {
                tracing::info!("family {} has no reads, not building viewer", open_family);
            }
            None
        }
    };

    Ok(Response {
        read_buttons,
        viewer,
    })
}

/// Main entry point for `igv families` sub command.
pub fn run(args_common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    tracing::info!("Starting `igv families` ({})", crate::common::VERSION);
    tracing::info!("  args_common = {:?}", &args_common);
    tracing::info!("  args = {:?}", &args);

    let conf = match &args.path_conf {
        Some(path_conf) => TrackConf::from_path(path_conf)?,
        None => TrackConf::default(),
    };

    let request: Request = read_json(&args.path_input)?;
    tracing::info!(
        "loaded samples of {} families",
        request.samples_by_family.len()
    );

    let response = respond(conf, args.label, &request, args.open_family.as_deref())?;
    write_json(&args.path_output, &response)?;
    tracing::info!("wrote response to {:?}", &args.path_output);

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use temp_testdir::TempDir;

    use super::{run, Args};
    use crate::{common::Args as CommonArgs, igv::label::LabelStyle};

    fn run_with(open_family: Option<&str>) -> Result<serde_json::Value, anyhow::Error> {
        let tmp_dir = TempDir::default();
        let args = Args {
            path_input: "tests/families/two-families.json".into(),
            path_output: tmp_dir.join("out.json"),
            open_family: open_family.map(String::from),
            path_conf: None,
            label: LabelStyle::Plain,
        };

        run(&CommonArgs::default(), &args)?;

        Ok(serde_json::from_str(&std::fs::read_to_string(
            tmp_dir.join("out.json"),
        )?)?)
    }

    #[test]
    fn run_smoke_buttons_only() -> Result<(), anyhow::Error> {
        let output = run_with(None)?;

        assert_eq!(
            output,
            json!({
                "readButtons": {
                    "kind": "multiple",
                    "families": [
                        {"familyGuid": "F000001_1", "label": "| 1"},
                        {"familyGuid": "F000002_2", "label": "| 2"},
                    ],
                },
            })
        );

        Ok(())
    }

    #[test]
    fn run_smoke_open_family() -> Result<(), anyhow::Error> {
        let output = run_with(Some("F000002_2"))?;

        assert_eq!(output["viewer"]["genome"], json!("hg38"));
        assert_eq!(output["viewer"]["locus"], json!("chr2:1100-1300"));
        assert_eq!(output["viewer"]["tracks"][0]["type"], json!("alignment"));
        assert_eq!(output["viewer"]["tracks"][0]["name"], json!("HG00732"));
        assert_eq!(
            output["viewer"]["tracks"][0]["indexURL"],
            json!("/api/project/R0001_1kg/igv_track/gs%3A%2F%2Freads%2FHG00732.cram.crai")
        );

        Ok(())
    }

    #[test]
    fn run_smoke_open_family_without_reads() -> Result<(), anyhow::Error> {
        let output = run_with(Some("F000003_3"))?;

        assert!(output.get("viewer").is_none());

        Ok(())
    }
}
