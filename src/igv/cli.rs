//! Code supporting the `igv tracks` sub command.

use std::{path::PathBuf, time::Instant};

use clap::Parser;

use crate::common::io::{read_json, write_json};

use super::{
    assemble::{assemble, validate},
    builder::TrackBuilder,
    conf::TrackConf,
    label::LabelStyle,
    schema::{IndividualsByGuid, SamplesByType, Variant},
    tracks::ViewerConfig,
};

/// Input of `igv tracks`, one family's records.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Variant to center on.
    #[serde(default)]
    pub variant: Option<Variant>,
    /// Samples by track type and individual.
    #[serde(default)]
    pub samples: SamplesByType,
    /// Individuals of the family.
    pub individuals: IndividualsByGuid,
}

/// Command line arguments for `igv tracks` sub command.
#[derive(Parser, Debug)]
#[command(about = "Build igv.js configuration for a family", long_about = None)]
pub struct Args {
    /// Path to input JSON file with the family's samples and individuals.
    #[arg(long)]
    pub path_input: PathBuf,
    /// Path to output JSON file with the viewer configuration.
    #[arg(long)]
    pub path_output: PathBuf,
    /// Optional path to TOML configuration file.
    #[arg(long)]
    pub path_conf: Option<PathBuf>,
    /// How to render track names.
    #[arg(long, value_enum, default_value_t = LabelStyle::Html)]
    pub label: LabelStyle,
}

/// Build the viewer configuration for `request`.
pub fn build_config(
    conf: TrackConf,
    label: LabelStyle,
    request: &Request,
) -> Result<ViewerConfig, anyhow::Error> {
    validate(&request.samples, &request.individuals)?;
    let builder = TrackBuilder::new(conf, label.renderer());
    Ok(assemble(
        &builder,
        request.variant.as_ref(),
        &request.samples,
        &request.individuals,
    ))
}

/// Main entry point for `igv tracks` sub command.
pub fn run(args_common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    tracing::info!("Starting `igv tracks` ({})", crate::common::VERSION);
    tracing::info!("  args_common = {:?}", &args_common);
    tracing::info!("  args = {:?}", &args);

    let conf = match &args.path_conf {
        Some(path_conf) => TrackConf::from_path(path_conf)?,
        None => TrackConf::default(),
    };
    tracing::debug!("conf = {:?}", &conf);

    tracing::info!("Loading input...");
    let before_loading = Instant::now();
    let request: Request = read_json(&args.path_input)?;
    tracing::info!(
        "...done loading {} sample types for {} individuals in {:?}",
        request.samples.len(),
        request.individuals.len(),
        before_loading.elapsed()
    );

    let config = build_config(conf, args.label, &request)?;
    tracing::info!(
        "built {} tracks for genome {}",
        config.tracks.len(),
        config.genome
    );

    write_json(&args.path_output, &config)?;
    tracing::info!("wrote configuration to {:?}", &args.path_output);

    Ok(())
}
