use std::path::PathBuf;

use crate::igv::schema::{IndividualGuid, TrackType};

/// Problems with the records handed in from the stores.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{0} sample references unknown individual {1}")]
    UnknownIndividual(TrackType, IndividualGuid),
    #[error("{0} sample of individual {1} has an empty file path")]
    EmptyFilePath(TrackType, IndividualGuid),
}

/// Problems loading the track configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfError {
    #[error("could not read configuration {0:?}: {1}")]
    Read(PathBuf, String),
    #[error("invalid configuration: {0}")]
    Parse(String),
}
