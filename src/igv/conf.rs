//! Configuration of the track builder.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::err::ConfError;

use super::locus::DEFAULT_WINDOW;

/// Settings for building tracks, all of them defaulted.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
#[serde(default)]
pub struct TrackConf {
    /// Prefix of the API serving the track files.
    pub api_base: String,
    /// URI schemes on which CRAM files are read directly with their index.
    pub cloud_schemes: Vec<String>,
    /// Half-width of the window around a variant.
    pub locus_window: u64,
    /// Bucket with the GENCODE annotation files.
    pub reference_data_url: String,
    /// GENCODE release of the annotation track.
    pub gencode_version: String,
}

impl Default for TrackConf {
    fn default() -> Self {
        Self {
            api_base: "/api".into(),
            cloud_schemes: vec!["gs://".into()],
            locus_window: DEFAULT_WINDOW,
            reference_data_url: "https://storage.googleapis.com/seqr-reference-data".into(),
            gencode_version: "27".into(),
        }
    }
}

impl TrackConf {
    /// Load from a TOML file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfError> {
        let toml_str = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfError::Read(path.as_ref().to_path_buf(), e.to_string()))?;
        toml::from_str(&toml_str).map_err(|e| ConfError::Parse(e.to_string()))
    }

    /// Whether `file_path` lives on object storage.
    pub fn is_cloud_path(&self, file_path: &str) -> bool {
        self.cloud_schemes
            .iter()
            .any(|scheme| file_path.starts_with(scheme.as_str()))
    }
}
