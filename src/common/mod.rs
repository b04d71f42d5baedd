//! Common functionality.

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

pub mod io;

/// Commonly used command line arguments.
#[derive(Parser, Debug)]
pub struct Args {
    /// Verbosity of the program
    #[clap(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            verbose: Verbosity::new(0, 0),
        }
    }
}

/// The genome release that track coordinates refer to.
#[derive(
    Clone,
    Copy,
    Debug,
    strum::Display,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum GenomeRelease {
    /// GRCh37 / hg19
    #[strum(serialize = "grch37")]
    Grch37,
    /// GRCh38 / hg38
    #[strum(serialize = "grch38")]
    Grch38,
}

impl GenomeRelease {
    pub fn name(&self) -> String {
        match self {
            GenomeRelease::Grch37 => String::from("GRCh37"),
            GenomeRelease::Grch38 => String::from("GRCh38"),
        }
    }

    /// Genome identifier understood by igv.js.
    pub fn igv_genome(&self) -> &'static str {
        match self {
            GenomeRelease::Grch37 => "hg19",
            GenomeRelease::Grch38 => "hg38",
        }
    }
}

impl std::str::FromStr for GenomeRelease {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_ascii_lowercase();
        if s.starts_with("grch37") || s == "hg19" || s == "37" {
            Ok(GenomeRelease::Grch37)
        } else if s.starts_with("grch38") || s == "hg38" || s == "38" {
            Ok(GenomeRelease::Grch38)
        } else {
            Err(anyhow::anyhow!("Unknown genome release: {}", s))
        }
    }
}

/// The version of `igv-track-worker` package.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[rstest::rstest]
    #[case("GRCh37", GenomeRelease::Grch37)]
    #[case("grch37p10", GenomeRelease::Grch37)]
    #[case("hg19", GenomeRelease::Grch37)]
    #[case("38", GenomeRelease::Grch38)]
    #[case("hg38", GenomeRelease::Grch38)]
    fn genome_release_from_str(
        #[case] s: &str,
        #[case] expected: GenomeRelease,
    ) -> Result<(), anyhow::Error> {
        assert_eq!(s.parse::<GenomeRelease>()?, expected);

        Ok(())
    }

    #[test]
    fn genome_release_unknown() {
        assert!("mm10".parse::<GenomeRelease>().is_err());
    }

    #[test]
    fn genome_release_names() {
        assert_eq!(GenomeRelease::Grch37.name(), "GRCh37");
        assert_eq!(GenomeRelease::Grch38.igv_genome(), "hg38");
        assert_eq!(GenomeRelease::Grch38.to_string(), "grch38");
    }
}
