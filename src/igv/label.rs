//! Rendering of track names.
//!
//! igv.js puts the track name into the track header as HTML, so the default
//! renderer emits a small pedigree glyph in front of the individual's name.

use super::schema::{Affected, Individual, Sex};

/// Renders the name of a track for an individual.
pub trait LabelRenderer {
    fn render(&self, individual: &Individual) -> String;
}

/// Which renderer to use, selectable from the command line.
#[derive(
    clap::ValueEnum,
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum LabelStyle {
    /// Pedigree glyph and name as HTML.
    #[default]
    Html,
    /// Name only.
    Plain,
}

impl LabelStyle {
    pub fn renderer(self) -> Box<dyn LabelRenderer> {
        match self {
            LabelStyle::Html => Box::new(PedigreeHtmlLabel),
            LabelStyle::Plain => Box::new(PlainTextLabel),
        }
    }
}

/// Pedigree symbol and name wrapped into a `<span>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PedigreeHtmlLabel;

impl PedigreeHtmlLabel {
    /// The pedigree symbol: shape by sex, fill by affected status.
    pub fn glyph(sex: Sex, affected: Affected) -> &'static str {
        match (sex, affected) {
            (Sex::Male, Affected::Affected) => "&#9632;",
            (Sex::Male, Affected::Unaffected) => "&#9633;",
            (Sex::Male, Affected::Unknown) => "&#9633;?",
            (Sex::Female, Affected::Affected) => "&#9679;",
            (Sex::Female, Affected::Unaffected) => "&#9675;",
            (Sex::Female, Affected::Unknown) => "&#9675;?",
            (Sex::Unknown, Affected::Affected) => "&#9670;",
            (Sex::Unknown, Affected::Unaffected) => "&#9671;",
            (Sex::Unknown, Affected::Unknown) => "&#9671;?",
        }
    }

    fn title(sex: Sex, affected: Affected) -> &'static str {
        match (sex, affected) {
            (Sex::Male, Affected::Affected) => "Male, affected",
            (Sex::Male, Affected::Unaffected) => "Male, unaffected",
            (Sex::Male, Affected::Unknown) => "Male, unknown affected status",
            (Sex::Female, Affected::Affected) => "Female, affected",
            (Sex::Female, Affected::Unaffected) => "Female, unaffected",
            (Sex::Female, Affected::Unknown) => "Female, unknown affected status",
            (Sex::Unknown, Affected::Affected) => "Unknown sex, affected",
            (Sex::Unknown, Affected::Unaffected) => "Unknown sex, unaffected",
            (Sex::Unknown, Affected::Unknown) => "Unknown sex, unknown affected status",
        }
    }
}

impl LabelRenderer for PedigreeHtmlLabel {
    fn render(&self, individual: &Individual) -> String {
        format!(
            r#"<span><span title="{}">{}</span>{}</span>"#,
            Self::title(individual.sex, individual.affected),
            Self::glyph(individual.sex, individual.affected),
            escape_html(individual.name())
        )
    }
}

/// Just the display name.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextLabel;

impl LabelRenderer for PlainTextLabel {
    fn render(&self, individual: &Individual) -> String {
        individual.name().to_string()
    }
}

fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
