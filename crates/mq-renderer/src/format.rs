//! Output formats and the shared rendering entry point.

use std::fmt;
use std::str::FromStr;

use mq_document::Quiz;

use crate::html::HtmlRenderer;
use crate::tex::TexWriter;
use crate::xml::XmlWriter;

/// Default number of answer slots in the paper quiz header.
pub const DEFAULT_ANSWER_SLOTS: usize = 4;

/// Output format of a rendering pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Interactive page with embedded answer key.
    #[default]
    Html,
    /// Structural re-serialization of the tree.
    Xml,
    /// Source for the paper quiz style.
    Tex,
    /// Plain-text dump of the tree.
    Text,
}

impl OutputFormat {
    /// All format names, in the order they are listed to users.
    pub const NAMES: [&'static str; 4] = ["html", "xml", "tex", "text"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Xml => "xml",
            Self::Tex => "tex",
            Self::Text => "text",
        }
    }

    /// File extension of documents in this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Xml => "xml",
            Self::Tex => "tex",
            Self::Text => "txt",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "xml" => Ok(Self::Xml),
            "tex" => Ok(Self::Tex),
            "text" => Ok(Self::Text),
            _ => Err(RenderError::UnknownFormat(s.to_owned())),
        }
    }
}

/// Errors that stop a rendering pass before any output is produced.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Unknown output format '{0}' (expected one of: html, xml, tex, text)")]
    UnknownFormat(String),

    #[error("Unknown page layout '{name}' (expected one of: {known})")]
    UnknownLayout { name: String, known: String },
}

/// Settings shared by all renderers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// URL prefix of the shared stylesheet and script. Ends with `/`.
    pub base_url: String,
    /// Name of the HTML page layout.
    pub layout: String,
    /// Stem of the quiz file, used for the per-quiz stylesheet and init call.
    pub quiz_name: String,
    /// Answer slots in the paper quiz header.
    pub answer_slots: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            base_url: "/MathQuiz/".to_owned(),
            layout: "standard".to_owned(),
            quiz_name: "quiz".to_owned(),
            answer_slots: DEFAULT_ANSWER_SLOTS,
        }
    }
}

/// Extra file produced alongside the main document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    /// File name, relative to the directory of the main document.
    pub file_name: String,
    pub contents: String,
}

/// Result of a rendering pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rendered {
    pub document: String,
    /// Side files the caller is expected to write next to the document.
    pub artifacts: Vec<Artifact>,
    /// Non-fatal problems found while rendering.
    pub warnings: Vec<String>,
}

impl Rendered {
    /// A rendering with no side files and no warnings.
    pub fn document(document: String) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }
}

/// Render a quiz in the given format.
pub fn render(
    quiz: &Quiz,
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<Rendered, RenderError> {
    tracing::debug!(%format, quiz = %options.quiz_name, "Rendering quiz");
    match format {
        OutputFormat::Html => HtmlRenderer::new(options).render(quiz),
        OutputFormat::Xml => Ok(Rendered::document(XmlWriter::new().render(quiz))),
        OutputFormat::Tex => Ok(Rendered::document(
            TexWriter::new(options.answer_slots).render(quiz),
        )),
        OutputFormat::Text => Ok(Rendered::document(quiz.to_string())),
    }
}
