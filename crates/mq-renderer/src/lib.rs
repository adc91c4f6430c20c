//! Quiz renderers built on a shared tree visitor.
//!
//! # Architecture
//!
//! Every output format walks the parsed [`Quiz`](mq_document::Quiz) with a
//! [`Visitor`]: quiz metadata first, then the discussions in an explicit
//! pass, then the questions with their answer bodies. Formats:
//! - [`HtmlRenderer`]: interactive page plus the quiz index script
//! - [`XmlWriter`]: re-serialization that parses back to the same tree
//! - [`TexWriter`]: source for the paper quiz macros
//! - text: the tree's `Display` dump
//!
//! # Example
//!
//! ```
//! use mq_renderer::{OutputFormat, RenderOptions, render};
//!
//! let quiz = mq_document::parse_str(
//!     r#"<quiz title="Sums"><question><text>2+2</text><answer value="4"/></question></quiz>"#,
//! )
//! .unwrap();
//! let rendered = render(&quiz, OutputFormat::Html, &RenderOptions::default()).unwrap();
//! assert!(rendered.document.contains("QuizSpecifications[0].value=4;"));
//! ```

mod format;
mod html;
mod tex;
pub mod visit;
mod xml;

pub use format::{
    Artifact, DEFAULT_ANSWER_SLOTS, OutputFormat, RenderError, RenderOptions, Rendered, render,
};
pub use html::{
    CourseLayout, HtmlRenderer, LAYOUT_NAMES, PageLayout, PageParts, QUIZ_TITLES_FILE,
    StandardLayout, layout_by_name,
};
pub use tex::TexWriter;
pub use visit::{NodeKind, NodeRef, Visitor};
pub use xml::XmlWriter;
