//! Error types for quiz parsing.

use std::path::PathBuf;

/// Fatal error while building a quiz tree.
///
/// Every variant aborts the run; there is no partial tree.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The input is not well-formed XML.
    #[error("XML error at byte {position}: {source}")]
    Xml {
        /// Byte offset reported by the reader.
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// Attribute could not be read.
    #[error("XML attribute error")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    /// Text could not be decoded.
    #[error("encoding error")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// A question holds a second `<choice>`/`<answer>`.
    #[error("Processing halted. Multiple <choice>/<answer> tags in question {question}")]
    DuplicateAnswerBody {
        /// 1-based question number.
        question: usize,
    },

    /// A question closed without a `<choice>` or `<answer>`.
    #[error("question {question} has no <choice> or <answer>")]
    MissingAnswerBody {
        /// 1-based question number.
        question: usize,
    },

    /// A choice holds more items than there are labels.
    #[error("question {question} has more than {max} choice items")]
    TooManyItems {
        /// 1-based question number.
        question: usize,
        /// Item limit.
        max: usize,
    },

    /// A structural element appeared where it cannot attach.
    #[error("<{element}> is not allowed inside <{parent}>")]
    Misplaced {
        /// Name of the element that was opened.
        element: &'static str,
        /// Name of the innermost open element, or `quiz` at the top level.
        parent: &'static str,
    },

    /// The document has no `<quiz>` element.
    #[error("document has no <quiz> element")]
    MissingRoot,

    /// The document ended with open elements.
    #[error("unexpected end of document inside <{0}>")]
    UnexpectedEof(&'static str),

    /// The input file could not be read.
    #[error("Cannot read file {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
