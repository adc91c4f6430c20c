//! Quiz documents: tree model and XML parser.
//!
//! A quiz is an XML file with a `<quiz>` root holding discussions and
//! questions. Each question has exactly one answer body: a `<choice>` of
//! labelled items or a free-text `<answer>`.
//!
//! # Example
//!
//! ```
//! use mq_document::{AnswerBody, parse_str};
//!
//! let quiz = parse_str(
//!     r#"<quiz title="Sums"><question><text>2+2</text><answer value="4"/></question></quiz>"#,
//! )
//! .unwrap();
//! assert_eq!(quiz.title, "Sums");
//! assert!(matches!(quiz.questions[0].body, AnswerBody::Answer(_)));
//! ```

mod display;
mod error;
mod model;
mod parser;

pub use error::ParseError;
pub use model::{
    Answer, AnswerBody, Attributes, Choice, ChoiceMode, Course, Discussion, ITEM_LABELS, Item,
    MAX_ITEMS, Question, Quiz, QuizIndexEntry,
};
pub use parser::{parse_file, parse_reader, parse_str};
