//! Quiz document tree.
//!
//! The tree is shallow and closed: a [`Quiz`] owns its discussions and
//! questions, a [`Question`] owns exactly one [`AnswerBody`], and a
//! [`Choice`] owns its items. Order of every list is document order.

use std::num::NonZeroUsize;

/// Labels used for choice items, in order.
pub const ITEM_LABELS: &str = "abcdefghijklmnopqrstuvwxyz";

/// Maximum number of items a single choice may hold.
pub const MAX_ITEMS: usize = ITEM_LABELS.len();

/// Ordered attribute bag, copied verbatim from `<meta>` and `<link>` tags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Create an empty attribute bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute, keeping document order.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Look up the first attribute with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over `(name, value)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Course the quiz belongs to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Course {
    pub name: String,
    pub code: String,
    pub url: String,
}

impl Course {
    /// Whether no course metadata was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.code.is_empty() && self.url.is_empty()
    }
}

/// Entry of the quiz index rendered on course index pages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizIndexEntry {
    pub title: String,
    pub url: String,
}

/// Root of a quiz document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Quiz {
    /// Page title.
    pub title: String,
    /// Breadcrumb trail text shown above the quiz.
    pub breadcrumb: String,
    /// Identifier of the source the quiz was generated from.
    pub source: String,
    pub course: Course,
    /// `<meta>` tags copied into the page head.
    pub meta: Vec<Attributes>,
    /// `<link>` tags copied into the page head.
    pub links: Vec<Attributes>,
    pub quiz_index: Vec<QuizIndexEntry>,
    /// Reading sections, addressed by negative indices -1..-M.
    pub discussions: Vec<Discussion>,
    /// Questions, numbered 1..N.
    pub questions: Vec<Question>,
}

impl Quiz {
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn discussion_count(&self) -> usize {
        self.discussions.len()
    }
}

/// Non-interactive reading section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Discussion {
    pub heading: String,
    pub body: String,
}

impl Default for Discussion {
    fn default() -> Self {
        Self {
            heading: "Discussion".to_owned(),
            body: String::new(),
        }
    }
}

/// A single quiz question.
#[derive(Clone, Debug, PartialEq)]
pub struct Question {
    /// Question text, possibly containing inline HTML.
    pub text: String,
    pub body: AnswerBody,
}

impl Question {
    /// Whether the question is answered by selecting items.
    #[must_use]
    pub fn is_choice(&self) -> bool {
        matches!(self.body, AnswerBody::Choice(_))
    }
}

/// The one answer body a question holds.
#[derive(Clone, Debug, PartialEq)]
pub enum AnswerBody {
    Choice(Choice),
    Answer(Answer),
}

/// Selection mode of a [`Choice`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChoiceMode {
    /// Exactly one item may be selected.
    Single,
    /// Any subset of items may be selected.
    Multiple,
    /// A mode the renderers do not know. Kept so that the HTML renderer can
    /// flag the defect in place instead of aborting the whole page.
    Other(String),
}

impl ChoiceMode {
    /// Parse a `type` attribute value. Never fails.
    #[must_use]
    pub fn from_attr(value: &str) -> Self {
        match value {
            "single" => Self::Single,
            "multiple" => Self::Multiple,
            other => Self::Other(other.to_owned()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Single => "single",
            Self::Multiple => "multiple",
            Self::Other(other) => other,
        }
    }
}

/// Multiple- or single-select question body.
#[derive(Clone, Debug, PartialEq)]
pub struct Choice {
    pub mode: ChoiceMode,
    pub columns: NonZeroUsize,
    pub items: Vec<Item>,
}

impl Choice {
    /// Create an empty choice.
    #[must_use]
    pub fn new(mode: ChoiceMode, columns: NonZeroUsize) -> Self {
        Self {
            mode,
            columns,
            items: Vec::new(),
        }
    }

    /// Label of the item at the given 1-based position.
    ///
    /// Returns `None` outside `1..=MAX_ITEMS`.
    #[must_use]
    pub fn label(index: usize) -> Option<char> {
        index
            .checked_sub(1)
            .and_then(|i| ITEM_LABELS.chars().nth(i))
    }

    /// Whether the 1-based item `index` opens a new row.
    #[must_use]
    pub fn starts_row(&self, index: usize) -> bool {
        (index - 1) % self.columns.get() == 0
    }

    /// Whether the 1-based item `index` closes the current row.
    #[must_use]
    pub fn ends_row(&self, index: usize) -> bool {
        index % self.columns.get() == 0 || index == self.items.len()
    }
}

/// One selectable option of a [`Choice`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Item {
    /// Whether selecting this item is correct.
    pub expect: bool,
    pub text: String,
    /// Feedback shown for this item.
    pub response: String,
}

/// Free-text question body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Answer {
    /// Canonical expected value.
    pub value: String,
    /// Text shown after the input field (usually units).
    pub tag: Option<String>,
    pub when_right: String,
    pub when_wrong: String,
}
