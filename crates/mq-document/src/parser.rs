//! Event-driven quiz parser.
//!
//! Reads XML events with `quick-xml` and builds a [`Quiz`] in one pass.
//! Structural elements push a node onto an explicit cursor stack and pop it
//! again on their end tag; text elements consume the character data
//! collected in their own scope; attribute-bag elements decorate the root.
//! Unknown elements are kept as inline markup inside the enclosing text.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::num::NonZeroUsize;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::ParseError;
use crate::model::{
    Answer, AnswerBody, Attributes, Choice, ChoiceMode, Course, Discussion, Item, MAX_ITEMS,
    Question, Quiz, QuizIndexEntry,
};

/// Parse a quiz from an in-memory document.
pub fn parse_str(xml: &str) -> Result<Quiz, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);
    TreeBuilder::default().run(&mut reader)
}

/// Parse a quiz from any buffered reader.
pub fn parse_reader<R: BufRead>(input: R) -> Result<Quiz, ParseError> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(false);
    TreeBuilder::default().run(&mut reader)
}

/// Open and parse a quiz file.
pub fn parse_file(path: &Path) -> Result<Quiz, ParseError> {
    let file = File::open(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "Parsing quiz file");
    parse_reader(BufReader::new(file))
}

/// Elements with a fixed meaning. Everything else is inline markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Element {
    Quiz,
    Meta,
    Link,
    Course,
    QuizListItem,
    Discussion,
    Question,
    Choice,
    Answer,
    Item,
    Text,
    Tag,
    Response,
    WhenRight,
    WhenWrong,
}

impl Element {
    fn from_name(name: &str) -> Option<Self> {
        let element = match name {
            "quiz" => Self::Quiz,
            "meta" => Self::Meta,
            "link" => Self::Link,
            "course" => Self::Course,
            "quizlistitem" => Self::QuizListItem,
            "discussion" => Self::Discussion,
            "question" => Self::Question,
            "choice" => Self::Choice,
            "answer" => Self::Answer,
            "item" => Self::Item,
            "text" => Self::Text,
            "tag" => Self::Tag,
            "response" => Self::Response,
            "when_right" | "whenRight" => Self::WhenRight,
            "when_wrong" | "whenWrong" => Self::WhenWrong,
            _ => return None,
        };
        Some(element)
    }

    fn name(self) -> &'static str {
        match self {
            Self::Quiz => "quiz",
            Self::Meta => "meta",
            Self::Link => "link",
            Self::Course => "course",
            Self::QuizListItem => "quizlistitem",
            Self::Discussion => "discussion",
            Self::Question => "question",
            Self::Choice => "choice",
            Self::Answer => "answer",
            Self::Item => "item",
            Self::Text => "text",
            Self::Tag => "tag",
            Self::Response => "response",
            Self::WhenRight => "when_right",
            Self::WhenWrong => "when_wrong",
        }
    }
}

/// A node under construction.
enum Open {
    Discussion(Discussion),
    Question {
        text: String,
        body: Option<AnswerBody>,
    },
    Choice(Choice),
    Item(Item),
    Answer(Answer),
}

impl Open {
    fn name(&self) -> &'static str {
        match self {
            Self::Discussion(_) => "discussion",
            Self::Question { .. } => "question",
            Self::Choice(_) => "choice",
            Self::Item(_) => "item",
            Self::Answer(_) => "answer",
        }
    }
}

/// Character data collected for one open element.
struct Scope {
    /// Name and rendered start tag of an unknown element.
    markup: Option<(String, String)>,
    text: String,
}

#[derive(Default)]
struct TreeBuilder {
    quiz: Option<Quiz>,
    /// Cursor into the tree: the last entry is the current position.
    nodes: Vec<Open>,
    scopes: Vec<Scope>,
}

impl TreeBuilder {
    fn run<R: BufRead>(mut self, reader: &mut Reader<R>) -> Result<Quiz, ParseError> {
        let mut buf = Vec::new();

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|source| ParseError::Xml {
                    position: reader.error_position() as u64,
                    source,
                })?;

            match event {
                Event::Start(e) => {
                    let name = decode_name(reader, e.name().as_ref());
                    let attrs = decode_attrs(reader, &e)?;
                    self.start(&name, attrs)?;
                }
                Event::Empty(e) => {
                    let name = decode_name(reader, e.name().as_ref());
                    let attrs = decode_attrs(reader, &e)?;
                    self.empty(&name, attrs)?;
                }
                Event::End(e) => {
                    let name = decode_name(reader, e.name().as_ref());
                    self.end(&name)?;
                }
                Event::Text(e) => {
                    let text = reader.decoder().decode(&e)?;
                    self.characters(&text);
                }
                Event::GeneralRef(e) => {
                    let name = reader.decoder().decode(&e)?;
                    match decode_entity(&name) {
                        Some(ch) => self.characters(ch.encode_utf8(&mut [0; 4])),
                        None => self.characters(&format!("&{name};")),
                    }
                }
                Event::CData(e) => {
                    let text = reader.decoder().decode(&e)?;
                    self.characters(&text);
                }
                Event::Eof => break,
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            }
            buf.clear();
        }

        self.finish()
    }

    fn finish(self) -> Result<Quiz, ParseError> {
        if let Some(open) = self.nodes.last() {
            return Err(ParseError::UnexpectedEof(open.name()));
        }
        let quiz = self.quiz.ok_or(ParseError::MissingRoot)?;
        tracing::info!(
            title = %quiz.title,
            questions = quiz.questions.len(),
            discussions = quiz.discussions.len(),
            "Parsed quiz"
        );
        Ok(quiz)
    }

    fn characters(&mut self, text: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.text.push_str(text);
        }
    }

    fn start(&mut self, name: &str, attrs: Attributes) -> Result<(), ParseError> {
        let Some(element) = Element::from_name(name) else {
            tracing::debug!(element = name, "Keeping unknown element as markup");
            let open_tag = format!("<{name}{}>", render_attrs(&attrs));
            self.scopes.push(Scope {
                markup: Some((name.to_owned(), open_tag)),
                text: String::new(),
            });
            return Ok(());
        };

        self.scopes.push(Scope {
            markup: None,
            text: String::new(),
        });
        self.open(element, &attrs)
    }

    fn empty(&mut self, name: &str, attrs: Attributes) -> Result<(), ParseError> {
        if Element::from_name(name).is_none() {
            let tag = format!("<{name}{}/>", render_attrs(&attrs));
            self.characters(&tag);
            return Ok(());
        }
        self.start(name, attrs)?;
        self.end(name)
    }

    fn end(&mut self, name: &str) -> Result<(), ParseError> {
        let scope = self.scopes.pop().unwrap_or(Scope {
            markup: None,
            text: String::new(),
        });

        let Some(element) = Element::from_name(name) else {
            if let Some((tag, open_tag)) = scope.markup {
                let markup = format!("{open_tag}{}</{tag}>", scope.text);
                self.characters(&markup);
            }
            return Ok(());
        };

        self.close(element, scope.text.trim())
    }

    /// Handle the start tag of a known element.
    fn open(&mut self, element: Element, attrs: &Attributes) -> Result<(), ParseError> {
        match element {
            Element::Quiz => {
                if self.quiz.is_some() {
                    return Err(ParseError::Misplaced {
                        element: "quiz",
                        parent: "quiz",
                    });
                }
                self.quiz = Some(Quiz {
                    title: attr_or(attrs, "title", ""),
                    breadcrumb: attrs
                        .get("breadcrumb")
                        .or_else(|| attrs.get("bread_crumb"))
                        .or_else(|| attrs.get("breadCrumb"))
                        .unwrap_or_default()
                        .to_owned(),
                    source: attr_or(attrs, "src", ""),
                    ..Quiz::default()
                });
            }
            Element::Meta | Element::Link | Element::Course | Element::QuizListItem => {
                let Some(quiz) = self.quiz.as_mut() else {
                    tracing::debug!(element = element.name(), "Ignoring element outside <quiz>");
                    return Ok(());
                };
                match element {
                    Element::Meta => quiz.meta.push(attrs.clone()),
                    Element::Link => quiz.links.push(attrs.clone()),
                    Element::Course => {
                        quiz.course = Course {
                            name: attr_or(attrs, "name", ""),
                            code: attr_or(attrs, "code", ""),
                            url: attr_or(attrs, "url", ""),
                        };
                    }
                    _ => quiz.quiz_index.push(QuizIndexEntry {
                        title: attr_or(attrs, "title", ""),
                        url: attr_or(attrs, "url", ""),
                    }),
                }
            }
            Element::Discussion => {
                self.require_quiz_level(element)?;
                self.nodes.push(Open::Discussion(Discussion {
                    heading: attr_or(attrs, "heading", "Discussion"),
                    body: String::new(),
                }));
            }
            Element::Question => {
                self.require_quiz_level(element)?;
                self.nodes.push(Open::Question {
                    text: String::new(),
                    body: None,
                });
            }
            Element::Choice | Element::Answer => {
                let question = self.question_number();
                match self.nodes.last() {
                    Some(Open::Question { body: Some(_), .. }) => {
                        return Err(ParseError::DuplicateAnswerBody { question });
                    }
                    Some(Open::Question { body: None, .. }) => {}
                    other => return Err(misplaced(element, other)),
                }
                let open = if element == Element::Choice {
                    Open::Choice(Choice::new(
                        ChoiceMode::from_attr(attrs.get("type").unwrap_or("single")),
                        parse_columns(attrs.get("cols")),
                    ))
                } else {
                    Open::Answer(Answer {
                        value: attr_or(attrs, "value", ""),
                        ..Answer::default()
                    })
                };
                self.nodes.push(open);
            }
            Element::Item => {
                let question = self.question_number();
                match self.nodes.last() {
                    Some(Open::Choice(choice)) if choice.items.len() >= MAX_ITEMS => {
                        return Err(ParseError::TooManyItems {
                            question,
                            max: MAX_ITEMS,
                        });
                    }
                    Some(Open::Choice(_)) => {}
                    other => return Err(misplaced(element, other)),
                }
                self.nodes.push(Open::Item(Item {
                    expect: attrs.get("expect") == Some("true"),
                    ..Item::default()
                }));
            }
            Element::Text
            | Element::Tag
            | Element::Response
            | Element::WhenRight
            | Element::WhenWrong => {}
        }
        Ok(())
    }

    /// Handle the end tag of a known element with its trimmed text.
    fn close(&mut self, element: Element, text: &str) -> Result<(), ParseError> {
        match element {
            Element::Quiz
            | Element::Meta
            | Element::Link
            | Element::Course
            | Element::QuizListItem => {}
            Element::Discussion => {
                let Some(Open::Discussion(mut discussion)) = self.nodes.pop() else {
                    return Err(ParseError::Misplaced {
                        element: "discussion",
                        parent: "quiz",
                    });
                };
                if discussion.body.is_empty() {
                    text.clone_into(&mut discussion.body);
                }
                self.root()?.discussions.push(discussion);
            }
            Element::Question => {
                let question = self.question_number();
                let Some(Open::Question { text, body }) = self.nodes.pop() else {
                    return Err(ParseError::Misplaced {
                        element: "question",
                        parent: "quiz",
                    });
                };
                let body = body.ok_or(ParseError::MissingAnswerBody { question })?;
                self.root()?.questions.push(Question { text, body });
            }
            Element::Choice | Element::Answer => {
                let body = match self.nodes.pop() {
                    Some(Open::Choice(choice)) => AnswerBody::Choice(choice),
                    Some(Open::Answer(answer)) => AnswerBody::Answer(answer),
                    other => return Err(misplaced(element, other.as_ref())),
                };
                match self.nodes.last_mut() {
                    Some(Open::Question { body: slot, .. }) => *slot = Some(body),
                    other => return Err(misplaced(element, other.as_deref())),
                }
            }
            Element::Item => {
                let Some(Open::Item(item)) = self.nodes.pop() else {
                    return Err(misplaced(element, self.nodes.last()));
                };
                match self.nodes.last_mut() {
                    Some(Open::Choice(choice)) => choice.items.push(item),
                    other => return Err(misplaced(element, other.as_deref())),
                }
            }
            Element::Text => match self.nodes.last_mut() {
                Some(Open::Question { text: slot, .. }) => text.clone_into(slot),
                Some(Open::Item(item)) => text.clone_into(&mut item.text),
                Some(Open::Discussion(discussion)) => text.clone_into(&mut discussion.body),
                _ => tracing::debug!("Ignoring <text> without a question, item or discussion"),
            },
            Element::Tag => {
                if let Some(Open::Answer(answer)) = self.nodes.last_mut() {
                    answer.tag = (!text.is_empty()).then(|| text.to_owned());
                }
            }
            Element::Response => {
                if let Some(Open::Item(item)) = self.nodes.last_mut() {
                    text.clone_into(&mut item.response);
                }
            }
            Element::WhenRight => {
                if let Some(Open::Answer(answer)) = self.nodes.last_mut() {
                    text.clone_into(&mut answer.when_right);
                }
            }
            Element::WhenWrong => {
                if let Some(Open::Answer(answer)) = self.nodes.last_mut() {
                    text.clone_into(&mut answer.when_wrong);
                }
            }
        }
        Ok(())
    }

    fn require_quiz_level(&self, element: Element) -> Result<(), ParseError> {
        if self.quiz.is_none() {
            return Err(ParseError::MissingRoot);
        }
        match self.nodes.last() {
            None => Ok(()),
            other => Err(misplaced(element, other)),
        }
    }

    fn root(&mut self) -> Result<&mut Quiz, ParseError> {
        self.quiz.as_mut().ok_or(ParseError::MissingRoot)
    }

    /// 1-based number of the question currently being built.
    fn question_number(&self) -> usize {
        self.quiz.as_ref().map_or(0, |quiz| quiz.questions.len()) + 1
    }
}

fn misplaced(element: Element, parent: Option<&Open>) -> ParseError {
    ParseError::Misplaced {
        element: element.name(),
        parent: parent.map_or("quiz", Open::name),
    }
}

fn attr_or(attrs: &Attributes, name: &str, default: &str) -> String {
    attrs.get(name).unwrap_or(default).to_owned()
}

/// Column count from a `cols` attribute; anything but a positive integer is 1.
fn parse_columns(value: Option<&str>) -> NonZeroUsize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .and_then(NonZeroUsize::new)
        .unwrap_or(NonZeroUsize::MIN)
}

fn decode_name<R: BufRead>(reader: &Reader<R>, name: &[u8]) -> String {
    reader.decoder().decode(name).map_or_else(
        |_| String::from_utf8_lossy(name).into_owned(),
        std::borrow::Cow::into_owned,
    )
}

fn decode_attrs<R: BufRead>(
    reader: &Reader<R>,
    e: &BytesStart,
) -> Result<Attributes, ParseError> {
    let mut attrs = Attributes::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = decode_name(reader, attr.key.as_ref());
        let value = match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => unescape_lenient(&reader.decoder().decode(&attr.value)?),
        };
        attrs.push(key, value);
    }
    Ok(attrs)
}

/// Render attributes back into start-tag form (with a leading space).
fn render_attrs(attrs: &Attributes) -> String {
    attrs
        .iter()
        .map(|(key, value)| format!(r#" {key}="{}""#, escape_attr(value)))
        .collect()
}

/// Predefined XML entities by name.
const XML_ENTITIES: [(&str, char); 5] = [
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
];

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        let entity = matches!(ch, '&' | '<' | '"')
            .then(|| XML_ENTITIES.iter().find(|&&(_, c)| c == ch))
            .flatten();
        match entity {
            Some((name, _)) => {
                out.push('&');
                out.push_str(name);
                out.push(';');
            }
            None => out.push(ch),
        }
    }
    out
}

/// Character for an entity name (`amp`, `#38`, `#x26`), if it is one the
/// parser knows.
fn decode_entity(name: &str) -> Option<char> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => number.parse::<u32>().ok(),
        };
        return code.and_then(char::from_u32);
    }
    XML_ENTITIES
        .iter()
        .find(|&&(entity, _)| entity == name)
        .map(|&(_, ch)| ch)
}

/// Decode the entities of an attribute value that quick-xml rejected.
///
/// Known entities are replaced; unknown ones (`&nbsp;`) and stray `&` stay
/// literal.
fn unescape_lenient(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let name = after
            .find(';')
            .map(|end| &after[..end])
            .filter(|name| {
                !name.is_empty() && !name.contains(|c: char| c == '&' || c.is_whitespace())
            });
        match name {
            Some(name) => {
                match decode_entity(name) {
                    Some(ch) => out.push(ch),
                    None => {
                        out.push('&');
                        out.push_str(name);
                        out.push(';');
                    }
                }
                rest = &after[name.len() + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const ARITHMETIC: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<quiz title="Arithmetic" breadcrumb="Home / Quizzes" src="arith.tex">
  <course name="Algebra" code="MATH1001" url="/u/UG/JM/MATH1001/"/>
  <meta name="keywords" content="sums"/>
  <link rel="icon" href="favicon.ico"/>
  <discussion heading="Before you start">Read the notes.</discussion>
  <question>
    <text>2+2=?</text>
    <answer value="4">
      <tag>units</tag>
      <when_right>Well done.</when_right>
      <whenWrong>Count again.</whenWrong>
    </answer>
  </question>
  <question>
    <text><![CDATA[Pick <b>one</b>]]></text>
    <choice type="single" cols="2">
      <item expect="false"><text>3</text></item>
      <item expect="true"><text>4</text><response>Yes</response></item>
      <item expect="false"><text>5</text></item>
    </choice>
  </question>
</quiz>
"#;

    #[test]
    fn test_parse_quiz_metadata() {
        let quiz = parse_str(ARITHMETIC).unwrap();

        assert_eq!(quiz.title, "Arithmetic");
        assert_eq!(quiz.breadcrumb, "Home / Quizzes");
        assert_eq!(quiz.source, "arith.tex");
        assert_eq!(quiz.course.code, "MATH1001");
        assert_eq!(quiz.meta.len(), 1);
        assert_eq!(quiz.meta[0].get("content"), Some("sums"));
        assert_eq!(quiz.links[0].get("href"), Some("favicon.ico"));
    }

    #[test]
    fn test_parse_answer_question() {
        let quiz = parse_str(ARITHMETIC).unwrap();
        let question = &quiz.questions[0];

        assert_eq!(question.text, "2+2=?");
        let AnswerBody::Answer(answer) = &question.body else {
            panic!("expected answer body");
        };
        assert_eq!(answer.value, "4");
        assert_eq!(answer.tag.as_deref(), Some("units"));
        assert_eq!(answer.when_right, "Well done.");
        assert_eq!(answer.when_wrong, "Count again.");
    }

    #[test]
    fn test_parse_choice_question() {
        let quiz = parse_str(ARITHMETIC).unwrap();
        let question = &quiz.questions[1];

        assert_eq!(question.text, "Pick <b>one</b>");
        let AnswerBody::Choice(choice) = &question.body else {
            panic!("expected choice body");
        };
        assert_eq!(choice.mode, ChoiceMode::Single);
        assert_eq!(choice.columns.get(), 2);
        let expects: Vec<bool> = choice.items.iter().map(|i| i.expect).collect();
        assert_eq!(expects, vec![false, true, false]);
        assert_eq!(choice.items[1].text, "4");
        assert_eq!(choice.items[1].response, "Yes");
    }

    #[test]
    fn test_parse_discussion_body_from_contained_text() {
        let quiz = parse_str(ARITHMETIC).unwrap();
        assert_eq!(quiz.discussions.len(), 1);
        assert_eq!(quiz.discussions[0].heading, "Before you start");
        assert_eq!(quiz.discussions[0].body, "Read the notes.");
    }

    #[test]
    fn test_parse_discussion_body_from_text_element() {
        let quiz = parse_str(
            r#"<quiz><discussion heading="Notes"><text> Body </text></discussion></quiz>"#,
        )
        .unwrap();
        assert_eq!(quiz.discussions[0].body, "Body");
    }

    #[test]
    fn test_parse_preserves_document_order() {
        let xml = r#"<quiz>
            <discussion heading="one"/>
            <question><text>Q1</text><answer value="1"/></question>
            <discussion heading="two"/>
            <question><text>Q2</text><answer value="2"/></question>
            <question><text>Q3</text><answer value="3"/></question>
        </quiz>"#;
        let quiz = parse_str(xml).unwrap();

        let headings: Vec<&str> = quiz.discussions.iter().map(|d| d.heading.as_str()).collect();
        let texts: Vec<&str> = quiz.questions.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(headings, vec!["one", "two"]);
        assert_eq!(texts, vec!["Q1", "Q2", "Q3"]);
    }

    #[test]
    fn test_duplicate_answer_body_is_fatal() {
        let xml = r#"<quiz><question><text>x</text>
            <choice type="single" cols="1"><item expect="true"><text>a</text></item></choice>
            <answer value="1"/>
        </question></quiz>"#;
        let err = parse_str(xml).unwrap_err();
        assert!(
            matches!(err, ParseError::DuplicateAnswerBody { question: 1 }),
            "got {err:?}"
        );
        assert!(err.to_string().contains("Multiple <choice>/<answer>"));
    }

    #[test]
    fn test_two_answers_is_fatal() {
        let xml = r#"<quiz>
            <question><text>ok</text><answer value="1"/></question>
            <question><text>x</text><answer value="1"/><answer value="2"/></question>
        </quiz>"#;
        let err = parse_str(xml).unwrap_err();
        assert!(matches!(err, ParseError::DuplicateAnswerBody { question: 2 }));
    }

    #[test]
    fn test_missing_answer_body_is_fatal() {
        let err = parse_str("<quiz><question><text>x</text></question></quiz>").unwrap_err();
        assert!(matches!(err, ParseError::MissingAnswerBody { question: 1 }));
    }

    #[test]
    fn test_more_than_26_items_is_fatal() {
        let items = r#"<item expect="false"><text>x</text></item>"#.repeat(27);
        let xml = format!(
            r#"<quiz><question><text>q</text><choice type="multiple" cols="3">{items}</choice></question></quiz>"#
        );
        let err = parse_str(&xml).unwrap_err();
        assert!(matches!(
            err,
            ParseError::TooManyItems {
                question: 1,
                max: 26
            }
        ));
    }

    #[test]
    fn test_26_items_is_accepted() {
        let items = r#"<item expect="false"><text>x</text></item>"#.repeat(26);
        let xml = format!(
            r#"<quiz><question><text>q</text><choice type="multiple" cols="3">{items}</choice></question></quiz>"#
        );
        let quiz = parse_str(&xml).unwrap();
        let AnswerBody::Choice(choice) = &quiz.questions[0].body else {
            panic!("expected choice body");
        };
        assert_eq!(choice.items.len(), 26);
    }

    #[test]
    fn test_item_outside_choice_is_fatal() {
        let xml = r#"<quiz><question><item expect="true"/></question></quiz>"#;
        let err = parse_str(xml).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Misplaced {
                element: "item",
                parent: "question"
            }
        ));
    }

    #[test]
    fn test_missing_attributes_use_defaults() {
        let xml = r"<quiz>
            <discussion/>
            <question><text>q</text><choice><item><text>a</text></item></choice></question>
            <question><text>r</text><answer/></question>
        </quiz>";
        let quiz = parse_str(xml).unwrap();

        assert_eq!(quiz.title, "");
        assert_eq!(quiz.discussions[0].heading, "Discussion");
        let AnswerBody::Choice(choice) = &quiz.questions[0].body else {
            panic!("expected choice body");
        };
        assert_eq!(choice.mode, ChoiceMode::Single);
        assert_eq!(choice.columns.get(), 1);
        assert!(!choice.items[0].expect);
        let AnswerBody::Answer(answer) = &quiz.questions[1].body else {
            panic!("expected answer body");
        };
        assert_eq!(answer.value, "");
        assert_eq!(answer.tag, None);
    }

    #[test]
    fn test_invalid_columns_fall_back_to_one() {
        assert_eq!(parse_columns(Some("0")).get(), 1);
        assert_eq!(parse_columns(Some("two")).get(), 1);
        assert_eq!(parse_columns(Some(" 3 ")).get(), 3);
        assert_eq!(parse_columns(None).get(), 1);
    }

    #[test]
    fn test_unknown_choice_type_is_kept() {
        let xml = r#"<quiz><question><text>q</text><choice type="ranked" cols="1">
            <item expect="true"><text>a</text></item></choice></question></quiz>"#;
        let quiz = parse_str(xml).unwrap();
        let AnswerBody::Choice(choice) = &quiz.questions[0].body else {
            panic!("expected choice body");
        };
        assert_eq!(choice.mode, ChoiceMode::Other("ranked".to_owned()));
    }

    #[test]
    fn test_unknown_elements_become_inline_markup() {
        let xml = r#"<quiz><question><text>Is <em class="x">this</em> <br/>ok?</text>
            <answer value="1"/></question><unknown>ignored</unknown></quiz>"#;
        let quiz = parse_str(xml).unwrap();
        assert_eq!(
            quiz.questions[0].text,
            r#"Is <em class="x">this</em> <br/>ok?"#
        );
    }

    #[test]
    fn test_entities_are_decoded() {
        let xml = r#"<quiz title="A &amp; B"><question><text>x &lt; 3 &#x3b1;</text>
            <answer value="1"/></question></quiz>"#;
        let quiz = parse_str(xml).unwrap();
        assert_eq!(quiz.title, "A & B");
        assert_eq!(quiz.questions[0].text, "x < 3 \u{3b1}");
    }

    #[test]
    fn test_unknown_entities_stay_literal() {
        let xml = r#"<quiz title="A &amp; B&nbsp;"><question><text>a&nbsp;b &amp; c</text>
            <answer value="1"/></question></quiz>"#;
        let quiz = parse_str(xml).unwrap();
        assert_eq!(quiz.title, "A & B&nbsp;");
        assert_eq!(quiz.questions[0].text, "a&nbsp;b & c");
    }

    #[test]
    fn test_unescape_lenient() {
        assert_eq!(unescape_lenient("x &lt; y&nbsp;&#x3b1;"), "x < y&nbsp;\u{3b1}");
        assert_eq!(unescape_lenient("a & b &amp; c"), "a & b & c");
        assert_eq!(unescape_lenient("tail &"), "tail &");
        assert_eq!(unescape_lenient("&;"), "&;");
    }

    #[test]
    fn test_decode_entity() {
        assert_eq!(decode_entity("quot"), Some('"'));
        assert_eq!(decode_entity("#65"), Some('A'));
        assert_eq!(decode_entity("#X41"), Some('A'));
        assert_eq!(decode_entity("#xD800"), None);
        assert_eq!(decode_entity("nbsp"), None);
    }

    #[test]
    fn test_quiz_index_entries() {
        let xml = r#"<quiz title="Index">
            <quizlistitem title="Week 1" url="week1.html"/>
            <quizlistitem title="Week 2" url="week2.html"/>
        </quiz>"#;
        let quiz = parse_str(xml).unwrap();
        assert_eq!(
            quiz.quiz_index,
            vec![
                QuizIndexEntry {
                    title: "Week 1".to_owned(),
                    url: "week1.html".to_owned()
                },
                QuizIndexEntry {
                    title: "Week 2".to_owned(),
                    url: "week2.html".to_owned()
                },
            ]
        );
    }

    #[test]
    fn test_malformed_xml_is_fatal() {
        let err = parse_str("<quiz><question></quiz>").unwrap_err();
        assert!(matches!(err, ParseError::Xml { .. }), "got {err:?}");
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let err = parse_str("<page><p>nothing</p></page>").unwrap_err();
        assert!(matches!(err, ParseError::MissingRoot));
    }

    #[test]
    fn test_parse_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_file(&dir.path().join("absent.xml")).unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
        assert!(err.to_string().contains("absent.xml"));
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arith.xml");
        std::fs::write(&path, ARITHMETIC).unwrap();

        let quiz = parse_file(&path).unwrap();
        assert_eq!(quiz.questions.len(), 2);
    }
}
