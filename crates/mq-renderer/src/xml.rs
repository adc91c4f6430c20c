//! XML re-serialization of a quiz tree.
//!
//! The output uses the same vocabulary the parser reads, with every text
//! field wrapped in CDATA, so parsing it again yields an equal tree.

use std::fmt::Write;

use mq_document::{Answer, Attributes, Choice, Discussion, Item, Question, Quiz};

use crate::visit::{Visitor, walk_choice, walk_discussions, walk_question};

/// Writes a quiz back out as XML.
#[derive(Default)]
pub struct XmlWriter {
    out: String,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(mut self, quiz: &Quiz) -> String {
        self.out
            .push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(
            self.out,
            "<quiz title=\"{}\" breadcrumb=\"{}\" src=\"{}\">",
            escape_xml(&quiz.title),
            escape_xml(&quiz.breadcrumb),
            escape_xml(&quiz.source)
        );
        if !quiz.course.is_empty() {
            let _ = writeln!(
                self.out,
                "  <course name=\"{}\" code=\"{}\" url=\"{}\"/>",
                escape_xml(&quiz.course.name),
                escape_xml(&quiz.course.code),
                escape_xml(&quiz.course.url)
            );
        }
        for meta in &quiz.meta {
            self.empty_element("meta", meta);
        }
        for link in &quiz.links {
            self.empty_element("link", link);
        }
        for entry in &quiz.quiz_index {
            let _ = writeln!(
                self.out,
                "  <quizlistitem title=\"{}\" url=\"{}\"/>",
                escape_xml(&entry.title),
                escape_xml(&entry.url)
            );
        }
        walk_discussions(&mut self, quiz);
        self.visit_quiz(quiz);
        self.out.push_str("</quiz>\n");
        self.out
    }

    fn empty_element(&mut self, name: &str, attrs: &Attributes) {
        let _ = write!(self.out, "  <{name}");
        for (key, value) in attrs.iter() {
            let _ = write!(self.out, " {key}=\"{}\"", escape_xml(value));
        }
        self.out.push_str("/>\n");
    }
}

impl Visitor for XmlWriter {
    fn visit_discussion(&mut self, _index: usize, discussion: &Discussion) {
        let _ = writeln!(
            self.out,
            "  <discussion heading=\"{}\">{}</discussion>",
            escape_xml(&discussion.heading),
            cdata(&discussion.body)
        );
    }

    fn visit_question(&mut self, number: usize, question: &Question) {
        let _ = writeln!(
            self.out,
            "  <question>\n    <text>{}</text>",
            cdata(&question.text)
        );
        walk_question(self, number, question);
        self.out.push_str("  </question>\n");
    }

    fn visit_choice(&mut self, choice: &Choice) {
        let _ = writeln!(
            self.out,
            "    <choice type=\"{}\" cols=\"{}\">",
            escape_xml(choice.mode.as_str()),
            choice.columns
        );
        walk_choice(self, choice);
        self.out.push_str("    </choice>\n");
    }

    fn visit_item(&mut self, _index: usize, item: &Item, _choice: &Choice) {
        let _ = writeln!(
            self.out,
            "      <item expect=\"{}\">\n        <text>{}</text>",
            item.expect,
            cdata(&item.text)
        );
        if !item.response.is_empty() {
            let _ = writeln!(
                self.out,
                "        <response>{}</response>",
                cdata(&item.response)
            );
        }
        self.out.push_str("      </item>\n");
    }

    fn visit_answer(&mut self, answer: &Answer) {
        let _ = writeln!(
            self.out,
            "    <answer value=\"{}\">",
            escape_xml(&answer.value)
        );
        if let Some(tag) = &answer.tag {
            let _ = writeln!(self.out, "      <tag>{}</tag>", cdata(tag));
        }
        let _ = writeln!(
            self.out,
            "      <when_right>{}</when_right>\n      <when_wrong>{}</when_wrong>",
            cdata(&answer.when_right),
            cdata(&answer.when_wrong)
        );
        self.out.push_str("    </answer>\n");
    }
}

/// Wrap text in a CDATA section, splitting any `]]>` it contains.
fn cdata(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    format!("<![CDATA[{}]]>", text.replace("]]>", "]]]]><![CDATA[>"))
}

/// Escape special XML characters in attribute values.
fn escape_xml(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            _ => result.push(c),
        }
    }
    result
}
