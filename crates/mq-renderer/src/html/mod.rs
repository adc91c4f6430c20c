//! Interactive HTML page renderer.
//!
//! The page is assembled from parts rendered in a fixed order: head (with
//! the answer key script), side menu, quiz header, then the discussions,
//! the quiz index and the questions. Each question is followed by its
//! response blocks, which the page script shows after checking an answer.
//! The selected [`PageLayout`] places the parts into the final document.

mod layout;

use std::fmt::Write;

use mq_document::{
    Answer, AnswerBody, Attributes, Choice, ChoiceMode, Discussion, Item, Question, Quiz,
};

pub use layout::{CourseLayout, LAYOUT_NAMES, PageLayout, PageParts, StandardLayout, layout_by_name};

use crate::format::{Artifact, RenderError, RenderOptions, Rendered};
use crate::visit::{Visitor, walk_choice, walk_discussions, walk_question};

/// File name of the quiz index script.
pub const QUIZ_TITLES_FILE: &str = "quiztitles.js";

const MARKING_KEY: &str = r#"      <table class="marking_key">
        <tr><td style="color: #FFCC00; font-size:small;">&starf;</td><td>right first<br>attempt</td></tr>
        <tr><td style="color: green; font-size:medium;">&check;</td><td>right</td></tr>
        <tr><td style="color: red; font-size:medium;">&cross;</td><td>wrong</td></tr>
      </table>
"#;

const NAVIGATION_ARROWS: &str = r#"        <div class="arrows">
          <div onClick="nextQuestion(-1);"><div class="tooltip">Previous unanswered question</div>&#x25c4;</div>
          <div class="question_label">Questions</div>
          <div onClick="nextQuestion(1);"><div class="tooltip">Next unanswered question</div>&#x25ba;</div>
        </div>
"#;

const QUESTION_BUTTONS: &str = r#"        <p>
          <input type="button" value="Check Answer" name="answer" class="input_button" onClick="checkAnswer();"/>
          <input type="button" value="Next Question" class="input_button" title="Next unanswered question" name="next" onClick="nextQuestion(1);"/>
        </p>
"#;

/// Renders a quiz as an interactive HTML page.
pub struct HtmlRenderer<'a> {
    options: &'a RenderOptions,
    out: String,
    /// Number of the question being rendered.
    question: usize,
    question_total: usize,
    discussion_total: usize,
    warnings: Vec<String>,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            out: String::with_capacity(8192),
            question: 0,
            question_total: 0,
            discussion_total: 0,
            warnings: Vec::new(),
        }
    }

    /// Render the complete page.
    ///
    /// Fails only when the configured layout does not exist. Problems local
    /// to one question are reported in [`Rendered::warnings`].
    pub fn render(mut self, quiz: &Quiz) -> Result<Rendered, RenderError> {
        let layout = layout_by_name(&self.options.layout)?;
        self.question_total = quiz.questions.len();
        self.discussion_total = quiz.discussions.len();

        let head = self.head(quiz);
        let side_menu = side_menu(quiz);
        let quiz_header = quiz_header(quiz);

        walk_discussions(&mut self, quiz);
        let mut artifacts = Vec::new();
        if !quiz.quiz_index.is_empty() {
            self.quiz_list(quiz);
            artifacts.push(quiz_titles(quiz));
        }
        self.visit_quiz(quiz);

        let questions = std::mem::take(&mut self.out);
        let document = layout.render_page(
            quiz,
            &PageParts {
                head: &head,
                side_menu: &side_menu,
                quiz_header: &quiz_header,
                questions: &questions,
            },
        );

        tracing::debug!(
            layout = layout.name(),
            questions = self.question_total,
            warnings = self.warnings.len(),
            "Rendered HTML page"
        );
        Ok(Rendered {
            document,
            artifacts,
            warnings: self.warnings,
        })
    }

    fn head(&self, quiz: &Quiz) -> String {
        let base_url = &self.options.base_url;
        let mut html = String::with_capacity(2048);
        let _ = writeln!(
            html,
            "  <meta name=\"generator\" content=\"mq {}\">",
            env!("CARGO_PKG_VERSION")
        );
        html.push_str("  <meta name=\"viewport\" content=\"width=device-width\"/>\n");
        html.push_str("  <meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\">\n");
        let _ = writeln!(
            html,
            "  <link href=\"{}mathquiz.css\" type=\"text/css\" rel=\"stylesheet\">",
            escape_html(base_url)
        );
        let _ = writeln!(
            html,
            "  <link href=\"{}.css\" type=\"text/css\" rel=\"stylesheet\">",
            escape_html(&self.options.quiz_name)
        );
        for meta in &quiz.meta {
            let _ = writeln!(html, "  <meta{}/>", html_attrs(meta));
        }
        for link in &quiz.links {
            let _ = writeln!(html, "  <link{}/>", html_attrs(link));
        }
        let _ = writeln!(
            html,
            "  <script src=\"{}mathquiz.js\" type=\"text/javascript\"></script>",
            escape_html(base_url)
        );
        let _ = writeln!(
            html,
            "  <script src=\"{QUIZ_TITLES_FILE}\" type=\"text/javascript\"></script>"
        );
        html.push_str("  <script type=\"text/javascript\">\n");
        html.push_str(&answer_key(quiz));
        html.push_str("    document.addEventListener(\"DOMContentLoaded\", function(event) {\n");
        let _ = writeln!(
            html,
            "      MathQuizInit({},{},'{}');",
            quiz.questions.len(),
            quiz.discussions.len(),
            escape_js(&self.options.quiz_name)
        );
        html.push_str("    });\n  </script>\n");
        html
    }

    fn quiz_list(&mut self, quiz: &Quiz) {
        let _ = writeln!(
            self.out,
            "      <div class=\"quiz_list\"><h2>{} Quizzes</h2>\n        <ul>",
            escape_html(&quiz.course.name)
        );
        for entry in &quiz.quiz_index {
            let _ = writeln!(
                self.out,
                "          <li><a href=\"{}\">{}</a></li>",
                escape_html(&entry.url),
                escape_html(&entry.title)
            );
        }
        self.out.push_str("        </ul>\n      </div>\n");
    }

    fn response(&mut self, number: usize, question: &Question) {
        self.out.push_str("        <div class=\"answer\">\n");
        match &question.body {
            AnswerBody::Answer(answer) => {
                let _ = write!(
                    self.out,
                    "          <div id=\"q{number}true\" class=\"response\"><em>Correct!</em>\n\
                     \x20           <div>{}</div>\n          </div>\n\
                     \x20         <div id=\"q{number}false\" class=\"response\"><em>Incorrect. Please try again.</em>\n\
                     \x20           <div>{}</div>\n          </div>\n",
                    answer.when_right, answer.when_wrong
                );
            }
            AnswerBody::Choice(choice) => match choice.mode {
                ChoiceMode::Single => self.single_responses(number, choice),
                ChoiceMode::Multiple => self.multiple_responses(number, choice),
                ChoiceMode::Other(_) => {}
            },
        }
        self.out.push_str("        </div>\n");
    }

    fn single_responses(&mut self, number: usize, choice: &Choice) {
        for (i, item) in choice.items.iter().enumerate() {
            let index = i + 1;
            let verdict = if item.expect { "correct" } else { "incorrect" };
            let _ = write!(
                self.out,
                "          <div id=\"q{number}response{index}\" class=\"response\">\n\
                 \x20           <em>Choice ({}) is <span class=\"dazzle\">{verdict}</span></em><div>{}</div>\n\
                 \x20         </div>\n",
                label(index),
                item.response
            );
        }
    }

    fn multiple_responses(&mut self, number: usize, choice: &Choice) {
        for (i, item) in choice.items.iter().enumerate() {
            let index = i + 1;
            let _ = write!(
                self.out,
                "          <div id=\"q{number}response{index}\" class=\"response\">\n\
                 \x20           <em>There is at least one mistake.</em><br>For example, choice \
                 <span class=\"brown\">({})</span> should be <span class=\"dazzle\">{}</span>.\n\
                 \x20           <div>{}</div>\n          </div>\n",
                label(index),
                item.expect,
                item.response
            );
        }
        let _ = writeln!(
            self.out,
            "          <div id=\"q{number}response0\" class=\"response\"><em class=\"dazzle\">Correct!</em>\n            <ol>"
        );
        for item in &choice.items {
            let verdict = if item.expect { "True" } else { "False" };
            let _ = writeln!(
                self.out,
                "              <li><em>{verdict}</em> {}</li>",
                item.response
            );
        }
        self.out.push_str("            </ol>\n          </div>\n");
    }
}

impl Visitor for HtmlRenderer<'_> {
    fn visit_discussion(&mut self, index: usize, discussion: &Discussion) {
        let start = if self.question_total > 0 && index == self.discussion_total {
            "\n        <input type=\"button\" name=\"next\" value=\"Start quiz\" onClick=\"return gotoQuestion(1);\"/>"
        } else {
            ""
        };
        let _ = write!(
            self.out,
            "      <div id=\"question-{index}\" class=\"question\"><h2>{}</h2>\n        <p>{}</p>{start}\n      </div>\n",
            escape_html(&discussion.heading),
            discussion.body
        );
    }

    fn visit_question(&mut self, number: usize, question: &Question) {
        self.question = number;
        let display = if number == 1 {
            " style=\"display: block;\""
        } else {
            ""
        };
        let _ = write!(
            self.out,
            "      <div id=\"question{number}\" class=\"question\"{display}>\n\
             \x20       <div class=\"question_text\">\n          {}\n        </div>\n\
             \x20       <form id=\"Q{number}Form\" onSubmit=\"return false;\" class=\"question\">\n        ",
            question.text
        );
        walk_question(self, number, question);
        self.out.push('\n');
        self.out.push_str(QUESTION_BUTTONS);
        self.out.push_str("        </form>\n");
        self.response(number, question);
        self.out.push_str("      </div>\n");
    }

    fn visit_choice(&mut self, choice: &Choice) {
        if let ChoiceMode::Other(mode) = &choice.mode {
            tracing::warn!(question = self.question, mode = %mode, "Unknown choice type");
            self.warnings.push(format!(
                "question {}: unknown choice type '{mode}'",
                self.question
            ));
        }
        self.out.push_str("<table class=\"question_choices\">\n");
        walk_choice(self, choice);
        self.out.push_str("</table>");
        if choice.mode == ChoiceMode::Single {
            let _ = write!(
                self.out,
                "\n<input type=\"hidden\" name=\"Q{}hidden\"/>",
                self.question
            );
        }
    }

    fn visit_item(&mut self, index: usize, item: &Item, choice: &Choice) {
        let number = self.question;
        if choice.starts_row(index) {
            self.out.push_str("<tr>");
        }
        let _ = write!(self.out, "<td class=\"brown\">{})</td>", label(index));
        match &choice.mode {
            ChoiceMode::Single => {
                let _ = write!(
                    self.out,
                    "<td><input type=\"radio\" name=\"Q{number}option\"/></td><td><div class=\"question_choices\">{}</div></td>",
                    item.text
                );
            }
            ChoiceMode::Multiple => {
                let _ = write!(
                    self.out,
                    "<td><input type=\"checkbox\" name=\"Q{number}option{index}\"/></td><td><div class=\"question_choices\">{}</div></td>",
                    item.text
                );
            }
            ChoiceMode::Other(mode) => {
                let _ = write!(
                    self.out,
                    "<!-- internal error: unknown choice type {} -->",
                    comment_safe(mode)
                );
            }
        }
        if choice.ends_row(index) {
            self.out.push_str("</tr>\n");
        }
    }

    fn visit_answer(&mut self, answer: &Answer) {
        self.out
            .push_str("<input type=\"text\" onChange=\"checkAnswer();\" size=\"5\"/>");
        if let Some(tag) = &answer.tag {
            let _ = write!(self.out, " <span class=\"question_text\">{tag}</span>");
        }
    }
}

fn side_menu(quiz: &Quiz) -> String {
    let mut html = String::with_capacity(2048);
    html.push_str("      <div>MathQuiz</div>\n");
    if !quiz.discussions.is_empty() {
        html.push_str("      <ul>\n");
        for (i, discussion) in quiz.discussions.iter().enumerate() {
            let _ = writeln!(
                html,
                "        <li class=\"discussion\" onClick=\"gotoQuestion(-{})\">{}</li>",
                i + 1,
                escape_html(&discussion.heading)
            );
        }
        html.push_str("      </ul>\n");
    }
    html.push_str(
        "      <div class=\"buttons\">\n        <div class=\"question_label\">&nbsp;Questions&nbsp;</div>\n        <br>\n",
    );
    for number in 1..=quiz.questions.len() {
        let selected = if number == 1 && quiz.discussions.is_empty() {
            " button-selected"
        } else {
            ""
        };
        let _ = writeln!(
            html,
            "        <div id=\"button{number}\" class=\"button{selected}\" content=\"\" onClick=\"gotoQuestion({number})\">{number}</div>"
        );
    }
    html.push_str("      </div>\n      <div style=\"clear:left; height: 1em;\"></div>\n");
    html.push_str(MARKING_KEY);
    html
}

fn quiz_header(quiz: &Quiz) -> String {
    let mut html = String::with_capacity(1024);
    let _ = writeln!(
        html,
        "      <div class=\"quiz_header\">\n        <div class=\"quiz_title\">{}</div>\n        <div style=\"clear:both;\"></div>",
        escape_html(&quiz.title)
    );
    if !quiz.questions.is_empty() {
        html.push_str(
            "        <div id=\"question_number\" class=\"question_label\">Question 1</div>\n",
        );
        html.push_str(NAVIGATION_ARROWS);
    }
    html.push_str("      </div>\n");
    html
}

/// Script lines filling `QuizSpecifications`, the answer key read by the
/// page script.
fn answer_key(quiz: &Quiz) -> String {
    let mut js = String::new();
    for (i, question) in quiz.questions.iter().enumerate() {
        let _ = writeln!(js, "QuizSpecifications[{i}]=new Array();");
        match &question.body {
            AnswerBody::Answer(answer) => {
                let _ = writeln!(js, "QuizSpecifications[{i}].value={};", js_value(&answer.value));
                let _ = writeln!(js, "QuizSpecifications[{i}].type=\"input\";");
            }
            AnswerBody::Choice(choice) => {
                let _ = writeln!(
                    js,
                    "QuizSpecifications[{i}].type=\"{}\";",
                    escape_js(choice.mode.as_str())
                );
                for (j, item) in choice.items.iter().enumerate() {
                    let _ = writeln!(js, "QuizSpecifications[{i}][{j}]={};", item.expect);
                }
            }
        }
    }
    js
}

/// The quiz index script consumed by the page's drop-down menu.
fn quiz_titles(quiz: &Quiz) -> Artifact {
    let titles: Vec<String> = quiz
        .quiz_index
        .iter()
        .map(|entry| {
            format!(
                "  ['{}', '{}Quizzes/{}']",
                escape_js(&entry.title),
                escape_js(&quiz.course.url),
                escape_js(&entry.url)
            )
        })
        .collect();
    Artifact {
        file_name: QUIZ_TITLES_FILE.to_owned(),
        contents: format!("var QuizTitles = [\n{}\n];\n", titles.join(",\n")),
    }
}

/// Expected value as a script literal: numbers stay numeric so the page
/// can compare them with the parsed input.
///
/// Numbers are written in canonical form; `012` would otherwise be read as
/// a legacy octal literal.
fn js_value(value: &str) -> String {
    let trimmed = value.trim();
    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() && !trimmed.starts_with('+') => number.to_string(),
        _ => format!("\"{}\"", escape_js(value)),
    }
}

/// Text that cannot end an HTML comment: no two dashes are adjacent.
fn comment_safe(text: &str) -> String {
    text.replace('-', "- ")
}

fn label(index: usize) -> char {
    Choice::label(index).unwrap_or('?')
}

fn html_attrs(attrs: &Attributes) -> String {
    attrs
        .iter()
        .map(|(name, value)| format!(" {name}=\"{}\"", escape_html(value)))
        .collect()
}

pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape text for a single- or double-quoted script string.
fn escape_js(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '<' => out.push_str("\\x3c"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use mq_document::parse_str;
    use pretty_assertions::assert_eq;

    use super::*;

    /// The choice table of the first question.
    fn choice_table(html: &str) -> &str {
        let start = html.find("<table class=\"question_choices\">").unwrap();
        let end = start + html[start..].find("</table>").unwrap();
        &html[start..end]
    }

    fn render(xml: &str) -> Rendered {
        let quiz = parse_str(xml).unwrap();
        HtmlRenderer::new(&RenderOptions::default())
            .render(&quiz)
            .unwrap()
    }

    #[test]
    fn test_text_answer_has_single_input_and_no_choices() {
        let rendered =
            render(r#"<quiz><question><text>2+2=?</text><answer value="4"/></question></quiz>"#);
        let html = &rendered.document;

        assert_eq!(html.matches("<input type=\"text\"").count(), 1);
        assert_eq!(html.matches("type=\"radio\"").count(), 0);
        assert_eq!(html.matches("type=\"checkbox\"").count(), 0);
        assert!(html.contains("QuizSpecifications[0].value=4;"));
        assert!(html.contains("QuizSpecifications[0].type=\"input\";"));
        assert!(html.contains("id=\"q1true\""));
        assert!(html.contains("id=\"q1false\""));
        assert!(rendered.warnings.is_empty());
    }

    #[test]
    fn test_single_choice_radio_group() {
        let rendered = render(
            r#"<quiz><question><text>Pick</text><choice type="single" cols="1">
                <item expect="false"><text>one</text></item>
                <item expect="true"><text>two</text></item>
                <item expect="false"><text>three</text></item>
            </choice></question></quiz>"#,
        );
        let html = &rendered.document;

        assert_eq!(html.matches("<input type=\"radio\" name=\"Q1option\"/>").count(), 3);
        assert_eq!(html.matches("<input type=\"hidden\" name=\"Q1hidden\"/>").count(), 1);
        let table = choice_table(html);
        assert_eq!(table.matches("<tr>").count(), 3);
        assert_eq!(table.matches("</tr>").count(), 3);
        assert!(html.contains(
            "QuizSpecifications[0][0]=false;\nQuizSpecifications[0][1]=true;\nQuizSpecifications[0][2]=false;\n"
        ));
        for index in 1..=3 {
            assert!(html.contains(&format!("id=\"q1response{index}\"")));
        }
        assert!(html.contains("Choice (b) is <span class=\"dazzle\">correct</span>"));
    }

    #[test]
    fn test_choice_labels_are_first_letters() {
        let rendered = render(
            r#"<quiz><question><text>Pick</text><choice type="multiple" cols="2">
                <item expect="true"><text>1</text></item>
                <item expect="false"><text>2</text></item>
                <item expect="true"><text>3</text></item>
                <item expect="false"><text>4</text></item>
                <item expect="true"><text>5</text></item>
            </choice></question></quiz>"#,
        );
        let html = &rendered.document;

        let labels: Vec<&str> = html
            .match_indices("<td class=\"brown\">")
            .map(|(pos, tag)| &html[pos + tag.len()..=pos + tag.len()])
            .collect();
        assert_eq!(labels, vec!["a", "b", "c", "d", "e"]);
        for index in 1..=5 {
            assert!(html.contains(&format!("name=\"Q1option{index}\"")));
        }
        assert!(html.contains("id=\"q1response0\""));
    }

    #[test]
    fn test_column_wrapping_two_columns() {
        let rendered = render(
            r#"<quiz><question><text>Pick</text><choice type="multiple" cols="2">
                <item><text>1</text></item><item><text>2</text></item>
                <item><text>3</text></item><item><text>4</text></item>
                <item><text>5</text></item>
            </choice></question></quiz>"#,
        );
        let html = &rendered.document;

        let table = choice_table(html);
        assert_eq!(table.matches("<tr>").count(), 3);
        assert_eq!(table.matches("</tr>").count(), 3);
        let row = "<tr><td class=\"brown\">e)</td><td><input type=\"checkbox\" name=\"Q1option5\"/></td>\
                   <td><div class=\"question_choices\">5</div></td></tr>";
        assert!(table.contains(row));
    }

    #[test]
    fn test_questions_and_discussions_keep_order() {
        let rendered = render(
            r#"<quiz>
                <discussion heading="First">a</discussion>
                <discussion heading="Second">b</discussion>
                <question><text>Q-one</text><answer value="1"/></question>
                <question><text>Q-two</text><answer value="2"/></question>
                <question><text>Q-three</text><answer value="3"/></question>
            </quiz>"#,
        );
        let html = &rendered.document;

        let position = |needle: &str| html.find(needle).unwrap();
        assert!(position("id=\"question-1\"") < position("id=\"question-2\""));
        assert!(position("id=\"question-2\"") < position("id=\"question1\""));
        assert!(position("id=\"question1\"") < position("Q-one"));
        assert!(position("Q-one") < position("id=\"question2\""));
        assert!(position("id=\"question2\"") < position("Q-two"));
        assert!(position("Q-two") < position("id=\"question3\""));
        assert!(position("gotoQuestion(-1)\">First") < position("gotoQuestion(-2)\">Second"));
        assert_eq!(html.matches("value=\"Start quiz\"").count(), 1);
        assert!(html.contains("MathQuizInit(3,2,'quiz');"));
    }

    #[test]
    fn test_response_follows_its_question() {
        let rendered = render(
            r#"<quiz>
                <question><text>A</text><answer value="x"><when_right>RIGHT-1</when_right></answer></question>
                <question><text>B</text><answer value="y"><when_right>RIGHT-2</when_right></answer></question>
            </quiz>"#,
        );
        let html = &rendered.document;
        let position = |needle: &str| html.find(needle).unwrap();

        assert!(position("RIGHT-1") < position("id=\"question2\""));
        assert!(position("id=\"question2\"") < position("RIGHT-2"));
    }

    #[test]
    fn test_answer_key_uses_canonical_numbers() {
        let rendered =
            render(r#"<quiz><question><text>x</text><answer value="012"/></question></quiz>"#);
        assert!(rendered.document.contains("QuizSpecifications[0].value=12;"));
    }

    #[test]
    fn test_unknown_choice_type_cannot_close_comment() {
        let rendered = render(
            r#"<quiz><question><text>odd</text><choice type="---&gt;" cols="1">
                <item expect="true"><text>a</text></item>
            </choice></question></quiz>"#,
        );
        let table = choice_table(&rendered.document);
        assert_eq!(table.matches("-->").count(), 1);
        assert!(table.contains("<!-- internal error: unknown choice type - - - > -->"));
    }

    #[test]
    fn test_unknown_choice_type_warns_and_continues() {
        let rendered = render(
            r#"<quiz>
                <question><text>odd</text><choice type="ranked" cols="1">
                    <item expect="true"><text>a</text></item>
                </choice></question>
                <question><text>after</text><answer value="1"/></question>
            </quiz>"#,
        );

        assert!(
            rendered
                .document
                .contains("<!-- internal error: unknown choice type ranked -->")
        );
        assert!(rendered.document.contains("id=\"question2\""));
        assert_eq!(
            rendered.warnings,
            vec!["question 1: unknown choice type 'ranked'".to_owned()]
        );
    }

    #[test]
    fn test_first_button_selected_without_discussions() {
        let rendered =
            render(r#"<quiz><question><text>q</text><answer value="1"/></question></quiz>"#);
        assert!(rendered.document.contains("class=\"button button-selected\""));

        let rendered = render(
            r#"<quiz><discussion>d</discussion><question><text>q</text><answer value="1"/></question></quiz>"#,
        );
        assert!(!rendered.document.contains("button-selected"));
    }

    #[test]
    fn test_meta_and_link_pass_through_escaped() {
        let rendered = render(
            r#"<quiz><meta name="description" content="a &quot;b&quot; &lt;c&gt;"/><link rel="next" href="q2.html"/></quiz>"#,
        );
        assert!(
            rendered
                .document
                .contains("<meta name=\"description\" content=\"a &quot;b&quot; &lt;c&gt;\"/>")
        );
        assert!(rendered.document.contains("<link rel=\"next\" href=\"q2.html\"/>"));
    }

    #[test]
    fn test_quiz_index_produces_titles_script() {
        let rendered = render(
            r#"<quiz title="Index">
                <course name="Algebra" code="M1" url="/m1/"/>
                <quizlistitem title="Week 1" url="w1.html"/>
                <quizlistitem title="Bob's quiz" url="w2.html"/>
            </quiz>"#,
        );

        assert!(rendered.document.contains("<h2>Algebra Quizzes</h2>"));
        assert!(
            rendered
                .document
                .contains("<li><a href=\"w1.html\">Week 1</a></li>")
        );
        assert_eq!(
            rendered.artifacts,
            vec![Artifact {
                file_name: "quiztitles.js".to_owned(),
                contents: "var QuizTitles = [\n  ['Week 1', '/m1/Quizzes/w1.html'],\n  \
                           ['Bob\\'s quiz', '/m1/Quizzes/w2.html']\n];\n"
                    .to_owned(),
            }]
        );
    }

    #[test]
    fn test_no_artifact_without_quiz_index() {
        let rendered = render(r#"<quiz title="T"/>"#);
        assert!(rendered.artifacts.is_empty());
        assert!(!rendered.document.contains("quiz_list"));
        assert!(!rendered.document.contains("question_number"));
    }

    #[test]
    fn test_base_url_prefixes_shared_assets() {
        let quiz = parse_str(r#"<quiz title="T"/>"#).unwrap();
        let options = RenderOptions {
            base_url: "/assets/".to_owned(),
            quiz_name: "week1".to_owned(),
            ..RenderOptions::default()
        };
        let rendered = HtmlRenderer::new(&options).render(&quiz).unwrap();

        assert!(rendered.document.contains("href=\"/assets/mathquiz.css\""));
        assert!(rendered.document.contains("src=\"/assets/mathquiz.js\""));
        assert!(rendered.document.contains("href=\"week1.css\""));
        assert!(rendered.document.contains("MathQuizInit(0,0,'week1');"));
    }

    #[test]
    fn test_js_value() {
        assert_eq!(js_value("4"), "4");
        assert_eq!(js_value(" 2.5 "), "2.5");
        assert_eq!(js_value("-1e3"), "-1000");
        assert_eq!(js_value("012"), "12");
        assert_eq!(js_value("-07"), "-7");
        assert_eq!(js_value("0.50"), "0.5");
        assert_eq!(js_value("x^2"), "\"x^2\"");
        assert_eq!(js_value("inf"), "\"inf\"");
        assert_eq!(js_value(""), "\"\"");
        assert_eq!(js_value("say \"hi\""), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_comment_safe() {
        assert_eq!(comment_safe("ranked"), "ranked");
        assert!(!comment_safe("--->").contains("--"));
        assert!(!comment_safe("a-").ends_with('-'));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}
