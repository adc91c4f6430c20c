//! Paper quiz source for the `genquiz.sty` macros.

use std::fmt::Write;

use mq_document::{Answer, Choice, Discussion, Item, Question, Quiz};

use crate::visit::{Visitor, walk_choice, walk_discussions, walk_question};

pub struct TexWriter {
    answer_slots: usize,
    out: String,
}

impl TexWriter {
    /// Writer whose quiz header reserves `answer_slots` answer boxes per
    /// question.
    pub fn new(answer_slots: usize) -> Self {
        Self {
            answer_slots,
            out: String::new(),
        }
    }

    pub fn render(mut self, quiz: &Quiz) -> String {
        self.out.push_str("\\input genquiz.sty\n");
        let _ = writeln!(self.out, "\\def\\quizid{{{}}}", quiz.source);
        let _ = writeln!(self.out, "\\def\\infoline{{{}}}", quiz.title);
        self.out.push_str("\\RecordAnswers\n");
        let _ = writeln!(
            self.out,
            "\\quiztop{{{}}}{{{}}}",
            quiz.questions.len(),
            self.answer_slots
        );
        self.out.push_str("\\signaturebox\n\\vskip\\quizskip\n");
        self.out
            .push_str("You may use the space below for your own work.\n\\newpage\n");
        walk_discussions(&mut self, quiz);
        self.visit_quiz(quiz);
        self.out.push_str("\\bye\n");
        self.out
    }
}

impl Visitor for TexWriter {
    fn visit_discussion(&mut self, _index: usize, discussion: &Discussion) {
        let _ = writeln!(
            self.out,
            "\n\\section*{{{}}}\n{}",
            discussion.heading, discussion.body
        );
    }

    fn visit_question(&mut self, number: usize, question: &Question) {
        let _ = writeln!(self.out, "\n\\exercise\n{}", question.text);
        walk_question(self, number, question);
    }

    fn visit_choice(&mut self, choice: &Choice) {
        self.out.push_str("\\beginparts\n");
        walk_choice(self, choice);
        self.out.push_str("\\endparts\n");
    }

    fn visit_item(&mut self, _index: usize, item: &Item, _choice: &Choice) {
        let correct = if item.expect { "\\correct" } else { "" };
        let _ = writeln!(self.out, "\\part {}{correct}", item.text);
        if !item.response.is_empty() {
            let _ = writeln!(self.out, "[{}]", item.response);
        }
    }

    fn visit_answer(&mut self, _answer: &Answer) {
        self.out.push_str("\\fbox{\\hbox to 1cm{\\strut\\hfil}}\n");
    }
}

#[cfg(test)]
mod tests {
    use mq_document::parse_str;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_tex_document() {
        let quiz = parse_str(
            r#"<quiz title="Week 1" src="w1">
                <discussion heading="Notes">Read carefully.</discussion>
                <question><text>2+2</text><answer value="4"/></question>
                <question><text>Pick</text><choice type="single" cols="1">
                    <item expect="false"><text>3</text></item>
                    <item expect="true"><text>4</text><response>Right</response></item>
                </choice></question>
            </quiz>"#,
        )
        .unwrap();

        let expected = r"\input genquiz.sty
\def\quizid{w1}
\def\infoline{Week 1}
\RecordAnswers
\quiztop{2}{4}
\signaturebox
\vskip\quizskip
You may use the space below for your own work.
\newpage

\section*{Notes}
Read carefully.

\exercise
2+2
\fbox{\hbox to 1cm{\strut\hfil}}

\exercise
Pick
\beginparts
\part 3
\part 4\correct
[Right]
\endparts
\bye
";
        assert_eq!(TexWriter::new(4).render(&quiz), expected);
    }

    #[test]
    fn test_answer_slots_are_configurable() {
        let quiz = parse_str(r#"<quiz title="T"/>"#).unwrap();
        let tex = TexWriter::new(6).render(&quiz);
        assert!(tex.contains("\\quiztop{0}{6}\n"));
    }
}
