//! Plain-text dump of a quiz tree, used by the `text` output format.

use std::fmt;

use crate::model::{Answer, AnswerBody, Choice, Discussion, Item, Question, Quiz};

impl fmt::Display for Quiz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Quiz: {}", self.title)?;
        for discussion in &self.discussions {
            writeln!(f, "{discussion}")?;
        }
        for question in &self.questions {
            writeln!(f, "{question}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Discussion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Discussion({}): {}", self.heading, self.body)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Question: {}", self.text)?;
        match &self.body {
            AnswerBody::Choice(choice) => write!(f, "{choice}"),
            AnswerBody::Answer(answer) => write!(f, "{answer}"),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Choices ({}):", self.mode.as_str())?;
        for item in &self.items {
            writeln!(f, "{item}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.expect, self.text)?;
        if !self.response.is_empty() {
            write!(f, "\nResponse: {}", self.response)?;
        }
        Ok(())
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.value, self.tag.as_deref().unwrap_or_default())?;
        writeln!(f)?;
        writeln!(f, "Right: {}", self.when_right)?;
        writeln!(f, "Wrong: {}", self.when_wrong)
    }
}
