//! `mq check` command implementation.

use std::path::PathBuf;

use clap::Args;
use mq_document::Quiz;

use super::resolve_input;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Quiz files to check (`.xml` is assumed when no extension is given).
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Parse every file and print a summary line for each.
    ///
    /// All files are checked even when one fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let mut failed = 0;

        for file in &self.files {
            let result = resolve_input(file)
                .and_then(|path| mq_document::parse_file(&path).map_err(CliError::from));
            match result {
                Ok(quiz) => output.info(&format!("{}: {}", file.display(), summarize(&quiz))),
                Err(err) => {
                    failed += 1;
                    output.error(&format!("{}: {err}", file.display()));
                }
            }
        }

        if failed > 0 {
            return Err(CliError::Validation(format!(
                "{failed} of {} files failed to parse",
                self.files.len()
            )));
        }
        output.success(&format!("{} files OK", self.files.len()));
        Ok(())
    }
}

fn summarize(quiz: &Quiz) -> String {
    let choices = quiz.questions.iter().filter(|q| q.is_choice()).count();
    let answers = quiz.question_count() - choices;
    format!(
        "'{}': {} questions ({choices} choice, {answers} answer), {} discussions",
        quiz.title,
        quiz.question_count(),
        quiz.discussion_count()
    )
}
