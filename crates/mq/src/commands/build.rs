//! `mq build` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use mq_config::{CliSettings, Config};
use mq_renderer::{OutputFormat, RenderOptions, Rendered, render};

use super::resolve_input;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Quiz files to render (`.xml` is assumed when no extension is given).
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output format: html, xml, tex or text (overrides config).
    #[arg(short, long)]
    format: Option<String>,

    /// HTML page layout: standard or course (overrides config).
    #[arg(short, long)]
    layout: Option<String>,

    /// Base URL of the shared quiz stylesheet and script (overrides config).
    #[arg(short, long, env = "MQ_BASE_URL")]
    url: Option<String>,

    /// Answer slots in the LaTeX quiz header (overrides config).
    #[arg(long)]
    answer_slots: Option<usize>,

    /// Output file (default: `<quiz>.html` for html, stdout otherwise).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mq.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Where a rendered document goes.
#[derive(Debug, PartialEq, Eq)]
enum Target {
    File(PathBuf),
    Stdout,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        if self.output.is_some() && self.files.len() > 1 {
            return Err(CliError::Validation(
                "--output can only be used with a single input file".to_owned(),
            ));
        }

        let cli_settings = CliSettings {
            format: self.format,
            base_url: self.url,
            layout: self.layout,
            answer_slots: self.answer_slots,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let format: OutputFormat = config.output.format.parse()?;
        if format == OutputFormat::Html {
            mq_renderer::layout_by_name(&config.html.layout)?;
        }

        for file in &self.files {
            let input = resolve_input(file)?;
            let target = target_for(&input, format, self.output.as_deref());
            let rendered = build_file(&input, format, &config, &target)?;

            for warning in &rendered.warnings {
                output.warning(&format!("Warning: {}: {warning}", input.display()));
            }
            if let Target::File(path) = &target {
                output.success(&format!("Wrote {}", path.display()));
            }
        }
        Ok(())
    }
}

/// Output destination: html pages go next to the quiz, other formats to
/// stdout, unless an explicit output file is given.
fn target_for(input: &Path, format: OutputFormat, explicit: Option<&Path>) -> Target {
    match (explicit, format) {
        (Some(path), _) => Target::File(path.to_path_buf()),
        (None, OutputFormat::Html) => Target::File(input.with_extension(format.extension())),
        (None, _) => Target::Stdout,
    }
}

/// Parse, render and write one quiz.
///
/// Nothing is written unless both parsing and rendering succeed. Side files
/// produced by the renderer are written into the directory of the target
/// file, or of the input when the document goes to stdout.
fn build_file(
    input: &Path,
    format: OutputFormat,
    config: &Config,
    target: &Target,
) -> Result<Rendered, CliError> {
    let quiz = mq_document::parse_file(input)?;
    let options = RenderOptions {
        base_url: config.html.base_url.clone(),
        layout: config.html.layout.clone(),
        quiz_name: quiz_name(input),
        answer_slots: config.tex.answer_slots,
    };
    let rendered = render(&quiz, format, &options)?;

    let artifact_dir = match target {
        Target::File(path) => {
            write_file(path, &rendered.document)?;
            parent_dir(path)
        }
        Target::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.document.as_bytes())?;
            stdout.flush()?;
            parent_dir(input)
        }
    };
    for artifact in &rendered.artifacts {
        write_file(&artifact_dir.join(&artifact.file_name), &artifact.contents)?;
    }

    tracing::info!(
        input = %input.display(),
        %format,
        artifacts = rendered.artifacts.len(),
        "Built quiz"
    );
    Ok(rendered)
}

fn quiz_name(input: &Path) -> String {
    input
        .file_stem()
        .map_or_else(|| "quiz".to_owned(), |stem| stem.to_string_lossy().into_owned())
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

fn write_file(path: &Path, contents: &str) -> Result<(), CliError> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)
    };
    write().map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const ADDITION: &str =
        r#"<quiz title="Addition"><question><text>2+2=?</text><answer value="4"/></question></quiz>"#;

    #[test]
    fn test_target_for_html_is_beside_input() {
        assert_eq!(
            target_for(Path::new("quizzes/week1.xml"), OutputFormat::Html, None),
            Target::File(PathBuf::from("quizzes/week1.html"))
        );
    }

    #[test]
    fn test_target_for_other_formats_is_stdout() {
        for format in [OutputFormat::Xml, OutputFormat::Tex, OutputFormat::Text] {
            assert_eq!(target_for(Path::new("week1.xml"), format, None), Target::Stdout);
        }
    }

    #[test]
    fn test_target_for_explicit_output() {
        assert_eq!(
            target_for(
                Path::new("week1.xml"),
                OutputFormat::Tex,
                Some(Path::new("out/week1.tex"))
            ),
            Target::File(PathBuf::from("out/week1.tex"))
        );
    }

    #[test]
    fn test_build_html_writes_page() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("week1.xml");
        std::fs::write(&input, ADDITION).unwrap();
        let target = target_for(&input, OutputFormat::Html, None);

        let rendered = build_file(&input, OutputFormat::Html, &Config::default(), &target).unwrap();

        let page = std::fs::read_to_string(dir.path().join("week1.html")).unwrap();
        assert_eq!(page, rendered.document);
        assert!(page.contains("MathQuizInit(1,0,'week1');"));
        assert!(page.contains("href=\"/MathQuiz/mathquiz.css\""));
        assert!(!dir.path().join("quiztitles.js").exists());
    }

    #[test]
    fn test_build_html_writes_quiz_titles_beside_page() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("index.xml");
        std::fs::write(
            &input,
            r#"<quiz title="Quizzes"><course url="/c/"/><quizlistitem title="One" url="one.html"/></quiz>"#,
        )
        .unwrap();
        let target = Target::File(dir.path().join("site").join("index.html"));

        build_file(&input, OutputFormat::Html, &Config::default(), &target).unwrap();

        assert!(dir.path().join("site/index.html").exists());
        let titles = std::fs::read_to_string(dir.path().join("site/quiztitles.js")).unwrap();
        assert_eq!(titles, "var QuizTitles = [\n  ['One', '/c/Quizzes/one.html']\n];\n");
    }

    #[test]
    fn test_build_tex_to_file_uses_configured_slots() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("week1.xml");
        std::fs::write(&input, ADDITION).unwrap();
        let mut config = Config::default();
        config.tex.answer_slots = 7;
        let target = Target::File(dir.path().join("week1.tex"));

        build_file(&input, OutputFormat::Tex, &config, &target).unwrap();

        let tex = std::fs::read_to_string(dir.path().join("week1.tex")).unwrap();
        assert!(tex.contains("\\quiztop{1}{7}"));
    }

    #[test]
    fn test_duplicate_answer_body_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.xml");
        std::fs::write(
            &input,
            r#"<quiz><question><text>x</text>
                <choice type="single" cols="1"><item expect="true"><text>a</text></item></choice>
                <answer value="1"/>
            </question></quiz>"#,
        )
        .unwrap();
        let target = target_for(&input, OutputFormat::Html, None);

        let err = build_file(&input, OutputFormat::Html, &Config::default(), &target).unwrap_err();

        assert!(matches!(err, CliError::Parse(_)));
        assert!(err.to_string().contains("Multiple <choice>/<answer>"));
        assert!(!dir.path().join("bad.html").exists());
    }

    #[test]
    fn test_unknown_layout_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("week1.xml");
        std::fs::write(&input, ADDITION).unwrap();
        let mut config = Config::default();
        config.html.layout = "fancy".to_owned();
        let target = target_for(&input, OutputFormat::Html, None);

        let err = build_file(&input, OutputFormat::Html, &config, &target).unwrap_err();

        assert!(matches!(err, CliError::Render(_)));
        assert!(!dir.path().join("week1.html").exists());
    }

    #[test]
    fn test_quiz_name_is_file_stem() {
        assert_eq!(quiz_name(Path::new("dir/week1.xml")), "week1");
    }

    #[test]
    fn test_parent_dir_of_bare_file_is_cwd() {
        assert_eq!(parent_dir(Path::new("week1.html")), PathBuf::from("."));
        assert_eq!(parent_dir(Path::new("a/week1.html")), PathBuf::from("a"));
    }
}
