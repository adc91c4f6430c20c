//! Page layouts: the frame the rendered quiz parts are placed in.

use std::fmt::Write;

use mq_document::Quiz;

use super::escape_html;
use crate::format::RenderError;

/// Names of the built-in layouts.
pub const LAYOUT_NAMES: [&str; 2] = ["standard", "course"];

const NO_SCRIPT: &str = r#"<noscript>
      <div class="warning">
        If you are reading this message either your browser does not support
        JavaScript or because JavaScript is not enabled. You will need to enable
        JavaScript and then reload this page in order to use this quiz.
      </div>
    </noscript>"#;

/// Rendered fragments of a quiz page.
pub struct PageParts<'a> {
    /// Everything inside `<head>` except the title.
    pub head: &'a str,
    pub side_menu: &'a str,
    pub quiz_header: &'a str,
    /// Discussions, quiz index and questions.
    pub questions: &'a str,
}

/// Arranges the page parts into a complete HTML document.
pub trait PageLayout {
    fn name(&self) -> &'static str;

    /// Breadcrumb trail shown above the quiz.
    fn breadcrumbs(&self, quiz: &Quiz) -> String;

    fn render_page(&self, quiz: &Quiz, parts: &PageParts<'_>) -> String {
        let mut html = String::with_capacity(8192);
        html.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n");
        let _ = writeln!(html, "  <title>{}</title>", escape_html(&quiz.title));
        html.push_str(parts.head);
        html.push_str("</head>\n\n<body>\n");
        let _ = writeln!(html, "  {}", self.breadcrumbs(quiz));
        let _ = writeln!(html, "  {NO_SCRIPT}");
        html.push_str("  <div class=\"quiz_page\">\n    <div class=\"side_menu\">\n");
        html.push_str(parts.side_menu);
        html.push_str("    </div>\n    <div class=\"quiz_questions\">\n");
        html.push_str(parts.quiz_header);
        html.push_str(parts.questions);
        html.push_str("    </div>\n  </div>\n</body>\n</html>\n");
        html
    }
}

/// Layout using the quiz's own breadcrumb text.
pub struct StandardLayout;

impl PageLayout for StandardLayout {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn breadcrumbs(&self, quiz: &Quiz) -> String {
        if quiz.breadcrumb.is_empty() {
            return String::new();
        }
        format!("<div class=\"breadcrumbs\">{}</div>", quiz.breadcrumb)
    }
}

/// Layout for course pages: breadcrumbs lead back to the course and its
/// quiz list.
pub struct CourseLayout;

impl PageLayout for CourseLayout {
    fn name(&self) -> &'static str {
        "course"
    }

    fn breadcrumbs(&self, quiz: &Quiz) -> String {
        let url = escape_html(&quiz.course.url);
        format!(
            "<div class=\"breadcrumbs\"><a href=\"{url}\">{}</a> / <a href=\"{url}Quizzes\">Quizzes</a> / {}</div>",
            escape_html(&quiz.course.code),
            escape_html(&quiz.title)
        )
    }

    fn render_page(&self, quiz: &Quiz, parts: &PageParts<'_>) -> String {
        let mut html = String::with_capacity(8192);
        html.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n");
        let _ = writeln!(html, "  <title>{}</title>", escape_html(&quiz.title));
        html.push_str(parts.head);
        html.push_str("</head>\n\n<body>\n  <div class=\"quizpage\">\n");
        let _ = writeln!(html, "    {}", self.breadcrumbs(quiz));
        let _ = writeln!(html, "    {NO_SCRIPT}");
        html.push_str("    <div class=\"side_menu\">\n");
        html.push_str(parts.side_menu);
        html.push_str("    </div>\n    <div class=\"quiz_questions\">\n");
        html.push_str(parts.quiz_header);
        html.push_str(parts.questions);
        html.push_str("    </div>\n  </div>\n</body>\n</html>\n");
        html
    }
}

/// Look up a built-in layout by name.
pub fn layout_by_name(name: &str) -> Result<Box<dyn PageLayout>, RenderError> {
    match name {
        "standard" => Ok(Box::new(StandardLayout)),
        "course" => Ok(Box::new(CourseLayout)),
        _ => Err(RenderError::UnknownLayout {
            name: name.to_owned(),
            known: LAYOUT_NAMES.join(", "),
        }),
    }
}
