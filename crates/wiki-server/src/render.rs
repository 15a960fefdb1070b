//! HTML rendering of pages.
//!
//! [`Templates`] holds the two page templates, compiled once at startup.
//! Rendering produces an owned string, so a response is only built after the
//! whole template rendered without error.

use std::path::{Path, PathBuf};

use minijinja::{Environment, context};
use wiki_storage::Page;

/// Built-in view template.
const BUILTIN_VIEW: &str = include_str!("../templates/view.html");
/// Built-in edit template.
const BUILTIN_EDIT: &str = include_str!("../templates/edit.html");

/// Page template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Template {
    /// Read-only page display.
    View,
    /// Edit form posting to the save action.
    Edit,
}

impl Template {
    /// Template name, also the file name when loading from a directory.
    ///
    /// The `.html` suffix turns on HTML auto-escaping.
    fn name(self) -> &'static str {
        match self {
            Self::View => "view.html",
            Self::Edit => "edit.html",
        }
    }
}

/// Template loading or rendering error.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Template file could not be read.
    #[error("Failed to read template {}: {source}", path.display())]
    Load {
        /// Template file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Template failed to compile or render.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Compiled page templates.
pub(crate) struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Templates compiled into the binary.
    pub(crate) fn builtin() -> Result<Self, RenderError> {
        Self::from_sources(BUILTIN_VIEW.to_owned(), BUILTIN_EDIT.to_owned())
    }

    /// Load `view.html` and `edit.html` from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if either file is missing or fails to compile.
    pub(crate) fn from_dir(dir: &Path) -> Result<Self, RenderError> {
        let read = |template: Template| {
            let path = dir.join(template.name());
            std::fs::read_to_string(&path).map_err(|source| RenderError::Load { path, source })
        };
        Self::from_sources(read(Template::View)?, read(Template::Edit)?)
    }

    fn from_sources(view: String, edit: String) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.add_template_owned(Template::View.name(), view)?;
        env.add_template_owned(Template::Edit.name(), edit)?;
        Ok(Self { env })
    }

    /// Render a page.
    ///
    /// The page may be unsaved; an empty body renders as empty text.
    pub(crate) fn render(&self, template: Template, page: &Page) -> Result<String, RenderError> {
        let html = self.env.get_template(template.name())?.render(context! {
            title => page.title.as_str(),
            body => page.body_text(),
        })?;
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use wiki_storage::Title;

    use super::*;

    fn page(title: &str, body: &str) -> Page {
        Page::new(Title::new(title).unwrap(), body)
    }

    #[test]
    fn test_builtin_view_contains_title_and_body() {
        let templates = Templates::builtin().unwrap();

        let html = templates
            .render(Template::View, &page("Alpha", "Hello"))
            .unwrap();

        assert!(html.contains("<h1>Alpha</h1>"));
        assert!(html.contains("Hello"));
        assert!(html.contains("href=\"/edit/Alpha\""));
    }

    #[test]
    fn test_builtin_edit_posts_to_save() {
        let templates = Templates::builtin().unwrap();

        let html = templates
            .render(Template::Edit, &page("Alpha", "Hello"))
            .unwrap();

        assert!(html.contains("action=\"/save/Alpha\""));
        assert!(html.contains(">Hello</textarea>"));
    }

    #[test]
    fn test_edit_unsaved_page_has_empty_textarea() {
        let templates = Templates::builtin().unwrap();

        let html = templates
            .render(Template::Edit, &Page::empty(Title::new("New").unwrap()))
            .unwrap();

        assert!(html.contains("<textarea name=\"body\" rows=\"20\" cols=\"80\"></textarea>"));
    }

    #[test]
    fn test_body_is_html_escaped() {
        let templates = Templates::builtin().unwrap();

        let html = templates
            .render(Template::View, &page("Alpha", "<script>alert(1)</script>"))
            .unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_from_dir_loads_custom_templates() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("view.html"), "V:{{ title }}:{{ body }}").unwrap();
        fs::write(temp_dir.path().join("edit.html"), "E:{{ title }}").unwrap();

        let templates = Templates::from_dir(temp_dir.path()).unwrap();

        assert_eq!(
            templates
                .render(Template::View, &page("Alpha", "x"))
                .unwrap(),
            "V:Alpha:x"
        );
        assert_eq!(
            templates
                .render(Template::Edit, &page("Alpha", "x"))
                .unwrap(),
            "E:Alpha"
        );
    }

    #[test]
    fn test_from_dir_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("view.html"), "{{ title }}").unwrap();

        let err = Templates::from_dir(temp_dir.path()).err().unwrap();

        assert!(matches!(err, RenderError::Load { .. }));
        assert!(err.to_string().contains("edit.html"));
    }

    #[test]
    fn test_from_dir_syntax_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("view.html"), "{% if title %}").unwrap();
        fs::write(temp_dir.path().join("edit.html"), "{{ title }}").unwrap();

        let err = Templates::from_dir(temp_dir.path()).err().unwrap();

        assert!(matches!(err, RenderError::Template(_)));
    }

    #[test]
    fn test_render_failure_is_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join("view.html"),
            "{% include \"missing.html\" %}",
        )
        .unwrap();
        fs::write(temp_dir.path().join("edit.html"), "{{ title }}").unwrap();
        let templates = Templates::from_dir(temp_dir.path()).unwrap();

        let result = templates.render(Template::View, &page("Alpha", "x"));

        assert!(matches!(result, Err(RenderError::Template(_))));
    }
}
