//! HTML template rendering for notification bodies
//!
//! Templates are plain HTML files with `${key}` placeholders. A missing
//! directory, file or context key is a local failure the caller may log
//! and swallow when the notification is advisory.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::{Error, Result};

/// Directory-backed template engine
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    templates_dir: PathBuf,
}

impl TemplateEngine {
    /// Create an engine rooted at `templates_dir`
    pub fn new(templates_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = templates_dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::Template(format!(
                "Templates directory not found: {}",
                dir.display()
            )));
        }
        Ok(Self {
            templates_dir: dir.to_path_buf(),
        })
    }

    /// Render a template, substituting every `${key}` with its context value
    ///
    /// Every placeholder in the template must resolve: a half-rendered
    /// notification must not go out. Context values are inserted verbatim,
    /// so a value that happens to contain `${` is not re-expanded.
    pub fn render(&self, template_name: &str, context: &[(&str, &str)]) -> Result<String> {
        let path = self.templates_dir.join(template_name);
        let raw = std::fs::read_to_string(&path).map_err(|e| {
            Error::Template(format!("Failed to read template {}: {}", path.display(), e))
        })?;

        static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
        let placeholder = PLACEHOLDER.get_or_init(|| {
            Regex::new(r"\$\{(\w+)\}").expect("Failed to compile placeholder regex")
        });

        let mut missing = None;
        let rendered = placeholder.replace_all(&raw, |caps: &regex::Captures| {
            let key = &caps[1];
            match context.iter().find(|(name, _)| *name == key) {
                Some((_, value)) => (*value).to_string(),
                None => {
                    missing.get_or_insert_with(|| key.to_string());
                    String::new()
                }
            }
        });

        if let Some(key) = missing {
            return Err(Error::Template(format!(
                "Unresolved placeholder ${{{}}} in template {}",
                key, template_name
            )));
        }

        Ok(rendered.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(template: &str) -> (tempfile::TempDir, TemplateEngine) {
        let dir = tempfile::tempdir().expect("temp dir failed");
        std::fs::write(dir.path().join("note.html"), template).expect("write failed");
        let engine = TemplateEngine::new(dir.path()).expect("engine failed");
        (dir, engine)
    }

    #[test]
    fn renders_placeholders() {
        let (_guard, engine) = engine_with("<p>Hello ${name}, codes: ${codes}</p>");
        let body = engine
            .render("note.html", &[("name", "Ana"), ("codes", "ABC234")])
            .expect("render failed");
        assert_eq!(body, "<p>Hello Ana, codes: ABC234</p>");
    }

    #[test]
    fn placeholder_like_values_pass_through() {
        let (_dir, engine) = engine_with("<p>${body}</p>");
        let rendered = engine
            .render("note.html", &[("body", "literal ${not_a_key}")])
            .expect("render failed");
        assert_eq!(rendered, "<p>literal ${not_a_key}</p>");
    }

    #[test]
    fn missing_context_key_is_an_error() {
        let (_guard, engine) = engine_with("<p>Hello ${name}</p>");
        assert!(matches!(
            engine.render("note.html", &[]),
            Err(Error::Template(_))
        ));
    }

    #[test]
    fn missing_template_is_an_error() {
        let (_guard, engine) = engine_with("<p>irrelevant</p>");
        assert!(matches!(
            engine.render("other.html", &[]),
            Err(Error::Template(_))
        ));
    }

    #[test]
    fn missing_directory_is_an_error() {
        assert!(matches!(
            TemplateEngine::new("/definitely/not/a/dir"),
            Err(Error::Template(_))
        ));
    }
}
