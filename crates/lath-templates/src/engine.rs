//! Handlebars engine: partial registry, helpers, one-shot rendering.

use std::fs;
use std::path::Path;

use handlebars::{
    handlebars_helper, Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
};
use walkdir::WalkDir;

/// File extension identifying template sources.
pub const TEMPLATE_EXT: &str = "hbs";

handlebars_helper!(uppercase: |value: str| value.to_uppercase());
handlebars_helper!(lowercase: |value: str| value.to_lowercase());

/// `{{year}}` — the year captured when the engine was created, so a build
/// renders the same value everywhere and tests can pin it.
struct YearHelper(i32);

impl HelperDef for YearHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        _: &Helper,
        _: &Handlebars,
        _: &Context,
        _: &mut RenderContext,
        out: &mut dyn Output,
    ) -> HelperResult {
        out.write(&self.0.to_string())?;
        Ok(())
    }
}

/// Errors surfaced while rendering a template.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Render failure: template syntax error or a reference to an
    /// unregistered partial.
    #[error("render failed: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// A Handlebars registry holding the site's partials and helpers.
///
/// One engine is built per run and discarded afterwards; repeated builds
/// (watch mode) start from a fresh instance rather than mutating a
/// process-wide registry.
pub struct TemplateEngine {
    registry: Handlebars<'static>,
}

impl TemplateEngine {
    pub fn new(build_year: i32) -> Self {
        let mut registry = Handlebars::new();
        registry.register_helper("uppercase", Box::new(uppercase));
        registry.register_helper("lowercase", Box::new(lowercase));
        registry.register_helper("year", Box::new(YearHelper(build_year)));
        Self { registry }
    }

    /// Recursively register every `*.hbs` file under `dir` as a partial
    /// named after its file stem. A name collision overwrites the earlier
    /// entry: last visited wins, in sorted traversal order. A missing
    /// directory registers nothing. Unreadable or syntactically invalid
    /// fragments are skipped with a warning; they only matter once a page
    /// actually references them.
    ///
    /// Returns the number of registrations performed.
    pub fn register_partials(&mut self, dir: &Path) -> usize {
        if !dir.exists() {
            tracing::debug!("no partials directory at {}", dir.display());
            return 0;
        }

        let mut count = 0;
        for entry in WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXT) {
                continue;
            }

            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let text = match fs::read_to_string(path) {
                Ok(text) => text,
                Err(err) => {
                    tracing::warn!("skipping unreadable partial {}: {}", path.display(), err);
                    continue;
                }
            };

            match self.registry.register_partial(name, &text) {
                Ok(()) => {
                    tracing::debug!("registered partial: {}", name);
                    count += 1;
                }
                Err(err) => {
                    tracing::warn!("skipping invalid partial {}: {}", path.display(), err);
                }
            }
        }

        count
    }

    /// Render `template` against `data` in one shot.
    ///
    /// Each call compiles the source afresh; page and layout sources are
    /// small enough that caching compiled templates across pages is not
    /// worth carrying state for.
    pub fn render(
        &self,
        template: &str,
        data: &serde_json::Value,
    ) -> Result<String, EngineError> {
        Ok(self.registry.render_template(template, data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn registers_partials_recursively() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("header.hbs"), "<header>{{site}}</header>").unwrap();
        fs::create_dir(temp.path().join("nav")).unwrap();
        fs::write(temp.path().join("nav").join("menu.hbs"), "<nav/>").unwrap();

        let mut engine = TemplateEngine::new(2024);
        let count = engine.register_partials(temp.path());

        assert_eq!(count, 2);
        let html = engine
            .render("{{> header}}{{> menu}}", &json!({"site": "Lath"}))
            .unwrap();
        assert_eq!(html, "<header>Lath</header><nav/>");
    }

    #[test]
    fn name_collision_keeps_last_visited() {
        let temp = tempdir().unwrap();
        for (dir, text) in [("a", "first"), ("b", "second")] {
            fs::create_dir(temp.path().join(dir)).unwrap();
            fs::write(temp.path().join(dir).join("widget.hbs"), text).unwrap();
        }

        let mut engine = TemplateEngine::new(2024);
        let count = engine.register_partials(temp.path());

        // Both files register, but only one entry survives.
        assert_eq!(count, 2);
        let html = engine.render("{{> widget}}", &json!({})).unwrap();
        assert_eq!(html, "second");
    }

    #[test]
    fn missing_directory_registers_nothing() {
        let temp = tempdir().unwrap();

        let mut engine = TemplateEngine::new(2024);
        let count = engine.register_partials(&temp.path().join("nope"));

        assert_eq!(count, 0);
    }

    #[test]
    fn ignores_other_extensions() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("notes.txt"), "not a template").unwrap();
        fs::write(temp.path().join("real.hbs"), "ok").unwrap();

        let mut engine = TemplateEngine::new(2024);

        assert_eq!(engine.register_partials(temp.path()), 1);
    }

    #[test]
    fn unregistered_partial_is_a_render_error() {
        let engine = TemplateEngine::new(2024);

        let result = engine.render("{{> ghost}}", &json!({}));

        assert!(result.is_err());
    }

    #[test]
    fn case_helpers() {
        let engine = TemplateEngine::new(2024);

        let html = engine
            .render("{{uppercase a}}/{{lowercase b}}", &json!({"a": "abc", "b": "DEF"}))
            .unwrap();

        assert_eq!(html, "ABC/def");
    }

    #[test]
    fn year_helper_uses_the_captured_year() {
        let engine = TemplateEngine::new(1999);

        assert_eq!(engine.render("{{year}}", &json!({})).unwrap(), "1999");
    }

    #[test]
    fn triple_stache_emits_raw_html() {
        let engine = TemplateEngine::new(2024);
        let data = json!({"body": "<b>hi</b>"});

        assert_eq!(engine.render("{{{body}}}", &data).unwrap(), "<b>hi</b>");
        assert_eq!(
            engine.render("{{body}}", &data).unwrap(),
            "&lt;b&gt;hi&lt;/b&gt;"
        );
    }
}
