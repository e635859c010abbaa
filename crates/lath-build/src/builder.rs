//! Page discovery and composition.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde_json::Value;

use lath_templates::{extract, EngineError, FrontMatter, TemplateEngine, TEMPLATE_EXT};

use crate::config::SiteConfig;
use crate::data::GlobalData;

/// Title injected when a page supplies neither `pageTitle` nor `title`.
const DEFAULT_PAGE_TITLE: &str = "Page";

/// Resolved paths and names for one build run.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory whose top-level `.hbs` files are pages.
    pub templates_dir: PathBuf,

    /// Partials root, scanned recursively.
    pub components_dir: PathBuf,

    /// Layouts directory, flat, resolved by name.
    pub layouts_dir: PathBuf,

    /// Where page HTML is written.
    pub output_dir: PathBuf,

    /// Layout used when a page names none.
    pub default_layout: String,
}

impl BuildConfig {
    /// Resolve the configured directory names against `root`.
    pub fn from_site(config: &SiteConfig, root: &Path) -> Self {
        let templates_dir = root.join(&config.templates.dir);
        Self {
            components_dir: templates_dir.join(&config.templates.components),
            layouts_dir: templates_dir.join(&config.templates.layouts),
            templates_dir,
            output_dir: root.join(&config.build.output),
            default_layout: config.templates.default_layout.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Template(#[from] EngineError),
}

/// What one successfully built page resolved to.
#[derive(Debug)]
pub struct BuiltPage {
    /// The layout the page asked for (or the default).
    pub layout: String,

    /// Whether that layout existed and wrapped the body. When false the
    /// body rendered in a single unwrapped pass.
    pub wrapped: bool,

    /// Where the HTML was written.
    pub output: PathBuf,
}

/// Per-page result, collected rather than logged-and-lost so callers can
/// inspect outcomes without parsing console text.
#[derive(Debug)]
pub struct PageOutcome {
    /// Page name: the source file stem.
    pub page: String,

    pub result: Result<BuiltPage, BuildError>,
}

/// Aggregated result of one build run.
#[derive(Debug)]
pub struct BuildReport {
    pub outcomes: Vec<PageOutcome>,

    /// Partial registrations performed before the first page rendered.
    pub partials: usize,

    pub duration_ms: u64,

    pub output_dir: PathBuf,
}

impl BuildReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Builds every page in the templates directory.
///
/// Owns its engine and data for exactly one run; watch mode constructs a
/// fresh builder per rebuild instead of invalidating anything.
pub struct SiteBuilder {
    config: BuildConfig,
    data: GlobalData,
    engine: TemplateEngine,
}

impl SiteBuilder {
    pub fn new(config: BuildConfig, data: GlobalData, engine: TemplateEngine) -> Self {
        Self {
            config,
            data,
            engine,
        }
    }

    /// Run the full build: register partials, then compose each page.
    ///
    /// A page that fails to render is recorded and logged, never fatal;
    /// only environmental problems (unreadable templates directory,
    /// uncreatable output directory) abort the run.
    pub fn build(&mut self) -> Result<BuildReport, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir).map_err(|source| BuildError::Write {
            path: self.config.output_dir.clone(),
            source,
        })?;

        // Pages may reference any partial, so the registry must be
        // complete before the first composition.
        let partials = self.engine.register_partials(&self.config.components_dir);
        tracing::info!("registered {} partial(s)", partials);

        let pages = self.discover_pages()?;
        if pages.is_empty() {
            tracing::warn!(
                "no .{} templates found in {}",
                TEMPLATE_EXT,
                self.config.templates_dir.display()
            );
        }

        let mut outcomes = Vec::with_capacity(pages.len());
        for path in &pages {
            let outcome = self.build_page(path);
            match &outcome.result {
                Ok(built) => tracing::info!(
                    "generated {}.html (layout: {})",
                    outcome.page,
                    built.layout
                ),
                Err(err) => tracing::error!("failed to build {}: {}", outcome.page, err),
            }
            outcomes.push(outcome);
        }

        Ok(BuildReport {
            outcomes,
            partials,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Top-level `.hbs` files directly inside the templates directory.
    /// Subdirectories (shared components, layouts) are never pages.
    fn discover_pages(&self) -> Result<Vec<PathBuf>, BuildError> {
        let dir = &self.config.templates_dir;
        let entries = fs::read_dir(dir).map_err(|source| BuildError::Read {
            path: dir.clone(),
            source,
        })?;

        let mut pages = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| BuildError::Read {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(TEMPLATE_EXT)
            {
                pages.push(path);
            }
        }

        pages.sort();
        Ok(pages)
    }

    fn build_page(&self, source_path: &Path) -> PageOutcome {
        let page = source_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let result = self.compose(source_path, &page);
        PageOutcome { page, result }
    }

    /// Two-pass composition: the page body renders first, then collapses
    /// into the layout as already-resolved text under the `body` key. A
    /// missing layout degrades to the body render alone.
    fn compose(&self, source_path: &Path, page: &str) -> Result<BuiltPage, BuildError> {
        let source = fs::read_to_string(source_path).map_err(|source| BuildError::Read {
            path: source_path.to_path_buf(),
            source,
        })?;
        let (meta, body) = extract(&source);

        let layout = meta
            .get("layout")
            .cloned()
            .unwrap_or_else(|| self.config.default_layout.clone());
        let layout_path = self
            .config
            .layouts_dir
            .join(format!("{layout}.{TEMPLATE_EXT}"));
        let wrapped = layout_path.is_file();

        let html = if wrapped {
            let rendered_body = self
                .engine
                .render(body, &self.render_context(&meta, None, page))?;
            let layout_source =
                fs::read_to_string(&layout_path).map_err(|source| BuildError::Read {
                    path: layout_path.clone(),
                    source,
                })?;
            self.engine.render(
                &layout_source,
                &self.render_context(&meta, Some(&rendered_body), page),
            )?
        } else {
            self.engine
                .render(body, &self.render_context(&meta, None, page))?
        };

        let output = self.config.output_dir.join(format!("{page}.html"));
        fs::write(&output, &html).map_err(|source| BuildError::Write {
            path: output.clone(),
            source,
        })?;

        Ok(BuiltPage {
            layout,
            wrapped,
            output,
        })
    }

    /// Merge precedence, low to high: global data, front matter, layout
    /// injections. The body arrives here already rendered; the layout pass
    /// treats it as plain data and never re-parses it.
    fn render_context(&self, meta: &FrontMatter, body: Option<&str>, page: &str) -> Value {
        let mut context = self.data.values().clone();

        for (key, value) in meta {
            context.insert(key.clone(), Value::from(value.clone()));
        }

        if let Some(body) = body {
            context.insert("body".to_string(), Value::from(body));

            let title = meta
                .get("pageTitle")
                .or_else(|| meta.get("title"))
                .map(String::as_str)
                .unwrap_or(DEFAULT_PAGE_TITLE);
            context.insert("pageTitle".to_string(), Value::from(title));

            let css_class = meta.get("pageCssClass").map(String::as_str).unwrap_or(page);
            context.insert("pageCssClass".to_string(), Value::from(css_class));
        }

        Value::Object(context)
    }
}
