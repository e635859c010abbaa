//! Initialize a site skeleton in the current directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing lath site...");

    let templates_dir = Path::new("templates");

    if templates_dir.exists() && !yes {
        tracing::warn!("templates/ directory already exists. Use --yes to overwrite.");
        return Ok(());
    }

    fs::create_dir_all(templates_dir.join("shared/components"))
        .context("Failed to create components directory")?;
    fs::create_dir_all(templates_dir.join("shared/layouts"))
        .context("Failed to create layouts directory")?;

    let files = [
        ("site.toml", DEFAULT_CONFIG),
        ("templates/index.hbs", DEFAULT_INDEX),
        ("templates/shared/layouts/master.hbs", DEFAULT_MASTER),
        ("templates/shared/components/header.hbs", DEFAULT_HEADER),
        ("templates/shared/components/menu.hbs", DEFAULT_MENU),
        ("templates/shared/components/footer.hbs", DEFAULT_FOOTER),
    ];

    for (path, content) in files {
        let path = Path::new(path);
        if !path.exists() || yes {
            fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Created {}", path.display());
        }
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'lath build' to generate HTML, or 'lath watch' to rebuild on change.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Lath configuration

[templates]
# Page templates live directly in this directory
dir = "templates"

# Partials, resolved recursively by file name
components = "shared/components"

# Layouts, flat, resolved by name
layouts = "shared/layouts"

# Layout used when a page names none
default_layout = "master"

[build]
# Where page HTML is written
output = "."

# Production staging directory
dist = "dist"

[assets]
# Static folders copied into dist, subdirectory names to skip, and
# source-to-built reference rewrites applied to HTML while staging.
folders = []
exclude = []
rewrites = []

[data.layout]
siteName = "My Website"

[data.menu]
menuItems = [
    { label = "Home", url = "/", active = true },
]

[data.footer]
author = "Your Name"
"#;

const DEFAULT_INDEX: &str = r#"---
title: Home
pageCssClass: home
---
<h1>Welcome to {{siteName}}</h1>
<p>This page was generated {{buildTime}}.</p>
"#;

const DEFAULT_MASTER: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{pageTitle}} - {{siteName}}</title>
</head>
<body class="{{pageCssClass}}">
  {{> header}}
  {{> menu}}
  <main>
    {{{body}}}
  </main>
  {{> footer}}
</body>
</html>
"#;

const DEFAULT_HEADER: &str = r#"<header>
  <p class="site-name">{{uppercase siteName}}</p>
</header>
"#;

const DEFAULT_MENU: &str = r#"<nav>
  <ul>
    {{#each menuItems}}
    <li{{#if active}} class="active"{{/if}}><a href="{{url}}">{{label}}</a></li>
    {{/each}}
  </ul>
</nav>
"#;

const DEFAULT_FOOTER: &str = r#"<footer>
  <p>&copy; {{year}} {{author}}</p>
</footer>
"#;
