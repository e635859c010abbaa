//! Staging built HTML and static folders into the dist directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
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
}

/// What a staging pass copied.
#[derive(Debug, Default)]
pub struct StageReport {
    pub html_files: usize,
    pub folders_copied: usize,
}

/// Copy built HTML plus the configured static folders into the dist
/// directory under `root`, rewriting source asset references to their
/// built counterparts on the way through.
///
/// Each rewrite replaces the first occurrence per file, and a configured
/// folder that does not exist is a warning rather than a failure.
pub fn stage(config: &SiteConfig, root: &Path) -> Result<StageReport, AssetError> {
    let output_dir = root.join(&config.build.output);
    let dist_dir = root.join(&config.build.dist);
    fs::create_dir_all(&dist_dir).map_err(|source| AssetError::Write {
        path: dist_dir.clone(),
        source,
    })?;

    let mut report = StageReport::default();

    let entries = fs::read_dir(&output_dir).map_err(|source| AssetError::Read {
        path: output_dir.clone(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| AssetError::Read {
            path: output_dir.clone(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("html") {
            continue;
        }

        let mut content = fs::read_to_string(&path).map_err(|source| AssetError::Read {
            path: path.clone(),
            source,
        })?;
        for rewrite in &config.assets.rewrites {
            content = content.replacen(&rewrite.from, &rewrite.to, 1);
        }

        let dest = dist_dir.join(entry.file_name());
        fs::write(&dest, content).map_err(|source| AssetError::Write {
            path: dest.clone(),
            source,
        })?;
        tracing::info!("staged {}", entry.file_name().to_string_lossy());
        report.html_files += 1;
    }

    if report.html_files == 0 {
        tracing::warn!("no HTML files found in {}", output_dir.display());
    }

    for folder in &config.assets.folders {
        let src = root.join(folder);
        if !src.exists() {
            tracing::warn!("static folder not found: {}", folder);
            continue;
        }
        copy_dir_recursive(&src, &dist_dir.join(folder), &config.assets.exclude)?;
        tracing::info!("copied static folder: {}", folder);
        report.folders_copied += 1;
    }

    Ok(report)
}

fn copy_dir_recursive(src: &Path, dest: &Path, exclude: &[String]) -> Result<(), AssetError> {
    fs::create_dir_all(dest).map_err(|source| AssetError::Write {
        path: dest.to_path_buf(),
        source,
    })?;

    let entries = fs::read_dir(src).map_err(|source| AssetError::Read {
        path: src.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| AssetError::Read {
            path: src.to_path_buf(),
            source,
        })?;
        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());

        if src_path.is_dir() {
            if exclude
                .iter()
                .any(|name| entry.file_name().to_str() == Some(name.as_str()))
            {
                continue;
            }
            copy_dir_recursive(&src_path, &dest_path, exclude)?;
        } else {
            fs::copy(&src_path, &dest_path).map_err(|source| AssetError::Write {
                path: dest_path.clone(),
                source,
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn config_from(toml_src: &str) -> SiteConfig {
        toml::from_str(toml_src).unwrap()
    }

    #[test]
    fn stages_html_with_rewrites() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("out")).unwrap();
        fs::write(
            temp.path().join("out/index.html"),
            "<link href=\"/m/_scss/site.min.scss\">",
        )
        .unwrap();

        let config = config_from(
            r#"
[build]
output = "out"

[assets]
rewrites = [{ from = "/m/_scss/site.min.scss", to = "/m/css/site.min.css" }]
"#,
        );

        let report = stage(&config, temp.path()).unwrap();

        assert_eq!(report.html_files, 1);
        let staged = fs::read_to_string(temp.path().join("dist/index.html")).unwrap();
        assert_eq!(staged, "<link href=\"/m/css/site.min.css\">");
    }

    #[test]
    fn copies_folders_and_skips_excluded_subdirectories() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("out")).unwrap();
        fs::create_dir_all(temp.path().join("m/i/_svg")).unwrap();
        fs::write(temp.path().join("m/i/logo.png"), b"png").unwrap();
        fs::write(temp.path().join("m/i/_svg/raw.svg"), b"svg").unwrap();

        let config = config_from(
            r#"
[build]
output = "out"

[assets]
folders = ["m/i"]
exclude = ["_svg"]
"#,
        );

        let report = stage(&config, temp.path()).unwrap();

        assert_eq!(report.folders_copied, 1);
        assert!(temp.path().join("dist/m/i/logo.png").exists());
        assert!(!temp.path().join("dist/m/i/_svg").exists());
    }

    #[test]
    fn missing_folder_is_tolerated() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("out")).unwrap();

        let config = config_from("[build]\noutput = \"out\"\n[assets]\nfolders = [\"nope\"]");

        let report = stage(&config, temp.path()).unwrap();

        assert_eq!(report.folders_copied, 0);
    }
}
