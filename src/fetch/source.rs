use anyhow::Result;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Where one sheet's CSV bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSource {
    File(PathBuf),
    Url(String),
}

impl SheetSource {
    /// Sheet name used for year and stream inference: the file stem, or the
    /// last URL path segment without extension.
    pub fn sheet_name(&self) -> String {
        match self {
            Self::File(path) => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
            Self::Url(url) => {
                let path = url.split(['?', '#']).next().unwrap_or(url);
                let segment = path.trim_end_matches('/').rsplit('/').next().unwrap_or(path);
                segment
                    .rsplit_once('.')
                    .map_or(segment, |(stem, _)| stem)
                    .to_string()
            }
        }
    }
}

impl fmt::Display for SheetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

/// Expands command-line inputs into sheet sources.
///
/// A directory contributes every `*.csv` inside it, sorted by file name.
/// Local paths that do not exist are skipped with a warning, so an empty
/// result means no source data is available.
pub fn discover_sources(inputs: &[String]) -> Result<Vec<SheetSource>> {
    let mut sources = Vec::new();

    for input in inputs {
        if is_url(input) {
            sources.push(SheetSource::Url(input.clone()));
            continue;
        }

        let path = Path::new(input);
        if path.is_dir() {
            let mut files = Vec::new();
            for entry in fs::read_dir(path)? {
                let entry_path = entry?.path();
                if entry_path.is_file() && is_csv(&entry_path) {
                    files.push(entry_path);
                }
            }
            files.sort();
            sources.extend(files.into_iter().map(SheetSource::File));
        } else if path.is_file() {
            sources.push(SheetSource::File(path.to_path_buf()));
        } else {
            warn!(input = %input, "Input not found, skipping");
        }
    }

    Ok(sources)
}
