use std::fs;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;

use crate::config::Ci4Config;

static VIEW_CALL: OnceLock<Regex> = OnceLock::new();

fn view_call_pattern() -> &'static Regex {
    VIEW_CALL.get_or_init(|| {
        Regex::new(r#"view\s*\(\s*['"`]([^'"`]+)['"`]\s*[,)]"#).expect("view call pattern")
    })
}

/// Pull the view name out of a `view('...')` call in a PHP snippet. When
/// the snippet contains no call syntax, the trimmed snippet itself is
/// treated as the view name.
pub fn extract_view_name(reference: &str) -> Option<String> {
    if let Some(captures) = view_call_pattern().captures(reference) {
        return Some(captures[1].to_owned());
    }

    let trimmed = reference.trim();
    if trimmed.is_empty() || trimmed.contains('(') {
        return None;
    }
    Some(trimmed.to_owned())
}

/// The on-disk path a view name resolves to:
/// `<root>/<views_folder>/<name><extension>`.
pub fn view_file_path(root: &Utf8Path, config: &Ci4Config, name: &str) -> Utf8PathBuf {
    let relative = format!("{}{}", name, config.file_extension());
    root.join(config.views_folder()).join(relative)
}

/// Header written at the top of every generated view file.
pub fn view_header(config: &Ci4Config) -> String {
    let created = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    format!(
        "<!--\nAuthor: {}\nCreated: {}\n-->\n\n",
        config.author_name(),
        created
    )
}

/// Full contents for a fresh view file: header plus the configured
/// template body.
pub fn view_contents(config: &Ci4Config) -> String {
    format!("{}{}\n", view_header(config), config.view_template())
}

/// Create the view file (and any missing folders) when absent. Returns
/// whether the file was created.
pub fn ensure_view_file(path: &Utf8Path, config: &Ci4Config) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating directory {}", parent))?;
    }
    fs::write(path, view_contents(config)).with_context(|| format!("writing {}", path))?;
    Ok(true)
}
