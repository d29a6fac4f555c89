use std::fs;

use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use toml_edit::{DocumentMut, value};

use crate::templates;

pub const PROJECT_CONFIG_FILENAME: &str = ".ci4gen.toml";

/// Keys accepted by `ci4gen config set`.
pub const KNOWN_KEYS: [&str; 6] = [
    "route_file",
    "file_extension",
    "views_folder",
    "view_template",
    "author_name",
    "enable_view_navigation",
];

/// Recognized options, mirroring the settings of the original tooling.
/// Every field is optional; accessors apply the conventional defaults.
#[derive(Debug, Default, Deserialize)]
pub struct Ci4Config {
    pub route_file: Option<String>,
    pub file_extension: Option<String>,
    pub views_folder: Option<String>,
    pub view_template: Option<String>,
    pub author_name: Option<String>,
    pub enable_view_navigation: Option<bool>,
}

impl Ci4Config {
    pub fn route_file(&self) -> &str {
        self.route_file.as_deref().unwrap_or("app/Config/Routes.php")
    }

    pub fn file_extension(&self) -> &str {
        self.file_extension.as_deref().unwrap_or(".php")
    }

    pub fn views_folder(&self) -> &str {
        self.views_folder.as_deref().unwrap_or("app/Views")
    }

    pub fn view_template(&self) -> &str {
        self.view_template.as_deref().unwrap_or("")
    }

    pub fn author_name(&self) -> &str {
        self.author_name.as_deref().unwrap_or("Unknown Author")
    }

    pub fn view_navigation_enabled(&self) -> bool {
        self.enable_view_navigation.unwrap_or(true)
    }
}

/// Load a configuration file from disk and deserialize it.
pub fn load_from_path(path: &Utf8Path) -> Result<Ci4Config> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading config {}", path))?;
    toml::from_str(&raw).with_context(|| format!("parsing config {}", path))
}

pub fn write_example_config(path: &Utf8Path, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        bail!("{} already exists; rerun with --force to overwrite", path);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating directory {}", parent))?;
    }

    let contents = templates::get_string("config/example.config.toml")?;
    fs::write(path, contents).with_context(|| format!("writing {}", path))
}

/// Patch one key in the config file in place, preserving formatting and
/// comments. Creates the file when missing.
pub fn set_key(path: &Utf8Path, key: &str, raw_value: &str) -> Result<()> {
    if !KNOWN_KEYS.contains(&key) {
        bail!(
            "unknown config key `{}` (expected one of: {})",
            key,
            KNOWN_KEYS.join(", ")
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating directory {}", parent))?;
    }

    let mut doc: DocumentMut = if path.exists() {
        let raw = fs::read_to_string(path).with_context(|| format!("reading config {}", path))?;
        raw.parse()
            .with_context(|| format!("parsing config {}", path))?
    } else {
        DocumentMut::new()
    };

    if key == "enable_view_navigation" {
        let flag: bool = raw_value
            .parse()
            .with_context(|| format!("`{}` expects true or false, got `{}`", key, raw_value))?;
        doc[key] = value(flag);
    } else {
        doc[key] = value(raw_value);
    }

    fs::write(path, doc.to_string()).with_context(|| format!("writing config {}", path))
}

pub fn format_summary(config: &Ci4Config) -> String {
    let mut out = String::new();
    out.push_str(&format!("route_file = {}\n", config.route_file()));
    out.push_str(&format!("file_extension = {}\n", config.file_extension()));
    out.push_str(&format!("views_folder = {}\n", config.views_folder()));
    out.push_str(&format!("view_template = {:?}\n", config.view_template()));
    out.push_str(&format!("author_name = {}\n", config.author_name()));
    out.push_str(&format!(
        "enable_view_navigation = {}\n",
        config.view_navigation_enabled()
    ));
    out
}

/// Where the active config file came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigPathSource {
    Explicit,
    Discovered,
    HomeDefault,
}

impl ConfigPathSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigPathSource::Explicit => "explicit",
            ConfigPathSource::Discovered => "discovered",
            ConfigPathSource::HomeDefault => "home-default",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedConfigPath {
    pub path: Utf8PathBuf,
    pub source: ConfigPathSource,
}

/// Resolve the config path: an explicit `--config` wins, then the nearest
/// `.ci4gen.toml` walking up from `start`, then the per-user default. The
/// resolved file may not exist yet; callers fall back to defaults then.
pub fn resolve_path(explicit: Option<&Utf8Path>, start: &Utf8Path) -> Result<ResolvedConfigPath> {
    if let Some(path) = explicit {
        return Ok(ResolvedConfigPath {
            path: path.to_owned(),
            source: ConfigPathSource::Explicit,
        });
    }

    let mut current: Option<&Utf8Path> = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join(PROJECT_CONFIG_FILENAME);
        if candidate.exists() {
            return Ok(ResolvedConfigPath {
                path: candidate,
                source: ConfigPathSource::Discovered,
            });
        }
        current = dir.parent();
    }

    let home = dirs::config_dir()
        .and_then(|dir| Utf8PathBuf::from_path_buf(dir).ok())
        .map(|dir| dir.join("ci4gen").join("config.toml"))
        .context("determining the user config directory")?;

    Ok(ResolvedConfigPath {
        path: home,
        source: ConfigPathSource::HomeDefault,
    })
}

/// Load the resolved config, treating a missing file as defaults.
pub fn load_or_default(resolved: &ResolvedConfigPath) -> Result<Ci4Config> {
    if resolved.path.exists() {
        load_from_path(&resolved.path)
    } else if resolved.source == ConfigPathSource::Explicit {
        bail!("config file not found: {}", resolved.path)
    } else {
        Ok(Ci4Config::default())
    }
}
