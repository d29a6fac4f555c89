use anyhow::{Result, bail};

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// A scaffold name split into its folder parts and the trailing name,
/// e.g. `admin/user` -> folders `["admin"]`, name `user`.
#[derive(Debug, Eq, PartialEq)]
pub struct NameParts {
    pub folders: Vec<String>,
    pub name: String,
}

pub fn split_input(raw: &str) -> Result<NameParts> {
    let raw = raw.trim().trim_matches('/');
    if raw.is_empty() {
        bail!("a name is required");
    }

    let mut parts: Vec<String> = raw.split('/').map(str::to_owned).collect();
    if parts.iter().any(String::is_empty) {
        bail!("name `{raw}` contains an empty path part");
    }

    let name = parts.pop().unwrap_or_default();
    Ok(NameParts {
        folders: parts,
        name,
    })
}

impl NameParts {
    /// Folder parts with each segment capitalized, the convention for
    /// controller and model subdirectories.
    pub fn capitalized_folders(&self) -> Vec<String> {
        self.folders.iter().map(|part| capitalize(part)).collect()
    }

    /// `App\<Parts>\<suffix>` with capitalized parts, e.g.
    /// `App\Admin\Controllers`.
    pub fn namespace_with_suffix(&self, suffix: &str) -> String {
        if self.folders.is_empty() {
            format!("App\\{suffix}")
        } else {
            format!("App\\{}\\{suffix}", self.capitalized_folders().join("\\"))
        }
    }
}
