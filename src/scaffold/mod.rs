pub mod controller;
pub mod model;
pub mod service;
pub mod view;

use std::fs;

use anyhow::{Context, Result, bail};
use camino::Utf8Path;

/// Write a freshly scaffolded file, creating parent folders as needed.
/// Refuses to overwrite: scaffolds never clobber hand-edited code.
pub fn write_new_file(path: &Utf8Path, contents: &str, dry_run: bool) -> Result<()> {
    if path.exists() {
        bail!("{} already exists", path);
    }

    if dry_run {
        println!("  (dry-run) would create {}", path);
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).with_context(|| format!("creating directory {}", parent))?;
            println!("  created folder {}", parent);
        }
    }

    fs::write(path, contents).with_context(|| format!("writing {}", path))?;
    println!("  created {}", path);
    Ok(())
}
