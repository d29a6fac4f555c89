use anyhow::{Result, bail};
use camino::Utf8Path;

use crate::config::Ci4Config;
use crate::scaffold::write_new_file;
use crate::views;

/// Create a view file under the configured views folder, with the
/// author/timestamp header followed by the configured template body.
pub fn create(root: &Utf8Path, config: &Ci4Config, raw_name: &str, dry_run: bool) -> Result<()> {
    let name = raw_name.trim().replace('\\', "/");
    let name = name.trim_matches('/');
    if name.is_empty() {
        bail!("a view name is required");
    }

    let path = views::view_file_path(root, config, name);
    write_new_file(&path, &views::view_contents(config), dry_run)?;
    println!("View `{}{}` created", name, config.file_extension());
    Ok(())
}
