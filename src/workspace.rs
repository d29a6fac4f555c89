use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};

pub fn current_working_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().context("determining current directory")?;
    Utf8PathBuf::from_path_buf(cwd).map_err(|_| anyhow!("current directory is not valid UTF-8"))
}

/// Locate the CodeIgniter project root by walking up from `start` looking
/// for the `spark` launcher or an `app/Config` directory. Falls back to
/// `start` itself so scaffolding into a fresh directory still works.
pub fn find_project_root(start: &Utf8Path) -> Utf8PathBuf {
    let mut current: Option<&Utf8Path> = Some(start);
    while let Some(dir) = current {
        if dir.join("spark").is_file() || dir.join("app").join("Config").is_dir() {
            return dir.to_owned();
        }
        current = dir.parent();
    }

    start.to_owned()
}
