use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};

use crate::naming;
use crate::scaffold::write_new_file;
use crate::templates;

/// Create a service class under `app/Services`.
///
/// Unlike controllers and models, subfolder parts are used exactly as
/// given and the namespace nests under `App\Services`, so `Admin/Post`
/// becomes `app/Services/Admin/PostService.php` in `App\Services\Admin`.
pub fn create(root: &Utf8Path, raw_name: &str, dry_run: bool) -> Result<()> {
    let parts = naming::split_input(raw_name)?;
    let class = format!("{}Service", naming::capitalize(&parts.name));
    let namespace = if parts.folders.is_empty() {
        "App\\Services".to_owned()
    } else {
        format!("App\\Services\\{}", parts.folders.join("\\"))
    };

    let contents = templates::render_template(
        "service.php",
        &[("namespace", namespace.as_str()), ("class", class.as_str())],
    )?;

    let path = file_path(root, &parts, &class);
    write_new_file(&path, &contents, dry_run)?;
    println!("Service `{}` created", class);
    Ok(())
}

fn file_path(root: &Utf8Path, parts: &naming::NameParts, class: &str) -> Utf8PathBuf {
    let mut path = root.join("app").join("Services");
    for folder in &parts.folders {
        path.push(folder);
    }
    path.push(format!("{class}.php"));
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir() -> Utf8PathBuf {
        let mut dir = std::env::temp_dir();
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        dir.push(format!("ci4gen-test-{ts}"));
        Utf8PathBuf::from_path_buf(dir).unwrap()
    }

    #[test]
    fn service_folders_are_kept_verbatim() {
        let root = unique_temp_dir();
        fs::create_dir_all(root.as_std_path()).unwrap();

        create(&root, "Admin/post", false).unwrap();

        let contents =
            fs::read_to_string(root.join("app/Services/Admin/PostService.php").as_std_path())
                .unwrap();
        assert!(contents.contains("namespace App\\Services\\Admin;"));
        assert!(contents.contains("class PostService extends BaseService"));

        let _ = fs::remove_dir_all(root.as_std_path());
    }
}
