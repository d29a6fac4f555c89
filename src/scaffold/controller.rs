use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};

use crate::naming;
use crate::scaffold::write_new_file;
use crate::templates;

/// Create a controller class under `app/Controllers`.
///
/// `admin/user` becomes `app/Controllers/Admin/User.php` in namespace
/// `App\Admin\Controllers`; the default `index()` renders a view named
/// after the lowercased input.
pub fn create(root: &Utf8Path, raw_name: &str, resource: bool, dry_run: bool) -> Result<()> {
    let parts = naming::split_input(raw_name)?;
    let class = naming::capitalize(&parts.name);
    let namespace = parts.namespace_with_suffix("Controllers");
    let view = raw_name.trim().trim_matches('/').to_lowercase();

    let template = if resource {
        "controller_resource.php"
    } else {
        "controller.php"
    };
    let contents = templates::render_template(
        template,
        &[
            ("namespace", namespace.as_str()),
            ("class", class.as_str()),
            ("view", view.as_str()),
        ],
    )?;

    let path = file_path(root, &parts, &class);
    write_new_file(&path, &contents, dry_run)?;
    println!(
        "Controller `{}` created{}",
        class,
        if resource { " (resource)" } else { "" }
    );
    Ok(())
}

fn file_path(root: &Utf8Path, parts: &naming::NameParts, class: &str) -> Utf8PathBuf {
    let mut path = root.join("app").join("Controllers");
    for folder in parts.capitalized_folders() {
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
    fn nested_controller_gets_namespace_and_folder() {
        let root = unique_temp_dir();
        fs::create_dir_all(root.as_std_path()).unwrap();

        create(&root, "admin/user", false, false).unwrap();

        let written = root.join("app/Controllers/Admin/User.php");
        let contents = fs::read_to_string(written.as_std_path()).unwrap();
        assert!(contents.contains("namespace App\\Admin\\Controllers;"));
        assert!(contents.contains("class User extends BaseController"));
        assert!(contents.contains("return view('admin/user');"));

        let _ = fs::remove_dir_all(root.as_std_path());
    }

    #[test]
    fn resource_controller_carries_the_crud_set() {
        let root = unique_temp_dir();
        fs::create_dir_all(root.as_std_path()).unwrap();

        create(&root, "post", true, false).unwrap();

        let contents =
            fs::read_to_string(root.join("app/Controllers/Post.php").as_std_path()).unwrap();
        for method in ["index", "create", "store", "show", "edit", "update", "destroy"] {
            assert!(
                contents.contains(&format!("public function {method}(")),
                "missing {method}"
            );
        }
        assert!(contents.contains("return view('post/index');"));

        let _ = fs::remove_dir_all(root.as_std_path());
    }
}
