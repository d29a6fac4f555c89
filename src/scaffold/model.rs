use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};

use crate::naming;
use crate::scaffold::write_new_file;
use crate::templates;

/// Create a model class under `app/Models`.
///
/// `test/user` becomes `app/Models/Test/UserModel.php` with table `users`.
pub fn create(root: &Utf8Path, raw_name: &str, dry_run: bool) -> Result<()> {
    let parts = naming::split_input(raw_name)?;
    let class = format!("{}Model", naming::capitalize(&parts.name));
    let namespace = parts.namespace_with_suffix("Models");
    let table = format!("{}s", parts.name.to_lowercase());

    let contents = templates::render_template(
        "model.php",
        &[
            ("namespace", namespace.as_str()),
            ("class", class.as_str()),
            ("table", table.as_str()),
        ],
    )?;

    let path = file_path(root, &parts, &class);
    write_new_file(&path, &contents, dry_run)?;
    println!("Model `{}` created (table `{}`)", class, table);
    Ok(())
}

fn file_path(root: &Utf8Path, parts: &naming::NameParts, class: &str) -> Utf8PathBuf {
    let mut path = root.join("app").join("Models");
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
    fn model_names_take_the_model_suffix_and_plural_table() {
        let root = unique_temp_dir();
        fs::create_dir_all(root.as_std_path()).unwrap();

        create(&root, "test/user", false).unwrap();

        let contents =
            fs::read_to_string(root.join("app/Models/Test/UserModel.php").as_std_path()).unwrap();
        assert!(contents.contains("namespace App\\Test\\Models;"));
        assert!(contents.contains("class UserModel extends Model"));
        assert!(contents.contains("protected $table = 'users';"));

        let _ = fs::remove_dir_all(root.as_std_path());
    }
}
