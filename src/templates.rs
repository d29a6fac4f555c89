use anyhow::{Context, Result, anyhow};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "templates"]
struct Templates;

pub fn get_string(path: &str) -> Result<String> {
    let file = Templates::get(path).ok_or_else(|| anyhow!("embedded template `{}` missing", path))?;
    std::str::from_utf8(file.data.as_ref())
        .with_context(|| format!("decoding embedded template `{}`", path))
        .map(|value| value.to_owned())
}

/// Substitute `{{key}}` placeholders. Plain string replacement, nothing
/// more; the templates are fixed and ship with the binary.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_owned();
    for (key, value) in vars {
        out = out.replace(&format!("{{{{{key}}}}}"), value);
    }
    out
}

pub fn render_template(path: &str, vars: &[(&str, &str)]) -> Result<String> {
    Ok(render(&get_string(path)?, vars))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_replaces_every_occurrence() {
        let out = render("class {{class}} { /* {{class}} */ }", &[("class", "User")]);
        assert_eq!(out, "class User { /* User */ }");
    }

    #[test]
    fn embedded_templates_are_present() {
        for name in [
            "controller.php",
            "controller_resource.php",
            "model.php",
            "service.php",
            "config/example.config.toml",
        ] {
            assert!(get_string(name).is_ok(), "missing template {name}");
        }
    }
}
