use crate::routes::RouteSpec;
use crate::routes::parse;

/// What the merge did to the file text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MergeOutcome {
    /// The canonical line was spliced into an existing group block.
    InsertedIntoGroup,
    /// No matching group existed; a new block was appended.
    CreatedGroup,
    /// An ungrouped route was appended at the end of the file.
    AppendedRoute,
    /// The canonical line was already present; the text is unchanged.
    AlreadyPresent,
}

#[derive(Debug)]
pub struct Merged {
    pub text: String,
    pub outcome: MergeOutcome,
}

/// Insert `spec` into the declaration text exactly once.
///
/// Duplicate detection is an exact match on the canonical line, so a
/// hand-written equivalent with different whitespace or quoting is not
/// recognized and the file is left to the author to reconcile. Everything
/// outside the single splice point is preserved byte-for-byte.
pub fn merge(text: &str, spec: &RouteSpec) -> Merged {
    let line = spec.canonical_line();

    match &spec.group {
        Some(group) => {
            let statements = parse::parse(text);
            match parse::find_group(&statements, group) {
                Some(block) => {
                    if text[block.span.clone()].contains(&line) {
                        return Merged {
                            text: text.to_owned(),
                            outcome: MergeOutcome::AlreadyPresent,
                        };
                    }
                    Merged {
                        text: splice_before_closer(text, block.close_start, &line),
                        outcome: MergeOutcome::InsertedIntoGroup,
                    }
                }
                None => Merged {
                    text: format!(
                        "{text}\n$routes->group('{group}', function($routes) {{\n{line}\n}});\n"
                    ),
                    outcome: MergeOutcome::CreatedGroup,
                },
            }
        }
        None => {
            if text.contains(&line) {
                return Merged {
                    text: text.to_owned(),
                    outcome: MergeOutcome::AlreadyPresent,
                };
            }
            Merged {
                text: format!("{text}\n{line}\n"),
                outcome: MergeOutcome::AppendedRoute,
            }
        }
    }
}

fn splice_before_closer(text: &str, close_start: usize, line: &str) -> String {
    let mut out = String::with_capacity(text.len() + line.len() + 2);
    out.push_str(&text[..close_start]);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(line);
    out.push('\n');
    out.push_str(&text[close_start..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::HttpVerb;

    fn spec(verb: HttpVerb, raw: &str) -> RouteSpec {
        RouteSpec::parse(verb, raw).unwrap()
    }

    #[test]
    fn creates_a_group_block_in_an_empty_file() {
        let merged = merge("", &spec(HttpVerb::Get, "admin/dashboard"));
        assert_eq!(merged.outcome, MergeOutcome::CreatedGroup);
        assert!(merged.text.contains("$routes->group('admin', function($routes) {"));
        assert!(
            merged
                .text
                .contains("    $routes->get('dashboard', 'Admin::dashboard');")
        );
        assert!(merged.text.trim_end().ends_with("});"));
    }

    #[test]
    fn inserts_before_the_closer_of_an_existing_group() {
        let start = merge("", &spec(HttpVerb::Get, "admin/dashboard")).text;
        let merged = merge(&start, &spec(HttpVerb::Put, "admin/settings"));
        assert_eq!(merged.outcome, MergeOutcome::InsertedIntoGroup);

        // Both routes end up in the one block, closer intact after the new line.
        assert_eq!(merged.text.matches("$routes->group(").count(), 1);
        let dashboard = merged.text.find("'Admin::dashboard'").unwrap();
        let settings = merged.text.find("'Admin::settings'").unwrap();
        let closer = merged.text.find("});").unwrap();
        assert!(dashboard < settings && settings < closer);
    }

    #[test]
    fn merge_is_idempotent() {
        let spec = spec(HttpVerb::Get, "admin/dashboard");
        let once = merge("", &spec);
        let twice = merge(&once.text, &spec);
        assert_eq!(twice.outcome, MergeOutcome::AlreadyPresent);
        assert_eq!(once.text, twice.text);
    }

    #[test]
    fn rerunning_a_standalone_merge_changes_nothing() {
        let spec = spec(HttpVerb::Post, "login");
        let once = merge("<?php\n", &spec);
        assert_eq!(once.outcome, MergeOutcome::AppendedRoute);
        assert!(once.text.contains("$routes->post('login', 'Login::index');"));

        let twice = merge(&once.text, &spec);
        assert_eq!(twice.outcome, MergeOutcome::AlreadyPresent);
        assert_eq!(once.text, twice.text);
    }

    #[test]
    fn unrelated_groups_are_not_touched() {
        let mut text = merge("", &spec(HttpVerb::Get, "shop/cart")).text;
        let shop_before = block_text(&text, "shop");
        text = merge(&text, &spec(HttpVerb::Get, "admin/dashboard")).text;
        assert_eq!(block_text(&text, "shop"), shop_before);
    }

    #[test]
    fn a_prefix_of_an_existing_group_name_creates_a_new_block() {
        let text = merge("", &spec(HttpVerb::Get, "admin2/tools")).text;
        let merged = merge(&text, &spec(HttpVerb::Get, "admin/dashboard"));
        assert_eq!(merged.outcome, MergeOutcome::CreatedGroup);
        assert_eq!(merged.text.matches("$routes->group(").count(), 2);
    }

    #[test]
    fn double_quoted_group_markers_are_matched() {
        let text = "$routes->group(\"admin\", function($routes) {\n    $routes->get('home', 'Admin::home');\n});\n";
        let merged = merge(text, &spec(HttpVerb::Get, "admin/dashboard"));
        assert_eq!(merged.outcome, MergeOutcome::InsertedIntoGroup);
        assert_eq!(merged.text.matches("$routes->group(").count(), 1);
    }

    #[test]
    fn unbalanced_markers_fall_back_to_appending() {
        let text = "$routes->group('admin', function($routes) {\n    $routes->get('a', 'Admin::a');\n";
        let merged = merge(text, &spec(HttpVerb::Get, "admin/dashboard"));
        assert_eq!(merged.outcome, MergeOutcome::CreatedGroup);
        assert!(merged.text.starts_with(text));
    }

    #[test]
    fn surrounding_content_survives_a_group_insert() {
        let text = "<?php\n\n// app routes\n$routes->get('/', 'Home::index');\n\n$routes->group('admin', function($routes) {\n    $routes->get('home', 'Admin::home');\n});\n\n// trailing comment\n";
        let merged = merge(text, &spec(HttpVerb::Patch, "admin/profile"));
        assert!(merged.text.starts_with("<?php\n\n// app routes\n$routes->get('/', 'Home::index');"));
        assert!(merged.text.ends_with("\n\n// trailing comment\n"));
    }

    fn block_text(text: &str, group: &str) -> String {
        let statements = crate::routes::parse::parse(text);
        let block = crate::routes::parse::find_group(&statements, group).unwrap();
        text[block.span.clone()].to_owned()
    }
}
