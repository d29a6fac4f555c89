pub mod merge;
pub mod parse;

use std::fmt;

use anyhow::{Result, bail};

use crate::naming::capitalize;

/// HTTP verbs recognized in a `Routes.php` declaration file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpVerb {
    /// The method name as it appears in a route statement (`$routes->get(...)`).
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "get",
            HttpVerb::Post => "post",
            HttpVerb::Put => "put",
            HttpVerb::Delete => "delete",
            HttpVerb::Patch => "patch",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

/// A fully resolved route to be merged into the declaration file.
///
/// The handler reference is always derived from the group and segment,
/// never supplied by the caller.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RouteSpec {
    pub verb: HttpVerb,
    pub group: Option<String>,
    pub segment: String,
    pub handler: String,
}

impl RouteSpec {
    /// Build a spec from raw user input such as `admin/dashboard` or `login`.
    ///
    /// The first path part names the group when more than one part is
    /// present; the remainder is the segment. A single part is an
    /// ungrouped route whose handler defaults to the `index` method.
    pub fn parse(verb: HttpVerb, raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            bail!("route path is required");
        }

        let mut parts = raw.split('/');
        let first = parts.next().unwrap_or_default().to_owned();
        let rest = parts.collect::<Vec<_>>().join("/");

        let (group, segment) = if rest.is_empty() {
            (None, first)
        } else {
            (Some(first), rest)
        };

        if segment.trim().is_empty() {
            bail!("route path `{raw}` has an empty segment");
        }

        let handler = match &group {
            Some(group) => format!("{}::{}", capitalize(group), segment),
            None => format!("{}::index", capitalize(&segment)),
        };

        Ok(Self {
            verb,
            group,
            segment,
            handler,
        })
    }

    /// The exact line the merger inserts for this spec. Grouped routes are
    /// indented one level; standalone routes sit at column zero.
    pub fn canonical_line(&self) -> String {
        let indent = if self.group.is_some() { "    " } else { "" };
        format!(
            "{indent}$routes->{}('{}', '{}');",
            self.verb.as_str(),
            self.segment,
            self.handler
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouped_input_splits_on_first_separator() {
        let spec = RouteSpec::parse(HttpVerb::Get, "admin/dashboard").unwrap();
        assert_eq!(spec.group.as_deref(), Some("admin"));
        assert_eq!(spec.segment, "dashboard");
        assert_eq!(spec.handler, "Admin::dashboard");
    }

    #[test]
    fn ungrouped_input_defaults_to_index_handler() {
        let spec = RouteSpec::parse(HttpVerb::Post, "login").unwrap();
        assert_eq!(spec.group, None);
        assert_eq!(spec.segment, "login");
        assert_eq!(spec.handler, "Login::index");
    }

    #[test]
    fn extra_separators_stay_in_the_segment() {
        let spec = RouteSpec::parse(HttpVerb::Get, "blog/list/all").unwrap();
        assert_eq!(spec.group.as_deref(), Some("blog"));
        assert_eq!(spec.segment, "list/all");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(RouteSpec::parse(HttpVerb::Get, "   ").is_err());
        assert!(RouteSpec::parse(HttpVerb::Get, "admin/").is_err());
    }

    #[test]
    fn canonical_line_indents_grouped_routes_only() {
        let grouped = RouteSpec::parse(HttpVerb::Put, "admin/users").unwrap();
        assert_eq!(
            grouped.canonical_line(),
            "    $routes->put('users', 'Admin::users');"
        );

        let standalone = RouteSpec::parse(HttpVerb::Delete, "session").unwrap();
        assert_eq!(
            standalone.canonical_line(),
            "$routes->delete('session', 'Session::index');"
        );
    }
}
