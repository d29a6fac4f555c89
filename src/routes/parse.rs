use std::ops::Range;

const ROUTES_PREFIX: &str = "$routes->";
const GROUP_OPEN: &str = "group(";
const GROUP_CLOSE: &str = "});";
const QUOTES: [char; 3] = ['\'', '"', '`'];
const VERBS: [&str; 5] = ["get", "post", "put", "delete", "patch"];

/// One top-level statement recognized in a route declaration file.
///
/// Everything the scanner does not recognize is kept as an opaque span so
/// re-serialization reproduces the file byte-for-byte outside edits.
#[derive(Debug)]
pub enum Statement {
    Group(GroupBlock),
    Route(RouteLine),
    Opaque(Range<usize>),
}

/// A `$routes->group('name', ...) { ... });` block, spanning from the
/// opening marker through the first closing marker after it.
#[derive(Debug)]
pub struct GroupBlock {
    pub name: String,
    pub span: Range<usize>,
    /// Byte offset of the `});` closer within the file text.
    pub close_start: usize,
    pub routes: Vec<RouteLine>,
}

/// A single `$routes->verb('segment', 'Handler::method');` statement.
#[derive(Debug)]
pub struct RouteLine {
    pub verb: String,
    pub segment: String,
    pub handler: String,
    pub span: Range<usize>,
}

/// Scan declaration-file text into a statement sequence.
///
/// The scan is tolerant: an unterminated group header or a malformed route
/// call simply stays inside an opaque span, it never fails.
pub fn parse(text: &str) -> Vec<Statement> {
    let mut statements = Vec::new();
    let mut opaque_start = 0;
    let mut cursor = 0;

    while let Some(found) = text[cursor..].find(ROUTES_PREFIX) {
        let start = cursor + found;
        let after_prefix = start + ROUTES_PREFIX.len();

        if let Some(block) = parse_group_at(text, start, after_prefix) {
            if start > opaque_start {
                statements.push(Statement::Opaque(opaque_start..start));
            }
            cursor = block.span.end;
            opaque_start = cursor;
            statements.push(Statement::Group(block));
        } else if let Some(route) = parse_route_at(text, start, after_prefix) {
            if start > opaque_start {
                statements.push(Statement::Opaque(opaque_start..start));
            }
            cursor = route.span.end;
            opaque_start = cursor;
            statements.push(Statement::Route(route));
        } else {
            cursor = after_prefix;
        }
    }

    if opaque_start < text.len() {
        statements.push(Statement::Opaque(opaque_start..text.len()));
    }

    statements
}

/// Find the block for `name` with an exact name match.
pub fn find_group<'a>(statements: &'a [Statement], name: &str) -> Option<&'a GroupBlock> {
    statements.iter().find_map(|statement| match statement {
        Statement::Group(block) if block.name == name => Some(block),
        _ => None,
    })
}

fn parse_group_at(text: &str, start: usize, after_prefix: usize) -> Option<GroupBlock> {
    let rest = &text[after_prefix..];
    if !rest.starts_with(GROUP_OPEN) {
        return None;
    }

    let name_at = skip_whitespace(text, after_prefix + GROUP_OPEN.len());
    let (name, after_name) = parse_quoted(text, name_at)?;

    // Non-greedy: the block ends at the first closer after the opening
    // marker. A missing closer leaves the whole run opaque.
    let close_start = text[after_name..]
        .find(GROUP_CLOSE)
        .map(|offset| after_name + offset)?;
    let end = close_start + GROUP_CLOSE.len();

    let routes = parse_routes_between(text, after_name, close_start);

    Some(GroupBlock {
        name,
        span: start..end,
        close_start,
        routes,
    })
}

fn parse_route_at(text: &str, start: usize, after_prefix: usize) -> Option<RouteLine> {
    let rest = &text[after_prefix..];
    let verb = VERBS
        .iter()
        .find(|verb| rest.starts_with(&format!("{verb}(")))?;

    let segment_at = skip_whitespace(text, after_prefix + verb.len() + 1);
    let (segment, after_segment) = parse_quoted(text, segment_at)?;

    let comma_at = skip_whitespace(text, after_segment);
    if !text[comma_at..].starts_with(',') {
        return None;
    }

    let handler_at = skip_whitespace(text, comma_at + 1);
    let (handler, after_handler) = parse_quoted(text, handler_at)?;

    let paren_at = skip_whitespace(text, after_handler);
    if !text[paren_at..].starts_with(')') {
        return None;
    }

    let semi_at = skip_whitespace(text, paren_at + 1);
    if !text[semi_at..].starts_with(';') {
        return None;
    }

    Some(RouteLine {
        verb: (*verb).to_owned(),
        segment,
        handler,
        span: start..semi_at + 1,
    })
}

fn parse_routes_between(text: &str, start: usize, end: usize) -> Vec<RouteLine> {
    let mut routes = Vec::new();
    let mut cursor = start;

    while let Some(found) = text[cursor..end].find(ROUTES_PREFIX) {
        let at = cursor + found;
        let after_prefix = at + ROUTES_PREFIX.len();
        match parse_route_at(text, at, after_prefix) {
            Some(route) if route.span.end <= end => {
                cursor = route.span.end;
                routes.push(route);
            }
            _ => cursor = after_prefix,
        }
    }

    routes
}

fn parse_quoted(text: &str, at: usize) -> Option<(String, usize)> {
    let quote = text[at..].chars().next().filter(|c| QUOTES.contains(c))?;
    let content_at = at + quote.len_utf8();
    let closing = text[content_at..].find(quote)?;
    let content = text[content_at..content_at + closing].to_owned();
    Some((content, content_at + closing + quote.len_utf8()))
}

fn skip_whitespace(text: &str, at: usize) -> usize {
    text[at..]
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map(|(offset, _)| at + offset)
        .unwrap_or(text.len())
}
