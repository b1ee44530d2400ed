use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Chat, emote and timing commands: free text follows them, never a name.
static PASS_THROUGH: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "/echo", "/p", "/party", "/s", "/say", "/y", "/yell", "/sh", "/shout", "/tell", "/t",
        "/a", "/alliance", "/fc", "/linkshell", "/cwls1", "/cwls2", "/cwls3", "/cwls4",
        "/cwls5", "/cwls6", "/cwls7", "/cwls8", "/wait", "/merror", "/macroerror",
    ]
    .into_iter()
    .collect()
});

static COMMAND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/[^\s\x{FEFF}]+").expect("command pattern is valid"));

static QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"([^"]+)""#).expect("quoted-name pattern is valid"));

/// Whitespace as macro text sees it: Unicode whitespace plus the BOM that
/// pasted text often starts with.
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

pub fn is_pass_through(command: &str) -> bool {
    PASS_THROUGH.contains(command.to_lowercase().as_str())
}

/// Where the name sits inside the text that follows the command.
///
/// `start..end` covers the name token as written, quotes included, so
/// `&rest[end..]` is the untouched tail of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameSpan<'a> {
    pub name: &'a str,
    pub start: usize,
    pub end: usize,
    pub quoted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedCommand<'a> {
    pub command: &'a str,
    pub rest: &'a str,
    pub span: NameSpan<'a>,
}

impl<'a> NamedCommand<'a> {
    pub fn tail(&self) -> &'a str {
        &self.rest[self.span.end..]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedLine<'a> {
    /// Plain text, or a lone `/` with no command token.
    NotCommand,
    PassThrough,
    NoName,
    Named(NamedCommand<'a>),
}

pub fn parse(line: &str) -> ParsedLine<'_> {
    // Classification runs on the trimmed line; callers keep the original.
    let logical = line.trim_matches(is_space);
    if !logical.starts_with('/') {
        return ParsedLine::NotCommand;
    }

    let command = match COMMAND_RE.find(logical) {
        Some(m) => m.as_str(),
        None => return ParsedLine::NotCommand,
    };

    if is_pass_through(command) {
        return ParsedLine::PassThrough;
    }

    let rest = &logical[command.len()..];
    match extract_name(rest) {
        Some(span) => ParsedLine::Named(NamedCommand {
            command,
            rest,
            span,
        }),
        None => ParsedLine::NoName,
    }
}

/// Finds the name argument in `rest`: either a `"quoted name"` or a bare run
/// of text that stops before the first `<placeholder>` or at end of line.
pub fn extract_name(rest: &str) -> Option<NameSpan<'_>> {
    let start = rest.find(|c: char| !is_space(c))?;
    let s = &rest[start..];

    if let Some(caps) = QUOTED_RE.captures(s) {
        let whole = caps.get(0)?;
        let inner = caps.get(1)?;
        return Some(NameSpan {
            name: inner.as_str(),
            start,
            end: start + whole.end(),
            quoted: true,
        });
    }

    let run_end = s.find(['<', '"']).unwrap_or(s.len());
    if run_end == 0 {
        return None;
    }

    let run = &s[..run_end];
    let matched = if run_end == s.len() {
        run
    } else if s[run_end..].starts_with('<') {
        // whitespace before the placeholder belongs to the tail
        run.trim_end_matches(is_space)
    } else {
        // a stray quote inside a bare name
        return None;
    };

    let name = matched.trim_matches(is_space);
    if name.is_empty() {
        return None;
    }

    Some(NameSpan {
        name,
        start,
        end: start + matched.len(),
        quoted: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(line: &str) -> NamedCommand<'_> {
        match parse(line) {
            ParsedLine::Named(n) => n,
            other => panic!("expected a named command for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(parse("Stone"), ParsedLine::NotCommand);
        assert_eq!(parse(""), ParsedLine::NotCommand);
        assert_eq!(parse("   "), ParsedLine::NotCommand);
        assert_eq!(parse("a /ac Stone"), ParsedLine::NotCommand);
    }

    #[test]
    fn leading_byte_order_mark_is_treated_as_whitespace() {
        let n = named("\u{feff}/ac Stone <t>");
        assert_eq!(n.command, "/ac");
        assert_eq!(n.span.name, "Stone");
        assert_eq!(n.tail(), " <t>");

        let n = named("/ac\u{feff}Stone");
        assert_eq!(n.command, "/ac");
        assert_eq!(n.span.name, "Stone");
    }

    #[test]
    fn lone_slash_has_no_command_token() {
        assert_eq!(parse("/"), ParsedLine::NotCommand);
        assert_eq!(parse("/ Stone"), ParsedLine::NotCommand);
    }

    #[test]
    fn pass_through_commands_match_case_insensitively() {
        assert_eq!(parse("/echo Stone"), ParsedLine::PassThrough);
        assert_eq!(parse("/ECHO Stone"), ParsedLine::PassThrough);
        assert_eq!(parse("  /cwls8 hello"), ParsedLine::PassThrough);
        assert!(!is_pass_through("/ac"));
    }

    #[test]
    fn command_without_argument_has_no_name() {
        assert_eq!(parse("/ac"), ParsedLine::NoName);
        assert_eq!(parse("/ac   "), ParsedLine::NoName);
        assert_eq!(parse("/ac <wait.3>"), ParsedLine::NoName);
    }

    #[test]
    fn quoted_name_keeps_following_whitespace_in_tail() {
        let n = named(r#"/ac "Stone Skin" <wait.3>"#);
        assert_eq!(n.command, "/ac");
        assert_eq!(n.span.name, "Stone Skin");
        assert!(n.span.quoted);
        assert_eq!(n.tail(), " <wait.3>");
    }

    #[test]
    fn bare_name_stops_before_placeholder() {
        let n = named("/ac Stone Skin <t>");
        assert_eq!(n.span.name, "Stone Skin");
        assert!(!n.span.quoted);
        assert_eq!(n.tail(), " <t>");
    }

    #[test]
    fn bare_name_runs_to_end_of_line() {
        let n = named("/ma   Stone Skin  ");
        // the logical line is trimmed before parsing
        assert_eq!(n.span.name, "Stone Skin");
        assert_eq!(n.tail(), "");
    }

    #[test]
    fn placeholder_directly_after_name() {
        let n = named("/ac Stone<wait.1>");
        assert_eq!(n.span.name, "Stone");
        assert_eq!(n.tail(), "<wait.1>");
    }

    #[test]
    fn unterminated_quote_fails_extraction() {
        assert_eq!(extract_name(r#" "Stone Skin"#), None);
        assert_eq!(parse(r#"/ac "Stone Skin"#), ParsedLine::NoName);
    }

    #[test]
    fn empty_quotes_fail_extraction() {
        assert_eq!(extract_name(r#" "" <t>"#), None);
    }

    #[test]
    fn stray_quote_inside_bare_name_fails_extraction() {
        assert_eq!(extract_name(r#" Stone "Skin""#), None);
    }

    #[test]
    fn literal_angle_bracket_truncates_bare_name() {
        let span = extract_name(" Foo<Bar").unwrap();
        assert_eq!(span.name, "Foo");
        assert_eq!(&" Foo<Bar"[span.end..], "<Bar");
    }

    #[test]
    fn span_offsets_include_leading_whitespace() {
        let rest = "   Cure <t>";
        let span = extract_name(rest).unwrap();
        assert_eq!(span.start, 3);
        assert_eq!(&rest[span.start..span.end], "Cure");
    }
}
