use std::borrow::Cow;

use crate::parsers::macro_line::is_space;

/// Wraps `name` in double quotes when it contains whitespace or when the
/// source line had it quoted.
pub fn quote_if_needed(name: &str, keep_quotes: bool) -> Cow<'_, str> {
    if keep_quotes || name.chars().any(is_space) {
        Cow::Owned(format!("\"{name}\""))
    } else {
        Cow::Borrowed(name)
    }
}

/// `command`, one space, the replacement, then the tail exactly as it was.
pub fn rebuild(command: &str, replacement: &str, tail: &str) -> String {
    let mut out = String::with_capacity(command.len() + replacement.len() + tail.len() + 1);
    out.push_str(command);
    out.push(' ');
    out.push_str(replacement);
    out.push_str(tail);
    out
}
