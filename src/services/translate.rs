use crate::model::entry::Lang;
use crate::parsers::macro_line::{self, ParsedLine};
use crate::services::dictionary::Index;
use crate::services::rebuild;
use crate::services::report::{DocumentReport, LineOutcome};

/// Translates the name on one macro line into `target`.
///
/// Anything that is not a recognised `/command name` line comes back
/// unchanged, byte for byte.
pub fn translate_line(line: &str, index: &Index, target: Lang) -> String {
    translate_line_with_outcome(line, index, target).0
}

pub fn translate_line_with_outcome(
    line: &str,
    index: &Index,
    target: Lang,
) -> (String, LineOutcome) {
    let named = match macro_line::parse(line) {
        ParsedLine::NotCommand => return (line.to_string(), LineOutcome::NotCommand),
        ParsedLine::PassThrough => return (line.to_string(), LineOutcome::PassThrough),
        ParsedLine::NoName => return (line.to_string(), LineOutcome::NoName),
        ParsedLine::Named(n) => n,
    };

    let name = named.span.name;
    let entry = match index.lookup(name) {
        Some(e) => e,
        None => {
            return (
                line.to_string(),
                LineOutcome::UnknownName {
                    name: name.to_string(),
                },
            )
        }
    };

    let localized = entry.name(target);
    let fallback = localized.is_empty();
    let translated = if fallback { name } else { localized };

    let replacement = rebuild::quote_if_needed(translated, named.span.quoted);
    let out = rebuild::rebuild(named.command, &replacement, named.tail());

    (
        out,
        LineOutcome::Translated {
            name: name.to_string(),
            replacement: translated.to_string(),
            fallback,
        },
    )
}

/// Translates every line of `text`; line count and order are preserved.
pub fn translate_document(text: &str, index: &Index, target: Lang) -> String {
    if index.is_empty() {
        return text.to_string();
    }

    text.split('\n')
        .map(|line| translate_line(line, index, target))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn translate_document_with_report(
    text: &str,
    index: &Index,
    target: Lang,
) -> (String, DocumentReport) {
    let mut report = DocumentReport {
        lines: text.split('\n').count(),
        ..DocumentReport::default()
    };

    if index.is_empty() {
        report.dictionary_empty = true;
        return (text.to_string(), report);
    }

    let mut out = Vec::with_capacity(report.lines);
    for (i, line) in text.split('\n').enumerate() {
        let (translated, outcome) = translate_line_with_outcome(line, index, target);
        report.record(i + 1, outcome);
        out.push(translated);
    }

    (out.join("\n"), report)
}
