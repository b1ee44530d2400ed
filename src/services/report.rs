use serde::Serialize;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineOutcome {
    NotCommand,
    PassThrough,
    NoName,
    UnknownName {
        name: String,
    },
    Translated {
        name: String,
        replacement: String,
        /// The target field was empty and the source name was kept.
        fallback: bool,
    },
}

impl LineOutcome {
    pub fn is_translated(&self) -> bool {
        matches!(self, LineOutcome::Translated { .. })
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct LineReport {
    pub line_number: usize,
    pub outcome: LineOutcome,
}

#[derive(Debug, Serialize, Default, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    pub dictionary_empty: bool,
    pub lines: usize,
    pub translated: usize,
    pub unknown: usize,
    /// Command lines only; plain text and pass-through lines are counted, not listed.
    pub items: Vec<LineReport>,
}

impl DocumentReport {
    pub(crate) fn record(&mut self, line_number: usize, outcome: LineOutcome) {
        match &outcome {
            LineOutcome::NotCommand | LineOutcome::PassThrough => return,
            LineOutcome::UnknownName { .. } => self.unknown += 1,
            LineOutcome::Translated { .. } => self.translated += 1,
            LineOutcome::NoName => {}
        }
        self.items.push(LineReport {
            line_number,
            outcome,
        });
    }
}
