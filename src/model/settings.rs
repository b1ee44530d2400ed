use serde::{Deserialize, Serialize};

use super::entry::Lang;

fn default_dictionary_sources() -> Vec<String> {
    vec![
        "dictionary.deduped.json".to_string(),
        "dictionary.json".to_string(),
    ]
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    #[serde(default, alias = "target")]
    pub target_language: Lang,

    /// Tried in order; the first source that loads wins.
    #[serde(default = "default_dictionary_sources")]
    pub dictionary_sources: Vec<String>,

    #[serde(default)]
    pub dedupe_on_load: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_language: Lang::default(),
            dictionary_sources: default_dictionary_sources(),
            dedupe_on_load: false,
        }
    }
}
