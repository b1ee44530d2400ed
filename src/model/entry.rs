use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One concept's name in the three supported languages.
///
/// Fields missing from the source JSON come back empty; an empty field is
/// never indexed and never used as a replacement.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    #[serde(default)]
    pub en: String,

    #[serde(default)]
    pub de: String,

    #[serde(default)]
    pub fr: String,
}

impl Entry {
    pub fn new(en: impl Into<String>, de: impl Into<String>, fr: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            de: de.into(),
            fr: fr.into(),
        }
    }

    pub fn name(&self, lang: Lang) -> &str {
        match lang {
            Lang::En => &self.en,
            Lang::De => &self.de,
            Lang::Fr => &self.fr,
        }
    }

    /// Fields in index insertion order.
    pub fn names(&self) -> [&str; 3] {
        [&self.en, &self.de, &self.fr]
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    En,
    De,
    #[default]
    Fr,
}

impl Lang {
    pub const ALL: [Lang; 3] = [Lang::En, Lang::De, Lang::Fr];

    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::De => "de",
            Lang::Fr => "fr",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Lang::En),
            "de" => Ok(Lang::De),
            "fr" => Ok(Lang::Fr),
            _ => Err(CoreError::InvalidLang(s.to_string())),
        }
    }
}
