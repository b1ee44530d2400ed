use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::model::entry::{Entry, Lang};
use crate::model::settings::Settings;
use crate::services::dictionary::{fetch, store, Index};
use crate::services::settings;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct DictionaryInfo {
    pub source: Option<String>,
    pub entries: usize,
    pub keys: usize,
    pub fingerprint: String,
}

/// State held between requests: settings, the current dictionary snapshot
/// and the index derived from it.
pub struct Session {
    dir: PathBuf,
    settings: Settings,
    index: Index,
    source: Option<String>,
}

impl Session {
    pub fn new(dir: PathBuf, settings: Settings) -> Self {
        Self {
            dir,
            settings,
            index: Index::default(),
            source: None,
        }
    }

    pub fn open(dir: PathBuf) -> Self {
        let settings = settings::load_or_default(&dir);
        Self::new(dir, settings)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn save_settings(&mut self, settings: Settings) -> Result<&Settings> {
        settings::save(&self.dir, &settings)?;
        self.settings = settings;
        Ok(&self.settings)
    }

    pub fn target(&self) -> Lang {
        self.settings.target_language
    }

    /// Changes the target language; persisting it is best effort.
    pub fn set_target(&mut self, lang: Lang) {
        self.settings.target_language = lang;
        if let Err(e) = settings::save(&self.dir, &self.settings) {
            log::warn!("[settings] could not persist target language: {e}");
        }
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn info(&self) -> DictionaryInfo {
        DictionaryInfo {
            source: self.source.clone(),
            entries: self.index.entries().len(),
            keys: self.index.len(),
            fingerprint: self.index.fingerprint().to_string(),
        }
    }

    /// Swaps in a new dictionary. The index is rebuilt only when the
    /// snapshot differs from the current one.
    pub fn replace_dictionary(
        &mut self,
        entries: Vec<Entry>,
        source: impl Into<String>,
    ) -> DictionaryInfo {
        let entries = if self.settings.dedupe_on_load {
            store::dedupe(entries)
        } else {
            entries
        };

        if self.index.is_current_for(&entries) {
            log::debug!("[dictionary] snapshot unchanged, keeping index");
        } else {
            self.index = Index::build(&entries);
            log::info!(
                "[dictionary] index rebuilt: {} entries, {} keys",
                self.index.entries().len(),
                self.index.len()
            );
        }

        self.source = Some(source.into());
        self.info()
    }

    /// Loads from `sources`, or from the configured sources when none are given.
    pub fn load_dictionary(&mut self, sources: Option<Vec<String>>) -> Result<DictionaryInfo> {
        let sources = sources.unwrap_or_else(|| self.settings.dictionary_sources.clone());
        let loaded = fetch::load_first(&sources, &self.dir)?;
        Ok(self.replace_dictionary(loaded.entries, loaded.source))
    }
}
