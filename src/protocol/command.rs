#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    SettingsGet,
    SettingsSave,
    DictionaryLoad,
    DictionarySet,
    DictionaryInfo,
    DictionaryCollisions,
    DictionaryDedupe,
    TargetGet,
    TargetSet,
    TranslateLine,
    TranslateDocument,
    TranslateFile,
    DetectEncoding,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "settings.get" => Command::SettingsGet,
            "settings.save" => Command::SettingsSave,
            "dictionary.load" => Command::DictionaryLoad,
            "dictionary.set" => Command::DictionarySet,
            "dictionary.info" => Command::DictionaryInfo,
            "dictionary.collisions" => Command::DictionaryCollisions,
            "dictionary.dedupe" => Command::DictionaryDedupe,
            "target.get" => Command::TargetGet,
            "target.set" => Command::TargetSet,
            "translate_line" => Command::TranslateLine,
            "translate_document" => Command::TranslateDocument,
            "translate_file" => Command::TranslateFile,
            "encoding.detect" | "detect_encoding" => Command::DetectEncoding,
            _ => Command::Unknown,
        }
    }
}
