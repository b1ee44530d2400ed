use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::model::entry::{Entry, Lang};
use crate::model::settings::Settings;
use crate::services::dictionary::store;
use crate::services::{encoding, qa, translate};

mod command;
pub mod session;

use command::Command;
pub use session::Session;

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload(req: &Value) -> &Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn get_str<'a>(payload: &'a Value, key: &str) -> &'a str {
    payload.get(key).and_then(|v| v.as_str()).unwrap_or("")
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "message": message.into()
    })
    .to_string()
}

/// `payload.target` when present, the session's target otherwise.
fn target_from_payload(payload: &Value, session: &Session) -> Result<Lang, String> {
    match payload.get("target").and_then(|v| v.as_str()) {
        Some(code) => code.parse::<Lang>().map_err(|e| e.to_string()),
        None => Ok(session.target()),
    }
}

fn parse_entries_from_payload(payload: &Value) -> Result<Vec<Entry>, String> {
    let arr = payload
        .get("entries")
        .and_then(|v| v.as_array())
        .ok_or_else(|| "payload.entries must be an array".to_string())?;

    let mut entries: Vec<Entry> = Vec::with_capacity(arr.len());

    for (i, v) in arr.iter().cloned().enumerate() {
        match serde_json::from_value::<Entry>(v) {
            Ok(e) => entries.push(e),
            Err(e) => return Err(format!("invalid entry at index {}: {}", i, e)),
        }
    }

    Ok(entries)
}

fn parse_sources_from_payload(payload: &Value) -> Result<Option<Vec<String>>, String> {
    match payload.get("sources") {
        None | Some(Value::Null) => Ok(None),
        Some(v) => serde_json::from_value::<Vec<String>>(v.clone())
            .map(Some)
            .map_err(|e| format!("payload.sources must be an array of strings: {e}")),
    }
}

/// Relative request paths are taken from the app dir, not the cwd.
fn resolve_path(dir: &Path, raw: &str) -> PathBuf {
    let p = PathBuf::from(raw);
    if p.is_relative() {
        dir.join(p)
    } else {
        p
    }
}

pub fn handle(session: &mut Session, input: &str) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(_) => {
            return json!({
                "status": "error",
                "message": "invalid json"
            })
            .to_string();
        }
    };

    let id = get_id(&req);
    let cmd_str = get_cmd(&req);
    let payload = get_payload(&req);

    log::debug!("[protocol] {cmd_str}");

    match Command::from(cmd_str) {
        Command::Ping => ok(id, json!({ "message": "macro-core alive" })),

        Command::SettingsGet => ok(id, json!({ "settings": session.settings() })),

        Command::SettingsSave => {
            let settings_val = payload.get("settings").cloned().unwrap_or(Value::Null);
            if settings_val.is_null() {
                return err(id, "payload.settings is required");
            }

            let settings: Settings = match serde_json::from_value(settings_val) {
                Ok(v) => v,
                Err(e) => return err(id, format!("invalid payload.settings: {e}")),
            };

            match session.save_settings(settings) {
                Ok(saved) => ok(id, json!({ "settings": saved })),
                Err(e) => err(id, e.to_string()),
            }
        }

        Command::DictionaryLoad => {
            let sources = match parse_sources_from_payload(payload) {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };
            match session.load_dictionary(sources) {
                Ok(info) => ok(id, json!(info)),
                Err(e) => err(id, e.to_string()),
            }
        }

        Command::DictionarySet => {
            let entries = match parse_entries_from_payload(payload) {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };
            let info = session.replace_dictionary(entries, "inline");
            ok(id, json!(info))
        }

        Command::DictionaryInfo => ok(id, json!(session.info())),

        Command::DictionaryCollisions => {
            let collisions = qa::collisions(session.index().entries());
            ok(id, json!({ "collisions": collisions }))
        }

        Command::DictionaryDedupe => {
            let input_str = get_str(payload, "input");
            let output_str = get_str(payload, "output");
            if input_str.is_empty() { return err(id, "payload.input is required"); }
            if output_str.is_empty() { return err(id, "payload.output is required"); }

            let input = resolve_path(session.dir(), input_str);
            let output = resolve_path(session.dir(), output_str);
            match store::dedupe_file(&input, &output) {
                Ok(report) => ok(id, json!(report)),
                Err(e) => err(id, e.to_string()),
            }
        }

        Command::TargetGet => ok(id, json!({ "lang": session.target() })),

        Command::TargetSet => {
            let code = get_str(payload, "lang");
            match code.parse::<Lang>() {
                Ok(lang) => {
                    session.set_target(lang);
                    ok(id, json!({ "lang": lang }))
                }
                Err(e) => err(id, e.to_string()),
            }
        }

        Command::TranslateLine => {
            let line = match payload.get("line").and_then(|v| v.as_str()) {
                Some(l) => l,
                None => return err(id, "payload.line is required"),
            };
            let target = match target_from_payload(payload, session) {
                Ok(t) => t,
                Err(e) => return err(id, e),
            };
            let out = translate::translate_line(line, session.index(), target);
            ok(id, json!({ "line": out }))
        }

        Command::TranslateDocument => {
            let text = get_str(payload, "text");
            let target = match target_from_payload(payload, session) {
                Ok(t) => t,
                Err(e) => return err(id, e),
            };
            let want_report = payload.get("report").and_then(|v| v.as_bool()).unwrap_or(false);

            if want_report {
                let (out, report) =
                    translate::translate_document_with_report(text, session.index(), target);
                ok(id, json!({ "text": out, "report": report }))
            } else {
                let out = translate::translate_document(text, session.index(), target);
                ok(id, json!({ "text": out }))
            }
        }

        Command::TranslateFile => {
            let path_str = get_str(payload, "path");
            if path_str.is_empty() {
                return err(id, "payload.path is required");
            }
            let target = match target_from_payload(payload, session) {
                Ok(t) => t,
                Err(e) => return err(id, e),
            };
            let label = payload.get("encoding").and_then(|v| v.as_str());

            let path = resolve_path(session.dir(), path_str);
            match encoding::decode_file(&path, label) {
                Ok(decoded) => {
                    let out = translate::translate_document(&decoded.text, session.index(), target);
                    ok(id, json!({ "text": out, "encoding": decoded.encoding }))
                }
                Err(e) => err(id, e.to_string()),
            }
        }

        Command::DetectEncoding => {
            let path_str = get_str(payload, "path");
            if path_str.is_empty() {
                return err(id, "payload.path is required");
            }
            let path = resolve_path(session.dir(), path_str);
            match encoding::detect_from_file(&path) {
                Ok(result) => ok(id, json!(result)),
                Err(e) => err(id, e.to_string()),
            }
        }

        Command::Unknown => err(id, "unknown command"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn call(session: &mut Session, req: Value) -> Value {
        serde_json::from_str(&handle(session, &req.to_string())).unwrap()
    }

    fn loaded_session(dir: &Path) -> Session {
        let mut s = Session::new(dir.to_path_buf(), Settings::default());
        s.replace_dictionary(
            vec![
                Entry::new("Stone", "Stein", "Pierre"),
                Entry::new("Stone Skin", "Steinhaut", "Peau de pierre"),
            ],
            "inline",
        );
        s
    }

    #[test]
    fn invalid_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = loaded_session(dir.path());
        let resp: Value = serde_json::from_str(&handle(&mut s, "{nope")).unwrap();
        assert_eq!(resp["status"], "error");
        assert_eq!(resp["message"], "invalid json");
    }

    #[test]
    fn unknown_commands_echo_the_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = loaded_session(dir.path());
        let resp = call(&mut s, json!({"id": 7, "cmd": "launch"}));
        assert_eq!(resp["id"], 7);
        assert_eq!(resp["message"], "unknown command");
    }

    #[test]
    fn translate_line_uses_session_target_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = loaded_session(dir.path());
        let resp = call(
            &mut s,
            json!({"id": 1, "cmd": "translate_line", "payload": {"line": "/ac Stone <t>"}}),
        );
        assert_eq!(resp["status"], "ok");
        assert_eq!(resp["payload"]["line"], "/ac Pierre <t>");

        let resp = call(
            &mut s,
            json!({"cmd": "translate_line", "payload": {"line": "/ac Stone <t>", "target": "de"}}),
        );
        assert_eq!(resp["payload"]["line"], "/ac Stein <t>");
    }

    #[test]
    fn invalid_target_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = loaded_session(dir.path());
        let resp = call(
            &mut s,
            json!({"cmd": "translate_line", "payload": {"line": "/ac Stone", "target": "jp"}}),
        );
        assert_eq!(resp["status"], "error");

        let resp = call(&mut s, json!({"cmd": "target.set", "payload": {"lang": "it"}}));
        assert_eq!(resp["status"], "error");
        assert_eq!(s.target(), Lang::Fr);
    }

    #[test]
    fn target_set_then_document_with_report() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = loaded_session(dir.path());
        let resp = call(&mut s, json!({"cmd": "target.set", "payload": {"lang": "de"}}));
        assert_eq!(resp["payload"]["lang"], "de");

        let resp = call(
            &mut s,
            json!({"cmd": "translate_document", "payload": {
                "text": "/ac \"Stone Skin\" <wait.3>\n/echo go",
                "report": true
            }}),
        );
        assert_eq!(resp["payload"]["text"], "/ac \"Steinhaut\" <wait.3>\n/echo go");
        assert_eq!(resp["payload"]["report"]["translated"], 1);
        assert_eq!(resp["payload"]["report"]["items"][0]["outcome"]["kind"], "translated");
    }

    #[test]
    fn dictionary_set_replaces_entries() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = loaded_session(dir.path());
        let resp = call(
            &mut s,
            json!({"cmd": "dictionary.set", "payload": {"entries": [
                {"en": "Cure", "de": "Vita", "fr": "Soin"},
                {"en": "Protect", "de": "Vita", "fr": "Protection"}
            ]}}),
        );
        assert_eq!(resp["payload"]["entries"], 2);
        assert_eq!(resp["payload"]["source"], "inline");

        let resp = call(&mut s, json!({"cmd": "dictionary.collisions"}));
        assert_eq!(resp["payload"]["collisions"][0]["key"], "vita");
        assert_eq!(resp["payload"]["collisions"][0]["winner"]["en"], "Protect");
    }

    #[test]
    fn dictionary_set_requires_entries() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = loaded_session(dir.path());
        let resp = call(&mut s, json!({"cmd": "dictionary.set", "payload": {}}));
        assert_eq!(resp["message"], "payload.entries must be an array");
    }

    #[test]
    fn dictionary_load_and_dedupe_from_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("raw.json"),
            r#"[{"en":"Stone","de":"Stein","fr":"Pierre"},{"en":"stone","de":"x","fr":"y"}]"#,
        )
        .unwrap();
        let mut s = Session::new(dir.path().to_path_buf(), Settings::default());

        let resp = call(
            &mut s,
            json!({"cmd": "dictionary.dedupe", "payload": {"input": "raw.json", "output": "clean.json"}}),
        );
        assert_eq!(resp["payload"]["output_entries"], 1);

        let resp = call(
            &mut s,
            json!({"cmd": "dictionary.load", "payload": {"sources": ["missing.json", "clean.json"]}}),
        );
        assert_eq!(resp["status"], "ok");
        assert_eq!(resp["payload"]["entries"], 1);
        assert_eq!(resp["payload"]["keys"], 3);
    }

    #[test]
    fn translate_file_decodes_before_translating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("macro.txt");
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"/ac Stone <wait.2>\n/p ready");
        fs::write(&path, bytes).unwrap();

        let mut s = loaded_session(dir.path());
        let resp = call(
            &mut s,
            json!({"cmd": "translate_file", "payload": {"path": path.to_str().unwrap(), "target": "fr"}}),
        );
        assert_eq!(resp["payload"]["text"], "/ac Pierre <wait.2>\n/p ready");
        assert_eq!(resp["payload"]["encoding"], "utf-8");
    }

    #[test]
    fn file_paths_resolve_against_the_app_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("macro.txt"), "/ac Stone Skin <t>").unwrap();

        let mut s = loaded_session(dir.path());
        let resp = call(
            &mut s,
            json!({"cmd": "translate_file", "payload": {"path": "macro.txt", "target": "de"}}),
        );
        assert_eq!(resp["status"], "ok");
        assert_eq!(resp["payload"]["text"], "/ac Steinhaut <t>");

        let resp = call(&mut s, json!({"cmd": "encoding.detect", "payload": {"path": "macro.txt"}}));
        assert_eq!(resp["status"], "ok");
        assert!(resp["payload"]["best"].is_string());
    }

    #[test]
    fn settings_round_trip_through_protocol() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = Session::new(dir.path().to_path_buf(), Settings::default());
        let resp = call(
            &mut s,
            json!({"cmd": "settings.save", "payload": {"settings": {
                "target_language": "en",
                "dictionary_sources": ["https://example.com/d.json"]
            }}}),
        );
        assert_eq!(resp["status"], "ok");
        assert_eq!(s.target(), Lang::En);

        let resp = call(&mut s, json!({"cmd": "settings.get"}));
        assert_eq!(resp["payload"]["settings"]["dictionary_sources"][0], "https://example.com/d.json");
    }
}
