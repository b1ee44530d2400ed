use std::io::{self, BufRead, Write};
use std::panic::AssertUnwindSafe;

use macro_core::protocol::{self, Session};
use macro_core::services::settings;
use macro_core::logging;

fn main() {
    logging::init();

    let mut session = Session::open(settings::app_dir());
    log::info!("[core] app dir {}", session.dir().display());

    if let Err(e) = session.load_dictionary(None) {
        // The UI can still push a dictionary with dictionary.set / dictionary.load.
        log::warn!("[core] no dictionary at startup: {e}");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                log::warn!("[core] unreadable request line: {e}");
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let result =
            std::panic::catch_unwind(AssertUnwindSafe(|| protocol::handle(&mut session, &line)));

        let response = match result {
            Ok(resp) => resp,
            Err(_) => {
                log::error!("[core] request handler panicked");
                serde_json::json!({
                    "status": "error",
                    "message": "internal core error"
                })
                .to_string()
            }
        };

        if writeln!(stdout, "{response}").is_err() {
            break;
        }

        let _ = stdout.flush();
    }
}
