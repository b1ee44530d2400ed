use std::str::FromStr;
use std::time::SystemTime;

use log::LevelFilter;

pub const LOG_ENV: &str = "MACRO_CORE_LOG";

fn level_from_env() -> LevelFilter {
    std::env::var(LOG_ENV)
        .ok()
        .and_then(|v| LevelFilter::from_str(v.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}

/// Logs go to stderr only: stdout carries protocol responses.
pub fn init() {
    let result = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_millis(SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level_from_env())
        .chain(std::io::stderr())
        .apply();

    if let Err(e) = result {
        eprintln!("[core] logger already initialized: {e}");
    }
}
