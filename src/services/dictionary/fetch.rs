use std::fmt;
use std::path::{Path, PathBuf};
use std::{thread, time::Duration};

use rand::{thread_rng, Rng};
use reqwest::blocking::Client;
use reqwest::StatusCode;

use super::store;
use crate::error::{CoreError, Result};
use crate::model::entry::Entry;

const MAX_RETRIES: usize = 3;
const BASE_DELAY_MS: u64 = 800;
const TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(String),
}

impl Source {
    /// URLs are recognised by scheme; anything else is a path. Relative
    /// paths prefer `base_dir` when the file exists there.
    pub fn parse(raw: &str, base_dir: &Path) -> Self {
        let raw = raw.trim();
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Source::Url(raw.to_string());
        }

        let path = PathBuf::from(raw);
        if path.is_relative() {
            let candidate = base_dir.join(&path);
            if candidate.exists() {
                return Source::Path(candidate);
            }
        }
        Source::Path(path)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(p) => write!(f, "{}", p.display()),
            Source::Url(u) => f.write_str(u),
        }
    }
}

#[derive(Debug)]
pub struct Loaded {
    pub source: String,
    pub entries: Vec<Entry>,
}

/// Tries each source in order and returns the first dictionary that loads.
pub fn load_first(sources: &[String], base_dir: &Path) -> Result<Loaded> {
    let mut client: Option<Client> = None;
    let mut last_err = String::from("no sources configured");

    for raw in sources {
        let source = Source::parse(raw, base_dir);
        let result = match &source {
            Source::Path(p) => store::load_file(p),
            Source::Url(url) => {
                let c = match client.take() {
                    Some(c) => c,
                    None => build_client()?,
                };
                let fetched = fetch_url(&c, url).and_then(|text| store::parse(&text, url));
                client = Some(c);
                fetched
            }
        };

        match result {
            Ok(entries) => {
                log::info!("[dictionary] loaded {} entries from {}", entries.len(), source);
                return Ok(Loaded {
                    source: source.to_string(),
                    entries,
                });
            }
            Err(e) => {
                log::warn!("[dictionary] source {} unavailable: {}", source, e);
                last_err = e.to_string();
            }
        }
    }

    Err(CoreError::NoSource(last_err))
}

fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .build()
        .map_err(|e| CoreError::Http {
            url: String::new(),
            message: e.to_string(),
        })
}

fn backoff(attempt: usize) -> Duration {
    let jitter: u64 = thread_rng().gen_range(0..200);
    let ms = BASE_DELAY_MS * (2_u64.pow(attempt as u32)) + jitter;
    Duration::from_millis(ms)
}

pub fn fetch_url(client: &Client, url: &str) -> Result<String> {
    let mut last_err = String::new();

    for attempt in 0..MAX_RETRIES {
        match client.get(url).send() {
            Ok(resp) => {
                let status = resp.status();

                let text = match resp.text() {
                    Ok(t) => t,
                    Err(err) => {
                        last_err = err.to_string();
                        if attempt + 1 < MAX_RETRIES {
                            thread::sleep(backoff(attempt));
                        }
                        continue;
                    }
                };

                if status.is_success() {
                    return Ok(text);
                }

                last_err = describe_status(status, &text);
                if should_retry_http(status) && attempt + 1 < MAX_RETRIES {
                    log::debug!("[dictionary] retrying {} after {}", url, last_err);
                    thread::sleep(backoff(attempt));
                    continue;
                }
                break;
            }
            Err(err) => {
                last_err = err.to_string();
                if attempt + 1 < MAX_RETRIES {
                    log::debug!("[dictionary] retrying {} after {}", url, last_err);
                    thread::sleep(backoff(attempt));
                }
            }
        }
    }

    Err(CoreError::Http {
        url: url.to_string(),
        message: last_err,
    })
}

fn should_retry_http(status: StatusCode) -> bool {
    // 408/429/5xx are usually transient
    status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
        || status.is_server_error()
}

fn describe_status(status: StatusCode, body_text: &str) -> String {
    let trimmed = body_text.trim();
    let snippet: String = if trimmed.chars().count() > 200 {
        let head: String = trimmed.chars().take(200).collect();
        format!("{head}...")
    } else {
        trimmed.to_string()
    };

    format!("HTTP {}: {}", status.as_u16(), snippet)
}
