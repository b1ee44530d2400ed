use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use serde::Serialize;

use crate::error::{CoreError, Result};

#[derive(Debug, Serialize)]
pub struct EncodingCandidate {
    pub name: String,
    pub confidence: f32,
}

#[derive(Debug, Serialize)]
pub struct EncodingDetectionResult {
    pub best: String,
    pub confidence: f32,
    pub candidates: Vec<EncodingCandidate>,
}

#[derive(Debug, Serialize)]
pub struct DecodedText {
    pub text: String,
    pub encoding: String,
    pub had_errors: bool,
}

pub fn detect_from_file(path: &Path) -> Result<EncodingDetectionResult> {
    let bytes = fs::read(path).map_err(|e| CoreError::read(path, e))?;
    Ok(detect_bytes(&bytes))
}

pub fn detect_bytes(bytes: &[u8]) -> EncodingDetectionResult {
    // BOM UTF-8 (EF BB BF)
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return EncodingDetectionResult {
            best: "utf-8-sig".into(),
            confidence: 0.99,
            candidates: vec![
                EncodingCandidate {
                    name: "utf-8-sig".into(),
                    confidence: 0.99,
                },
                EncodingCandidate {
                    name: "utf-8".into(),
                    confidence: 0.90,
                },
            ],
        };
    }

    let encoding = guess(bytes);
    let best = encoding.name().to_lowercase();
    let confidence = estimate_confidence(bytes, encoding);

    let mut candidates = vec![EncodingCandidate {
        name: best.clone(),
        confidence,
    }];

    // Macro files exported from EU clients are usually one of these.
    if best == "windows-1252" {
        candidates.push(EncodingCandidate {
            name: "iso-8859-15".into(),
            confidence: (confidence - 0.05).max(0.0),
        });
        candidates.push(EncodingCandidate {
            name: "utf-8".into(),
            confidence: (confidence - 0.10).max(0.0),
        });
    } else if best == "utf-8" {
        candidates.push(EncodingCandidate {
            name: "utf-8-sig".into(),
            confidence: (confidence - 0.20).max(0.0),
        });
    }

    EncodingDetectionResult {
        best,
        confidence,
        candidates,
    }
}

/// Decodes `bytes` with `label`, or with the detected encoding when no label
/// is given. A BOM always wins over both and is stripped.
pub fn decode_bytes(bytes: &[u8], label: Option<&str>) -> Result<DecodedText> {
    let encoding = match label.map(str::trim).filter(|l| !l.is_empty()) {
        Some(l) => resolve_label(l)?,
        None => guess(bytes),
    };

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        log::warn!("[encoding] lossy decode as {}", used.name());
    }

    Ok(DecodedText {
        text: text.into_owned(),
        encoding: used.name().to_lowercase(),
        had_errors,
    })
}

pub fn decode_file(path: &Path, label: Option<&str>) -> Result<DecodedText> {
    let bytes = fs::read(path).map_err(|e| CoreError::read(path, e))?;
    decode_bytes(&bytes, label)
}

fn resolve_label(label: &str) -> Result<&'static Encoding> {
    let lookup = if label.eq_ignore_ascii_case("utf-8-sig") {
        "utf-8"
    } else {
        label
    };
    Encoding::for_label(lookup.as_bytes()).ok_or_else(|| CoreError::UnknownEncoding(label.into()))
}

fn guess(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

fn estimate_confidence(bytes: &[u8], encoding: &'static Encoding) -> f32 {
    let (text, _, had_errors) = encoding.decode(bytes);

    if had_errors {
        return 0.35;
    }

    let len = text.len();
    if len < 64 {
        0.55
    } else if len < 512 {
        0.70
    } else if len < 4096 {
        0.82
    } else {
        0.90
    }
}
