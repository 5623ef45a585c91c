pub mod directive;
pub mod model;

use encoding_rs::Encoding;
use std::path::Path;
use thiserror::Error;

use directive::{classify, unquote_raw, unquote_trimmed, Directive};
pub use model::{DiscMetadata, Fields, TrackMetadata};
use model::{KEY_FILE, KEY_PERFORMER, KEY_TITLE, KEY_TITLE_RAW};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Line {line_no} does not match any directive grammar: {line}")]
    Grammar { line_no: usize, line: String },
    #[error("Line {line_no}: expected TRACK {expected}, found TRACK {found}")]
    Sequence {
        line_no: usize,
        expected: usize,
        found: String,
    },
    #[error("Track {track} has no TITLE")]
    MissingTitle { track: u32 },
    #[error("{path} could not be decoded as any of: {}", .tried.join(", "))]
    Encoding { path: String, tried: Vec<String> },
    #[error("Unknown sheet encoding: {0}")]
    UnknownEncoding(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Where generic directives are currently written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Disc,
    /// Index into the track list.
    Track(usize),
}

/// Turns decoded sheet text into a [`DiscMetadata`].
#[derive(Debug, Clone, Default)]
pub struct SheetParser {
    performer_override: Option<String>,
}

impl SheetParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the disc-level `PERFORMER` (only lines seen before the first
    /// `TRACK` are affected).
    pub fn with_performer_override(performer: Option<String>) -> Self {
        Self { performer_override: performer }
    }

    pub fn parse(&self, text: &str) -> Result<DiscMetadata> {
        let mut disc = Fields::new();
        let mut tracks: Vec<TrackMetadata> = Vec::new();
        let mut target = Target::Disc;

        for (idx, raw_line) in text.split('\n').enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            let line_no = idx + 1;
            let directive = classify(line).ok_or_else(|| ParseError::Grammar {
                line_no,
                line: line.to_string(),
            })?;

            let (key, raw_value) = match directive {
                Directive::Index => continue,
                Directive::Rem { key, value } => (key, value),
                Directive::File { value } => (KEY_FILE, value),
                Directive::Track { number } => ("TRACK", number),
                Directive::Generic { key, value } => (key, value),
            };

            let mut value = unquote_trimmed(raw_value);
            if key == KEY_PERFORMER && tracks.is_empty() {
                if let Some(performer) = self.performer_override.as_deref() {
                    value = performer;
                }
            }
            if value.is_empty() {
                log::warn!("Empty value, skipping line {}: {}", line_no, line);
                continue;
            }

            if let Directive::Track { .. } = directive {
                let expected = tracks.len() + 1;
                let number = value.parse::<u32>().map_err(|_| ParseError::Grammar {
                    line_no,
                    line: line.to_string(),
                })?;
                if usize::try_from(number).ok() != Some(expected) {
                    return Err(ParseError::Sequence {
                        line_no,
                        expected,
                        found: value.to_string(),
                    });
                }
                tracks.push(TrackMetadata::inherit(number, &disc));
                target = Target::Track(tracks.len() - 1);
                continue;
            }

            let fields = match target {
                Target::Disc => &mut disc,
                Target::Track(i) => &mut tracks[i].fields,
            };
            fields.insert(key.to_string(), value.to_string());
            if key == KEY_TITLE {
                fields.insert(KEY_TITLE_RAW.to_string(), unquote_raw(raw_value).to_string());
            }
        }

        if let Some(untitled) = tracks.iter().find(|t| t.title().is_none()) {
            return Err(ParseError::MissingTitle { track: untitled.number });
        }

        log::debug!("Parsed sheet: {} disc fields, {} tracks", disc.len(), tracks.len());
        Ok(DiscMetadata { fields: disc, tracks })
    }
}

/// Parse with no performer override.
pub fn parse(text: &str) -> Result<DiscMetadata> {
    SheetParser::new().parse(text)
}

/// Read a sheet from disk, decoding it with the first encoding in `encodings`
/// (WHATWG labels such as `utf8`, `gbk`, `shift-jis`) that accepts every byte.
/// A leading byte-order mark is dropped.
pub fn read_sheet(path: &Path, encodings: &[String]) -> Result<String> {
    let bytes = std::fs::read(path)?;
    decode_sheet(&bytes, encodings).map_err(|e| match e {
        ParseError::Encoding { tried, .. } => ParseError::Encoding {
            path: path.display().to_string(),
            tried,
        },
        other => other,
    })
}

/// Decode raw sheet bytes; see [`read_sheet`].
pub fn decode_sheet(bytes: &[u8], encodings: &[String]) -> Result<String> {
    for label in encodings {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| ParseError::UnknownEncoding(label.clone()))?;
        match encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            Some(text) => {
                log::info!("Decoded sheet as {}", encoding.name());
                let mut text = text.into_owned();
                if text.starts_with('\u{feff}') {
                    text.remove(0);
                }
                return Ok(text);
            }
            None => log::debug!("Sheet is not valid {}", encoding.name()),
        }
    }
    Err(ParseError::Encoding {
        path: String::new(),
        tried: encodings.to_vec(),
    })
}
