use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::sheet::model::{KEY_DATE, KEY_GENRE};
use crate::sheet::{DiscMetadata, TrackMetadata};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExportError {
    #[error("Disc has no {0}; it is needed for the output directory and tags")]
    MissingDiscField(&'static str),
    #[error("Track {track} has no {field}")]
    MissingTrackField { track: u32, field: &'static str },
}

/// Tags written to one exported track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackTags {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub album_artist: String,
    pub date: Option<String>,
    pub genre: Option<String>,
    /// `"<n>/<total>"`
    pub track: String,
}

/// Everything needed to encode one track after splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackExport {
    pub number: u32,
    /// Stem the splitter writes (`%n.%t`), built from the raw title.
    pub split_stem: String,
    /// Stem of the encoded file, built from the trimmed title.
    pub output_stem: String,
    pub tags: TrackTags,
}

/// Export plan for a whole disc.
#[derive(Debug, Clone)]
pub struct ExportPlan {
    /// `<output>/<performer>/<album>`
    pub dest_dir: PathBuf,
    pub tracks: Vec<TrackExport>,
}

impl ExportPlan {
    pub fn build(disc: &DiscMetadata, output: &Path) -> Result<Self, ExportError> {
        let performer = disc
            .performer()
            .ok_or(ExportError::MissingDiscField("PERFORMER"))?;
        let album = disc.title().ok_or(ExportError::MissingDiscField("TITLE"))?;
        let total = disc.tracks.len();

        let tracks = disc
            .tracks
            .iter()
            .map(|t| TrackExport::build(disc, t, performer, album, total))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            dest_dir: output.join(performer).join(album),
            tracks,
        })
    }

    /// Directory the splitter writes into.
    pub fn split_dir(&self) -> PathBuf {
        self.dest_dir.join("wav")
    }

    /// Where the re-encoded cover goes.
    pub fn cover_file(&self) -> PathBuf {
        self.dest_dir.join("cover.jpg")
    }
}

/// How a cover scan should be cut before re-encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverFit {
    /// Keep only the right half (front of a scanned booklet spread).
    pub crop_right_half: bool,
    /// Whether the aspect ratio looks like a cover or spread at all.
    pub in_range: bool,
}

impl CoverFit {
    /// `None` for a zero-height image.
    pub fn from_dimensions(width: u32, height: u32) -> Option<Self> {
        if height == 0 {
            return None;
        }
        let ratio = f64::from(width) / f64::from(height);
        let (crop_right_half, in_range) = if ratio < 0.8 {
            (false, false)
        } else if ratio < 1.2 {
            (false, true)
        } else if ratio < 1.9 {
            (false, false)
        } else if ratio < 2.2 {
            (true, true)
        } else {
            (true, false)
        };
        Some(Self { crop_right_half, in_range })
    }
}

impl TrackExport {
    fn build(
        disc: &DiscMetadata,
        track: &TrackMetadata,
        album_artist: &str,
        album: &str,
        total: usize,
    ) -> Result<Self, ExportError> {
        let title = track.title().ok_or(ExportError::MissingTrackField {
            track: track.number,
            field: "TITLE",
        })?;
        let raw_title = track.title_raw().unwrap_or(title);
        let artist = track.performer().ok_or(ExportError::MissingTrackField {
            track: track.number,
            field: "PERFORMER",
        })?;

        Ok(Self {
            number: track.number,
            split_stem: file_stem(track.number, raw_title),
            output_stem: file_stem(track.number, title),
            tags: TrackTags {
                title: title.to_string(),
                artist: artist.to_string(),
                album: album.to_string(),
                album_artist: album_artist.to_string(),
                date: disc.get(KEY_DATE).map(str::to_string),
                genre: disc.get(KEY_GENRE).map(str::to_string),
                track: format!("{}/{}", track.number, total),
            },
        })
    }

    /// Input path relative to the destination directory.
    pub fn split_file(&self) -> PathBuf {
        Path::new("wav").join(format!("{}.wav", self.split_stem))
    }

    pub fn output_file(&self) -> String {
        format!("{}.m4a", self.output_stem)
    }

    /// Arguments for the AAC encoder, input file last.
    pub fn encoder_args(&self, bitrate: &str) -> Vec<String> {
        let mut args: Vec<String> = [
            "--bitrate",
            bitrate,
            "--gapless-mode",
            "1",
            "--moov-before-mdat",
            "-o",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        args.push(self.output_file());

        let tags = &self.tags;
        push_pair(&mut args, "--title", &tags.title);
        push_pair(&mut args, "--artist", &tags.artist);
        push_pair(&mut args, "--album", &tags.album);
        if let Some(date) = &tags.date {
            push_pair(&mut args, "--date", date);
        }
        if let Some(genre) = &tags.genre {
            push_pair(&mut args, "--genre", genre);
        }
        push_pair(&mut args, "--album-artist", &tags.album_artist);
        push_pair(&mut args, "--track", &tags.track);

        args.push(self.split_file().to_string_lossy().into_owned());
        args
    }
}

fn push_pair(args: &mut Vec<String>, flag: &str, value: &str) {
    args.push(flag.to_string());
    args.push(value.to_string());
}

/// `NN.<title>` with `/` replaced, minus one trailing dot. The splitter
/// does not add a separator dot when the title already ends with one.
fn file_stem(number: u32, title: &str) -> String {
    let mut stem = format!("{:02}.{}", number, title.replace('/', "-"));
    if stem.ends_with('.') {
        stem.pop();
    }
    stem
}
