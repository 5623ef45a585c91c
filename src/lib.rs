pub mod config;
pub mod export;
pub mod resolve;
pub mod sheet;

/// Sheet file extension
pub const SHEET_EXTENSION: &str = "cue";

/// Audio file extensions accepted when scanning for the disc image
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "ape", "flac", "tta"];

/// Image file extensions accepted as cover art
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "png", "tif", "tiff"];

/// Cover file stems that win over any other image
pub const PRIORITY_COVER_STEMS: &[&str] = &["cover", "folder"];

/// Sheet encodings tried in order when none are configured
pub const DEFAULT_SHEET_ENCODINGS: &[&str] = &["utf8", "gbk", "shift-jis"];

/// Application name for XDG paths
pub const APP_NAME: &str = "cuesplit";
