use indexmap::IndexMap;
use serde::Serialize;

/// Directive key to value, in sheet order.
pub type Fields = IndexMap<String, String>;

pub const KEY_TITLE: &str = "TITLE";
pub const KEY_TITLE_RAW: &str = "TITLE_RAW";
pub const KEY_PERFORMER: &str = "PERFORMER";
pub const KEY_FILE: &str = "FILE";
pub const KEY_DATE: &str = "REM DATE";
pub const KEY_GENRE: &str = "REM GENRE";

/// Parsed disc: disc-level fields plus the ordered track list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscMetadata {
    #[serde(flatten)]
    pub fields: Fields,
    #[serde(rename = "TRACK_LIST")]
    pub tracks: Vec<TrackMetadata>,
}

/// One track. Holds its own copy of the disc fields that were set when the
/// track began, minus the disc title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackMetadata {
    /// 1-based position on the disc.
    #[serde(skip)]
    pub number: u32,
    #[serde(flatten)]
    pub fields: Fields,
}

impl DiscMetadata {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.get(KEY_TITLE)
    }

    pub fn performer(&self) -> Option<&str> {
        self.get(KEY_PERFORMER)
    }

    /// Audio file name declared by the sheet's `FILE` line.
    pub fn audio_file(&self) -> Option<&str> {
        self.get(KEY_FILE)
    }

    /// Track by 1-based number.
    pub fn track(&self, number: u32) -> Option<&TrackMetadata> {
        let idx = usize::try_from(number).ok()?.checked_sub(1)?;
        self.tracks.get(idx)
    }
}

impl TrackMetadata {
    pub(crate) fn inherit(number: u32, disc: &Fields) -> Self {
        let mut fields = disc.clone();
        fields.shift_remove(KEY_TITLE);
        fields.shift_remove(KEY_TITLE_RAW);
        Self { number, fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Trimmed title, used for tags and output names.
    pub fn title(&self) -> Option<&str> {
        self.get(KEY_TITLE)
    }

    /// Title with the sheet's inner spacing preserved, used to match the
    /// names the splitter writes.
    pub fn title_raw(&self) -> Option<&str> {
        self.get(KEY_TITLE_RAW).or_else(|| self.title())
    }

    pub fn performer(&self) -> Option<&str> {
        self.get(KEY_PERFORMER)
    }
}
