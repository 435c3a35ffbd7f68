//! Embedded audio/video references
//!
//! Expanded card text refers to media with `[sound:<filename>]`, used for both audio and
//! video. [`find_all`] locates those references in left-to-right order; it is a pure function
//! over the text and never fails, text without references simply yields nothing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;

static SOUND_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[sound:([^\[\]]*)\]").expect("sound pattern is valid"));

/// One `[sound:...]` occurrence found in a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatch<'a> {
    /// Byte range of the whole tag within the searched text.
    pub span: Range<usize>,
    /// The matched tag text, brackets included (e.g. `[sound:a.mp3]`).
    pub tag: &'a str,
    /// The referenced filename (e.g. `a.mp3`).
    pub filename: &'a str,
}

impl TagMatch<'_> {
    pub fn to_reference(&self) -> MediaReference {
        MediaReference::new(self.filename)
    }
}

/// Find every media tag in `text`, in order of appearance.
pub fn find_all(text: &str) -> Vec<TagMatch<'_>> {
    SOUND_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let filename = caps.get(1)?;
            Some(TagMatch {
                span: whole.range(),
                tag: whole.as_str(),
                filename: filename.as_str(),
            })
        })
        .collect()
}

/// Extract the ordered media references of `text`.
pub fn extract_references(text: &str) -> Vec<MediaReference> {
    find_all(text).iter().map(TagMatch::to_reference).collect()
}

/// A single audio or video reference. Two references are equal when they name the same file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaReference {
    filename: String,
}

impl MediaReference {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The tag text this reference is written as in card content.
    pub fn tag(&self) -> String {
        format!("[sound:{}]", self.filename)
    }

    pub fn kind(&self) -> MediaKind {
        let ext = self
            .filename
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or("");
        MediaKind::from_extension(ext)
    }
}

impl From<&str> for MediaReference {
    fn from(filename: &str) -> Self {
        MediaReference::new(filename)
    }
}

/// Classification of a media reference by its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
    Other,
}

impl MediaKind {
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.to_ascii_lowercase();
        if matches!(
            ext.as_str(),
            "mp3" | "wav" | "flac" | "ogg" | "oga" | "opus" | "aac" | "m4a" | "spx" | "3gp"
        ) {
            MediaKind::Audio
        } else if matches!(
            ext.as_str(),
            "mp4" | "mov" | "webm" | "avi" | "mkv" | "mpg" | "mpeg" | "ogv"
        ) {
            MediaKind::Video
        } else {
            MediaKind::Other
        }
    }
}
