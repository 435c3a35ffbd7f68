//! `{{FrontSide}}` audio deduplication
//!
//! A back template that includes `{{FrontSide}}` repeats the front's content, audio tags
//! included. That audio already belongs to the front, so before the back's references are
//! extracted, one occurrence is cut out of the answer for every reference the front plays,
//! repeats included. Occurrences beyond that are the back's own and survive.

use crate::media::find_all;
use std::borrow::Cow;
use tracing::debug;

/// Placeholder a back template uses to embed the rendered front.
pub const FRONT_SIDE_MARKER: &str = "{{FrontSide}}";

/// Whether a raw answer format embeds the front side.
pub fn includes_front_side(answer_format: &str) -> bool {
    answer_format.contains(FRONT_SIDE_MARKER)
}

/// For every media tag of `front_text`, in order, remove its first remaining occurrence from
/// `back_content`.
///
/// A tag played `n` times on the front removes up to `n` occurrences from the back. A front
/// tag with no counterpart left in `back_content` is skipped.
pub fn strip(back_content: &str, front_text: &str) -> String {
    let mut stripped = back_content.to_string();

    for found in find_all(front_text) {
        if let Some(start) = stripped.find(found.tag) {
            stripped.replace_range(start..start + found.tag.len(), "");
        }
    }

    stripped
}

/// Strip front-side audio from `answer` only when `answer_format` embeds the front side.
pub fn remove_front_side_audio<'a>(
    answer_format: &str,
    answer: &'a str,
    front_text: &str,
) -> Cow<'a, str> {
    if includes_front_side(answer_format) {
        debug!("answer format embeds {FRONT_SIDE_MARKER}, removing front audio");
        Cow::Owned(strip(answer, front_text))
    } else {
        Cow::Borrowed(answer)
    }
}
