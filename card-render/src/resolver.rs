//! Per-side media reference resolution
//!
//! A [`SideResolver`] lives for one render of one side. It hands out the ordered media
//! references of either side, filling each side's slot at most once:
//!
//! | requested | rendering | resolution                                                   |
//! |-----------|-----------|--------------------------------------------------------------|
//! | front     | front     | matcher over the held front content                          |
//! | back      | back      | matcher over [`SideContentSource::back_content`]             |
//! | back      | front     | matcher over [`SideContentSource::back_content`]             |
//! | front     | back      | the precomputed list, else [`RenderError::InvalidSideRequest`] |
//!
//! The back's references always come from the source rather than from displayed back content,
//! since the displayed back still carries the audio inherited through `{{FrontSide}}`.
//! Front content cannot be rebuilt from back state, so the last row never computes.

use crate::error::{RenderError, Result};
use crate::media::{extract_references, MediaReference};
use crate::side::Side;
use tracing::debug;

/// Supplies a card's back content on demand.
///
/// Producing it may be slow (it usually means re-rendering the answer and removing the
/// front's audio), so the resolver calls it at most once.
pub trait SideContentSource {
    /// The back content with any audio inherited from the front already removed.
    fn back_content(&self) -> String;
}

impl<F> SideContentSource for F
where
    F: Fn() -> String,
{
    fn back_content(&self) -> String {
        self()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Unset,
    /// Handed in at construction by an earlier rendering pass.
    Supplied(Vec<MediaReference>),
    /// Extracted by this resolver.
    Computed(Vec<MediaReference>),
}

impl Slot {
    fn references(&self) -> Option<&[MediaReference]> {
        match self {
            Slot::Unset => None,
            Slot::Supplied(refs) | Slot::Computed(refs) => Some(refs),
        }
    }

    fn fill(&mut self, refs: Vec<MediaReference>) -> &[MediaReference] {
        *self = Slot::Computed(refs);
        self.references().unwrap_or_default()
    }
}

#[derive(Debug)]
enum Held {
    Front(String),
    Back,
}

/// Lazily resolves media references for the side being rendered and its opposite.
#[derive(Debug)]
pub struct SideResolver<S> {
    held: Held,
    source: S,
    front: Slot,
    back: Slot,
}

impl<S: SideContentSource> SideResolver<S> {
    /// Resolver for rendering the front, holding the front's expanded content.
    pub fn for_front(front_content: impl Into<String>, source: S) -> Self {
        Self {
            held: Held::Front(front_content.into()),
            source,
            front: Slot::Unset,
            back: Slot::Unset,
        }
    }

    /// Resolver for rendering the back.
    ///
    /// Front references can only be served from this resolver when supplied through
    /// [`SideResolver::with_front_references`].
    pub fn for_back(source: S) -> Self {
        Self {
            held: Held::Back,
            source,
            front: Slot::Unset,
            back: Slot::Unset,
        }
    }

    /// Seed the front slot with references computed by an earlier pass.
    pub fn with_front_references(mut self, refs: Vec<MediaReference>) -> Self {
        self.front = Slot::Supplied(refs);
        self
    }

    /// Seed the back slot with references computed by an earlier pass.
    pub fn with_back_references(mut self, refs: Vec<MediaReference>) -> Self {
        self.back = Slot::Supplied(refs);
        self
    }

    /// The side this resolver was built for.
    pub fn side(&self) -> Side {
        match self.held {
            Held::Front(_) => Side::Front,
            Held::Back => Side::Back,
        }
    }

    /// Ordered media references owned by `side`.
    pub fn references(&mut self, side: Side) -> Result<&[MediaReference]> {
        match side {
            Side::Front => self.front_references(),
            Side::Back => Ok(self.back_references()),
        }
    }

    fn front_references(&mut self) -> Result<&[MediaReference]> {
        if self.front.references().is_none() {
            let Held::Front(content) = &self.held else {
                return Err(RenderError::InvalidSideRequest {
                    requested: Side::Front,
                    current: Side::Back,
                });
            };
            debug!("extracting front references from held content");
            let refs = extract_references(content);
            return Ok(self.front.fill(refs));
        }
        Ok(self.front.references().unwrap_or_default())
    }

    fn back_references(&mut self) -> &[MediaReference] {
        if self.back.references().is_none() {
            debug!(current = %self.side(), "computing back references from source");
            let content = self.source.back_content();
            let refs = extract_references(&content);
            return self.back.fill(refs);
        }
        self.back.references().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn refs(names: &[&str]) -> Vec<MediaReference> {
        names.iter().map(|name| MediaReference::new(*name)).collect()
    }

    #[test]
    fn front_references_are_memoized() {
        let mut resolver = SideResolver::for_front("Q [sound:a.mp3]", || String::new());

        let first = resolver.references(Side::Front).unwrap().as_ptr();
        let second = resolver.references(Side::Front).unwrap().as_ptr();
        assert_eq!(first, second);
        assert_eq!(resolver.references(Side::Front).unwrap(), refs(&["a.mp3"]));
    }

    #[test]
    fn back_from_front_calls_source_once() {
        let calls = Cell::new(0);
        let source = || {
            calls.set(calls.get() + 1);
            "A [sound:b.mp3]".to_string()
        };
        let mut resolver = SideResolver::for_front("Q [sound:a.mp3]", source);

        for _ in 0..3 {
            assert_eq!(resolver.references(Side::Back).unwrap(), refs(&["b.mp3"]));
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(resolver.references(Side::Front).unwrap(), refs(&["a.mp3"]));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn current_back_side_uses_source() {
        let calls = Cell::new(0);
        let source = || {
            calls.set(calls.get() + 1);
            "A [sound:b.mp3][sound:c.mp3]".to_string()
        };
        let mut resolver = SideResolver::for_back(source);

        assert_eq!(resolver.side(), Side::Back);
        assert_eq!(
            resolver.references(Side::Back).unwrap(),
            refs(&["b.mp3", "c.mp3"])
        );
        resolver.references(Side::Back).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn front_from_back_without_supplied_list_fails() {
        let mut resolver = SideResolver::for_back(|| "A".to_string());
        let err = resolver.references(Side::Front).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidSideRequest {
                requested: Side::Front,
                current: Side::Back
            }
        ));
        // The failure does not poison later requests.
        assert!(resolver.references(Side::Back).unwrap().is_empty());
    }

    #[test]
    fn front_from_back_uses_supplied_list() {
        let mut resolver = SideResolver::for_back(|| "A".to_string())
            .with_front_references(refs(&["a.mp3", "x.mp3"]));
        assert_eq!(
            resolver.references(Side::Front).unwrap(),
            refs(&["a.mp3", "x.mp3"])
        );
    }

    #[test]
    fn supplied_lists_are_never_recomputed() {
        let calls = Cell::new(0);
        let source = || {
            calls.set(calls.get() + 1);
            "[sound:computed.mp3]".to_string()
        };
        let mut resolver = SideResolver::for_front("[sound:held.mp3]", source)
            .with_front_references(Vec::new())
            .with_back_references(refs(&["supplied.mp3"]));

        assert!(resolver.references(Side::Front).unwrap().is_empty());
        assert_eq!(
            resolver.references(Side::Back).unwrap(),
            refs(&["supplied.mp3"])
        );
        assert_eq!(calls.get(), 0);
    }
}
