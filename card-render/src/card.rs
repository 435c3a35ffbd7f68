//! Per-render card object
//!
//! [`CardData`] is what the template-expansion step hands over for one card: both expanded
//! sides, the raw answer format, and whatever reference lists an earlier pass already
//! computed. [`CardHtml`] is built from it for a single side and discarded once the markup
//! and the side's references have been produced.

use crate::context::HtmlContext;
use crate::error::Result;
use crate::front_side::remove_front_side_audio;
use crate::markup::{fix_bold_style, script_block, MATHJAX_CLASS};
use crate::media::MediaReference;
use crate::resolver::{SideContentSource, SideResolver};
use crate::side::Side;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::trace;

/// Template-expansion output for one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardData {
    /// Zero-based ordinal of the card's template.
    #[serde(default)]
    pub ord: u32,
    /// Expanded front content.
    pub question: String,
    /// Expanded back content. Includes the front when the answer format uses `{{FrontSide}}`.
    pub answer: String,
    /// The back template exactly as the user wrote it.
    #[serde(default)]
    pub answer_format: String,
    /// Rendered front text used to find the audio the back inherits. Falls back to `question`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_tags: Option<Vec<MediaReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_tags: Option<Vec<MediaReference>>,
}

impl CardData {
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    pub fn front_text(&self) -> &str {
        self.question_text.as_deref().unwrap_or(&self.question)
    }

    /// Expanded content of `side`.
    pub fn content(&self, side: Side) -> &str {
        match side {
            Side::Front => &self.question,
            Side::Back => &self.answer,
        }
    }

    /// The answer with the audio it inherits through `{{FrontSide}}` removed.
    pub fn answer_without_front_side(&self) -> Cow<'_, str> {
        remove_front_side_audio(&self.answer_format, &self.answer, self.front_text())
    }
}

/// [`SideContentSource`] that derives the back content from a [`CardData`].
#[derive(Debug, Clone, Copy)]
pub struct AnswerSource<'a> {
    card: &'a CardData,
}

impl SideContentSource for AnswerSource<'_> {
    fn back_content(&self) -> String {
        self.card.answer_without_front_side().into_owned()
    }
}

/// Markup and media references for one rendered side.
#[derive(Debug)]
pub struct CardHtml<S> {
    content: String,
    ord: u32,
    resolver: SideResolver<S>,
}

impl<S: SideContentSource> CardHtml<S> {
    /// `content` is the expanded content of the side `resolver` was built for.
    pub fn new(content: impl Into<String>, ord: u32, resolver: SideResolver<S>) -> Self {
        Self {
            content: content.into(),
            ord,
            resolver,
        }
    }

    pub fn side(&self) -> Side {
        self.resolver.side()
    }

    /// Ordered media references owned by `side`. See [`SideResolver::references`].
    pub fn sound_tags(&mut self, side: Side) -> Result<&[MediaReference]> {
        self.resolver.references(side)
    }

    /// The complete markup for this side.
    pub fn template_html(&self, context: &impl HtmlContext) -> String {
        let content = fix_bold_style(&context.expand_sounds(&self.content));
        let requires_mathjax = context.requires_mathjax(&content);

        let style = context.style();
        let script = script_block(requires_mathjax);
        let card_class = if requires_mathjax {
            format!("{} {MATHJAX_CLASS}", context.card_class(self.ord + 1))
        } else {
            context.card_class(self.ord + 1)
        };

        trace!(content = %content, "card content");
        trace!(style = %style, "card style");

        context
            .template()
            .render(&content, style, script, &card_class)
    }
}

impl<'a> CardHtml<AnswerSource<'a>> {
    /// Build the render of `side` for `card`, seeding the resolver with any precomputed lists.
    pub fn from_card(card: &'a CardData, side: Side) -> Self {
        let source = AnswerSource { card };
        let mut resolver = match side {
            Side::Front => SideResolver::for_front(card.question.as_str(), source),
            Side::Back => SideResolver::for_back(source),
        };
        if let Some(refs) = &card.question_tags {
            resolver = resolver.with_front_references(refs.clone());
        }
        if let Some(refs) = &card.answer_tags {
            resolver = resolver.with_back_references(refs.clone());
        }

        Self::new(card.content(side), card.ord, resolver)
    }
}
