//! Final markup and media references for one side of a flashcard
//!
//!     This crate takes the output of the template-expansion step (the expanded front and back
//!     text of a card, plus the raw answer format) and produces two things for the viewer:
//!     the composed markup shown for a side, and the ordered list of audio/video references
//!     that side owns, so playback is triggered exactly once per reference.
//!
//!     This is a pure lib. It never reads the environment, prints, or touches the filesystem
//!     on its own; the only file access is the explicit [`CardTemplate::from_file`] helper.
//!
//!     The file structure :
//!     .
//!     ├── error.rs          # RenderError
//!     ├── side.rs           # Front / Back
//!     ├── media.rs          # [sound:...] matcher and MediaReference
//!     ├── front_side.rs     # {{FrontSide}} audio deduplication
//!     ├── resolver.rs       # per-side lazy reference caches
//!     ├── context.rs        # HtmlContext collaborator trait + DefaultContext
//!     ├── markup.rs         # card template shell and composition
//!     └── card.rs           # CardData / CardHtml per-render object
//!
//! Core Algorithms
//!
//!     Assembling the markup is plain substitution. The work is in the audio reconciliation:
//!     a back template that includes `{{FrontSide}}` repeats the front's audio, and that audio
//!     must not play again on the back. The back's references are therefore extracted from the
//!     answer after one occurrence per front reference (repeats included) has been removed
//!     (see ./front_side.rs), and the resolver (./resolver.rs) computes the missing side's
//!     list lazily, at most once, while refusing the one direction it cannot compute
//!     (front references requested from a back-side render without a precomputed list).
//!
//! Collaborators
//!
//!     Sound expansion into play buttons, stylesheet lookup and MathJax detection belong to
//!     the host application. They are reached through the [`HtmlContext`] trait, and
//!     [`DefaultContext`] provides a configuration-driven stand-in.
pub mod card;
pub mod context;
pub mod error;
pub mod front_side;
pub mod markup;
pub mod media;
pub mod resolver;
pub mod side;

pub use card::{CardData, CardHtml};
pub use context::{DefaultContext, HtmlContext};
pub use error::{RenderError, Result};
pub use markup::{compose, CardTemplate};
pub use media::{find_all, MediaKind, MediaReference, TagMatch};
pub use resolver::{SideContentSource, SideResolver};
pub use side::Side;
