//! Rendering collaborators
//!
//! Play-button expansion, stylesheet lookup and MathJax detection are owned by the host
//! application. [`HtmlContext`] is the seam through which a [`CardHtml`](crate::CardHtml)
//! reaches them.

use crate::markup::CardTemplate;
use once_cell::sync::Lazy;
use regex::Regex;

static MATHJAX_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\\\(.*?\\\)|\\\[.*?\\\]").expect("mathjax pattern is valid")
});

/// Whether `content` contains an inline `\(...\)` or display `\[...\]` MathJax span.
pub fn contains_mathjax(content: &str) -> bool {
    MATHJAX_PATTERN.is_match(content)
}

/// Everything a card render needs from the surrounding application.
pub trait HtmlContext {
    /// The note type's stylesheet.
    fn style(&self) -> &str;

    /// CSS classes for a card with the given one-based template ordinal.
    fn card_class(&self, ordinal: u32) -> String;

    /// The shell the composed markup is rendered into.
    fn template(&self) -> &CardTemplate;

    /// Turn `[sound:...]` tags into playable markup. Leaves the content untouched by default.
    fn expand_sounds(&self, content: &str) -> String {
        content.to_string()
    }

    fn requires_mathjax(&self, content: &str) -> bool {
        contains_mathjax(content)
    }
}

/// A self-contained [`HtmlContext`] driven by plain settings.
#[derive(Debug, Clone, Default)]
pub struct DefaultContext {
    style: String,
    night_mode: bool,
    template: CardTemplate,
}

impl DefaultContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn with_night_mode(mut self, night_mode: bool) -> Self {
        self.night_mode = night_mode;
        self
    }

    pub fn with_template(mut self, template: CardTemplate) -> Self {
        self.template = template;
        self
    }
}

impl HtmlContext for DefaultContext {
    fn style(&self) -> &str {
        &self.style
    }

    fn card_class(&self, ordinal: u32) -> String {
        if self.night_mode {
            format!("card card{ordinal} nightMode night_mode")
        } else {
            format!("card card{ordinal}")
        }
    }

    fn template(&self) -> &CardTemplate {
        &self.template
    }
}
