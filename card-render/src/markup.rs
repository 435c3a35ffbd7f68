//! Markup composition
//!
//! The final markup of a side is the card template shell with four slots filled in:
//!
//! | placeholder   | value                                                    |
//! |---------------|----------------------------------------------------------|
//! | `::content::` | the side's content wrapped in `<div id="qa">`            |
//! | `::style::`   | the note type's stylesheet                               |
//! | `::script::`  | empty, or the MathJax script includes                    |
//! | `::class::`   | the card's CSS classes                                   |
//!
//! Templates are split into segments once at parse time, so values that happen to contain
//! a placeholder are inserted verbatim and never expanded a second time.

use crate::error::{RenderError, Result};
use once_cell::sync::Lazy;
use std::fs;
use std::path::Path;

const DEFAULT_TEMPLATE: &str = include_str!("../assets/card_template.html");

static DEFAULT_SHELL: Lazy<CardTemplate> = Lazy::new(|| {
    CardTemplate::parse(DEFAULT_TEMPLATE).expect("embedded card template has every placeholder")
});

/// Script includes emitted when the content needs MathJax.
pub const MATHJAX_SCRIPTS: &str = r#"        <script src="/assets/mathjax/conf.js"> </script>
        <script src="/assets/mathjax/tex-chtml.js"> </script>"#;

/// Class appended to the card class when MathJax still has to typeset the content.
pub const MATHJAX_CLASS: &str = "mathjax-needs-to-render";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    Content,
    Style,
    Script,
    Class,
}

impl Placeholder {
    const ALL: [Placeholder; 4] = [
        Placeholder::Content,
        Placeholder::Style,
        Placeholder::Script,
        Placeholder::Class,
    ];

    fn marker(self) -> &'static str {
        match self {
            Placeholder::Content => "::content::",
            Placeholder::Style => "::style::",
            Placeholder::Script => "::script::",
            Placeholder::Class => "::class::",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Slot(Placeholder),
}

/// A parsed card template shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardTemplate {
    segments: Vec<Segment>,
}

impl CardTemplate {
    /// Parse a shell. Every placeholder must appear at least once.
    pub fn parse(source: &str) -> Result<Self> {
        for placeholder in Placeholder::ALL {
            if !source.contains(placeholder.marker()) {
                return Err(RenderError::Template(format!(
                    "missing placeholder '{}'",
                    placeholder.marker()
                )));
            }
        }

        let mut segments = Vec::new();
        let mut rest = source;
        while let Some((start, placeholder)) = next_placeholder(rest) {
            if start > 0 {
                segments.push(Segment::Text(rest[..start].to_string()));
            }
            segments.push(Segment::Slot(placeholder));
            rest = &rest[start + placeholder.marker().len()..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }

        Ok(Self { segments })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::parse(&source)
    }

    /// The built-in shell source.
    pub fn default_source() -> &'static str {
        DEFAULT_TEMPLATE
    }

    /// Fill the shell. Any value may be empty.
    pub fn render(&self, content: &str, style: &str, script: &str, card_class: &str) -> String {
        let content = enrich_with_qa_div(content);
        let mut out = String::with_capacity(
            self.segments
                .iter()
                .map(|segment| match segment {
                    Segment::Text(text) => text.len(),
                    Segment::Slot(_) => 0,
                })
                .sum::<usize>()
                + content.len()
                + style.len()
                + script.len()
                + card_class.len(),
        );

        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(Placeholder::Content) => out.push_str(&content),
                Segment::Slot(Placeholder::Style) => out.push_str(style),
                Segment::Slot(Placeholder::Script) => out.push_str(script),
                Segment::Slot(Placeholder::Class) => out.push_str(card_class),
            }
        }
        out
    }
}

impl Default for CardTemplate {
    fn default() -> Self {
        DEFAULT_SHELL.clone()
    }
}

fn next_placeholder(text: &str) -> Option<(usize, Placeholder)> {
    Placeholder::ALL
        .iter()
        .filter_map(|placeholder| text.find(placeholder.marker()).map(|pos| (pos, *placeholder)))
        .min_by_key(|(pos, _)| *pos)
}

/// Compose markup with the built-in shell.
pub fn compose(content: &str, style: &str, script: &str, card_class: &str) -> String {
    DEFAULT_SHELL.render(content, style, script, card_class)
}

/// Surround content with the container the viewer uses to locate the question/answer.
pub fn enrich_with_qa_div(content: &str) -> String {
    format!(r#"<div id="qa">{content}</div>"#)
}

pub fn script_block(requires_mathjax: bool) -> &'static str {
    if requires_mathjax {
        MATHJAX_SCRIPTS
    } else {
        ""
    }
}

/// Normalize semi-bold text produced by some editors to regular bold.
pub fn fix_bold_style(content: &str) -> String {
    content.replace("font-weight:600;", "font-weight:700;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    const SHELL: &str = r#"<body class="::class::">::content::<style>::style::</style>::script::</body>"#;

    #[test]
    fn renders_into_custom_shell() {
        let template = CardTemplate::parse(SHELL).unwrap();
        let html = template.render("X", "body{}", "", "card card1");
        assert_snapshot!(html, @r#"<body class="card card1"><div id="qa">X</div><style>body{}</style></body>"#);
    }

    #[test]
    fn default_compose_without_script() {
        let html = compose("X", "body{}", script_block(false), "card1");
        assert!(html.contains(r#"<div id="qa">X</div>"#));
        assert!(html.contains("body{}"));
        assert!(html.contains(r#"class="card1""#));
        assert!(!html.contains("<script"));
        assert!(html.find(r#"<div id="qa">"#) > html.find("body{}"));
    }

    #[test]
    fn default_template_is_the_embedded_shell() {
        let template = CardTemplate::default();
        assert_eq!(template, CardTemplate::parse(CardTemplate::default_source()).unwrap());
        assert_eq!(
            template.render("X", "body{}", "", "card1"),
            compose("X", "body{}", "", "card1")
        );
        for placeholder in Placeholder::ALL {
            assert!(template
                .segments
                .contains(&Segment::Slot(placeholder)));
        }
    }

    #[test]
    fn mathjax_scripts_are_included_when_required() {
        let html = compose("", "", script_block(true), "");
        assert!(html.contains(r#"<script src="/assets/mathjax/conf.js"> </script>"#));
        assert!(html.contains(r#"<script src="/assets/mathjax/tex-chtml.js"> </script>"#));
    }

    #[test]
    fn empty_inputs_are_accepted() {
        let template = CardTemplate::parse(SHELL).unwrap();
        assert_eq!(
            template.render("", "", "", ""),
            r#"<body class=""><div id="qa"></div><style></style></body>"#
        );
    }

    #[test]
    fn values_containing_placeholders_are_not_expanded() {
        let template = CardTemplate::parse(SHELL).unwrap();
        let html = template.render("::style::", "s", "", "c");
        assert!(html.contains(r#"<div id="qa">::style::</div>"#));
    }

    #[test]
    fn repeated_placeholders_are_all_filled() {
        let template =
            CardTemplate::parse("::class::|::content::|::style::|::script::|::class::").unwrap();
        assert_eq!(
            template.render("c", "s", "j", "k"),
            r#"k|<div id="qa">c</div>|s|j|k"#
        );
    }

    #[test]
    fn rejects_shell_missing_placeholder() {
        let err = CardTemplate::parse("::content:: ::style:: ::class::").unwrap_err();
        assert!(matches!(err, RenderError::Template(msg) if msg.contains("::script::")));
    }

    #[test]
    fn loads_template_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shell.html");
        fs::write(&path, SHELL).unwrap();
        assert_eq!(
            CardTemplate::from_file(&path).unwrap(),
            CardTemplate::parse(SHELL).unwrap()
        );
        assert!(matches!(
            CardTemplate::from_file(dir.path().join("missing.html")),
            Err(RenderError::Io(_))
        ));
    }

    #[test]
    fn fixes_semi_bold() {
        assert_eq!(
            fix_bold_style(r#"<span style="font-weight:600;">b</span>"#),
            r#"<span style="font-weight:700;">b</span>"#
        );
    }
}
