//! Shared configuration loader for the cardhtml toolchain.
//!
//! `defaults/cardhtml.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`CardConfig`].

use card_render::{CardTemplate, DefaultContext, RenderError};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/cardhtml.default.toml");

/// Top-level configuration consumed by cardhtml applications.
#[derive(Debug, Clone, Deserialize)]
pub struct CardConfig {
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

/// Inputs of the rendering collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub night_mode: bool,
    pub style: String,
    #[serde(default)]
    pub style_path: Option<String>,
    #[serde(default)]
    pub template_path: Option<String>,
}

impl RenderConfig {
    /// Build the rendering context, reading the stylesheet and template files when configured.
    pub fn to_context(&self) -> Result<DefaultContext, RenderError> {
        let style = match &self.style_path {
            Some(path) => fs::read_to_string(path)?,
            None => self.style.clone(),
        };
        let template = match &self.template_path {
            Some(path) => CardTemplate::from_file(path)?,
            None => CardTemplate::default(),
        };

        Ok(DefaultContext::new()
            .with_style(style)
            .with_night_mode(self.night_mode)
            .with_template(template))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<CardConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<CardConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_render::HtmlContext;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(!config.render.night_mode);
        assert!(config.render.style.contains(".card"));
        assert_eq!(config.render.style_path, None);
        assert_eq!(config.render.template_path, None);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("render.night_mode", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(config.render.night_mode);
    }

    #[test]
    fn layers_user_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cardhtml.toml");
        fs::write(&path, "[render]\nstyle = \"body{}\"\n").unwrap();

        let config = Loader::new().with_file(&path).build().unwrap();
        assert_eq!(config.render.style, "body{}");
        assert!(!config.render.night_mode);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Loader::new()
            .with_file(dir.path().join("absent.toml"))
            .build()
            .is_err());
        assert!(Loader::new()
            .with_optional_file(dir.path().join("absent.toml"))
            .build()
            .is_ok());
    }

    #[test]
    fn context_reads_configured_files() {
        let dir = tempfile::tempdir().unwrap();
        let css = dir.path().join("card.css");
        fs::write(&css, ".card{color:blue}").unwrap();
        let shell = dir.path().join("shell.html");
        fs::write(&shell, "<i class=\"::class::\">::content::::style::::script::</i>").unwrap();

        let config = Loader::new()
            .set_override("render.style_path", css.to_string_lossy().to_string())
            .unwrap()
            .set_override("render.template_path", shell.to_string_lossy().to_string())
            .unwrap()
            .build()
            .unwrap();
        let context = config.render.to_context().unwrap();

        assert_eq!(context.style(), ".card{color:blue}");
        assert_eq!(
            context.template().render("X", "s", "", "c"),
            "<i class=\"c\"><div id=\"qa\">X</div>s</i>"
        );
    }

    #[test]
    fn context_reports_bad_template() {
        let dir = tempfile::tempdir().unwrap();
        let shell = dir.path().join("shell.html");
        fs::write(&shell, "::content::").unwrap();

        let config = Loader::new()
            .set_override("render.template_path", shell.to_string_lossy().to_string())
            .unwrap()
            .build()
            .unwrap();
        assert!(matches!(
            config.render.to_context(),
            Err(RenderError::Template(_))
        ));
    }
}
