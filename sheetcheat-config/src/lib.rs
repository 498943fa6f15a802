//! Shared configuration loader for sheetcheat.
//!
//! `defaults/sheetcheat.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top of those
//! defaults via [`Loader`] before deserializing into [`SheetcheatConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use sheetcheat_babel::CompilerOptions;
use sheetcheat_core::latex::{
    slugify_with, ArtifactNames, Identity, MathOptions, PipelineOptions, Separator, Skeleton,
};
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/sheetcheat.default.toml");

/// Top-level configuration consumed by sheetcheat applications.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetcheatConfig {
    pub identity: Identity,
    pub document: Skeleton,
    pub math: MathOptions,
    pub artifacts: ArtifactsConfig,
    pub compile: CompilerOptions,
}

/// How produced files are named.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactsConfig {
    pub prefix: String,
    pub separator: Separator,
}

impl SheetcheatConfig {
    /// Options for the normalization pipeline.
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            skeleton: self.document.clone(),
            identity: self.identity.clone(),
            math: self.math.clone(),
        }
    }

    pub fn compiler_options(&self) -> CompilerOptions {
        self.compile.clone()
    }

    /// Artifact names for `topic` under the configured prefix and separator.
    pub fn artifact_names(&self, topic: &str) -> ArtifactNames {
        ArtifactNames::for_slug(
            &self.artifacts.prefix,
            slugify_with(topic, self.artifacts.separator),
        )
    }
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

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<SheetcheatConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SheetcheatConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.identity, Identity::default());
        assert_eq!(config.document, Skeleton::default());
        assert_eq!(config.math, MathOptions::default());
        assert_eq!(config.compile, CompilerOptions::default());
        assert_eq!(config.artifacts.prefix, "cheat_sheat");
        assert_eq!(config.artifacts.separator, Separator::Underscore);
    }

    #[test]
    fn defaults_match_pipeline_defaults() {
        let config = load_defaults().unwrap();
        assert_eq!(config.pipeline_options(), PipelineOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("math.variable", "t")
            .expect("override to apply")
            .set_override("artifacts.separator", "hyphen")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.math.variable, "t");
        assert_eq!(
            config.artifact_names("Área Bajo la Curva").pdf,
            "cheat_sheat_area-bajo-la-curva.pdf"
        );
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[identity]\ntitle_prefix = \"Chuleta\"\n\n[compile]\nengines = [\"xelatex\"]"
        )
        .unwrap();
        let config = Loader::new().with_file(file.path()).build().unwrap();
        assert_eq!(config.identity.title_prefix, "Chuleta");
        assert_eq!(config.identity.attribution, "Generado con Sheet Cheat");
        assert_eq!(config.compiler_options().engines, vec!["xelatex"]);
        assert_eq!(config.compiler_options().passes, 2);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        assert!(Loader::new()
            .with_file("/nonexistent/sheetcheat.toml")
            .build()
            .is_err());
    }

    #[test]
    fn rejects_unknown_separator() {
        let result = Loader::new()
            .set_override("artifacts.separator", "slash")
            .unwrap()
            .build();
        assert!(result.is_err());
    }
}
