//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI owns config; the core crate only sees the recipe and options built
//! from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied by the command handlers)
//! 2. Environment variables `PROJECT_CREATOR__<SECTION>__<KEY>`
//! 3. Config file: `--config FILE`, else `./.project-creator.toml`, else
//!    the platform config directory
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use creator_adapters::RecipeSettings;
use creator_core::domain::ExistingPolicy;

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "PROJECT_CREATOR";
/// Project-local configuration file name.
pub const LOCAL_CONFIG_FILE: &str = ".project-creator.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub generator: GeneratorConfig,
    pub template: TemplateConfig,
    pub project: ProjectConfig,
    pub locale: LocaleConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Program invoked as `<program> startproject <name> <location>`.
    pub program: String,
    /// Name of the settings package the generator creates.
    pub project_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub url: String,
    /// Empty means the repository's default branch.
    pub branch: String,
    pub shallow: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub existing: ExistingPolicy,
    pub keep_on_failure: bool,
    pub env_example: String,
    pub env_file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    pub language_code: String,
    pub time_zone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let recipe = RecipeSettings::default();
        Self {
            generator: GeneratorConfig {
                program: recipe.generator_program,
                project_name: recipe.project_name,
            },
            template: TemplateConfig {
                url: recipe.template_url,
                branch: recipe.template_branch.unwrap_or_default(),
                shallow: recipe.shallow_clone,
            },
            project: ProjectConfig {
                existing: ExistingPolicy::default(),
                keep_on_failure: false,
                env_example: recipe.env_example,
                env_file: recipe.env_file,
            },
            locale: LocaleConfig {
                language_code: recipe.language_code,
                time_zone: recipe.time_zone,
            },
            output: OutputConfig::default(),
        }
    }
}

macro_rules! section_default {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(
            impl Default for $ty {
                fn default() -> Self {
                    AppConfig::default().$field
                }
            }
        )*
    };
}

section_default!(
    GeneratorConfig => generator,
    TemplateConfig => template,
    ProjectConfig => project,
    LocaleConfig => locale,
);

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then file, then environment.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default()).context("Failed to build defaults")?;
        let mut builder = Config::builder().add_source(defaults);

        match config_file {
            Some(path) => {
                builder = builder.add_source(toml_file(path).required(true));
            }
            None => {
                if let Some(path) = Self::discover() {
                    builder = builder.add_source(toml_file(&path).required(false));
                }
            }
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// The config file used when `--config` is absent, if any exists.
    pub fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }
        let global = Self::config_path();
        global.is_file().then_some(global)
    }

    /// Path to the user-wide configuration file.
    ///
    /// Uses `directories::ProjectDirs`, falling back to the local file
    /// name when no home directory is known.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "arielcalzada", "project-creator")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Settings for the built-in Django recipe.
    pub fn recipe_settings(&self) -> RecipeSettings {
        RecipeSettings {
            generator_program: self.generator.program.clone(),
            project_name: self.generator.project_name.clone(),
            template_url: self.template.url.clone(),
            template_branch: Some(self.template.branch.clone()).filter(|b| !b.trim().is_empty()),
            shallow_clone: self.template.shallow,
            env_example: self.project.env_example.clone(),
            env_file: self.project.env_file.clone(),
            language_code: self.locale.language_code.clone(),
            time_zone: self.locale.time_zone.clone(),
        }
    }

    /// Look up a dotted key such as `template.url`.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let mut value = serde_json::to_value(self).ok()?;
        for part in key.split('.') {
            value = value.get_mut(part)?.take();
        }
        Some(value)
    }

    /// Every leaf key, dotted, sorted by section.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        if let Ok(serde_json::Value::Object(sections)) = serde_json::to_value(self) {
            for (section, fields) in sections {
                if let serde_json::Value::Object(fields) = fields {
                    keys.extend(fields.keys().map(|k| format!("{section}.{k}")));
                }
            }
        }
        keys
    }
}

fn toml_file(path: &Path) -> File<config::FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml)
}
