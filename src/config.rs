//! Project configuration: product identity and build layout

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::BuildError;

/// Layout file looked up in the project root when none is given
pub const LAYOUT_FILE: &str = "theme-variants.toml";

/// Organisation used to derive a repository reference when none is declared
const DEFAULT_REPOSITORY_OWNER: &str = "https://github.com/centril";

/// Product metadata read from `package.json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductIdentity {
    /// Package name
    pub name: String,
    /// Current version
    pub version: String,
    /// Display name, the base of every artifact name
    pub humanized: String,
    /// Repository reference shown in the build header
    pub repository: String,
}

#[derive(Deserialize)]
struct RawPackage {
    name: String,
    version: String,
    humanized: String,
    repository: Option<RawRepository>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRepository {
    Url(String),
    Object { url: String },
}

impl ProductIdentity {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        humanized: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            repository: format!("{}/{}", DEFAULT_REPOSITORY_OWNER, name),
            name,
            version: version.into(),
            humanized: humanized.into(),
        }
    }

    /// Set the repository reference
    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = repository.into();
        self
    }

    /// Load product identity from a `package.json` file
    pub fn from_file(path: &Path) -> Result<Self, BuildError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BuildError::config(path, format!("cannot read package metadata: {}", e)))?;
        Self::from_str(&content).map_err(|message| BuildError::config(path, message))
    }

    /// Parse product identity from a `package.json` string
    pub fn from_str(content: &str) -> Result<Self, String> {
        let raw: RawPackage = serde_json::from_str(content)
            .map_err(|e| format!("invalid package metadata: {}", e))?;

        if raw.humanized.is_empty() {
            return Err("field `humanized` must not be empty".to_string());
        }

        let identity = Self::new(raw.name, raw.version, raw.humanized);
        Ok(match raw.repository {
            Some(RawRepository::Url(url)) | Some(RawRepository::Object { url }) => {
                identity.with_repository(url)
            }
            None => identity,
        })
    }
}

/// Where inputs are read from and outputs are written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    /// Product metadata file
    pub package: PathBuf,
    /// Variant catalog file
    pub catalog: PathBuf,
    /// Directory holding the template
    pub template_dir: PathBuf,
    /// Template file name inside `template_dir`
    pub template: String,
    /// Working directory for staged copies
    pub staging_dir: PathBuf,
    /// Directory receiving the finished theme files
    pub output_dir: PathBuf,
    /// Theme file extension, including the leading dot
    pub extension: String,
    /// File the layout was read from, if any
    pub source: Option<PathBuf>,
}

impl Default for BuildLayout {
    fn default() -> Self {
        Self {
            package: PathBuf::from("package.json"),
            catalog: PathBuf::from("backgrounds.json"),
            template_dir: PathBuf::from("templates"),
            template: "template.hidden-tmTheme".to_string(),
            staging_dir: PathBuf::from(".staging"),
            output_dir: PathBuf::from("."),
            extension: ".tmTheme".to_string(),
            source: None,
        }
    }
}

/// TOML structure for deserializing layout files
#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlLayout {
    #[serde(default)]
    paths: TomlPaths,
    #[serde(default)]
    output: TomlOutput,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlPaths {
    package: Option<PathBuf>,
    catalog: Option<PathBuf>,
    templates: Option<PathBuf>,
    template: Option<String>,
    staging: Option<PathBuf>,
    output: Option<PathBuf>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlOutput {
    extension: Option<String>,
}

impl BuildLayout {
    /// Create a layout with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a layout from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, BuildError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BuildError::config(path, format!("cannot read layout: {}", e)))?;
        let layout =
            Self::from_str(&content).map_err(|message| BuildError::config(path, message))?;
        Ok(Self {
            source: Some(path.to_path_buf()),
            ..layout
        })
    }

    /// Load `theme-variants.toml` from `root` if present, defaults otherwise
    pub fn discover(root: &Path) -> Result<Self, BuildError> {
        let path = root.join(LAYOUT_FILE);
        if path.is_file() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse a layout from a TOML string; missing keys keep their defaults
    pub fn from_str(content: &str) -> Result<Self, String> {
        let parsed: TomlLayout =
            toml::from_str(content).map_err(|e| format!("invalid layout TOML: {}", e))?;
        let defaults = Self::default();
        let paths = parsed.paths;

        let layout = Self {
            package: paths.package.unwrap_or(defaults.package),
            catalog: paths.catalog.unwrap_or(defaults.catalog),
            template_dir: paths.templates.unwrap_or(defaults.template_dir),
            template: paths.template.unwrap_or(defaults.template),
            staging_dir: paths.staging.unwrap_or(defaults.staging_dir),
            output_dir: paths.output.unwrap_or(defaults.output_dir),
            extension: parsed.output.extension.unwrap_or(defaults.extension),
            source: None,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Check invariants that TOML parsing and the builder methods cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.template.is_empty() {
            return Err("template file name must not be empty".to_string());
        }
        if !self.extension.starts_with('.') || self.extension.len() < 2 {
            return Err(format!(
                "output extension '{}' must start with '.' and name a suffix",
                self.extension
            ));
        }
        if self.staging_dir == self.template_dir {
            return Err("staging directory must differ from the template directory".to_string());
        }
        // Cleaning the output directory would otherwise reach the template
        if self.output_dir == self.template_dir {
            return Err("output directory must differ from the template directory".to_string());
        }
        Ok(())
    }

    /// Where layout errors are reported: the layout file, or its default name
    pub fn origin(&self) -> &Path {
        self.source.as_deref().unwrap_or(Path::new(LAYOUT_FILE))
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the staging directory
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }

    /// Set the template directory
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = dir.into();
        self
    }

    /// Set the template file name
    pub fn with_template(mut self, name: impl Into<String>) -> Self {
        self.template = name.into();
        self
    }

    /// Set the theme file extension
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Path of the template file
    pub fn template_path(&self) -> PathBuf {
        self.template_dir.join(&self.template)
    }

    /// Make every relative path absolute against `root`
    pub fn resolve(&self, root: &Path) -> Self {
        Self {
            package: root.join(&self.package),
            catalog: root.join(&self.catalog),
            template_dir: root.join(&self.template_dir),
            template: self.template.clone(),
            staging_dir: root.join(&self.staging_dir),
            output_dir: root.join(&self.output_dir),
            extension: self.extension.clone(),
            source: self.source.clone(),
        }
    }
}
