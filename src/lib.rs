//! Theme Variants - generate a family of editor color themes from one template
//!
//! Every background declared in the variant catalog becomes one `.tmTheme`
//! file: the template is copied, its `{{name}}`, `{{bg_rgb}}` and `{{bg_hex}}`
//! placeholders are substituted, and the result is written under a name
//! derived from the product's display name.
//!
//! # Example
//!
//! ```rust
//! use theme_variants::naming::resolve;
//!
//! assert_eq!(resolve("default", "Acme", ".tmTheme"), "Acme.tmTheme");
//! assert_eq!(resolve("night owl", "Acme", ".tmTheme"), "Acme - Night owl.tmTheme");
//! ```

pub mod build;
pub mod catalog;
pub mod config;
pub mod error;
pub mod naming;
pub mod report;
pub mod strings;
pub mod template;

pub use build::{BuildSummary, VariantPlan};
pub use catalog::{Catalog, Color, Variant};
pub use config::{BuildLayout, ProductIdentity};
pub use error::BuildError;
pub use report::{ConsoleReporter, Reporter, SilentReporter};

use std::path::{Path, PathBuf};

/// A project root with its configuration loaded
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    /// Layout with every path resolved against `root`
    pub layout: BuildLayout,
    pub identity: ProductIdentity,
    pub catalog: Catalog,
}

impl Project {
    /// Load product metadata and the variant catalog for `root`.
    ///
    /// Relative layout paths are resolved against `root`. Any missing or
    /// malformed input is a [`BuildError::Config`].
    pub fn load(root: impl Into<PathBuf>, layout: BuildLayout) -> Result<Self, BuildError> {
        let root = root.into();
        let layout = layout.resolve(&root);
        let identity = ProductIdentity::from_file(&layout.package)?;
        let catalog = Catalog::from_file(&layout.catalog)?;

        Ok(Self {
            root,
            layout,
            identity,
            catalog,
        })
    }

    /// Load `root` using its `theme-variants.toml`, or the default layout
    pub fn discover(root: impl Into<PathBuf>) -> Result<Self, BuildError> {
        let root = root.into();
        let layout = BuildLayout::discover(&root)?;
        Self::load(root, layout)
    }

    /// Per-variant names and paths, without touching the filesystem
    pub fn plan(&self) -> Result<Vec<VariantPlan>, BuildError> {
        build::plan(&self.catalog, &self.identity, &self.layout)
    }

    /// Clean stale artifacts and generate every variant
    pub fn build(&self, reporter: &mut dyn Reporter) -> Result<BuildSummary, BuildError> {
        build::run(&self.catalog, &self.identity, &self.layout, reporter)
    }
}

/// Build the project at `root` with its discovered layout
pub fn build(root: &Path, reporter: &mut dyn Reporter) -> Result<BuildSummary, BuildError> {
    Project::discover(root)?.build(reporter)
}

/// Build the project at `root` with an explicit layout
pub fn build_with_layout(
    root: &Path,
    layout: BuildLayout,
    reporter: &mut dyn Reporter,
) -> Result<BuildSummary, BuildError> {
    Project::load(root, layout)?.build(reporter)
}
