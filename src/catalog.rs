//! Variant catalog: the ordered list of background definitions
//!
//! The catalog is read once from a JSON array such as
//!
//! ```json
//! [
//!   { "name": "default", "color": { "rgb": "39, 40, 34", "hex": "#272822" } },
//!   { "name": "grey",    "color": { "rgb": "40, 40, 40", "hex": "#282828" } }
//! ]
//! ```
//!
//! and validated up front, so a variant that reaches the pipeline always has
//! both color representations.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::BuildError;

/// Background color of a variant in its two textual forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color {
    /// RGB triple as written in the catalog, e.g. `"39, 40, 34"`
    pub rgb: String,
    /// Hex form as written in the catalog, e.g. `"#272822"`
    pub hex: String,
}

/// One named background configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    pub color: Color,
}

impl Variant {
    pub fn new(name: impl Into<String>, rgb: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: Color {
                rgb: rgb.into(),
                hex: hex.into(),
            },
        }
    }
}

/// Ordered, validated list of variants
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    variants: Vec<Variant>,
}

#[derive(Deserialize)]
struct RawVariant {
    name: String,
    color: Option<RawColor>,
}

#[derive(Deserialize)]
struct RawColor {
    rgb: Option<String>,
    hex: Option<String>,
}

impl Catalog {
    /// Build a catalog from variants, rejecting duplicate names.
    ///
    /// Names end up in file names, so path separators and the `.`/`..`
    /// names are rejected as well.
    pub fn new(variants: Vec<Variant>) -> Result<Self, String> {
        let mut seen = HashSet::new();
        for variant in &variants {
            if variant.name.is_empty() {
                return Err("variant name must not be empty".to_string());
            }
            if variant.name.contains(['/', '\\', '\0'])
                || matches!(variant.name.as_str(), "." | "..")
            {
                return Err(format!(
                    "variant name '{}' cannot be used in a file name",
                    variant.name
                ));
            }
            if !seen.insert(variant.name.as_str()) {
                return Err(format!("duplicate variant name '{}'", variant.name));
            }
            if variant.color.rgb.is_empty() {
                return Err(format!("variant '{}' has an empty color.rgb", variant.name));
            }
            if variant.color.hex.is_empty() {
                return Err(format!("variant '{}' has an empty color.hex", variant.name));
            }
        }
        Ok(Self { variants })
    }

    /// Load the catalog from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, BuildError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BuildError::config(path, format!("cannot read catalog: {}", e)))?;
        Self::from_str(&content).map_err(|message| BuildError::config(path, message))
    }

    /// Parse the catalog from a JSON string
    pub fn from_str(content: &str) -> Result<Self, String> {
        let raw: Vec<RawVariant> =
            serde_json::from_str(content).map_err(|e| format!("invalid catalog JSON: {}", e))?;

        let variants = raw
            .into_iter()
            .map(|v| {
                let color = v
                    .color
                    .ok_or_else(|| format!("variant '{}' is missing color", v.name))?;
                let rgb = color
                    .rgb
                    .ok_or_else(|| format!("variant '{}' is missing color.rgb", v.name))?;
                let hex = color
                    .hex
                    .ok_or_else(|| format!("variant '{}' is missing color.hex", v.name))?;
                Ok(Variant::new(v.name, rgb, hex))
            })
            .collect::<Result<Vec<_>, String>>()?;

        Self::new(variants)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variant> {
        self.variants.iter()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Variant;
    type IntoIter = std::slice::Iter<'a, Variant>;

    fn into_iter(self) -> Self::IntoIter {
        self.variants.iter()
    }
}
