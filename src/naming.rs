//! Artifact naming for theme variants

use crate::strings::capitalize;

/// Variant name that produces the unsuffixed artifact
pub const DEFAULT_VARIANT: &str = "default";

/// Separator between the product name and the variant suffix
const SUFFIX_SEPARATOR: &str = " - ";

/// Compute the artifact name for a variant.
///
/// The `default` variant maps to `base` itself; every other variant is
/// suffixed with its capitalized name. `extension` is appended verbatim and
/// may be empty.
///
/// # Example
///
/// ```rust
/// use theme_variants::naming::resolve;
///
/// assert_eq!(resolve("default", "Acme", ".tmTheme"), "Acme.tmTheme");
/// assert_eq!(resolve("night owl", "Acme", ""), "Acme - Night owl");
/// ```
pub fn resolve(variant: &str, base: &str, extension: &str) -> String {
    if variant == DEFAULT_VARIANT {
        format!("{}{}", base, extension)
    } else {
        format!(
            "{}{}{}{}",
            base,
            SUFFIX_SEPARATOR,
            capitalize(variant),
            extension
        )
    }
}
