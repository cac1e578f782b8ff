//! Placeholder bindings for one variant

use std::collections::BTreeMap;

use crate::catalog::Variant;
use crate::config::ProductIdentity;
use crate::naming;

/// Artifact display name, without extension
pub const NAME: &str = "{{name}}";
/// Background color as an RGB triple
pub const BG_RGB: &str = "{{bg_rgb}}";
/// Background color in hex
pub const BG_HEX: &str = "{{bg_hex}}";

/// Placeholder token -> replacement text
pub type SubstitutionMap = BTreeMap<String, String>;

/// Bind the placeholders for `variant`.
///
/// Always yields exactly the three entries `{{name}}`, `{{bg_rgb}}` and
/// `{{bg_hex}}`.
pub fn bind(variant: &Variant, identity: &ProductIdentity) -> SubstitutionMap {
    BTreeMap::from([
        (
            NAME.to_string(),
            naming::resolve(&variant.name, &identity.humanized, ""),
        ),
        (BG_RGB.to_string(), variant.color.rgb.clone()),
        (BG_HEX.to_string(), variant.color.hex.clone()),
    ])
}
