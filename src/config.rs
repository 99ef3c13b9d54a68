//! TOML-based site files and built-in preset sites.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::{self, DeviceKind};
use crate::site::types::{DeviceSelection, MAX_QUANTITY_PER_DEVICE, SiteConfig};

/// A site described in TOML.
///
/// ```toml
/// name = "Pilot site"
///
/// [[selection]]
/// device = "megapack"
/// quantity = 2
/// ```
///
/// Load with [`SiteFile::from_toml_file`] or pick a preset with
/// [`SiteFile::from_preset`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteFile {
    /// Optional display name, used as the default session name.
    #[serde(default)]
    pub name: Option<String>,
    /// Device selections in placement order.
    #[serde(default, rename = "selection")]
    pub selections: Vec<SelectionEntry>,
}

/// One `[[selection]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectionEntry {
    /// Catalog device id.
    pub device: String,
    /// Number of units.
    pub quantity: u32,
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"selection[0].device"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl SiteFile {
    /// Available preset names.
    pub const PRESETS: &[&str] = &["empty", "starter", "mixed", "utility"];

    fn with(name: &str, entries: &[(&str, u32)]) -> Self {
        Self {
            name: Some(name.to_string()),
            selections: entries
                .iter()
                .map(|&(device, quantity)| SelectionEntry {
                    device: device.to_string(),
                    quantity,
                })
                .collect(),
        }
    }

    /// Returns the empty site.
    pub fn empty() -> Self {
        Self::with("empty", &[])
    }

    /// Four PowerPacks: the smallest useful site.
    pub fn starter() -> Self {
        Self::with("starter", &[("powerpack", 4)])
    }

    /// One unit of every selectable device.
    pub fn mixed() -> Self {
        let entries: Vec<(&str, u32)> = catalog::selectable().map(|d| (d.id, 1)).collect();
        Self::with("mixed", &entries)
    }

    /// Utility-scale site built from the large Megapack variants.
    pub fn utility() -> Self {
        Self::with("utility", &[("megapack-xl", 6), ("megapack-2", 4)])
    }

    /// Loads a site from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "empty" => Ok(Self::empty()),
            "starter" => Ok(Self::starter()),
            "mixed" => Ok(Self::mixed()),
            "utility" => Ok(Self::utility()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a site from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "site".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a site from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Converts the file's selections into the engine's input shape.
    pub fn site_config(&self) -> SiteConfig {
        SiteConfig::new(
            self.selections
                .iter()
                .map(|e| DeviceSelection::new(e.device.clone(), e.quantity))
                .collect(),
        )
    }

    /// Validates all selections and returns a list of errors.
    ///
    /// The layout engine silently skips unknown ids; this check exists so
    /// that a typo in a hand-written file is reported instead of vanishing.
    pub fn validate(&self) -> Vec<ConfigError> {
        validate_selections(&self.site_config().selections)
    }
}

/// Boundary checks for selections arriving from files, links, or sessions.
///
/// Returns an empty vector if every entry names a selectable device with a
/// quantity in `1..=MAX_QUANTITY_PER_DEVICE`.
pub fn validate_selections(selections: &[DeviceSelection]) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    for (i, sel) in selections.iter().enumerate() {
        match DeviceKind::from_id(&sel.device_id) {
            None => errors.push(ConfigError {
                field: format!("selection[{i}].device"),
                message: format!(
                    "unknown device \"{}\", available: {}",
                    sel.device_id,
                    catalog::selectable()
                        .map(|d| d.id)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            }),
            Some(kind) if !kind.is_selectable() => errors.push(ConfigError {
                field: format!("selection[{i}].device"),
                message: format!(
                    "\"{}\" is added automatically and cannot be selected",
                    sel.device_id
                ),
            }),
            Some(_) => {}
        }

        if sel.quantity == 0 {
            errors.push(ConfigError {
                field: format!("selection[{i}].quantity"),
                message: "must be > 0".into(),
            });
        } else if sel.quantity > MAX_QUANTITY_PER_DEVICE {
            errors.push(ConfigError {
                field: format!("selection[{i}].quantity"),
                message: format!("must be <= {MAX_QUANTITY_PER_DEVICE}"),
            });
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_preset_starter() {
        let cfg = SiteFile::from_preset("starter");
        assert!(cfg.is_ok());
        let site = cfg.map(|c| c.site_config()).unwrap_or_default();
        assert_eq!(site.selections, vec![DeviceSelection::new("powerpack", 4)]);
    }

    #[test]
    fn from_preset_unknown() {
        let err = SiteFile::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in SiteFile::PRESETS {
            let cfg = SiteFile::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn mixed_preset_has_every_device_once() {
        let site = SiteFile::mixed().site_config();
        assert_eq!(site.selections.len(), 4);
        assert!(site.selections.iter().all(|s| s.quantity == 1));
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
name = "Pilot site"

[[selection]]
device = "megapack-xl"
quantity = 2

[[selection]]
device = "powerpack"
quantity = 3
"#;
        let cfg = SiteFile::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.as_ref().err());
        let cfg = cfg.ok();
        assert_eq!(
            cfg.as_ref().and_then(|c| c.name.as_deref()),
            Some("Pilot site")
        );
        assert_eq!(
            cfg.map(|c| c.site_config().selections),
            Some(vec![
                DeviceSelection::new("megapack-xl", 2),
                DeviceSelection::new("powerpack", 3),
            ])
        );
    }

    #[test]
    fn empty_toml_is_empty_site() {
        let cfg = SiteFile::from_toml_str("");
        assert!(cfg.is_ok());
        assert!(cfg.map(|c| c.selections.is_empty()).unwrap_or(false));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[[selection]]
device = "megapack"
quantity = 1
rotation = 90
"#;
        assert!(SiteFile::from_toml_str(toml).is_err());
    }

    #[test]
    fn negative_quantity_is_rejected_by_parser() {
        let toml = r#"
[[selection]]
device = "megapack"
quantity = -1
"#;
        assert!(SiteFile::from_toml_str(toml).is_err());
    }

    #[test]
    fn validation_catches_unknown_device() {
        let errors = validate_selections(&[DeviceSelection::new("flux-capacitor", 1)]);
        assert!(errors.iter().any(|e| e.field == "selection[0].device"));
    }

    #[test]
    fn validation_rejects_transformer_selection() {
        let errors = validate_selections(&[DeviceSelection::new("transformer", 1)]);
        assert!(errors.iter().any(|e| e.message.contains("automatically")));
    }

    #[test]
    fn validation_catches_quantity_bounds() {
        let errors = validate_selections(&[
            DeviceSelection::new("megapack", 0),
            DeviceSelection::new("powerpack", MAX_QUANTITY_PER_DEVICE + 1),
        ]);
        assert!(errors.iter().any(|e| e.field == "selection[0].quantity"));
        assert!(errors.iter().any(|e| e.field == "selection[1].quantity"));
    }

    #[test]
    fn config_error_display() {
        let e = ConfigError {
            field: "selection[0].device".into(),
            message: "bad".into(),
        };
        assert_eq!(e.to_string(), "config error: selection[0].device — bad");
    }
}
