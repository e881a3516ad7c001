//! Render settings
//!
//! Optional JSON file; every field falls back to its default when absent.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settings for the SVG scene writer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Documents ===
    /// viewBox edge length for the .geo document
    pub geo_view_box: f64,
    /// viewBox edge length for the .geo + .qry document
    pub qry_view_box: f64,

    // === Annotations ===
    /// Stroke color of the dashed trajectory line and landing marker
    pub trajectory_color: String,
    /// Stroke color of the dimension guides and their labels
    pub guide_color: String,
    /// Radius of the landing marker
    pub marker_radius: f64,
    /// Font size of the dx/dy labels
    pub label_font_size: f64,
    /// Distance of the dx label above the horizontal guide
    pub dx_label_offset: f64,
    /// Distance of the dy label to the right of the vertical guide
    pub dy_label_offset: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            geo_view_box: 1000.0,
            qry_view_box: 10000.0,

            trajectory_color: "red".to_string(),
            guide_color: "purple".to_string(),
            marker_radius: 3.0,
            label_font_size: 12.0,
            dx_label_offset: 5.0,
            dy_label_offset: 10.0,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Ok(Self::default());
        };

        let json = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&json).map_err(|source| Error::Settings {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_no_path_gives_defaults() {
        assert_eq!(Settings::load(None).unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "trajectory_color": "orange", "qry_view_box": 500 }}"#).unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.trajectory_color, "orange");
        assert_eq!(settings.qry_view_box, 500.0);
        assert_eq!(settings.guide_color, "purple");
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            Settings::load(Some(file.path())),
            Err(Error::Settings { .. })
        ));
    }
}
