use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TaggerError};
use crate::geometry::Dimensions;

/// How a tag's region is fitted into a thumbnail.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThumbnailFit {
    /// The shorter side of the region fills the thumbnail and the overflow
    /// on the other axis is centred. Wide regions scale by height, everything
    /// else by width.
    #[default]
    Cover,
    /// Wide regions scale by width, everything else (ties included) by
    /// height.
    Contain,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderWidths {
    pub left: u32,
    pub top: u32,
}

impl Default for BorderWidths {
    fn default() -> Self {
        Self { left: 2, top: 2 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggerConfig {
    /// Fixed rendered width of the widget; the height follows the image.
    pub container_width: u32,
    /// Edit mode. When false the widget is read-only.
    pub allow_draw: bool,
    pub thumbnail_size: Dimensions,
    pub thumbnail_fit: ThumbnailFit,
    /// Smallest width and height a dragged box needs to become a tag.
    pub min_tag_size: f32,
    pub displacement_layers: usize,
    pub displacement_opacity: f32,
    pub rectangle_border: BorderWidths,
    pub thumbnails_per_row: usize,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            container_width: 505,
            allow_draw: true,
            thumbnail_size: Dimensions::new(80, 80),
            thumbnail_fit: ThumbnailFit::Cover,
            min_tag_size: 20.0,
            displacement_layers: 4,
            displacement_opacity: 0.25,
            rectangle_border: BorderWidths::default(),
            thumbnails_per_row: 3,
        }
    }
}

impl TaggerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.container_width == 0 {
            return Err(TaggerError::InvalidContainer);
        }
        if self.thumbnail_size.is_empty() {
            return Err(TaggerError::InvalidThumbnail {
                width: self.thumbnail_size.width,
                height: self.thumbnail_size.height,
            });
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| TaggerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| TaggerError::Parse {
            what: "tagger config",
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: TaggerConfig =
            serde_json::from_str(r#"{ "allow_draw": false, "thumbnail_fit": "contain" }"#).unwrap();
        assert!(!config.allow_draw);
        assert_eq!(config.thumbnail_fit, ThumbnailFit::Contain);
        assert_eq!(config.container_width, 505);
        assert_eq!(config.min_tag_size, 20.0);
    }

    #[test]
    fn zero_width_container_is_rejected() {
        let config = TaggerConfig {
            container_width: 0,
            ..TaggerConfig::default()
        };
        assert!(matches!(config.validate(), Err(TaggerError::InvalidContainer)));
    }

    #[test]
    fn empty_thumbnail_is_rejected() {
        let config = TaggerConfig {
            thumbnail_size: Dimensions::new(80, 0),
            ..TaggerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TaggerError::InvalidThumbnail { width: 80, height: 0 })
        ));
    }
}
