use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TaggerError};
use crate::geometry::{Dimensions, Rect};

// ── Data Model ──────────────────────────────────────────────────────────────

pub type TagId = u32;

/// A labelled region of an image, in rendered-pixel space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    #[serde(default)]
    pub title: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Tag {
    /// Build a tag from a committed rectangle. Coordinates are truncated the
    /// same way the rectangle's integer position would be read back.
    pub fn from_rect(id: TagId, rect: Rect) -> Self {
        Self {
            id,
            title: String::new(),
            x: rect.left.max(0.0) as u32,
            y: rect.top.max(0.0) as u32,
            width: rect.width.max(0.0) as u32,
            height: rect.height.max(0.0) as u32,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.x as f32,
            self.y as f32,
            self.width as f32,
            self.height as f32,
        )
    }
}

/// One picture of an image. Only the first snap is ever rendered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snap {
    pub url: String,
    pub image_dimensions: Dimensions,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    pub image_url: String,
    pub image_dimensions: Dimensions,
    #[serde(default)]
    pub snaps: Vec<Snap>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl ImageData {
    /// Image with a single snap and no tags.
    pub fn new(url: impl Into<String>, dimensions: Dimensions) -> Self {
        let url = url.into();
        Self {
            image_url: url.clone(),
            image_dimensions: dimensions,
            snaps: vec![Snap {
                url,
                image_dimensions: dimensions,
            }],
            tags: Vec::new(),
        }
    }

    /// The bundled example shown when no image data is supplied.
    pub fn example() -> Self {
        Self::new("images/tagger_example.png", Dimensions::new(505, 340))
    }

    /// The snap that gets rendered, falling back to the image's own url and
    /// dimensions when the snap list is empty.
    pub fn primary_snap(&self) -> Snap {
        self.snaps.first().cloned().unwrap_or_else(|| Snap {
            url: self.image_url.clone(),
            image_dimensions: self.image_dimensions,
        })
    }

    pub fn validate(&self) -> Result<()> {
        let snap = self.primary_snap();
        if snap.image_dimensions.is_empty() {
            return Err(TaggerError::InvalidImageDimensions {
                url: snap.url,
                width: snap.image_dimensions.width,
                height: snap.image_dimensions.height,
            });
        }
        Ok(())
    }

    /// Image backed by a file on disk, sized from the file's header.
    pub fn from_image_file(path: &Path) -> Result<Self> {
        let (width, height) =
            image::image_dimensions(path).map_err(|source| TaggerError::Image {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(
            path.to_string_lossy().into_owned(),
            Dimensions::new(width, height),
        ))
    }

    pub fn from_json_str(json: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| TaggerError::Parse {
            what: "image data",
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| TaggerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw, path)
    }

    pub fn tag(&self, id: TagId) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.id == id)
    }

    pub fn tag_mut(&mut self, id: TagId) -> Option<&mut Tag> {
        self.tags.iter_mut().find(|tag| tag.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_original_json_shape() {
        let json = r#"{
            "imageUrl": "/images/tagger_example.png",
            "imageDimensions": { "width": 505, "height": 340 },
            "snaps": [{
                "url": "/images/tagger_example.png",
                "imageDimensions": { "width": 505, "height": 340 }
            }],
            "tags": [{ "id": 0, "x": 12, "y": 30, "width": 40, "height": 25 }]
        }"#;
        let image = ImageData::from_json_str(json, Path::new("inline.json")).unwrap();
        assert_eq!(image.primary_snap().image_dimensions, Dimensions::new(505, 340));
        assert_eq!(image.tags.len(), 1);
        assert_eq!(image.tags[0].title, "");
    }

    #[test]
    fn missing_tags_default_to_empty() {
        let json = r#"{ "imageUrl": "a.png", "imageDimensions": { "width": 4, "height": 3 } }"#;
        let image = ImageData::from_json_str(json, Path::new("inline.json")).unwrap();
        assert!(image.tags.is_empty());
        assert_eq!(image.primary_snap().url, "a.png");
    }

    #[test]
    fn zero_sized_images_are_rejected() {
        let image = ImageData::new("blank.png", Dimensions::new(0, 340));
        assert!(matches!(
            image.validate(),
            Err(TaggerError::InvalidImageDimensions { width: 0, .. })
        ));
    }

    #[test]
    fn tag_from_rect_truncates() {
        let tag = Tag::from_rect(3, Rect::new(10.7, 4.2, 33.9, 20.0));
        assert_eq!((tag.x, tag.y, tag.width, tag.height), (10, 4, 33, 20));
        assert_eq!(tag.id, 3);
    }
}
