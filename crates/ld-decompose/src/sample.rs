//! Single-image loaders: the bundled sample and direct uploads.

use crate::config::DecomposeConfig;
use crate::error::DecomposeError;
use crate::probe::ImageProbe;
use crate::source::SourceImage;
use kurbo::Point;
use ld_core::{ImageRef, LayerId};
use ld_editor::Editor;

pub const SAMPLE_PATH: &str = "/samples/cover.webp";
pub const SAMPLE_LAYER_NAME: &str = "Sample Cover";

/// Where single loaded images are placed.
pub const DROP_POINT: Point = Point::new(100.0, 100.0);

/// An image ready to become one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub name: String,
    pub src: ImageRef,
    pub size: (u32, u32),
    action: &'static str,
}

impl LoadedImage {
    /// Embed an uploaded file as a data URI, named after its stem.
    pub fn from_upload(image: &SourceImage) -> Result<Self, DecomposeError> {
        Ok(Self {
            name: image.base_name().to_string(),
            src: ImageRef::new(image.to_data_uri()),
            size: image.dimensions()?,
            action: "Add image",
        })
    }

    pub fn insert_into(&self, editor: &mut Editor) -> LayerId {
        editor.add_image_layer(&self.name, self.src.clone(), self.size, DROP_POINT, self.action)
    }
}

/// Download the sample asset and embed it as a data URI.
pub async fn fetch_sample(
    probe: &dyn ImageProbe,
    config: &DecomposeConfig,
) -> Result<LoadedImage, DecomposeError> {
    let url = ImageRef::new(format!("{}{SAMPLE_PATH}", config.asset_url.trim_end_matches('/')));
    log::debug!("loading sample from {url}");
    let bytes = probe.fetch(&url).await?;
    let file_name = SAMPLE_PATH.rsplit('/').next().unwrap_or(SAMPLE_PATH);
    let image = SourceImage::from_bytes(file_name, bytes).map_err(|e| DecomposeError::Probe {
        src: url.to_string(),
        message: e.to_string(),
    })?;
    Ok(LoadedImage {
        name: SAMPLE_LAYER_NAME.to_string(),
        src: ImageRef::new(image.to_data_uri()),
        size: image.dimensions()?,
        action: "Add sample image",
    })
}

/// Fetch the sample, then add it as one recorded layer.
pub async fn load_sample(
    editor: &mut Editor,
    probe: &dyn ImageProbe,
    config: &DecomposeConfig,
) -> Result<LayerId, DecomposeError> {
    let loaded = fetch_sample(probe, config).await?;
    Ok(loaded.insert_into(editor))
}

/// Add a picked file as one recorded layer, skipping decomposition.
pub fn add_uploaded_image(
    editor: &mut Editor,
    image: &SourceImage,
) -> Result<LayerId, DecomposeError> {
    let loaded = LoadedImage::from_upload(image)?;
    Ok(loaded.insert_into(editor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::tests::png;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    struct RecordingProbe {
        seen: Mutex<Vec<String>>,
        body: Vec<u8>,
    }

    #[async_trait::async_trait]
    impl ImageProbe for RecordingProbe {
        async fn fetch(&self, src: &ImageRef) -> Result<Vec<u8>, DecomposeError> {
            self.seen.lock().unwrap().push(src.as_str().to_string());
            Ok(self.body.clone())
        }
    }

    #[tokio::test]
    async fn sample_resolves_against_asset_url() {
        let probe = RecordingProbe {
            seen: Mutex::new(Vec::new()),
            body: png(30, 20),
        };
        let config = DecomposeConfig {
            asset_url: "http://assets.test/".into(),
            ..DecomposeConfig::default()
        };
        let mut editor = Editor::default();
        let id = load_sample(&mut editor, &probe, &config).await.unwrap();

        assert_eq!(
            *probe.seen.lock().unwrap(),
            vec!["http://assets.test/samples/cover.webp".to_string()]
        );
        let layer = editor.document.layers.get(id).cloned().unwrap();
        assert_eq!(layer.name, "Sample Cover");
        assert_eq!((layer.x, layer.y, layer.width, layer.height), (100.0, 100.0, 30.0, 20.0));
        assert_eq!(editor.history.undo_label(), Some("Add sample image"));
    }

    #[tokio::test]
    async fn sample_that_is_not_an_image_fails_cleanly() {
        let probe = RecordingProbe {
            seen: Mutex::new(Vec::new()),
            body: b"<html>404</html>".to_vec(),
        };
        let mut editor = Editor::default();
        let err = load_sample(&mut editor, &probe, &DecomposeConfig::default()).await.unwrap_err();
        assert!(matches!(err, DecomposeError::Probe { .. }));
        assert!(editor.document.layers.is_empty());
        assert_eq!(editor.history.past_len(), 1);
    }

    #[test]
    fn upload_is_named_after_stem() {
        let mut editor = Editor::default();
        let image = SourceImage::from_bytes("holiday.final.png", png(12, 9)).unwrap();
        let id = add_uploaded_image(&mut editor, &image).unwrap();
        let layer = editor.document.layers.get(id).cloned().unwrap();
        assert_eq!(layer.name, "holiday.final");
        assert_eq!((layer.width, layer.height), (12.0, 9.0));
        assert_eq!(editor.history.undo_label(), Some("Add image"));
        match &layer.content {
            ld_core::LayerContent::Image { src } => {
                assert!(src.as_str().starts_with("data:image/png;base64,"))
            }
            other => panic!("expected image content, got {other:?}"),
        }
    }
}
