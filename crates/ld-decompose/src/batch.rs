//! Decompose a source image and insert the result as one undo step.
//!
//! The async half ([`decompose_image`]) never sees the document. Only a
//! fully resolved [`DecomposedBatch`] touches the editor, synchronously.

use crate::client::Decomposer;
use crate::config::check_layer_count;
use crate::error::DecomposeError;
use crate::probe::ImageProbe;
use crate::source::SourceImage;
use ld_core::{ImageRef, Layer, LayerId};
use ld_editor::Editor;
use std::time::Duration;

/// Where the first decomposed layer lands; each next one is shifted by
/// [`CASCADE_STEP`] on both axes.
pub const CASCADE_ORIGIN: f32 = 100.0;
pub const CASCADE_STEP: f32 = 20.0;

/// Returned layers with their natural sizes, back to front.
#[derive(Debug, Clone, PartialEq)]
pub struct DecomposedBatch {
    pub base_name: String,
    pub layers: Vec<(ImageRef, (u32, u32))>,
}

impl DecomposedBatch {
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// The layers this batch becomes, in insertion order.
    pub fn to_layers(&self) -> Vec<Layer> {
        self.layers
            .iter()
            .enumerate()
            .map(|(i, (src, (w, h)))| {
                let offset = CASCADE_ORIGIN + CASCADE_STEP * i as f32;
                let name = format!("{} - Layer {}", self.base_name, i + 1);
                Layer::image(name, src.clone(), *w as f32, *h as f32).at(offset, offset)
            })
            .collect()
    }

    /// Append every layer (later = front-most) under a single
    /// `"AI Decompose: N layers"` record.
    pub fn insert_into(&self, editor: &mut Editor) -> Vec<LayerId> {
        let action = format!("AI Decompose: {} layers", self.len());
        editor.insert_batch(self.to_layers(), &action)
    }
}

/// Run the backend call and size every returned layer, bounded by
/// `timeout_secs` as a whole.
pub async fn decompose_image(
    decomposer: &dyn Decomposer,
    probe: &dyn ImageProbe,
    image: &SourceImage,
    num_layers: u32,
    timeout_secs: u64,
) -> Result<DecomposedBatch, DecomposeError> {
    let num_layers = check_layer_count(num_layers)?;
    let work = async {
        let refs = decomposer.decompose(image, num_layers).await?;
        if refs.is_empty() {
            return Err(DecomposeError::EmptyResult);
        }

        let mut layers = Vec::with_capacity(refs.len());
        for src in refs {
            let size = probe.dimensions(&src).await?;
            log::trace!("layer {src} is {}x{}", size.0, size.1);
            layers.push((src, size));
        }
        Ok(DecomposedBatch {
            base_name: image.base_name().to_string(),
            layers,
        })
    };

    match tokio::time::timeout(Duration::from_secs(timeout_secs), work).await {
        Ok(result) => result,
        Err(_) => Err(DecomposeError::TimedOut {
            backend: decomposer.backend().to_string(),
            secs: timeout_secs,
        }),
    }
}
