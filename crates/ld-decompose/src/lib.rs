pub mod batch;
pub mod client;
pub mod config;
pub mod error;
pub mod probe;
pub mod sample;
pub mod source;

pub use batch::{DecomposedBatch, decompose_image};
pub use client::{Decomposer, HttpDecomposer};
pub use config::{DecomposeConfig, LAYER_COUNT_RANGE, Timeouts, check_layer_count};
pub use error::DecomposeError;
pub use probe::{HttpImageProbe, ImageProbe, decode_data_uri};
pub use sample::{LoadedImage, add_uploaded_image, fetch_sample, load_sample};
pub use source::{SourceImage, image_size};
