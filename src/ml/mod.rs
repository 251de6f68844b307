// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer imports from burn directly — only this one.
//
//   encoder.rs   — BERT-style encoder with a start/end span head
//   seq2seq.rs   — T5-style encoder-decoder transformer
//   extractor.rs — Span search over one passage (SpanExtractor)
//   generator.rs — Greedy decoding (GenerativeAnswerer)
//
// Both models are loaded once from their directories and held
// for the rest of the process; inference runs on the caller's
// thread.
//
// Reference: Burn Book §3 (Building Blocks)
//            Vaswani et al. (2017) Attention Is All You Need
//            Devlin et al. (2019) BERT

/// Transformer encoder Q&A model architecture
pub mod encoder;

/// Encoder-decoder generation model architecture
pub mod seq2seq;

/// Extractive inference — best answer span in a passage
pub mod extractor;

/// Generative inference — greedy decoding
pub mod generator;

use anyhow::Result;

use crate::infra::checkpoint::ModelDir;

pub use burn::prelude::Backend;

/// Backend used for inference outside of tests
pub type InferBackend = burn::backend::Wgpu;

pub type Generator<B = InferBackend> = generator::FlanGenerator<B>;
pub type Extractor<B = InferBackend> = extractor::BertExtractor<B>;

/// The default WGPU device.
pub fn inference_device() -> burn::backend::wgpu::WgpuDevice {
    let device = burn::backend::wgpu::WgpuDevice::default();
    tracing::info!("Using WGPU device: {:?}", device);
    device
}

/// Load the generative model onto `device`.
pub fn load_generator<B: Backend>(dir: &ModelDir, device: B::Device) -> Result<Generator<B>> {
    Generator::<B>::from_dir(dir, device)
}

/// Load the extractive model onto `device`.
pub fn load_extractor<B: Backend>(dir: &ModelDir, device: B::Device) -> Result<Extractor<B>> {
    Extractor::<B>::from_dir(dir, device)
}
