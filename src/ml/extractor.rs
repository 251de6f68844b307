// ============================================================
// Layer 5 — Span Extractor
// ============================================================
// Finds the most likely answer span inside one passage.
//
//   [CLS] question [SEP] context window [SEP]
//             │
//             ▼
//      EncoderQaModel  → start / end logits per token
//             │
//             ▼
//   softmax over context positions only
//             │
//             ▼
//   best (s, e) with s ≤ e < s + MAX_ANSWER_LEN maximising p_s · p_e
//
// Passages longer than one window are split into overlapping
// token windows; the best span across all windows wins. The
// answer text is cut from the passage with the tokenizer's byte
// offsets, so casing and punctuation come back exactly as written.

use anyhow::Result;
use burn::prelude::*;
use tokenizers::Tokenizer;

use crate::data::windows::TokenWindows;
use crate::domain::{answer::ScoredSpan, traits::SpanExtractor};
use crate::infra::{checkpoint::ModelDir, tokenizer_store};
use crate::ml::encoder::{EncoderQaConfig, EncoderQaModel};

/// Longest answer span considered, in tokens
pub const MAX_ANSWER_LEN: usize = 15;
/// Tokens shared between neighbouring context windows
pub const DOC_STRIDE: usize = 128;

/// [CLS] + [SEP] + [SEP]
const SPECIAL_TOKENS_PER_INPUT: usize = 3;

pub struct BertExtractor<B: Backend> {
    model:       EncoderQaModel<B>,
    tokenizer:   Tokenizer,
    max_seq_len: usize,
    cls_id:      u32,
    sep_id:      u32,
    device:      B::Device,
}

/// Best span inside one window, in context-token coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SpanCandidate {
    start: usize,
    end:   usize,
    score: f32,
}

impl<B: Backend> BertExtractor<B> {
    pub fn new(
        model:     EncoderQaModel<B>,
        config:    &EncoderQaConfig,
        tokenizer: Tokenizer,
        device:    B::Device,
    ) -> Result<Self> {
        if config.max_seq_len <= SPECIAL_TOKENS_PER_INPUT + 1 {
            anyhow::bail!("max_seq_len {} leaves no room for context", config.max_seq_len);
        }
        tokenizer_store::check_vocab_fits(&tokenizer, config.vocab_size)?;
        let cls_id = tokenizer_store::special_id(&tokenizer, "[CLS]")?;
        let sep_id = tokenizer_store::special_id(&tokenizer, "[SEP]")?;
        Ok(Self { model, tokenizer, max_seq_len: config.max_seq_len, cls_id, sep_id, device })
    }

    /// Load config, weights and tokenizer from a model directory.
    pub fn from_dir(dir: &ModelDir, device: B::Device) -> Result<Self> {
        let config: EncoderQaConfig = dir.load_config()?;
        let tokenizer = tokenizer_store::load(dir.path())?;
        let model = dir.load_model::<B, _>(config.init::<B>(&device), &device)?;
        tracing::info!(
            "Extractive model ready: {} layers, d_model={}",
            config.num_layers, config.d_model
        );
        Self::new(model, &config, tokenizer, device)
    }

    /// Run the model on one window and return its best span.
    fn score_window(&self, question_ids: &[u32], context_ids: &[u32]) -> Result<Option<SpanCandidate>> {
        // Build [CLS] question [SEP] context [SEP]
        let mut input_ids: Vec<u32> = vec![self.cls_id];
        input_ids.extend_from_slice(question_ids);
        input_ids.push(self.sep_id);
        let context_start = input_ids.len();
        input_ids.extend_from_slice(context_ids);
        let context_end = input_ids.len();
        input_ids.push(self.sep_id);

        let mut type_ids = vec![0i32; context_start];
        type_ids.resize(input_ids.len(), 1);

        let ids_flat: Vec<i32> = input_ids.iter().map(|&x| x as i32).collect();
        let ids_tensor = Tensor::<B, 1, Int>::from_ints(ids_flat.as_slice(), &self.device)
            .unsqueeze::<2>();
        let type_tensor = Tensor::<B, 1, Int>::from_ints(type_ids.as_slice(), &self.device)
            .unsqueeze::<2>();

        let output  = self.model.forward(ids_tensor, type_tensor);
        let seq_len = input_ids.len();

        let start_probs = context_probs(output.start_logits, seq_len, context_start..context_end)?;
        let end_probs   = context_probs(output.end_logits,   seq_len, context_start..context_end)?;

        Ok(best_span(&start_probs, &end_probs, MAX_ANSWER_LEN))
    }

    /// Cut the answer out of the passage using byte offsets, or decode
    /// the token ids when the offsets do not land on char boundaries.
    fn span_text(
        &self,
        passage:     &str,
        offsets:     &[(usize, usize)],
        context_ids: &[u32],
        span:        SpanCandidate,
    ) -> Result<String> {
        let (from, _) = offsets[span.start];
        let (_, to)   = offsets[span.end];
        if let Some(text) = passage.get(from..to) {
            return Ok(text.trim().to_string());
        }
        let text = self.tokenizer.decode(&context_ids[span.start..=span.end], true)
            .map_err(|e| anyhow::anyhow!("Decode: {e}"))?;
        Ok(text.trim().to_string())
    }
}

impl<B: Backend> SpanExtractor for BertExtractor<B> {
    fn extract(&self, question: &str, passage: &str) -> Result<ScoredSpan> {
        let q_enc = self.tokenizer.encode(question, false)
            .map_err(|e| anyhow::anyhow!("Q tokenise: {e}"))?;
        let c_enc = self.tokenizer.encode(passage, false)
            .map_err(|e| anyhow::anyhow!("C tokenise: {e}"))?;

        let context_ids = c_enc.get_ids();
        if context_ids.is_empty() {
            return Ok(ScoredSpan::empty());
        }

        // The question may use at most half of the room left after the special tokens.
        let room = self.max_seq_len - SPECIAL_TOKENS_PER_INPUT;
        let mut question_ids = q_enc.get_ids().to_vec();
        question_ids.truncate(room / 2);
        let window_size = room - question_ids.len();

        let windows = TokenWindows::new(window_size, window_overlap(window_size))
            .split(context_ids.len());

        let mut best: Option<SpanCandidate> = None;
        for range in windows {
            let Some(candidate) = self.score_window(&question_ids, &context_ids[range.clone()])? else {
                continue;
            };
            // Shift window-relative positions back to passage positions
            let candidate = SpanCandidate {
                start: candidate.start + range.start,
                end:   candidate.end + range.start,
                score: candidate.score,
            };
            if best.map_or(true, |b| candidate.score > b.score) {
                best = Some(candidate);
            }
        }

        let Some(span) = best else {
            return Ok(ScoredSpan::empty());
        };

        let text = self.span_text(passage, c_enc.get_offsets(), context_ids, span)?;
        tracing::debug!("Span [{},{}] conf={:.4} answer='{}'", span.start, span.end, span.score, text);
        Ok(ScoredSpan::new(text, span.score))
    }
}

/// Overlap between neighbouring windows: DOC_STRIDE, but never more
/// than half a window so each step still advances by half a window.
fn window_overlap(window_size: usize) -> usize {
    DOC_STRIDE.min(window_size / 2)
}

/// Softmax the logits of context positions only: [1, seq_len] → Vec of len(range)
fn context_probs<B: Backend>(
    logits:  Tensor<B, 2>,
    seq_len: usize,
    range:   std::ops::Range<usize>,
) -> Result<Vec<f32>> {
    let context_logits = logits.reshape([seq_len]).slice([range]);
    burn::tensor::activation::softmax(context_logits, 0)
        .into_data()
        .to_vec::<f32>()
        .map_err(|e| anyhow::anyhow!("Read probabilities: {e:?}"))
}

/// Exhaustive search for the span maximising p_start · p_end.
/// Only spans with start ≤ end < start + max_len are valid.
fn best_span(start_probs: &[f32], end_probs: &[f32], max_len: usize) -> Option<SpanCandidate> {
    let n = start_probs.len().min(end_probs.len());
    let mut best: Option<SpanCandidate> = None;

    for s in 0..n {
        for e in s..(s + max_len).min(n) {
            let score = start_probs[s] * end_probs[e];
            if best.map_or(true, |b| score > b.score) {
                best = Some(SpanCandidate { start: s, end: e, score });
            }
        }
    }

    best
}
