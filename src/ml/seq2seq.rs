// ============================================================
// Layer 5 — Sequence-to-Sequence Model
// ============================================================
// Encoder-decoder transformer for generative answers.
//
//   input ids ──► embed ──► encoder ──► memory
//                                          │
//   prefix ids ─► embed ──► decoder (causal self-attn + cross-attn)
//                                          │
//                                          ▼
//                                      lm_head ──► next-token logits
//
// The token embedding is shared by both sides; positions are
// learned, up to max_seq_len.
//
// Reference: Raffel et al. (2020) T5
//            Burn Book §3 (Building Blocks)

use burn::{
    nn::{
        attention::generate_autoregressive_mask,
        transformer::{
            TransformerDecoder, TransformerDecoderConfig, TransformerDecoderInput,
            TransformerEncoder, TransformerEncoderConfig, TransformerEncoderInput,
        },
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
};

#[derive(Config, Debug)]
pub struct Seq2SeqConfig {
    pub vocab_size:  usize,
    pub max_seq_len: usize,
    pub d_model:     usize,
    pub num_heads:   usize,
    pub num_layers:  usize,
    pub d_ff:        usize,
    #[config(default = 0.0)]
    pub dropout:     f64,
    /// T5 convention: <pad> = 0, </s> = 1, decoding starts from <pad>
    #[config(default = 0)]
    pub pad_token_id: u32,
    #[config(default = 1)]
    pub eos_token_id: u32,
    #[config(default = 0)]
    pub decoder_start_token_id: u32,
    /// Upper bound on generated tokens per answer
    #[config(default = 20)]
    pub max_new_tokens: usize,
}

impl Seq2SeqConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Seq2SeqModel<B> {
        let token_embedding    = EmbeddingConfig::new(self.vocab_size, self.d_model).init(device);
        let position_embedding = EmbeddingConfig::new(self.max_seq_len, self.d_model).init(device);
        let encoder = TransformerEncoderConfig::new(
            self.d_model, self.d_ff, self.num_heads, self.num_layers,
        )
            .with_dropout(self.dropout)
            .with_norm_first(true)
            .init(device);
        let decoder = TransformerDecoderConfig::new(
            self.d_model, self.d_ff, self.num_heads, self.num_layers,
        )
            .with_dropout(self.dropout)
            .with_norm_first(true)
            .init(device);
        let lm_head = LinearConfig::new(self.d_model, self.vocab_size)
            .with_bias(false)
            .init(device);
        Seq2SeqModel {
            token_embedding, position_embedding, encoder, decoder, lm_head,
            max_seq_len: self.max_seq_len,
        }
    }
}

#[derive(Module, Debug)]
pub struct Seq2SeqModel<B: Backend> {
    pub token_embedding:    Embedding<B>,
    pub position_embedding: Embedding<B>,
    pub encoder:            TransformerEncoder<B>,
    pub decoder:            TransformerDecoder<B>,
    pub lm_head:            Linear<B>,
    pub max_seq_len:        usize,
}

impl<B: Backend> Seq2SeqModel<B> {
    fn embed(&self, ids: Tensor<B, 2, Int>) -> Tensor<B, 3> {
        let [batch_size, seq_len] = ids.dims();
        let tok_emb = self.token_embedding.forward(ids);
        let positions = Tensor::<B, 1, Int>::arange(0..seq_len as i64, &tok_emb.device())
            .unsqueeze::<2>()
            .expand([batch_size, seq_len]);
        tok_emb + self.position_embedding.forward(positions)
    }

    /// input_ids: [batch, src_len] → memory: [batch, src_len, d_model]
    pub fn encode(&self, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 3> {
        self.encoder.forward(TransformerEncoderInput::new(self.embed(input_ids)))
    }

    /// prefix: [batch, tgt_len] → logits: [batch, tgt_len, vocab_size]
    ///
    /// The causal mask keeps position t from attending to anything after t,
    /// so logits at the last position predict the next token.
    pub fn decode(&self, memory: Tensor<B, 3>, prefix: Tensor<B, 2, Int>) -> Tensor<B, 3> {
        let [batch_size, tgt_len] = prefix.dims();
        let mask = generate_autoregressive_mask::<B>(batch_size, tgt_len, &prefix.device());
        let x = self.embed(prefix);
        let x = self.decoder.forward(
            TransformerDecoderInput::new(x, memory).target_mask_attn(mask),
        );
        self.lm_head.forward(x)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_decode_shapes() {
        let device = Default::default();
        let model: Seq2SeqModel<TestBackend> =
            Seq2SeqConfig::new(12, 16, 8, 2, 1, 16).init(&device);

        let src = Tensor::<TestBackend, 1, Int>::from_ints([3, 4, 5, 1].as_slice(), &device)
            .unsqueeze::<2>();
        let memory = model.encode(src);
        assert_eq!(memory.dims(), [1, 4, 8]);

        let prefix = Tensor::<TestBackend, 1, Int>::from_ints([0, 6].as_slice(), &device)
            .unsqueeze::<2>();
        let logits = model.decode(memory, prefix);
        assert_eq!(logits.dims(), [1, 2, 12]);
    }

    #[test]
    fn test_config_defaults_follow_t5_ids() {
        let cfg = Seq2SeqConfig::new(12, 16, 8, 2, 1, 16);
        assert_eq!(cfg.pad_token_id, 0);
        assert_eq!(cfg.eos_token_id, 1);
        assert_eq!(cfg.decoder_start_token_id, 0);
        assert_eq!(cfg.max_new_tokens, 20);
    }
}
