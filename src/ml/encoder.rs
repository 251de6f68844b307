// ============================================================
// Layer 5 — Encoder Span Model
// ============================================================
// BERT-style encoder used by the extractive answerer.
//
//   token + position + segment embeddings ──► LayerNorm
//                    │
//                    ▼
//          N × post-norm encoder block
//                    │
//                    ▼
//          span head → (start, end) logit per token
//
// Segment ids tell the model which tokens belong to the question
// (0) and which to the passage (1).
//
// Reference: Devlin et al. (2019) BERT
//            Burn Book §3 (Building Blocks)

use burn::{
    nn::{
        attention::{MhaInput, MultiHeadAttention, MultiHeadAttentionConfig},
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        LayerNorm, LayerNormConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::gelu,
};

#[derive(Config, Debug)]
pub struct EncoderQaConfig {
    pub vocab_size:  usize,
    pub max_seq_len: usize,
    pub d_model:     usize,
    pub num_heads:   usize,
    pub num_layers:  usize,
    pub d_ff:        usize,
    #[config(default = 2)]
    pub type_vocab_size: usize,
    #[config(default = 0.0)]
    pub dropout:     f64,
}

impl EncoderQaConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> EncoderQaModel<B> {
        let token_embedding    = EmbeddingConfig::new(self.vocab_size, self.d_model).init(device);
        let position_embedding = EmbeddingConfig::new(self.max_seq_len, self.d_model).init(device);
        let segment_embedding  = EmbeddingConfig::new(self.type_vocab_size, self.d_model).init(device);
        let layers = (0..self.num_layers)
            .map(|_| self.init_block(device))
            .collect();
        let embed_norm = LayerNormConfig::new(self.d_model).init(device);
        let qa_head    = LinearConfig::new(self.d_model, 2).init(device);
        let dropout    = DropoutConfig::new(self.dropout).init();
        EncoderQaModel {
            token_embedding, position_embedding, segment_embedding, layers,
            embed_norm, qa_head, dropout,
            max_seq_len: self.max_seq_len,
        }
    }

    fn init_block<B: Backend>(&self, device: &B::Device) -> EncoderBlock<B> {
        EncoderBlock {
            attention: MultiHeadAttentionConfig::new(self.d_model, self.num_heads)
                .with_dropout(self.dropout)
                .init(device),
            attn_norm: LayerNormConfig::new(self.d_model).init(device),
            ffn_in:    LinearConfig::new(self.d_model, self.d_ff).init(device),
            ffn_out:   LinearConfig::new(self.d_ff, self.d_model).init(device),
            ffn_norm:  LayerNormConfig::new(self.d_model).init(device),
            dropout:   DropoutConfig::new(self.dropout).init(),
        }
    }
}

/// Attention then GELU feed-forward; each sub-layer is added back
/// to its input and normalised afterwards.
#[derive(Module, Debug)]
pub struct EncoderBlock<B: Backend> {
    pub attention: MultiHeadAttention<B>,
    pub attn_norm: LayerNorm<B>,
    pub ffn_in:    Linear<B>,
    pub ffn_out:   Linear<B>,
    pub ffn_norm:  LayerNorm<B>,
    pub dropout:   Dropout,
}

impl<B: Backend> EncoderBlock<B> {
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 3> {
        let attended = self.attention.forward(MhaInput::self_attn(x.clone())).context;
        let x = self.attn_norm.forward(x + self.dropout.forward(attended));

        let hidden = gelu(self.ffn_in.forward(x.clone()));
        let x_ffn  = self.ffn_out.forward(hidden);
        self.ffn_norm.forward(x + self.dropout.forward(x_ffn))
    }
}

/// BERT-style encoder with a span head: for every input token it
/// predicts how likely that token is to start or end the answer.
#[derive(Module, Debug)]
pub struct EncoderQaModel<B: Backend> {
    pub token_embedding:    Embedding<B>,
    pub position_embedding: Embedding<B>,
    pub segment_embedding:  Embedding<B>,
    pub layers:             Vec<EncoderBlock<B>>,
    pub embed_norm:         LayerNorm<B>,
    pub qa_head:            Linear<B>,
    pub dropout:            Dropout,
    pub max_seq_len:        usize,
}

pub struct QaModelOutput<B: Backend> {
    pub start_logits: Tensor<B, 2>,
    pub end_logits:   Tensor<B, 2>,
}

impl<B: Backend> EncoderQaModel<B> {
    /// input_ids, token_type_ids: [batch, seq_len] → start_logits, end_logits: [batch, seq_len]
    ///
    /// token_type_ids is 0 for the question segment and 1 for the context segment.
    pub fn forward(
        &self,
        input_ids:      Tensor<B, 2, Int>,
        token_type_ids: Tensor<B, 2, Int>,
    ) -> QaModelOutput<B> {
        let [batch_size, seq_len] = input_ids.dims();
        let device = input_ids.device();

        let positions = Tensor::<B, 1, Int>::arange(0..seq_len as i64, &device)
            .unsqueeze::<2>()
            .expand([batch_size, seq_len]);
        let embedded = self.token_embedding.forward(input_ids)
            + self.position_embedding.forward(positions)
            + self.segment_embedding.forward(token_type_ids);

        let hidden = self.layers.iter().fold(
            self.dropout.forward(self.embed_norm.forward(embedded)),
            |x, layer| layer.forward(x),
        );

        // [batch, seq_len, 2]: channel 0 scores starts, channel 1 scores ends
        let logits = self.qa_head.forward(hidden);
        let channel = |c: usize| {
            logits.clone()
                .slice([0..batch_size, 0..seq_len, c..c + 1])
                .reshape([batch_size, seq_len])
        };

        QaModelOutput { start_logits: channel(0), end_logits: channel(1) }
    }
}
