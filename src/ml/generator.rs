// ============================================================
// Layer 5 — Generator
// ============================================================
// Greedy decoding on top of Seq2SeqModel. The encoder runs once;
// the decoder is re-run on the growing prefix at every step and
// the most likely next token is appended until </s> appears or
// the token budget runs out. No sampling, so the same question
// always produces the same answer.

use anyhow::Result;
use burn::{prelude::*, tensor::ElementConversion};
use tokenizers::Tokenizer;

use crate::domain::traits::GenerativeAnswerer;
use crate::infra::{checkpoint::ModelDir, tokenizer_store};
use crate::ml::seq2seq::{Seq2SeqConfig, Seq2SeqModel};

pub struct FlanGenerator<B: Backend> {
    model:     Seq2SeqModel<B>,
    config:    Seq2SeqConfig,
    tokenizer: Tokenizer,
    device:    B::Device,
}

impl<B: Backend> FlanGenerator<B> {
    /// Fails when the tokenizer or the special token ids do not fit
    /// the model's embedding table.
    pub fn new(
        model:     Seq2SeqModel<B>,
        config:    Seq2SeqConfig,
        tokenizer: Tokenizer,
        device:    B::Device,
    ) -> Result<Self> {
        tokenizer_store::check_vocab_fits(&tokenizer, config.vocab_size)?;
        for (name, id) in [
            ("eos_token_id", config.eos_token_id),
            ("decoder_start_token_id", config.decoder_start_token_id),
            ("pad_token_id", config.pad_token_id),
        ] {
            if id as usize >= config.vocab_size {
                anyhow::bail!("{name} {id} is outside vocab_size {}", config.vocab_size);
            }
        }
        Ok(Self { model, config, tokenizer, device })
    }

    /// Load config, weights and tokenizer from a model directory.
    pub fn from_dir(dir: &ModelDir, device: B::Device) -> Result<Self> {
        let config: Seq2SeqConfig = dir.load_config()?;
        let tokenizer = tokenizer_store::load(dir.path())?;
        let model = dir.load_model::<B, _>(config.init::<B>(&device), &device)?;
        tracing::info!(
            "Generative model ready: {} layers, d_model={}",
            config.num_layers, config.d_model
        );
        Self::new(model, config, tokenizer, device)
    }

    /// Tokenise the prompt, generate, and detokenise without special tokens.
    pub fn generate(&self, prompt: &str) -> Result<String> {
        let enc = self.tokenizer.encode(prompt, true)
            .map_err(|e| anyhow::anyhow!("Prompt tokenise: {e}"))?;

        let mut input_ids = enc.get_ids().to_vec();
        input_ids.truncate(self.config.max_seq_len.saturating_sub(1));
        if input_ids.last() != Some(&self.config.eos_token_id) {
            input_ids.push(self.config.eos_token_id);
        }

        let output_ids = self.generate_ids(&input_ids);

        let answer = self.tokenizer.decode(&output_ids, true)
            .map_err(|e| anyhow::anyhow!("Decode: {e}"))?;
        Ok(answer.trim().to_string())
    }

    /// Greedy decode. Returns generated ids without the start token or </s>.
    pub fn generate_ids(&self, input_ids: &[u32]) -> Vec<u32> {
        let input = self.int_tensor(input_ids);
        let memory = self.model.encode(input);

        // Prefix includes the start token, so it can grow to max_seq_len - 1 new tokens.
        let budget = self.config.max_new_tokens
            .min(self.config.max_seq_len.saturating_sub(1));

        let mut prefix = vec![self.config.decoder_start_token_id];
        for _ in 0..budget {
            let logits = self.model.decode(memory.clone(), self.int_tensor(&prefix));
            let [_, len, vocab] = logits.dims();
            let last = logits
                .slice([0..1, len - 1..len, 0..vocab])
                .reshape([vocab]);
            let next = last.argmax(0).into_scalar().elem::<i64>() as u32;

            if next == self.config.eos_token_id {
                break;
            }
            prefix.push(next);
        }

        tracing::debug!("Generated {} tokens", prefix.len() - 1);
        prefix.split_off(1)
    }

    fn int_tensor(&self, ids: &[u32]) -> Tensor<B, 2, Int> {
        let flat: Vec<i32> = ids.iter().map(|&x| x as i32).collect();
        Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device).unsqueeze::<2>()
    }
}

impl<B: Backend> GenerativeAnswerer for FlanGenerator<B> {
    fn answer(&self, question: &str) -> Result<String> {
        self.generate(question)
    }
}
