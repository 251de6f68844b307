// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Loads the tokenizer that ships inside a model directory.
// The generative and extractive models each bring their own
// vocabulary, so there is one tokenizer.json per directory.

use anyhow::Result;
use std::path::Path;
use tokenizers::Tokenizer;

pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// Load `tokenizer.json` from a model directory
pub fn load(dir: &Path) -> Result<Tokenizer> {
    let path = dir.join(TOKENIZER_FILE);
    let tokenizer = Tokenizer::from_file(&path)
        .map_err(|e| anyhow::anyhow!(
            "Cannot load tokenizer from '{}': {}", path.display(), e
        ))?;
    tracing::debug!(
        "Tokenizer loaded from '{}' (vocab={})",
        path.display(),
        tokenizer.get_vocab_size(true)
    );
    Ok(tokenizer)
}

/// Look up the id of a special token the model depends on.
pub fn special_id(tokenizer: &Tokenizer, token: &str) -> Result<u32> {
    tokenizer
        .token_to_id(token)
        .ok_or_else(|| anyhow::anyhow!("Tokenizer has no '{token}' token"))
}

/// Every id the tokenizer can emit must index the model's embedding table.
pub fn check_vocab_fits(tokenizer: &Tokenizer, vocab_size: usize) -> Result<()> {
    let tokenizer_vocab = tokenizer.get_vocab_size(true);
    if tokenizer_vocab > vocab_size {
        anyhow::bail!(
            "Tokenizer has {tokenizer_vocab} tokens but the model only embeds {vocab_size}"
        );
    }
    Ok(())
}

/// Write a word-level tokenizer to `dir/tokenizer.json` and load it.
///
/// `specials` get ids 0.. in order and are marked special so that
/// decode(skip_special_tokens = true) drops them; `words` follow.
/// Used by tests to build small model directories.
#[cfg(test)]
pub fn write_word_level(dir: &Path, specials: &[&str], words: &[&str]) -> Result<Tokenizer> {
    std::fs::create_dir_all(dir)?;

    let mut vocab = serde_json::Map::new();
    let mut added = Vec::new();
    for (id, tok) in specials.iter().enumerate() {
        vocab.insert(tok.to_string(), serde_json::json!(id));
        added.push(serde_json::json!({
            "id": id, "content": tok, "single_word": false, "lstrip": false,
            "rstrip": false, "normalized": false, "special": true
        }));
    }
    for word in words {
        if !vocab.contains_key(*word) {
            let id = vocab.len();
            vocab.insert(word.to_string(), serde_json::json!(id));
        }
    }

    let unk = specials
        .iter()
        .find(|s| s.to_ascii_lowercase().contains("unk"))
        .copied()
        .unwrap_or("[UNK]");

    let tokenizer_json = serde_json::json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": added,
        "normalizer": {
            "type": "BertNormalizer",
            "clean_text": true,
            "handle_chinese_chars": true,
            "strip_accents": null,
            "lowercase": true
        },
        "pre_tokenizer": { "type": "Whitespace" },
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": vocab,
            "unk_token": unk
        }
    });

    std::fs::write(dir.join(TOKENIZER_FILE), serde_json::to_string_pretty(&tokenizer_json)?)?;
    load(dir)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_level_fixture_encodes_known_words() {
        let dir = tempfile::tempdir().unwrap();
        let tok = write_word_level(dir.path(), &["[PAD]", "[UNK]"], &["virus", "spreads"]).unwrap();

        let enc = tok.encode("Virus spreads", false).unwrap();
        assert_eq!(enc.get_ids(), &[2, 3]);
        assert_eq!(special_id(&tok, "[PAD]").unwrap(), 0);
        assert!(special_id(&tok, "[CLS]").is_err());
        assert!(check_vocab_fits(&tok, 4).is_ok());
        assert!(check_vocab_fits(&tok, 3).is_err());
    }

    #[test]
    fn test_missing_tokenizer_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(dir.path()).is_err());
    }
}
