// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File-system concerns shared by both models:
//
//   checkpoint.rs      — Reads a pretrained model directory:
//                        architecture config (JSON) plus weights
//                        recorded with burn's CompactRecorder.
//
//   tokenizer_store.rs — Loads the tokenizer.json that ships
//                        with each model and resolves special
//                        token ids.
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Pretrained model directory loading
pub mod checkpoint;

/// Tokenizer loading
pub mod tokenizer_store;
