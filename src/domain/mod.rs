// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types and traits describing what the system is
// about: questions, the passage database, scored spans and the
// two kinds of answerer.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A validated user question and the input placeholder
pub mod question;

// The immutable passage collection searched by the extractive model
pub mod database;

// Extracted spans and the generative/extractive mode toggle
pub mod answer;

// Core abstractions (traits) that other layers implement
pub mod traits;
