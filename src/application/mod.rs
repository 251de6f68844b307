// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers:
//
//   config.rs      — model/database locations and start-up mode
//   extractive.rs  — best-of-N span selection across passages
//   controller.rs  — input validation, model toggle, dispatch
//   startup.rs     — loads both models and the database
//
// Rules for this layer:
//   - No ML math or burn code here
//   - No printing here (that's Layer 1)

pub mod config;

pub mod extractive;

pub mod controller;

pub mod startup;
