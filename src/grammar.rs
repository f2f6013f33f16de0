//! Mission-line grammar: token shapes and the scanner.
//!
//! ```text
//! text ── tokenize ──┬─ skip whitespace (optional at 0, mandatory after)
//!                    ├─ classify at scan position (shapes.rs)
//!                    │    Time > StrikeLimit > Setting > Pool
//!                    │    each must end at whitespace / end of input
//!                    └─ Scan { tokens, end }
//! ```
//!
//! The scanner never fails: anything that is not a time, strike limit or
//! setting is captured as a pool token so the builder can report it and
//! the completion engine can complete it. Whether the scan covered the whole
//! input is left to the caller (`Scan::covers`).

#[path = "grammar/shapes.rs"]
mod shapes;
#[path = "grammar/tokenizer.rs"]
mod tokenizer;

pub use tokenizer::{Scan, tokenize};
