//! Mermaid repair pipeline for LLM-generated diagram source.
//!
//! DESIGN
//! ======
//! Model output is treated as adversarial: fences in the wrong place, labels
//! wrapped across lines, stray `end` keywords, half-open class blocks. Each
//! pass below is a total `&str -> String` (or lines -> lines) function, so
//! the pipeline never fails. It only ever produces something a renderer is
//! more likely to accept.
//!
//! Pass order: extract → unicode → fences → dialect sniff → class blocks
//! (class diagrams only) → labels → compact/align → balance.

pub mod balance;
pub mod class_diagram;
pub mod dialect;
pub mod extract;
pub mod fallback;
pub mod labels;
pub mod lines;
pub mod sanitize;
pub mod unicode;

pub use dialect::DiagramKind;
pub use extract::extract_diagram_code;
pub use fallback::create_fallback_diagram;
pub use sanitize::sanitize_diagram;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
