//! Mermaid architecture diagrams from free-text descriptions.
//!
//! A language model is asked for a diagram, and whatever comes back is
//! pulled out of its markdown wrapping and repaired until a Mermaid renderer
//! can parse it. When nothing usable survives, a fixed fallback flowchart
//! takes its place, so callers always receive something renderable.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`mermaid`] | Pure extract and sanitize passes plus the fallback diagram |
//! | [`llm`] | Provider-neutral [`llm::LlmChat`] trait with Anthropic and `OpenAI` clients |
//! | [`services`] | [`services::diagram::DiagramGenerator`], the request orchestration |
//! | [`error`] | The [`error::ErrorCode`] trait shared by every error enum |

pub mod error;
pub mod llm;
pub mod mermaid;
pub mod services;
