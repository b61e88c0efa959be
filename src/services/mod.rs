//! Domain services built on the repair pipeline and the LLM adapter.
//!
//! ARCHITECTURE
//! ============
//! Service modules own request orchestration so the binary can stay focused
//! on argument parsing and output formatting.

pub mod diagram;
