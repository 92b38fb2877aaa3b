//! Analysis backend seam.
//!
//! The reasoning engine that turns combined evidence into a verdict is
//! an external capability: an instruction string goes in, free-form text
//! comes out. The concrete adapter lives in [`ollama`]; the instruction
//! template and reply contract live in [`prompt`].

pub mod ollama;
pub mod prompt;

use anyhow::Result;
use async_trait::async_trait;

/// External analysis capability: instruction in, free-form reply out.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyse(&self, instruction: &str) -> Result<String>;
}
