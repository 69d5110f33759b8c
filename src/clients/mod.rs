//! Model client boundary: anything that can turn a prompt into raw text.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::AIError;

pub mod groq;
pub mod mock;

pub use groq::*;
pub use mock::*;

/// Low-level model client abstraction.
///
/// Implementors provide `invoke`, which executes a fully formatted prompt and
/// returns the model's raw text content. Parsing and schema handling live in
/// the generator; any failure here is treated as retryable.
#[async_trait]
pub trait ModelClient: Send + Sync + Debug {
    /// The only method that implementations must provide
    async fn invoke(&self, prompt: String) -> Result<String, AIError>;

    /// Clone this client into a boxed trait object
    fn clone_box(&self) -> Box<dyn ModelClient>;
}

impl Clone for Box<dyn ModelClient> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[async_trait]
impl ModelClient for Box<dyn ModelClient> {
    async fn invoke(&self, prompt: String) -> Result<String, AIError> {
        self.as_ref().invoke(prompt).await
    }

    fn clone_box(&self) -> Box<dyn ModelClient> {
        self.as_ref().clone_box()
    }
}
