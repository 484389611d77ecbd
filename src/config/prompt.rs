use crate::models::chat::Turn;

pub const DEFAULT_CONTEXT_PREAMBLE: &str =
    "Use the following retrieved context to answer. If the context is insufficient, say you don't know.";

/// Fixed texts that frame every conversation sent to the model.
#[derive(Debug, Clone)]
pub struct PromptConfig {
    pub system_message: String,
    pub context_preamble: String,
}

impl PromptConfig {
    pub fn new(system_message: impl Into<String>) -> Self {
        Self {
            system_message: system_message.into(),
            context_preamble: DEFAULT_CONTEXT_PREAMBLE.to_string(),
        }
    }

    pub fn system_turn(&self) -> Turn {
        Turn::system(self.system_message.clone())
    }

    /// The extra system turn carrying retrieved documents.
    pub fn context_turn(&self, context: &str) -> Turn {
        Turn::system(format!("{}\n\nRetrieved context:\n{}", self.context_preamble, context))
    }
}
