//! Multi-turn counselor chat about one profession. Replies are never cached.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::careers::models::{ChatMessage, Profession, Region};
use crate::careers::prompts::chat_system_prompt;
use crate::llm_client::{ChatTurn, CompletionRequest, LlmError, TextGenerator};

const CHAT_MAX_TOKENS: u32 = 1024;
const ALLOWED_ROLES: [&str; 2] = ["user", "assistant"];

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    Invalid(String),

    #[error("Chat failed: {0}")]
    Generation(#[from] LlmError),
}

pub struct CareerChat {
    llm: Arc<dyn TextGenerator>,
    model: String,
}

impl CareerChat {
    pub fn new(llm: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    /// Forwards the whole history, in order, under a profession- and region-specific
    /// system instruction and returns the assistant reply.
    pub async fn reply(
        &self,
        profession: &Profession,
        messages: &[ChatMessage],
        region: Region,
    ) -> Result<String, ChatError> {
        validate_history(messages)?;

        info!(
            "Career chat for {} ({}): {} messages in history",
            profession.id,
            region,
            messages.len()
        );

        let request = CompletionRequest {
            model: self.model.clone(),
            system: chat_system_prompt(profession, region),
            messages: messages
                .iter()
                .map(|m| ChatTurn::new(m.role.as_str(), m.content.as_str()))
                .collect(),
            max_tokens: CHAT_MAX_TOKENS,
        };

        let reply = self.llm.complete(&request).await?;
        info!("Career chat reply length: {} chars", reply.chars().count());
        Ok(reply)
    }
}

fn validate_history(messages: &[ChatMessage]) -> Result<(), ChatError> {
    if messages.is_empty() {
        return Err(ChatError::Invalid(
            "At least one message is required".to_string(),
        ));
    }
    if let Some(bad) = messages
        .iter()
        .find(|m| !ALLOWED_ROLES.contains(&m.role.as_str()))
    {
        return Err(ChatError::Invalid(format!(
            "Invalid message role '{}'. Expected 'user' or 'assistant'",
            bad.role
        )));
    }
    Ok(())
}
