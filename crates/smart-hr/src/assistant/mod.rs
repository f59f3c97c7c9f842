//! Boundary to the generative text service used by the chat widget and the
//! recruitment helpers. The network provider itself lives behind
//! [`AssistantClient`]; this module owns prompt building and reply decoding.

mod action;
pub mod prompts;
mod reply;

pub use action::{AdminOrderDraft, AssistantAction, EmployeeCard};
pub use prompts::KnowledgeBase;
pub use reply::AssistantReply;

use crate::locale::Locale;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::{debug, warn};

/// Model settings sent along with every prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantConfig {
    pub model: String,
    pub temperature: f32,
    pub locale: Locale,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".to_string(),
            temperature: 0.7,
            locale: Locale::default(),
        }
    }
}

/// Everything a provider needs for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantPrompt {
    pub model: String,
    pub temperature: f32,
    pub system_instruction: String,
    pub message: String,
}

/// Request/response text service.
pub trait AssistantClient: Send + Sync {
    fn complete(&self, prompt: &AssistantPrompt) -> Result<String, AssistantError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssistantError {
    #[error("assistant service unavailable: {0}")]
    Unavailable(String),
    #[error("assistant returned an empty response")]
    EmptyResponse,
}

/// Chat facade: builds prompts, calls the client and decodes replies.
pub struct Assistant<C> {
    client: C,
    config: AssistantConfig,
    system_instruction: String,
}

impl<C: AssistantClient> Assistant<C> {
    pub fn new(client: C, config: AssistantConfig) -> Self {
        Self::with_knowledge(client, config, &KnowledgeBase::default())
    }

    pub fn with_knowledge(client: C, config: AssistantConfig, knowledge: &KnowledgeBase) -> Self {
        let system_instruction = prompts::system_instruction(config.locale, knowledge);
        Self {
            client,
            config,
            system_instruction,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Send `message`; a failed call yields the fixed apology text, never an error.
    pub fn ask(&self, message: &str) -> AssistantReply {
        let prompt = AssistantPrompt {
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            system_instruction: self.system_instruction.clone(),
            message: message.to_string(),
        };

        match self.client.complete(&prompt) {
            Ok(raw) if raw.trim().is_empty() => {
                warn!(error = %AssistantError::EmptyResponse, "assistant request failed");
                AssistantReply::text(prompts::unavailable_notice(self.config.locale))
            }
            Ok(raw) => {
                let reply = AssistantReply::parse(&raw);
                debug!(
                    action = reply.action.as_ref().map(AssistantAction::kind),
                    "assistant replied"
                );
                reply
            }
            Err(err) => {
                warn!(error = %err, "assistant request failed");
                AssistantReply::text(prompts::unavailable_notice(self.config.locale))
            }
        }
    }

    pub fn job_description(&self, job_title: &str, department: &str, level: &str) -> String {
        let locale = self.config.locale;
        self.ask(&prompts::job_description(locale, job_title, department, level))
            .text
    }

    pub fn interview_questions(&self, job_title: &str, industry: &str) -> String {
        let locale = self.config.locale;
        self.ask(&prompts::interview_questions(locale, job_title, industry))
            .text
    }

    pub fn analyze_resume(&self, resume_text: &str, job_title: &str) -> String {
        let locale = self.config.locale;
        self.ask(&prompts::analyze_resume(locale, resume_text, job_title))
            .text
    }

    pub fn draft_policy(&self, topic: &str) -> String {
        let locale = self.config.locale;
        self.ask(&prompts::draft_policy(locale, topic)).text
    }

    pub fn create_form(&self, form_type: &str, employee_name: &str, reason: &str) -> String {
        let locale = self.config.locale;
        self.ask(&prompts::create_form(locale, form_type, employee_name, reason))
            .text
    }
}

/// Offline client replaying canned replies in order; used for demos and tests.
#[derive(Default)]
pub struct ScriptedAssistant {
    replies: Mutex<VecDeque<Result<String, AssistantError>>>,
    prompts: Mutex<Vec<AssistantPrompt>>,
}

impl ScriptedAssistant {
    pub fn new<I>(replies: I) -> Self
    where
        I: IntoIterator<Item = Result<String, AssistantError>>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn push_reply(&self, reply: impl Into<String>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(Ok(reply.into()));
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<AssistantPrompt> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

impl AssistantClient for ScriptedAssistant {
    fn complete(&self, prompt: &AssistantPrompt) -> Result<String, AssistantError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.clone());
        }
        let mut replies = self
            .replies
            .lock()
            .map_err(|_| AssistantError::Unavailable("script lock poisoned".to_string()))?;
        replies
            .pop_front()
            .unwrap_or_else(|| Err(AssistantError::Unavailable("no scripted reply".to_string())))
    }
}
