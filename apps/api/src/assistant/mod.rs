//! Text-generation facade used by the resume and answer handlers.
//!
//! Every operation returns the text together with the provider that actually
//! produced it. External failures are logged and replaced by the placeholder
//! result for the same inputs; they never reach the caller.

pub mod placeholder;
pub mod prompts;
pub mod provider;

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::assistant::prompts::{
    render, INTERVIEW_ANSWER_PROMPT_TEMPLATE, INTERVIEW_COACH_SYSTEM,
    RESUME_SUMMARY_PROMPT_TEMPLATE, RESUME_SUMMARY_SYSTEM,
};
pub use crate::assistant::provider::LlmProvider;
use crate::config::Config;
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, PLAIN_TEXT_SYSTEM};
use crate::llm_client::{LlmClient, TextCompletion};

/// Generated text plus the provider that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub text: String,
    pub provider: LlmProvider,
}

impl Generated {
    fn placeholder(text: String) -> Self {
        Self {
            text,
            provider: LlmProvider::Placeholder,
        }
    }
}

/// Inputs for an interview answer.
#[derive(Debug, Clone, Copy)]
pub struct AnswerPrompt<'a> {
    pub question: &'a str,
    pub job_title: Option<&'a str>,
    pub company_name: Option<&'a str>,
    pub resume_summary: Option<&'a str>,
}

#[derive(Clone)]
pub struct JobAssistant {
    provider: LlmProvider,
    backend: Option<Arc<dyn TextCompletion>>,
}

impl JobAssistant {
    pub fn new(provider: LlmProvider, backend: Option<Arc<dyn TextCompletion>>) -> Self {
        Self { provider, backend }
    }

    /// Builds the assistant from configuration. An external backend is only
    /// constructed when the external provider is selected and a key is present.
    pub fn from_config(config: &Config) -> Self {
        let provider = LlmProvider::parse(&config.llm_provider);
        let backend: Option<Arc<dyn TextCompletion>> = match (provider, &config.llm_api_key) {
            (LlmProvider::External, Some(api_key)) => {
                let client = LlmClient::new(
                    api_key.clone(),
                    config.llm_model.clone(),
                    config.llm_api_url.clone(),
                );
                info!("LLM client initialized (model: {})", client.model());
                Some(Arc::new(client))
            }
            (LlmProvider::External, None) => {
                warn!("external provider selected without LLM_API_KEY; placeholder text will be used");
                None
            }
            (LlmProvider::Placeholder, _) => None,
        };
        Self::new(provider, backend)
    }

    /// The provider named by configuration, which may differ from what
    /// produces a given result.
    pub fn configured_provider(&self) -> LlmProvider {
        self.provider
    }

    pub async fn summarize(&self, resume_text: &str) -> Generated {
        let Some(backend) = self.external_backend("summarization") else {
            return Generated::placeholder(placeholder::summarize_resume(resume_text));
        };

        let prompt = render(
            RESUME_SUMMARY_PROMPT_TEMPLATE,
            &[
                ("grounding_instruction", GROUNDING_INSTRUCTION),
                ("resume_text", resume_text),
            ],
        );
        let system = format!("{RESUME_SUMMARY_SYSTEM} {PLAIN_TEXT_SYSTEM}");

        match backend.complete(&system, &prompt).await {
            Ok(text) => Generated {
                text,
                provider: LlmProvider::External,
            },
            Err(e) => {
                error!("external summarization failed, using placeholder: {e}");
                Generated::placeholder(placeholder::summarize_resume(resume_text))
            }
        }
    }

    pub async fn generate_answer(&self, request: AnswerPrompt<'_>) -> Generated {
        let fallback = || {
            Generated::placeholder(placeholder::interview_answer(
                request.question,
                request.job_title,
                request.company_name,
            ))
        };

        let Some(backend) = self.external_backend("answer generation") else {
            return fallback();
        };

        info!(
            "external answer generation requested job_title={:?} company_name={:?}",
            request.job_title, request.company_name
        );

        let prompt = build_answer_prompt(request);
        let system = format!("{INTERVIEW_COACH_SYSTEM} {PLAIN_TEXT_SYSTEM}");

        match backend.complete(&system, &prompt).await {
            Ok(text) => Generated {
                text,
                provider: LlmProvider::External,
            },
            Err(e) => {
                error!("external answer generation failed, using placeholder: {e}");
                fallback()
            }
        }
    }

    fn external_backend(&self, operation: &str) -> Option<&dyn TextCompletion> {
        match self.provider {
            LlmProvider::Placeholder => None,
            LlmProvider::External => {
                let backend = self.backend.as_deref();
                if backend.is_none() {
                    warn!("external provider selected without API key; using placeholder {operation}");
                }
                backend
            }
        }
    }
}

fn build_answer_prompt(request: AnswerPrompt<'_>) -> String {
    render(
        INTERVIEW_ANSWER_PROMPT_TEMPLATE,
        &[
            ("grounding_instruction", GROUNDING_INSTRUCTION),
            ("job_title", request.job_title.unwrap_or("not specified")),
            ("company_name", request.company_name.unwrap_or("not specified")),
            ("resume_summary", request.resume_summary.unwrap_or("not provided")),
            ("question", request.question),
        ],
    )
}
