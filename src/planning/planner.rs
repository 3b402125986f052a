//! Language-model planner collaborator.
//!
//! [`Planner`] turns a prompt into raw reply text. [`GenaiPlanner`] sends it
//! as a single user message to an OpenAI-compatible chat endpoint through
//! `genai`, with the endpoint and token injected from [`AppConfig`] rather
//! than read from the environment.

use async_trait::async_trait;
use genai::adapter::AdapterKind;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use genai::resolver::{AuthData, Endpoint, ServiceTargetResolver};
use genai::{Client, ModelIden, ServiceTarget};

use crate::config::AppConfig;
use crate::error::PlannerError;

#[async_trait]
pub trait Planner: Send + Sync {
    /// Model identifier, for logs and error messages.
    fn model(&self) -> &str;

    async fn plan(&self, prompt: &str) -> Result<String, PlannerError>;
}

pub struct GenaiPlanner {
    client: Client,
    model: String,
    options: ChatOptions,
}

impl GenaiPlanner {
    pub fn new(config: &AppConfig) -> Self {
        let endpoint = config.planner_endpoint.clone();
        let token = config.planner_token.clone();

        // Every model name is routed to the configured OpenAI-compatible endpoint.
        let target_resolver = ServiceTargetResolver::from_resolver_fn(
            move |service_target: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
                let ServiceTarget { model, .. } = service_target;
                Ok(ServiceTarget {
                    endpoint: Endpoint::from_owned(endpoint.clone()),
                    auth: AuthData::from_single(token.clone()),
                    model: ModelIden::new(AdapterKind::OpenAI, model.model_name),
                })
            },
        );

        let client = Client::builder()
            .with_service_target_resolver(target_resolver)
            .build();

        let options = ChatOptions::default()
            .with_temperature(config.temperature)
            .with_top_p(config.top_p)
            .with_max_tokens(config.max_tokens);

        Self {
            client,
            model: config.model.clone(),
            options,
        }
    }
}

#[async_trait]
impl Planner for GenaiPlanner {
    fn model(&self) -> &str {
        &self.model
    }

    async fn plan(&self, prompt: &str) -> Result<String, PlannerError> {
        let request = ChatRequest::default().append_message(ChatMessage::user(prompt));

        let response = self
            .client
            .exec_chat(self.model.as_str(), request, Some(&self.options))
            .await
            .map_err(|e| PlannerError::Unavailable {
                model: self.model.clone(),
                message: e.to_string(),
            })?;

        response
            .first_text()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| PlannerError::EmptyResponse {
                model: self.model.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PartialConfig;

    #[test]
    fn planner_uses_configured_model() {
        let config = PartialConfig {
            model: Some("gpt-4o".to_string()),
            planner_token: Some("test-token".to_string()),
            ..Default::default()
        }
        .finalize()
        .unwrap();

        let planner = GenaiPlanner::new(&config);

        assert_eq!(planner.model(), "gpt-4o");
    }
}
