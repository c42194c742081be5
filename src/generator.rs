//! Prompt construction and list parsing for the three strategy calls.
//!
//! [`StrategyGenerator`] narrows context one call at a time: pillars for a core
//! topic, lesson variations for a pillar, audience questions for a variation.
//! Every call asks the service for a JSON array of strings and collapses any
//! transport or parse failure into a static [`GenerationFailure`].

use thiserror::Error;
use tracing::{debug, error};

use crate::gemini::{ContentGenerator, GeminiError, GenerateContentRequest};

/// Model used when neither the config file nor the CLI names one.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Which of the three calls failed. The message is user-facing and static;
/// the underlying cause is only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GenerationFailure {
    #[error("Failed to generate pillar topics.")]
    Pillars,
    #[error("Failed to generate lesson variations.")]
    Variations,
    #[error("Failed to generate audience questions.")]
    Questions,
}

#[derive(Debug, Error)]
enum ListError {
    #[error(transparent)]
    Gemini(#[from] GeminiError),
    #[error("response is not a JSON array of strings: {0}")]
    Parse(#[from] serde_json::Error),
}

pub struct StrategyGenerator<C> {
    client: C,
    model: String,
}

impl<C: ContentGenerator> StrategyGenerator<C> {
    pub fn new(client: C, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    #[cfg(test)]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// 30 broad pillar topics for `core_topic`.
    pub async fn generate_pillars(
        &self,
        core_topic: &str,
    ) -> Result<Vec<String>, GenerationFailure> {
        self.generate_list(pillars_prompt(core_topic), GenerationFailure::Pillars)
            .await
    }

    /// 10 lesson variations for `pillar`, grounded in `core_topic`.
    pub async fn generate_variations(
        &self,
        pillar: &str,
        core_topic: &str,
    ) -> Result<Vec<String>, GenerationFailure> {
        self.generate_list(
            variations_prompt(pillar, core_topic),
            GenerationFailure::Variations,
        )
        .await
    }

    /// 25 audience questions for `variation`, grounded in `pillar`.
    pub async fn generate_questions(
        &self,
        variation: &str,
        pillar: &str,
    ) -> Result<Vec<String>, GenerationFailure> {
        self.generate_list(
            questions_prompt(variation, pillar),
            GenerationFailure::Questions,
        )
        .await
    }

    async fn generate_list(
        &self,
        prompt: String,
        failure: GenerationFailure,
    ) -> Result<Vec<String>, GenerationFailure> {
        match self.request_list(prompt).await {
            Ok(items) => {
                debug!(model = %self.model, count = items.len(), kind = ?failure, "generated list");
                Ok(items)
            }
            Err(e) => {
                error!(error = %e, "{failure}");
                Err(failure)
            }
        }
    }

    async fn request_list(&self, prompt: String) -> Result<Vec<String>, ListError> {
        let req = GenerateContentRequest::string_list(prompt);
        let response = self.client.generate_content(&self.model, &req).await?;
        Ok(parse_string_list(response.text().as_deref())?)
    }
}

/// Parses a response body as a JSON array of strings.
///
/// An absent or blank body is an empty list. Anything else must decode exactly;
/// objects, numbers or mixed arrays are errors. Length is not checked.
pub fn parse_string_list(text: Option<&str>) -> Result<Vec<String>, serde_json::Error> {
    match text.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(body) => serde_json::from_str(body),
    }
}

fn pillars_prompt(core_topic: &str) -> String {
    format!(
        "Act as a world-class content strategist.\n\
         Generate 30 broad Pillar Topics related to the core topic: \"{core_topic}\".\n\
         These should be high-level categories suitable for building topical authority.\n\
         Keep titles concise (under 6 words)."
    )
}

fn variations_prompt(pillar: &str, core_topic: &str) -> String {
    format!(
        "Context: Core Topic is \"{core_topic}\".\n\
         Selected Pillar: \"{pillar}\".\n\
         Act as an expert instructional designer.\n\
         Generate 10 specific Lesson Variations or content angles for this pillar.\n\
         These should be distinct, actionable sub-topics suitable for a single lesson or article."
    )
}

fn questions_prompt(variation: &str, pillar: &str) -> String {
    format!(
        "Context: Pillar is \"{pillar}\", Lesson Topic is \"{variation}\".\n\
         Act as a customer empathy researcher.\n\
         Generate 25 highly relevant Audience Questions that a user would search for or ask \
         about this specific lesson topic.\n\
         Focus on pain points, \"how-to\" queries, and search intent."
    )
}
