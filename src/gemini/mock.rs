//! Scripted in-memory [`ContentGenerator`] for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::error::GeminiError;
use super::types::{Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part};
use super::ContentGenerator;

#[derive(Debug, Clone)]
pub enum Reply {
    /// A candidate whose text is this string.
    Text(String),
    /// A response with no candidates.
    Empty,
    /// A 500 from the service.
    Fail,
}

impl Reply {
    /// A well-formed JSON array of the given strings.
    pub fn list<S: AsRef<str>>(items: &[S]) -> Self {
        let items: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
        Reply::Text(serde_json::to_string(&items).unwrap())
    }

    /// `count` numbered items, `"{prefix} 1"` to `"{prefix} {count}"`.
    pub fn numbered(prefix: &str, count: usize) -> Self {
        let items: Vec<String> = (1..=count).map(|i| format!("{prefix} {i}")).collect();
        Self::list(&items)
    }
}

#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedClient {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(model, prompt)` for every request received so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ContentGenerator for ScriptedClient {
    async fn generate_content(
        &self,
        model: &str,
        req: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let prompt = req
            .contents
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.clone())
            .collect::<String>();
        self.calls.lock().unwrap().push((model.to_string(), prompt));

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("ScriptedClient ran out of replies");
        match reply {
            Reply::Text(text) => Ok(GenerateContentResponse {
                candidates: vec![Candidate {
                    content: Some(Content {
                        role: Some("model".into()),
                        parts: vec![Part { text: Some(text) }],
                    }),
                    finish_reason: Some("STOP".into()),
                }],
                usage_metadata: None,
            }),
            Reply::Empty => Ok(GenerateContentResponse::default()),
            Reply::Fail => Err(GeminiError::ApiError {
                status: 500,
                message: "mock error".into(),
            }),
        }
    }
}
