//! HTTP client for the image and script generation endpoints.
//!
//! [`GenClient`] holds the base URL and HTTP client for one generation
//! backend. Both endpoints share the `{ success, ..., error }` response
//! contract: a `success: false` body and a transport failure are treated
//! identically by callers, as a recoverable error reported to the user.

use serde::{Deserialize, Serialize};

/// Path of the image generation endpoint, relative to the base URL.
const IMAGE_ENDPOINT: &str = "generate-comic-panel";

/// Path of the script generation endpoint, relative to the base URL.
const SCRIPT_ENDPOINT: &str = "generate-script";

/// Character roster entry sent as context to script generation.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterContext {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Serialize)]
struct ScriptRequest<'a> {
    prompt: &'a str,
    characters: &'a [CharacterContext],
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    success: bool,
    #[serde(rename = "imageUrl")]
    image_url: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScriptResponse {
    success: bool,
    script: Option<String>,
    error: Option<String>,
}

/// Errors from the generation endpoints.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// The request never completed (connect, timeout, non-2xx, decode).
    #[error("Generation request failed: {0}")]
    Transport(String),

    /// The endpoint answered `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// The endpoint claimed success but the payload was unusable.
    #[error("Generation endpoint returned a malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for GenError {
    fn from(err: reqwest::Error) -> Self {
        GenError::Transport(err.to_string())
    }
}

/// Client for a generation backend.
pub struct GenClient {
    http: reqwest::Client,
    base_url: String,
}

impl GenClient {
    /// Create a client targeting a generation backend.
    ///
    /// * `base_url` - HTTP base URL, e.g. `http://localhost:9000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// HTTP base URL of the generation backend.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate a panel image for `prompt`, returning the image URL.
    pub async fn generate_image(&self, prompt: &str) -> Result<String, GenError> {
        let url = format!("{}/{IMAGE_ENDPOINT}", self.base_url);
        tracing::debug!(%url, "requesting image generation");

        let response: ImageResponse = self
            .http
            .post(&url)
            .json(&ImageRequest { prompt })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.success {
            return Err(GenError::Rejected(
                response
                    .error
                    .unwrap_or_else(|| "image generation failed".to_string()),
            ));
        }
        response
            .image_url
            .ok_or_else(|| GenError::Malformed("success with no imageUrl".to_string()))
    }

    /// Generate script text for `prompt` with the character roster as
    /// context, returning the text. Nothing is persisted here.
    pub async fn generate_script(
        &self,
        prompt: &str,
        characters: &[CharacterContext],
    ) -> Result<String, GenError> {
        let url = format!("{}/{SCRIPT_ENDPOINT}", self.base_url);
        tracing::debug!(%url, characters = characters.len(), "requesting script generation");

        let response: ScriptResponse = self
            .http
            .post(&url)
            .json(&ScriptRequest { prompt, characters })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.success {
            return Err(GenError::Rejected(
                response
                    .error
                    .unwrap_or_else(|| "script generation failed".to_string()),
            ));
        }
        response
            .script
            .ok_or_else(|| GenError::Malformed("success with no script".to_string()))
    }
}
