//! Tipos de erro para o cliente da API Gemini.
//!
//! Define [`GeminiError`] com variantes para chave ausente, rate limiting,
//! erros da API e erros de rede. Usa `thiserror` para derivar `Display` e
//! `Error` a partir dos atributos `#[error(...)]`.

use thiserror::Error;

/// Erros que podem ocorrer ao interagir com a API Generative Language.
///
/// - [`MissingApiKey`](GeminiError::MissingApiKey): nenhuma credencial configurada
/// - [`RateLimited`](GeminiError::RateLimited): o servidor retornou HTTP 429
/// - [`ApiError`](GeminiError::ApiError): qualquer outro erro HTTP (4xx/5xx)
/// - [`Network`](GeminiError::Network): falha na camada de rede
#[derive(Debug, Error)]
pub enum GeminiError {
    /// A chave da API está vazia; nenhuma requisição é enviada.
    #[error("API key is not configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    /// O servidor retornou HTTP 429. Apenas informativo: não há retentativa.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Erro retornado pela API (ex.: 400 requisição inválida, 403 chave inválida).
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Falha de rede subjacente (DNS, conexão recusada, timeout, corpo ilegível).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}
