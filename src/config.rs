//! Configuração do coach carregada a partir de `coach.toml`.
//!
//! A struct [`CoachConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! As variáveis de ambiente `GEMINI_API_KEY` e `API_KEY` têm precedência sobre o arquivo.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::CoachError;
use crate::gemini::client::API_URL;
use crate::generator::DEFAULT_MODEL;
use crate::strategy::{DEFAULT_DISMISS_AFTER, EXPORT_FILE_NAME};

pub const CONFIG_FILE: &str = "coach.toml";

/// Variáveis de ambiente consultadas para a chave, em ordem de prioridade.
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Configuração de nível superior carregada de `coach.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CoachConfig {
    /// Chave da API Gemini.
    #[serde(default)]
    pub api_key: String,

    /// Identificador do modelo usado nas três chamadas.
    #[serde(default = "default_model")]
    pub model: String,

    /// URL base da API Generative Language.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Segundos até uma mensagem de erro sumir sozinha.
    #[serde(default = "default_error_dismiss_secs")]
    pub error_dismiss_secs: u64,

    /// Caminho do arquivo JSON exportado.
    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    API_URL.to_string()
}

// Valor padrão: 5 segundos.
fn default_error_dismiss_secs() -> u64 {
    DEFAULT_DISMISS_AFTER.as_secs()
}

fn default_export_path() -> PathBuf {
    PathBuf::from(EXPORT_FILE_NAME)
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            error_dismiss_secs: default_error_dismiss_secs(),
            export_path: default_export_path(),
        }
    }
}

impl CoachConfig {
    /// Carrega a configuração de `coach.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self, CoachError> {
        Self::load_from(Path::new(CONFIG_FILE), |name| std::env::var(name).ok())
    }

    /// Carrega de `path`, consultando `env` para a chave da API.
    pub fn load_from(
        path: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CoachError> {
        let mut config = if path.exists() {
            debug!(path = %path.display(), "reading config file");
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<CoachConfig>(&contents)?
        } else {
            Self::default()
        };

        // Variável de ambiente tem precedência sobre o arquivo para a chave API.
        if let Some(key) = API_KEY_VARS
            .iter()
            .filter_map(|name| env(name))
            .find(|key| !key.trim().is_empty())
        {
            config.api_key = key;
        }

        if config.error_dismiss_secs == 0 {
            return Err(CoachError::Config(
                "error_dismiss_secs must be positive".into(),
            ));
        }

        if config.api_key.trim().is_empty() {
            // A ausência não impede a inicialização; as chamadas falham no primeiro uso.
            warn!("API key is missing: set GEMINI_API_KEY or api_key in {CONFIG_FILE}");
        }

        Ok(config)
    }

    pub fn error_dismiss_after(&self) -> Duration {
        Duration::from_secs(self.error_dismiss_secs)
    }
}
