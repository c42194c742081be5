use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoachError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_display() {
        let err = CoachError::Config("error_dismiss_secs must be positive".into());
        assert_eq!(
            err.to_string(),
            "Config error: error_dismiss_secs must be positive"
        );
    }

    #[test]
    fn json_error_converts() {
        let err: CoachError = serde_json::from_str::<Vec<String>>("{").unwrap_err().into();
        assert!(matches!(err, CoachError::Json(_)));
    }
}
