use std::path::Path;

use serde::Deserialize;

use crate::input::InputError;

/// Optional survey description read from `--config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SurveyConfig {
    #[serde(default)]
    pub scale: Option<Vec<String>>,
    #[serde(default)]
    pub neutral: Vec<String>,
    #[serde(default)]
    pub palette: Option<Vec<String>>,
    #[serde(default)]
    pub questions: Option<Vec<String>>,
    #[serde(default)]
    pub missing_tokens: Vec<String>,
}

pub fn load_config(path: &Path) -> Result<SurveyConfig, InputError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        InputError::MissingInput(format!("config {}: {}", path.display(), e))
    })?;
    let config = parse_config(&text)?;
    tracing::info!(path = %path.display(), "survey config loaded");
    Ok(config)
}

pub fn parse_config(text: &str) -> Result<SurveyConfig, InputError> {
    let config: SurveyConfig = serde_json::from_str(text)?;
    if config.scale.is_none() && !config.neutral.is_empty() {
        return Err(InputError::InvalidInput(
            "config sets neutral without a scale".to_string(),
        ));
    }
    Ok(config)
}
