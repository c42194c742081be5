//! The flat strategy record and its two export formats.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoachError;

/// Default file name for the JSON export.
pub const EXPORT_FILE_NAME: &str = "content_strategy.json";

/// Everything a session has produced so far.
///
/// Fields for steps not yet reached are empty or `None`. Field order is the
/// key order of the JSON export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStrategy {
    pub core_topic: String,
    pub selected_pillar: Option<String>,
    pub selected_variation: Option<String>,
    pub generated_pillars: Vec<String>,
    pub generated_variations: Vec<String>,
    pub generated_questions: Vec<String>,
}

impl ContentStrategy {
    /// Plain-text summary: topic, pillar, variation, then the questions as a
    /// 1-based numbered list.
    pub fn summary_text(&self) -> String {
        let questions = self
            .generated_questions
            .iter()
            .enumerate()
            .map(|(i, q)| format!("{}. {q}", i + 1))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Core Topic: {}\nPillar: {}\nLesson Variation: {}\n\nAudience Questions:\n{}",
            self.core_topic,
            self.selected_pillar.as_deref().unwrap_or_default(),
            self.selected_variation.as_deref().unwrap_or_default(),
            questions
        )
        .trim()
        .to_string()
    }

    /// Pretty JSON, 2-space indent, keys in declaration order.
    pub fn to_json(&self) -> Result<String, CoachError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CoachError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<(), CoachError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn read_json(path: &Path) -> Result<Self, CoachError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed() -> ContentStrategy {
        ContentStrategy {
            core_topic: "Sustainable Gardening".into(),
            selected_pillar: Some("Composting Basics".into()),
            selected_variation: Some("Setting Up a Bin".into()),
            generated_pillars: vec!["Soil Health".into(), "Composting Basics".into()],
            generated_variations: vec!["Setting Up a Bin".into(), "Worm Farms".into()],
            generated_questions: vec![
                "How big should a compost bin be?".into(),
                "Why does my compost smell?".into(),
            ],
        }
    }

    #[test]
    fn json_roundtrip_is_lossless() {
        let strategy = completed();
        let json = strategy.to_json().unwrap();
        assert_eq!(ContentStrategy::from_json(&json).unwrap(), strategy);
    }

    #[test]
    fn json_keys_are_camel_case_in_stable_order() {
        let json = completed().to_json().unwrap();
        let keys = [
            "\"coreTopic\"",
            "\"selectedPillar\"",
            "\"selectedVariation\"",
            "\"generatedPillars\"",
            "\"generatedVariations\"",
            "\"generatedQuestions\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(json.starts_with("{\n  \"coreTopic\": \"Sustainable Gardening\","));
    }

    #[test]
    fn empty_record_serializes_nulls() {
        let json = ContentStrategy::default().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "coreTopic": "",
                "selectedPillar": null,
                "selectedVariation": null,
                "generatedPillars": [],
                "generatedVariations": [],
                "generatedQuestions": []
            })
        );
    }

    #[test]
    fn summary_text_format() {
        assert_eq!(
            completed().summary_text(),
            "Core Topic: Sustainable Gardening\n\
             Pillar: Composting Basics\n\
             Lesson Variation: Setting Up a Bin\n\
             \n\
             Audience Questions:\n\
             1. How big should a compost bin be?\n\
             2. Why does my compost smell?"
        );
    }

    #[test]
    fn summary_text_without_questions_is_trimmed() {
        let mut strategy = completed();
        strategy.generated_questions.clear();
        assert!(strategy.summary_text().ends_with("Audience Questions:"));
    }

    #[test]
    fn write_and_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);
        let strategy = completed();

        strategy.write_json(&path).unwrap();

        assert_eq!(ContentStrategy::read_json(&path).unwrap(), strategy);
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentStrategy::read_json(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CoachError::Io(_)));
    }
}
