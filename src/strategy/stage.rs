use super::record::ContentStrategy;
use super::step::Step;

/// Where a session is, carrying only the data that exists at that point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Stage {
    #[default]
    InputCore,
    SelectPillar {
        core_topic: String,
        pillars: Vec<String>,
        selected: Option<String>,
    },
    SelectVariation {
        core_topic: String,
        pillars: Vec<String>,
        pillar: String,
        variations: Vec<String>,
        selected: Option<String>,
    },
    ViewQuestions {
        core_topic: String,
        pillars: Vec<String>,
        pillar: String,
        variations: Vec<String>,
        variation: String,
        questions: Vec<String>,
    },
}

impl Stage {
    pub fn step(&self) -> Step {
        match self {
            Stage::InputCore => Step::InputCore,
            Stage::SelectPillar { .. } => Step::SelectPillar,
            Stage::SelectVariation { .. } => Step::SelectVariation,
            Stage::ViewQuestions { .. } => Step::ViewQuestions,
        }
    }

    /// Items the user can pick from at this stage; empty outside the two selection steps.
    pub fn options(&self) -> &[String] {
        match self {
            Stage::SelectPillar { pillars, .. } => pillars,
            Stage::SelectVariation { variations, .. } => variations,
            _ => &[],
        }
    }

    pub fn selected(&self) -> Option<&str> {
        match self {
            Stage::SelectPillar { selected, .. } | Stage::SelectVariation { selected, .. } => {
                selected.as_deref()
            }
            _ => None,
        }
    }

    /// Flattens the stage into the export record.
    pub fn strategy(&self) -> ContentStrategy {
        match self {
            Stage::InputCore => ContentStrategy::default(),
            Stage::SelectPillar {
                core_topic,
                pillars,
                selected,
            } => ContentStrategy {
                core_topic: core_topic.clone(),
                selected_pillar: selected.clone(),
                generated_pillars: pillars.clone(),
                ..ContentStrategy::default()
            },
            Stage::SelectVariation {
                core_topic,
                pillars,
                pillar,
                variations,
                selected,
            } => ContentStrategy {
                core_topic: core_topic.clone(),
                selected_pillar: Some(pillar.clone()),
                selected_variation: selected.clone(),
                generated_pillars: pillars.clone(),
                generated_variations: variations.clone(),
                ..ContentStrategy::default()
            },
            Stage::ViewQuestions {
                core_topic,
                pillars,
                pillar,
                variations,
                variation,
                questions,
            } => ContentStrategy {
                core_topic: core_topic.clone(),
                selected_pillar: Some(pillar.clone()),
                selected_variation: Some(variation.clone()),
                generated_pillars: pillars.clone(),
                generated_variations: variations.clone(),
                generated_questions: questions.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn input_core_projects_to_empty_record() {
        assert_eq!(Stage::InputCore.strategy(), ContentStrategy::default());
        assert_eq!(Stage::default().step(), Step::InputCore);
        assert!(Stage::InputCore.options().is_empty());
    }

    #[test]
    fn select_pillar_leaves_later_fields_empty() {
        let stage = Stage::SelectPillar {
            core_topic: "Yoga".into(),
            pillars: strings(&["Breathing", "Balance"]),
            selected: Some("Balance".into()),
        };
        let record = stage.strategy();

        assert_eq!(stage.step(), Step::SelectPillar);
        assert_eq!(stage.options(), strings(&["Breathing", "Balance"]).as_slice());
        assert_eq!(stage.selected(), Some("Balance"));
        assert_eq!(record.core_topic, "Yoga");
        assert_eq!(record.selected_pillar.as_deref(), Some("Balance"));
        assert_eq!(record.selected_variation, None);
        assert!(record.generated_variations.is_empty());
        assert!(record.generated_questions.is_empty());
    }

    #[test]
    fn select_variation_leaves_questions_empty() {
        let mut stage = Stage::SelectVariation {
            core_topic: "Yoga".into(),
            pillars: strings(&["Breathing", "Balance"]),
            pillar: "Balance".into(),
            variations: strings(&["Tree Pose", "Warrior III"]),
            selected: None,
        };
        let record = stage.strategy();

        assert_eq!(stage.step(), Step::SelectVariation);
        assert_eq!(stage.options(), strings(&["Tree Pose", "Warrior III"]).as_slice());
        assert_eq!(stage.selected(), None);
        assert_eq!(record.selected_pillar.as_deref(), Some("Balance"));
        assert_eq!(record.generated_pillars, strings(&["Breathing", "Balance"]));
        assert_eq!(record.generated_variations, strings(&["Tree Pose", "Warrior III"]));
        assert_eq!(record.selected_variation, None);
        assert!(record.generated_questions.is_empty());

        if let Stage::SelectVariation { selected, .. } = &mut stage {
            *selected = Some("Tree Pose".into());
        }
        let record = stage.strategy();
        assert_eq!(record.selected_variation.as_deref(), Some("Tree Pose"));
        assert!(record.generated_questions.is_empty());
    }

    #[test]
    fn view_questions_fills_every_field() {
        let stage = Stage::ViewQuestions {
            core_topic: "Yoga".into(),
            pillars: strings(&["Balance"]),
            pillar: "Balance".into(),
            variations: strings(&["Tree Pose"]),
            variation: "Tree Pose".into(),
            questions: strings(&["How do I stop wobbling?"]),
        };
        let record = stage.strategy();

        assert!(stage.options().is_empty());
        assert_eq!(stage.selected(), None);
        assert_eq!(record.selected_variation.as_deref(), Some("Tree Pose"));
        assert_eq!(record.generated_questions, strings(&["How do I stop wobbling?"]));
    }
}
