use std::fmt;

/// The four wizard steps, strictly ordered.
///
/// Flow is forward only: INPUT_CORE → SELECT_PILLAR → SELECT_VARIATION → VIEW_QUESTIONS.
/// Going back to the start is a reset, not a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    InputCore = 0,
    SelectPillar = 1,
    SelectVariation = 2,
    ViewQuestions = 3,
}

impl Step {
    pub const ALL: [Step; 4] = [
        Step::InputCore,
        Step::SelectPillar,
        Step::SelectVariation,
        Step::ViewQuestions,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Short label shown in the progress header.
    pub fn label(self) -> &'static str {
        match self {
            Step::InputCore => "Core Topic",
            Step::SelectPillar => "Select Pillar",
            Step::SelectVariation => "Select Lesson",
            Step::ViewQuestions => "Get Questions",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::InputCore => write!(f, "INPUT_CORE"),
            Step::SelectPillar => write!(f, "SELECT_PILLAR"),
            Step::SelectVariation => write!(f, "SELECT_VARIATION"),
            Step::ViewQuestions => write!(f, "VIEW_QUESTIONS"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_strictly_ordered() {
        assert!(Step::InputCore < Step::SelectPillar);
        assert!(Step::SelectPillar < Step::SelectVariation);
        assert!(Step::SelectVariation < Step::ViewQuestions);
        let indices: Vec<usize> = Step::ALL.iter().map(|s| s.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn step_display() {
        assert_eq!(Step::InputCore.to_string(), "INPUT_CORE");
        assert_eq!(Step::SelectPillar.to_string(), "SELECT_PILLAR");
        assert_eq!(Step::SelectVariation.to_string(), "SELECT_VARIATION");
        assert_eq!(Step::ViewQuestions.to_string(), "VIEW_QUESTIONS");
    }

    #[test]
    fn step_labels() {
        assert_eq!(Step::SelectVariation.label(), "Select Lesson");
        assert_eq!(Step::ViewQuestions.label(), "Get Questions");
    }
}
