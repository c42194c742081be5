use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info};
use uuid::Uuid;

use super::loading::{LoadingGuard, LoadingState};
use super::notice::{ErrorNotice, Notice};
use super::record::ContentStrategy;
use super::stage::Stage;
use super::step::Step;
use crate::gemini::ContentGenerator;
use crate::generator::{GenerationFailure, StrategyGenerator};

/// Why a user intent was ignored. Nothing changes when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("topic must not be empty")]
    EmptyTopic,
    #[error("item is not one of the generated options")]
    NotInList,
    #[error("nothing is selected yet")]
    NothingSelected,
    #[error("not available at this step")]
    WrongStep,
}

/// The result of handing one user intent to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// A generation call succeeded and the session moved to this step.
    Advanced(Step),
    /// The selection for the current step is now this item.
    Selected(String),
    Rejected(Rejection),
    /// The generation call failed; the step is unchanged and the notice is showing.
    Failed(GenerationFailure),
    /// Back to an empty session at INPUT_CORE.
    Reset,
}

/// One wizard run: the current stage, the generator it drives, and the
/// observable loading and error state.
///
/// Every transition takes `&mut self`, so at most one generation call is in
/// flight per session.
pub struct Session<C> {
    id: Uuid,
    stage: Stage,
    generator: StrategyGenerator<C>,
    loading: watch::Sender<LoadingState>,
    notice: ErrorNotice,
}

impl<C: ContentGenerator> Session<C> {
    pub fn new(generator: StrategyGenerator<C>, dismiss_after: Duration) -> Self {
        let (loading, _) = watch::channel(LoadingState::default());
        Self {
            id: Uuid::new_v4(),
            stage: Stage::InputCore,
            generator,
            loading,
            notice: ErrorNotice::new(dismiss_after),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn step(&self) -> Step {
        self.stage.step()
    }

    pub fn strategy(&self) -> ContentStrategy {
        self.stage.strategy()
    }

    /// True when the current step has a selection and no call is running.
    pub fn can_confirm(&self) -> bool {
        self.stage.selected().is_some() && !self.loading.borrow().is_loading
    }

    #[cfg(test)]
    pub fn loading(&self) -> LoadingState {
        self.loading.borrow().clone()
    }

    #[cfg(test)]
    pub fn error(&self) -> Option<String> {
        self.notice.current()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<LoadingState> {
        self.loading.subscribe()
    }

    pub fn subscribe_errors(&self) -> watch::Receiver<Option<Notice>> {
        self.notice.subscribe()
    }

    #[cfg(test)]
    pub fn generator(&self) -> &StrategyGenerator<C> {
        &self.generator
    }

    /// INPUT_CORE → SELECT_PILLAR. The topic is trimmed; blank topics are rejected.
    pub async fn submit_topic(&mut self, topic: &str) -> Transition {
        if self.stage != Stage::InputCore {
            return Transition::Rejected(Rejection::WrongStep);
        }
        let core_topic = topic.trim();
        if core_topic.is_empty() {
            return Transition::Rejected(Rejection::EmptyTopic);
        }

        self.notice.clear();
        let result = {
            let _loading = LoadingGuard::start(
                &self.loading,
                "Analyzing market and generating strategic pillars...",
            );
            self.generator.generate_pillars(core_topic).await
        };

        match result {
            Ok(pillars) => {
                info!(topic = core_topic, pillars = pillars.len(), "pillars generated");
                self.stage = Stage::SelectPillar {
                    core_topic: core_topic.to_string(),
                    pillars,
                    selected: None,
                };
                Transition::Advanced(Step::SelectPillar)
            }
            Err(failure) => self.fail(failure),
        }
    }

    /// Stores `item` as the current step's selection. No network call.
    pub fn select(&mut self, item: &str) -> Transition {
        let (options, selected) = match &mut self.stage {
            Stage::SelectPillar {
                pillars, selected, ..
            } => (pillars, selected),
            Stage::SelectVariation {
                variations,
                selected,
                ..
            } => (variations, selected),
            _ => return Transition::Rejected(Rejection::WrongStep),
        };
        if !options.iter().any(|o| o == item) {
            return Transition::Rejected(Rejection::NotInList);
        }
        *selected = Some(item.to_string());
        Transition::Selected(item.to_string())
    }

    /// SELECT_PILLAR → SELECT_VARIATION or SELECT_VARIATION → VIEW_QUESTIONS,
    /// using the current selection as context for the next call.
    pub async fn confirm(&mut self) -> Transition {
        match &self.stage {
            Stage::SelectPillar {
                core_topic,
                pillars,
                selected: Some(pillar),
            } => {
                let (core_topic, pillars, pillar) =
                    (core_topic.clone(), pillars.clone(), pillar.clone());
                self.notice.clear();
                let result = {
                    let message = format!("Drilling down into \"{pillar}\"...");
                    let _loading = LoadingGuard::start(&self.loading, message);
                    self.generator.generate_variations(&pillar, &core_topic).await
                };

                match result {
                    Ok(variations) => {
                        info!(%pillar, variations = variations.len(), "variations generated");
                        self.stage = Stage::SelectVariation {
                            core_topic,
                            pillars,
                            pillar,
                            variations,
                            selected: None,
                        };
                        Transition::Advanced(Step::SelectVariation)
                    }
                    Err(failure) => self.fail(failure),
                }
            }
            Stage::SelectVariation {
                core_topic,
                pillars,
                pillar,
                variations,
                selected: Some(variation),
            } => {
                let (core_topic, pillars, pillar, variations, variation) = (
                    core_topic.clone(),
                    pillars.clone(),
                    pillar.clone(),
                    variations.clone(),
                    variation.clone(),
                );
                self.notice.clear();
                let result = {
                    let _loading = LoadingGuard::start(
                        &self.loading,
                        "Finding customer pain points and questions...",
                    );
                    self.generator.generate_questions(&variation, &pillar).await
                };

                match result {
                    Ok(questions) => {
                        info!(%variation, questions = questions.len(), "questions generated");
                        self.stage = Stage::ViewQuestions {
                            core_topic,
                            pillars,
                            pillar,
                            variations,
                            variation,
                            questions,
                        };
                        Transition::Advanced(Step::ViewQuestions)
                    }
                    Err(failure) => self.fail(failure),
                }
            }
            Stage::SelectPillar { selected: None, .. }
            | Stage::SelectVariation { selected: None, .. } => {
                Transition::Rejected(Rejection::NothingSelected)
            }
            Stage::InputCore | Stage::ViewQuestions { .. } => {
                Transition::Rejected(Rejection::WrongStep)
            }
        }
    }

    /// "Start New Strategy" from the results view.
    pub fn restart(&mut self) -> Transition {
        if self.step() != Step::ViewQuestions {
            return Transition::Rejected(Rejection::WrongStep);
        }
        self.reset()
    }

    /// Drops everything and returns to INPUT_CORE. The caller confirms intent first.
    pub fn reset(&mut self) -> Transition {
        info!(from = %self.step(), "session reset");
        self.stage = Stage::InputCore;
        self.notice.clear();
        Transition::Reset
    }

    fn fail(&mut self, failure: GenerationFailure) -> Transition {
        debug!(step = %self.step(), "{failure}");
        self.notice.show(failure.to_string());
        Transition::Failed(failure)
    }
}
