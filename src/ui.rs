//! Interface de terminal do coach: telas do assistente, spinner e saída colorida.
//!
//! Usa `indicatif` para o spinner exibido enquanto uma chamada de geração está
//! em andamento e `console` para estilização com cores. O [`Wizard`] lê o passo
//! atual da [`Session`], coleta uma escolha do usuário e a despacha para a sessão.

use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::watch;
use tracing::{Instrument, info, info_span};

use crate::gemini::ContentGenerator;
use crate::strategy::{LoadingState, Notice, Rejection, Session, Step, Transition};

const TOPIC_PROMPT: &str =
    "Core topic (e.g., Sustainable Gardening, SaaS Marketing, Yoga for Seniors)";
const RESET_PROMPT: &str = "Start a new strategy session? Current progress will be lost.";

/// Whether the main loop should keep rendering screens.
enum Flow {
    Continue,
    Quit,
}

/// Estilos de cor usados nas telas.
struct Styles {
    title: Style,
    active: Style,
    dim: Style,
    green: Style,
    red: Style,
    yellow: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            title: Style::new().bold(),
            active: Style::new().cyan().bold(),
            dim: Style::new().dim(),
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
        }
    }
}

/// Assistente interativo de quatro passos sobre uma [`Session`].
pub struct Wizard<C> {
    session: Session<C>,
    export_path: PathBuf,
    loading: watch::Receiver<LoadingState>,
    errors: watch::Receiver<Option<Notice>>,
    styles: Styles,
}

impl<C: ContentGenerator> Wizard<C> {
    pub fn new(session: Session<C>, export_path: PathBuf) -> Self {
        let loading = session.subscribe_loading();
        let errors = session.subscribe_errors();
        Self {
            session,
            export_path,
            loading,
            errors,
            styles: Styles::default(),
        }
    }

    /// Executa o assistente até o usuário sair. `topic` pula a primeira pergunta.
    pub async fn run(mut self, topic: Option<String>) -> Result<()> {
        let span = info_span!("session", id = %self.session.id());
        async move {
            info!("wizard started");
            let mut pending_topic = topic;
            loop {
                self.print_header();
                let flow = match self.session.step() {
                    Step::InputCore => self.input_screen(pending_topic.take()).await?,
                    Step::SelectPillar | Step::SelectVariation => self.selection_screen().await?,
                    Step::ViewQuestions => self.results_screen().await?,
                };
                if let Flow::Quit = flow {
                    info!("wizard finished");
                    return Ok(());
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Cabeçalho com os quatro passos; o atual e os concluídos ficam destacados.
    fn print_header(&mut self) {
        let current = self.session.step();
        let steps = Step::ALL
            .iter()
            .map(|step| {
                let label = format!("{}. {}", step.index() + 1, step.label());
                if *step <= current {
                    self.styles.active.apply_to(label).to_string()
                } else {
                    self.styles.dim.apply_to(label).to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" › ");
        let percent = (current.index() + 1) * 100 / Step::ALL.len();

        println!();
        println!(
            "{}  {steps}  {}",
            self.styles.title.apply_to("Topical Authority Coach"),
            self.styles.dim.apply_to(format!("[{percent}%]"))
        );
        if let Some(notice) = self.errors.borrow_and_update().as_ref() {
            println!(
                "  {} {}",
                self.styles.red.apply_to("✗ Error:"),
                notice.message
            );
        }
        println!();
    }

    async fn input_screen(&mut self, topic: Option<String>) -> Result<Flow> {
        let topic = match topic {
            Some(topic) => topic,
            None => {
                println!("{}", self.styles.title.apply_to("Let's build your authority."));
                println!(
                    "Tell me the single core topic you want to dominate. \
                     I'll help you break it down."
                );
                println!(
                    "{}",
                    self.styles
                        .dim
                        .apply_to("  1. We generate 30 high-level pillars to cover your base.")
                );
                println!(
                    "{}",
                    self.styles
                        .dim
                        .apply_to("  2. You pick a pillar, we drill down into actionable lessons.")
                );
                println!(
                    "{}",
                    self.styles
                        .dim
                        .apply_to("  3. Finally, we map real audience questions to your content.")
                );
                println!();
                match self.prompt(TOPIC_PROMPT).await? {
                    Some(line) => line,
                    None => return Ok(Flow::Quit),
                }
            }
        };

        let transition = with_spinner(&mut self.loading, self.session.submit_topic(&topic)).await;
        if let Transition::Rejected(Rejection::EmptyTopic) = transition {
            println!("{}", self.styles.yellow.apply_to("Please enter a topic."));
        }
        Ok(Flow::Continue)
    }

    async fn selection_screen(&mut self) -> Result<Flow> {
        let (title, subtitle, confirm_label) = match self.session.step() {
            Step::SelectPillar => (
                "Choose a Pillar Topic",
                format!(
                    "Which aspect of \"{}\" do you want to focus on first?",
                    self.session.strategy().core_topic
                ),
                "Generate Variations",
            ),
            _ => (
                "Select a Lesson Angle",
                format!(
                    "How do you want to teach \"{}\"?",
                    self.session.strategy().selected_pillar.unwrap_or_default()
                ),
                "Find Audience Questions",
            ),
        };

        println!("{}", self.styles.title.apply_to(title));
        println!("{}", self.styles.dim.apply_to(subtitle));
        println!();

        let stage = self.session.stage();
        let options = stage.options().to_vec();
        if options.is_empty() {
            println!("{}", self.styles.yellow.apply_to("  No options were generated."));
        }
        for (i, option) in options.iter().enumerate() {
            if stage.selected() == Some(option.as_str()) {
                println!(
                    "  {} {:>2}. {}",
                    self.styles.green.apply_to("●"),
                    i + 1,
                    self.styles.green.apply_to(option)
                );
            } else {
                println!("  ○ {:>2}. {option}", i + 1);
            }
        }
        println!();

        let confirm_hint = if self.session.can_confirm() {
            format!("[c] {confirm_label}")
        } else {
            self.styles
                .dim
                .apply_to(format!("[c] {confirm_label}"))
                .to_string()
        };
        let label = format!("Number to select, {confirm_hint}, [r] reset, [q] quit");
        let Some(input) = self.prompt(&label).await? else {
            return Ok(Flow::Quit);
        };

        match input.as_str() {
            "q" => return Ok(Flow::Quit),
            "r" => self.confirm_reset().await?,
            "c" => {
                if !self.session.can_confirm() {
                    println!("{}", self.styles.yellow.apply_to("Pick an item first."));
                } else {
                    with_spinner(&mut self.loading, self.session.confirm()).await;
                }
            }
            other => match other.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => {
                    self.session.select(&options[n - 1]);
                }
                _ => println!(
                    "{}",
                    self.styles.yellow.apply_to(format!("Unknown choice: {other}"))
                ),
            },
        }
        Ok(Flow::Continue)
    }

    async fn results_screen(&mut self) -> Result<Flow> {
        let strategy = self.session.strategy();
        println!("{}", self.styles.green.apply_to("Strategy complete"));
        println!(
            "  {} {}",
            self.styles.dim.apply_to("Core Topic:      "),
            strategy.core_topic
        );
        println!(
            "  {} {}",
            self.styles.dim.apply_to("Pillar:          "),
            strategy.selected_pillar.as_deref().unwrap_or_default()
        );
        println!(
            "  {} {}",
            self.styles.dim.apply_to("Lesson Variation:"),
            strategy.selected_variation.as_deref().unwrap_or_default()
        );
        println!();
        println!(
            "{}",
            self.styles.title.apply_to("Audience Questions (Search Intent)")
        );
        for (i, question) in strategy.generated_questions.iter().enumerate() {
            println!("  {:>2}. {question}", i + 1);
        }
        println!();

        let label = format!(
            "[s] save to {}, [p] print summary, [n] start new strategy, [q] quit",
            self.export_path.display()
        );
        let Some(input) = self.prompt(&label).await? else {
            return Ok(Flow::Quit);
        };

        match input.as_str() {
            "q" => return Ok(Flow::Quit),
            "s" => {
                strategy
                    .write_json(&self.export_path)
                    .with_context(|| format!("failed to write {}", self.export_path.display()))?;
                info!(path = %self.export_path.display(), "strategy exported");
                println!(
                    "  {} Saved {}",
                    self.styles.green.apply_to("✓"),
                    self.export_path.display()
                );
            }
            "p" => {
                println!();
                println!("{}", strategy.summary_text());
            }
            "n" => {
                self.session.restart();
            }
            "r" => self.confirm_reset().await?,
            other => println!(
                "{}",
                self.styles.yellow.apply_to(format!("Unknown choice: {other}"))
            ),
        }
        Ok(Flow::Continue)
    }

    async fn confirm_reset(&mut self) -> Result<()> {
        let answer = self.prompt(&format!("{RESET_PROMPT} [y/N]")).await?;
        if matches!(answer.as_deref(), Some("y" | "Y" | "yes")) {
            self.session.reset();
        }
        Ok(())
    }

    /// Prints `label` and reads one trimmed line from stdin. `None` on end of input.
    /// Notices published or dismissed while waiting are reported as they happen.
    async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        print!("{label}\n> ");
        std::io::stdout().flush()?;
        let styles = &self.styles;
        let line = watch_errors(read_line(), &mut self.errors, |notice| {
            match notice {
                Some(notice) => println!(
                    "\n  {} {}",
                    styles.red.apply_to("✗ Error:"),
                    notice.message
                ),
                None => println!("\n  {}", styles.dim.apply_to("(error dismissed)")),
            }
            print!("> ");
            let _ = std::io::stdout().flush();
        })
        .await?;
        Ok(line.map(|l| l.trim().to_string()))
    }
}

/// Polls `transition` while showing a spinner for as long as the session reports loading.
async fn with_spinner<F: Future<Output = Transition>>(
    loading: &mut watch::Receiver<LoadingState>,
    transition: F,
) -> Transition {
    let mut spinner: Option<ProgressBar> = None;
    tokio::pin!(transition);

    let outcome = loop {
        tokio::select! {
            outcome = &mut transition => break outcome,
            changed = loading.changed() => {
                if changed.is_err() {
                    break (&mut transition).await;
                }
                let state = loading.borrow_and_update().clone();
                if state.is_loading {
                    spinner.get_or_insert_with(start_spinner).set_message(state.message);
                } else if let Some(pb) = spinner.take() {
                    pb.finish_and_clear();
                }
            }
        }
    };

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    outcome
}

fn start_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Drives `input` to completion, handing every change on the error channel to `on_change`.
async fn watch_errors<F: Future>(
    input: F,
    errors: &mut watch::Receiver<Option<Notice>>,
    mut on_change: impl FnMut(Option<&Notice>),
) -> F::Output {
    tokio::pin!(input);
    loop {
        tokio::select! {
            output = &mut input => return output,
            changed = errors.changed() => {
                if changed.is_err() {
                    return (&mut input).await;
                }
                on_change(errors.borrow_and_update().as_ref());
            }
        }
    }
}

/// One raw line from stdin. `None` on end of input.
async fn read_line() -> Result<Option<String>> {
    tokio::task::spawn_blocking(|| {
        let mut buf = String::new();
        let read = std::io::stdin().read_line(&mut buf)?;
        Ok::<_, std::io::Error>((read > 0).then_some(buf))
    })
    .await
    .context("stdin reader task failed")?
    .context("failed to read from stdin")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::mock::{Reply, ScriptedClient};
    use crate::generator::{DEFAULT_MODEL, StrategyGenerator};
    use crate::strategy::DEFAULT_DISMISS_AFTER;

    #[tokio::test]
    async fn with_spinner_returns_transition_outcome() {
        let generator =
            StrategyGenerator::new(ScriptedClient::new([Reply::list(&["A", "B"])]), DEFAULT_MODEL);
        let mut session = Session::new(generator, DEFAULT_DISMISS_AFTER);
        let mut loading = session.subscribe_loading();

        let outcome = with_spinner(&mut loading, session.submit_topic("Topic")).await;

        assert_eq!(outcome, Transition::Advanced(Step::SelectPillar));
        assert!(!loading.borrow().is_loading);
    }

    #[tokio::test]
    async fn with_spinner_passes_rejections_through() {
        let generator = StrategyGenerator::new(ScriptedClient::default(), DEFAULT_MODEL);
        let mut session = Session::new(generator, DEFAULT_DISMISS_AFTER);
        let mut loading = session.subscribe_loading();

        let outcome = with_spinner(&mut loading, session.confirm()).await;

        assert_eq!(outcome, Transition::Rejected(Rejection::WrongStep));
    }

    #[tokio::test(start_paused = true)]
    async fn watch_errors_reports_dismissal_while_waiting() {
        let generator = StrategyGenerator::new(ScriptedClient::new([Reply::Fail]), DEFAULT_MODEL);
        let mut session = Session::new(generator, DEFAULT_DISMISS_AFTER);
        let mut errors = session.subscribe_errors();
        session.submit_topic("Topic").await;
        assert!(errors.borrow_and_update().is_some());

        let mut seen = Vec::new();
        let input = async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            "line"
        };
        let output = watch_errors(input, &mut errors, |notice| {
            seen.push(notice.map(|n| n.message.clone()))
        })
        .await;

        assert_eq!(output, "line");
        assert_eq!(seen, vec![None]);
    }

    #[tokio::test(start_paused = true)]
    async fn watch_errors_reports_new_notice() {
        let (tx, mut errors) = watch::channel(None);
        let publish = async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            tx.send_replace(Some(Notice {
                id: 1,
                message: "Failed to generate pillar topics.".into(),
            }));
            tokio::time::sleep(Duration::from_secs(1)).await;
        };

        let mut seen = Vec::new();
        watch_errors(publish, &mut errors, |notice| {
            seen.push(notice.map(|n| n.message.clone()))
        })
        .await;

        assert_eq!(seen, vec![Some("Failed to generate pillar topics.".to_string())]);
    }

    #[tokio::test]
    async fn watch_errors_survives_closed_channel() {
        let (tx, mut errors) = watch::channel::<Option<Notice>>(None);
        drop(tx);

        let output = watch_errors(async { 7 }, &mut errors, |_| panic!("no change expected")).await;

        assert_eq!(output, 7);
    }
}
