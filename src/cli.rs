//! Interface de linha de comando do coach baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (start, summary)
//! e flags globais (--model, --verbose).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Topical Authority Coach: do tema central às perguntas da audiência.
#[derive(Debug, Parser)]
#[command(name = "topical-coach", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Identificador do modelo Gemini a usar nesta sessão.
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Inicia o assistente interativo (padrão quando nenhum subcomando é dado).
    Start {
        /// Tema central; se omitido, é perguntado no terminal.
        topic: Option<String>,

        /// Caminho do JSON exportado.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Prints the plain-text summary of a previously exported strategy.
    Summary {
        /// Path to a `content_strategy.json` file.
        file: PathBuf,
    },
}

impl Cli {
    /// The subcommand to run; `start` with no topic when none was given.
    pub fn subcommand(self) -> Command {
        self.command.unwrap_or(Command::Start {
            topic: None,
            output: None,
        })
    }
}
