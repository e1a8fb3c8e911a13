// src/ui/interaction.rs

use std::io::{self, BufRead, Write};

/// Os diálogos bloqueantes que os fluxos usam: alerta, confirmação e pergunta.
pub trait Interaction: Send + Sync {
    fn alert(&self, message: &str);

    fn confirm(&self, question: &str) -> bool;

    /// `None` quando o usuário cancela.
    fn prompt(&self, question: &str) -> Option<String>;
}

/// Diálogos no terminal. `assume_yes` responde "sim" a todas as confirmações.
#[derive(Debug, Clone, Default)]
pub struct TerminalInteraction {
    pub assume_yes: bool,
}

impl TerminalInteraction {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    fn read_line(question: &str) -> Option<String> {
        let mut stderr = io::stderr();
        let _ = write!(stderr, "{question} ");
        let _ = stderr.flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

impl Interaction for TerminalInteraction {
    fn alert(&self, message: &str) {
        eprintln!("⚠️  {message}");
    }

    fn confirm(&self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        Self::read_line(&format!("{question} [s/N]"))
            .map(|answer| matches!(answer.trim().to_lowercase().as_str(), "s" | "sim" | "y" | "yes"))
            .unwrap_or(false)
    }

    fn prompt(&self, question: &str) -> Option<String> {
        Self::read_line(question)
    }
}
