//! Terminal stand-ins for the dialog and navigation layers.

use std::io::{self, BufRead, Write};

use async_trait::async_trait;
use client_core::{Confirmation, DialogHost, Navigator};
use shared::domain::ScreenToken;

pub struct ConsoleDialogs {
    assume_yes: bool,
}

impl ConsoleDialogs {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

#[async_trait]
impl DialogHost for ConsoleDialogs {
    fn show_message(&self, title: Option<&str>, text: &str) {
        match title {
            Some(title) => eprintln!("{title}: {text}"),
            None => eprintln!("{text}"),
        }
    }

    async fn confirm(&self, confirmation: &Confirmation) -> bool {
        if self.assume_yes {
            return true;
        }

        let prompt = format!(
            "{}: {} [{}? s/N] ",
            confirmation.title, confirmation.text, confirmation.confirm_label
        );
        let answer = tokio::task::spawn_blocking(move || -> io::Result<String> {
            let mut stderr = io::stderr();
            stderr.write_all(prompt.as_bytes())?;
            stderr.flush()?;
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            Ok(line)
        })
        .await;

        match answer {
            Ok(Ok(line)) => is_affirmative(&line),
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "failed to read confirmation");
                false
            }
            Err(err) => {
                tracing::warn!(error = %err, "confirmation prompt task failed");
                false
            }
        }
    }
}

fn is_affirmative(line: &str) -> bool {
    matches!(
        line.trim().to_ascii_lowercase().as_str(),
        "s" | "sim" | "y" | "yes"
    )
}

/// Prints the route the UI would open.
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate_to(&self, screen: ScreenToken, replace: bool, params: serde_json::Value) {
        tracing::info!(%screen, replace, "navigation requested");
        println!("-> {screen} {params}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_portuguese_and_english_yes() {
        for line in ["s\n", "Sim", " y ", "YES\r\n"] {
            assert!(is_affirmative(line), "{line:?}");
        }
        for line in ["", "n", "nao", "talvez"] {
            assert!(!is_affirmative(line), "{line:?}");
        }
    }

    #[tokio::test]
    async fn assume_yes_skips_the_prompt() {
        let dialogs = ConsoleDialogs::new(true);
        assert!(
            dialogs
                .confirm(&Confirmation {
                    title: "Atenção".into(),
                    text: "Excluir?".into(),
                    confirm_label: "Excluir registro".into(),
                })
                .await
        );
    }
}
