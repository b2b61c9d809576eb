use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use super::{output, CliError, CommandResult};

/// How the shell gathers input.
///
/// `Script` reads plain lines from stdin (menus accept the option number),
/// which keeps the binary drivable from integration tests and pipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

impl CliMode {
    pub fn detect() -> Self {
        if std::env::var_os("FINTRACK_CLI_SCRIPT").is_some() || !io::stdin().is_terminal() {
            CliMode::Script
        } else {
            CliMode::Interactive
        }
    }
}

/// Prompting front-end shared by every shell operation.
pub struct Prompter {
    mode: CliMode,
    theme: ColorfulTheme,
}

impl Prompter {
    pub fn new(mode: CliMode) -> Self {
        Self {
            mode,
            theme: ColorfulTheme::default(),
        }
    }

    /// Reads one line of free text; empty input is allowed.
    pub fn read_line(&self, prompt: &str) -> CommandResult<String> {
        match self.mode {
            CliMode::Interactive => {
                let value = Input::<String>::with_theme(&self.theme)
                    .with_prompt(prompt)
                    .allow_empty(true)
                    .interact_text()?;
                Ok(value.trim().to_string())
            }
            CliMode::Script => {
                print!("{prompt}: ");
                io::stdout().flush().map_err(CliError::from)?;
                let mut line = String::new();
                let read = io::stdin()
                    .lock()
                    .read_line(&mut line)
                    .map_err(CliError::from)?;
                if read == 0 {
                    return Err(CliError::EndOfInput);
                }
                Ok(line.trim().to_string())
            }
        }
    }

    /// Presents a menu and returns the selected index. Script mode prints the
    /// options numbered from 1 and re-prompts until it reads a valid number.
    pub fn select(&self, title: &str, options: &[String]) -> CommandResult<usize> {
        match self.mode {
            CliMode::Interactive => {
                let index = Select::with_theme(&self.theme)
                    .with_prompt(title)
                    .items(options)
                    .default(0)
                    .interact()?;
                Ok(index)
            }
            CliMode::Script => loop {
                output::info(title);
                for (number, option) in options.iter().enumerate() {
                    output::info(format!("{}. {}", number + 1, option));
                }
                let raw = self.read_line(&format!("Select option (1-{})", options.len()))?;
                match raw.parse::<usize>() {
                    Ok(choice) if (1..=options.len()).contains(&choice) => break Ok(choice - 1),
                    _ => output::error(format!(
                        "Invalid choice. Please enter a number between 1 and {}.",
                        options.len()
                    )),
                }
            },
        }
    }

    /// Asks a yes/no question, defaulting to no.
    pub fn confirm(&self, prompt: &str) -> CommandResult<bool> {
        match self.mode {
            CliMode::Interactive => {
                let confirmed = Confirm::with_theme(&self.theme)
                    .with_prompt(prompt)
                    .default(false)
                    .interact()?;
                Ok(confirmed)
            }
            CliMode::Script => {
                let raw = self.read_line(&format!("{prompt} (y/n)"))?;
                Ok(matches!(raw.to_lowercase().as_str(), "y" | "yes"))
            }
        }
    }
}
