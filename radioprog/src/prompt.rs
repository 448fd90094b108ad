use std::path::Path;

use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use radioprog_lib::{Action, DevicePort, Error, NextRadioPrompt, Operator, RadioModel, Result};

/// Renders the session's questions as interactive terminal prompts.
pub struct TerminalOperator {
    theme: ColorfulTheme,
}

impl TerminalOperator {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    /// Single choice list; Esc or q cancels.
    fn select<T: ToString>(&self, prompt: &str, items: &[T]) -> Result<usize> {
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
            .map_err(prompt_error)?
            .ok_or(Error::Canceled)
    }
}

impl Default for TerminalOperator {
    fn default() -> Self {
        Self::new()
    }
}

fn prompt_error(e: dialoguer::Error) -> Error {
    Error::prompt_unavailable(e.to_string())
}

impl NextRadioPrompt for TerminalOperator {
    fn confirm_next_radio(&mut self, message: &str) -> Result<bool> {
        let choice = Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(&["Continue", "Quit"])
            .default(0)
            .interact_opt()
            .map_err(prompt_error)?;
        Ok(choice == Some(0))
    }
}

impl Operator for TerminalOperator {
    fn select_port(&mut self, ports: &[DevicePort]) -> Result<usize> {
        let labels: Vec<String> = ports.iter().map(DevicePort::label).collect();
        self.select("Select USB port:", &labels)
    }

    fn select_model(&mut self, models: &[RadioModel]) -> Result<usize> {
        let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
        self.select("Select radio model:", &names)
    }

    fn select_action(&mut self, actions: &[Action]) -> Result<usize> {
        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        self.select("What do you want to do?", &labels)
    }

    fn output_file_name(&mut self, default: &str) -> Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt("Enter output image file name:")
            .default(default.to_string())
            .interact_text()
            .map_err(prompt_error)
    }

    fn select_image(&mut self, images: &[String]) -> Result<usize> {
        self.select("Select input image file:", images)
    }

    fn confirm_overwrite(&mut self, path: &Path) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(format!(
                "A file with this name exists ({}), overwrite?",
                path.display()
            ))
            .default(false)
            .interact()
            .map_err(prompt_error)
    }
}
