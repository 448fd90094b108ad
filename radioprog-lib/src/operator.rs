//! Operator interaction seam.
//!
//! The library never touches the terminal for input; everything it needs to
//! ask goes through these traits so the CLI can render real prompts and tests
//! can script the answers.

use std::path::Path;

use strum::{Display, EnumIter, EnumString};

use crate::Result;
use crate::models::RadioModel;
use crate::ports::DevicePort;

#[derive(EnumString, EnumIter, Display, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    Download,
    Upload,
    /// Upload the same image to several radios one after another.
    Loop,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Download => "Download image from radio",
            Action::Upload => "Upload image to radio",
            Action::Loop => "Upload image to multiple radios in sequence",
        }
    }

    /// Whether the action reads an existing image from the images directory.
    pub fn needs_input_image(self) -> bool {
        matches!(self, Action::Upload | Action::Loop)
    }
}

/// The continue/quit question asked before each radio in a sequence.
pub trait NextRadioPrompt {
    /// Returns `true` to flash another radio, `false` to stop.
    fn confirm_next_radio(&mut self, message: &str) -> Result<bool>;
}

/// Every question asked while setting up a session.
///
/// Selection methods return an index into the slice they were given.
pub trait Operator: NextRadioPrompt {
    fn select_port(&mut self, ports: &[DevicePort]) -> Result<usize>;

    fn select_model(&mut self, models: &[RadioModel]) -> Result<usize>;

    fn select_action(&mut self, actions: &[Action]) -> Result<usize>;

    /// Asks for the download target name, offering `default`.
    fn output_file_name(&mut self, default: &str) -> Result<String>;

    fn select_image(&mut self, images: &[String]) -> Result<usize>;

    fn confirm_overwrite(&mut self, path: &Path) -> Result<bool>;
}
