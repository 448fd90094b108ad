//! Uploading one image to a series of radios.
//!
//! The operator swaps radios by hand between transfers, so every upload is
//! preceded by a continue/quit confirmation. The first failed transfer ends
//! the sequence; radios flashed before it are left as they are.

use std::path::Path;

use tracing::{info, warn};

use crate::operator::NextRadioPrompt;
use crate::runner::Flasher;
use crate::transfer::{Direction, TransferRequest};
use crate::{Error, Result};

#[derive(Debug)]
pub enum LoopState {
    AwaitingConfirmation,
    Uploading,
    /// The operator chose to quit.
    Stopped,
    /// A transfer failed.
    Aborted(Error),
}

/// Prompt text for the next radio; only the first one is worded differently.
pub fn next_radio_message(completed: u32) -> &'static str {
    if completed == 0 {
        "Connect the first radio and press Continue"
    } else {
        "Connect the next radio and press Continue"
    }
}

#[derive(Debug)]
pub struct SequentialUpload {
    request: TransferRequest,
    completed: u32,
}

impl SequentialUpload {
    pub fn new(port: &str, model: &str, image: &Path) -> Self {
        Self {
            request: TransferRequest::new(port, model, image, Direction::Upload),
            completed: 0,
        }
    }

    /// Number of radios flashed successfully so far.
    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub fn request(&self) -> &TransferRequest {
        &self.request
    }

    /// Advances the machine by one transition.
    ///
    /// Prompt errors are returned directly; transfer errors become
    /// [`LoopState::Aborted`].
    pub fn step<F, P>(
        &mut self,
        state: LoopState,
        flasher: &mut F,
        prompt: &mut P,
    ) -> Result<LoopState>
    where
        F: Flasher + ?Sized,
        P: NextRadioPrompt + ?Sized,
    {
        let next = match state {
            LoopState::AwaitingConfirmation => {
                if prompt.confirm_next_radio(next_radio_message(self.completed))? {
                    LoopState::Uploading
                } else {
                    LoopState::Stopped
                }
            }
            LoopState::Uploading => match self.request.execute(flasher) {
                Ok(()) => {
                    self.completed += 1;
                    info!(completed = self.completed, "radio flashed");
                    LoopState::AwaitingConfirmation
                }
                Err(e) => {
                    warn!(completed = self.completed, error = %e, "upload sequence aborted");
                    LoopState::Aborted(e)
                }
            },
            terminal => terminal,
        };
        Ok(next)
    }

    /// Runs until the operator quits or a transfer fails. Returns the number
    /// of radios flashed.
    pub fn run<F, P>(&mut self, flasher: &mut F, prompt: &mut P) -> Result<u32>
    where
        F: Flasher + ?Sized,
        P: NextRadioPrompt + ?Sized,
    {
        let mut state = LoopState::AwaitingConfirmation;
        loop {
            state = match self.step(state, flasher, prompt)? {
                LoopState::Stopped => return Ok(self.completed),
                LoopState::Aborted(source) => {
                    return Err(Error::SequenceAborted {
                        completed: self.completed,
                        source: Box::new(source),
                    });
                }
                next => next,
            };
        }
    }
}

/// Uploads `image` to radios until the operator quits.
pub fn upload_sequence<F, P>(
    flasher: &mut F,
    prompt: &mut P,
    port: &str,
    model: &str,
    image: &Path,
) -> Result<u32>
where
    F: Flasher + ?Sized,
    P: NextRadioPrompt + ?Sized,
{
    SequentialUpload::new(port, model, image).run(flasher, prompt)
}
