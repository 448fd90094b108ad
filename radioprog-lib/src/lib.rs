//! Download and upload radio memory images through the `chirpc` utility.
//!
//! The library owns the transfer logic; terminal prompts and configuration
//! live in the `radioprog` binary and reach in through [`Operator`] and
//! [`Flasher`].

pub mod error;
pub mod images;
pub mod models;
pub mod operator;
pub mod ports;
pub mod runner;
pub mod sequence;
pub mod session;
pub mod transfer;

pub use crate::error::{Error, Result};
pub use crate::models::RadioModel;
pub use crate::operator::{Action, NextRadioPrompt, Operator};
pub use crate::ports::DevicePort;
pub use crate::runner::{ChirpRunner, ExitOutcome, Flasher, interpret_exit};
pub use crate::sequence::{SequentialUpload, upload_sequence};
pub use crate::session::{Preselection, Session, SessionOutcome, SessionPlan, run_session};
pub use crate::transfer::{Direction, TransferRequest, download_image, upload_image};
