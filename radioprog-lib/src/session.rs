//! Session setup and dispatch.
//!
//! A session gathers port, model, action and image from the operator (or
//! from values given up front), then performs exactly one action.

use std::fmt;
use std::path::PathBuf;

use strum::IntoEnumIterator;
use tracing::debug;

use crate::images::{require_existing, resolve_image};
use crate::models::{RadioModel, find_model};
use crate::operator::{Action, Operator};
use crate::ports::{DevicePort, find_port};
use crate::runner::Flasher;
use crate::sequence::upload_sequence;
use crate::transfer::{download_image, upload_image};
use crate::{Error, Result};

/// Answers supplied before the session starts; each one skips its prompt.
#[derive(Debug, Clone, Default)]
pub struct Preselection {
    pub port: Option<String>,
    pub model: Option<String>,
    pub action: Option<Action>,
    pub image: Option<String>,
}

#[derive(Debug)]
pub struct Session {
    ports: Vec<DevicePort>,
    models: Vec<RadioModel>,
    images_dir: PathBuf,
    images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPlan {
    pub port: String,
    pub model: RadioModel,
    pub action: Action,
    /// Download target or upload source, inside the images directory.
    pub image: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Downloaded(PathBuf),
    Uploaded(PathBuf),
    Sequence { image: PathBuf, completed: u32 },
    /// The operator refused to overwrite an existing download target.
    Declined(PathBuf),
}

impl fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionOutcome::Downloaded(path) => {
                write!(f, "Download complete. Image saved to: {}", path.display())
            }
            SessionOutcome::Uploaded(_) => write!(f, "Image uploaded successfully."),
            SessionOutcome::Sequence { completed, .. } => {
                write!(f, "Done. {} radio(s) flashed.", completed)
            }
            SessionOutcome::Declined(path) => {
                write!(f, "Download canceled, kept existing {}", path.display())
            }
        }
    }
}

fn pick<'a, T>(items: &'a [T], index: usize, what: &str) -> Result<&'a T> {
    items
        .get(index)
        .ok_or_else(|| Error::invalid_input(format!("{} selection {} out of range", what, index)))
}

impl Session {
    pub fn new(
        ports: Vec<DevicePort>,
        models: Vec<RadioModel>,
        images_dir: impl Into<PathBuf>,
        images: Vec<String>,
    ) -> Result<Self> {
        if ports.is_empty() {
            return Err(Error::NoDeviceFound);
        }
        if models.is_empty() {
            return Err(Error::invalid_input("no radio models configured"));
        }
        Ok(Self {
            ports,
            models,
            images_dir: images_dir.into(),
            images,
        })
    }

    /// Collects every answer needed to run one action.
    pub fn plan<O: Operator + ?Sized>(
        &self,
        operator: &mut O,
        preselection: &Preselection,
    ) -> Result<SessionPlan> {
        let port = match &preselection.port {
            Some(name) => find_port(&self.ports, name)?.path.clone(),
            None => {
                let index = operator.select_port(&self.ports)?;
                pick(&self.ports, index, "port")?.path.clone()
            }
        };

        let model = match &preselection.model {
            Some(key) => find_model(&self.models, key)
                .ok_or_else(|| Error::invalid_input(format!("unknown radio model '{}'", key)))?
                .clone(),
            None => {
                let index = operator.select_model(&self.models)?;
                pick(&self.models, index, "model")?.clone()
            }
        };

        let action = match preselection.action {
            Some(action) => action,
            None => {
                let actions: Vec<Action> = Action::iter().collect();
                let index = operator.select_action(&actions)?;
                *pick(&actions, index, "action")?
            }
        };

        let name = match (&preselection.image, action) {
            (Some(name), _) => name.clone(),
            (None, Action::Download) => {
                let default = model.default_image_name();
                let name = operator.output_file_name(&default)?;
                let name = name.trim();
                if name.is_empty() { default } else { name.to_string() }
            }
            (None, _) => {
                if self.images.is_empty() {
                    return Err(Error::NoImagesFound {
                        dir: self.images_dir.clone(),
                    });
                }
                let index = operator.select_image(&self.images)?;
                pick(&self.images, index, "image")?.clone()
            }
        };

        let plan = SessionPlan {
            port,
            model,
            action,
            image: resolve_image(&self.images_dir, &name),
        };
        debug!(?plan, "session planned");
        Ok(plan)
    }
}

impl SessionPlan {
    /// Runs the planned action.
    ///
    /// Upload actions refuse to start without an input file; a download onto
    /// an existing file needs the operator's consent first.
    pub fn execute<F, O>(&self, flasher: &mut F, operator: &mut O) -> Result<SessionOutcome>
    where
        F: Flasher + ?Sized,
        O: Operator + ?Sized,
    {
        match self.action {
            Action::Download => {
                if self.image.exists() && !operator.confirm_overwrite(&self.image)? {
                    return Ok(SessionOutcome::Declined(self.image.clone()));
                }
                download_image(flasher, &self.port, &self.model.id, &self.image)?;
                Ok(SessionOutcome::Downloaded(self.image.clone()))
            }
            Action::Upload => {
                let input = self.existing_input()?;
                println!("Image loaded from: {}", input.display());
                upload_image(flasher, &self.port, &self.model.id, &input)?;
                Ok(SessionOutcome::Uploaded(input))
            }
            Action::Loop => {
                let input = self.existing_input()?;
                println!("Image loaded from: {}", input.display());
                let completed =
                    upload_sequence(flasher, operator, &self.port, &self.model.id, &input)?;
                Ok(SessionOutcome::Sequence {
                    image: input,
                    completed,
                })
            }
        }
    }

    fn existing_input(&self) -> Result<PathBuf> {
        require_existing(&self.image)?;
        Ok(self.image.clone())
    }
}

/// Plans and executes a session in one go.
pub fn run_session<F, O>(
    session: &Session,
    flasher: &mut F,
    operator: &mut O,
    preselection: &Preselection,
) -> Result<SessionOutcome>
where
    F: Flasher + ?Sized,
    O: Operator + ?Sized,
{
    let plan = session.plan(operator, preselection)?;
    plan.execute(flasher, operator)
}
