use std::path::{Path, PathBuf};

use strum::Display;
use tracing::info;

use crate::Result;
use crate::runner::Flasher;

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Download,
    Upload,
}

impl Direction {
    /// chirpc flag selecting the transfer direction.
    pub fn flag(self) -> &'static str {
        match self {
            Direction::Download => "--download-mmap",
            Direction::Upload => "--upload-mmap",
        }
    }
}

/// One memory image transfer between a radio and a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    port: String,
    model: String,
    image: PathBuf,
    direction: Direction,
}

impl TransferRequest {
    pub fn new(
        port: impl Into<String>,
        model: impl Into<String>,
        image: impl Into<PathBuf>,
        direction: Direction,
    ) -> Self {
        Self {
            port: port.into(),
            model: model.into(),
            image: image.into(),
            direction,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Argument list for chirpc:
    /// `-s <port> -r <model> --{download,upload}-mmap --mmap <path>`.
    pub fn args(&self) -> Vec<String> {
        vec![
            "-s".to_string(),
            self.port.clone(),
            "-r".to_string(),
            self.model.clone(),
            self.direction.flag().to_string(),
            "--mmap".to_string(),
            self.image.to_string_lossy().into_owned(),
        ]
    }

    /// Hands the request to `flasher`; its verdict is returned unchanged.
    pub fn execute<F: Flasher + ?Sized>(&self, flasher: &mut F) -> Result<()> {
        info!(
            direction = %self.direction,
            port = %self.port,
            model = %self.model,
            image = %self.image.display(),
            "starting transfer"
        );
        flasher.run(&self.args())
    }
}

/// Reads the radio's memory into `output`.
pub fn download_image<F: Flasher + ?Sized>(
    flasher: &mut F,
    port: &str,
    model: &str,
    output: &Path,
) -> Result<()> {
    TransferRequest::new(port, model, output, Direction::Download).execute(flasher)
}

/// Writes `input` into the radio's memory.
pub fn upload_image<F: Flasher + ?Sized>(
    flasher: &mut F,
    port: &str,
    model: &str,
    input: &Path,
) -> Result<()> {
    TransferRequest::new(port, model, input, Direction::Upload).execute(flasher)
}
