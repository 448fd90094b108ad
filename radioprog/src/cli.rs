use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use radioprog_lib::{Action, Preselection, RadioModel};

use crate::config::{Defaults, RadioProgConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "radioprog CLI", long_about = None)]
pub struct Cli {
    /// JSON configuration file path
    #[arg(long = "config", short = 'f', default_value = Defaults::CONFIG_FILE)]
    pub config: PathBuf,

    /// Serial port the programming cable is attached to
    #[arg(short = 'p', long = "port")]
    pub port: Option<String>,

    /// Radio model id or name
    #[arg(short = 'r', long = "model")]
    pub model: Option<String>,

    /// What to do
    #[arg(short = 'a', long = "action", value_enum)]
    pub action: Option<Action>,

    /// Image file name inside imagesPath (download target or upload source)
    #[arg(short = 'i', long = "image")]
    pub image: Option<String>,

    /// chirpc executable (overrides chirpcPath)
    #[arg(long = "chirpc")]
    pub chirpc: Option<PathBuf>,
}

/// Configuration file merged with command line overrides
#[derive(Debug, Clone)]
pub struct Settings {
    pub chirpc: PathBuf,
    pub images_dir: PathBuf,
    pub image_extension: String,
    pub models: Vec<RadioModel>,
    pub preselection: Preselection,
}

/// Merge CLI arguments with configuration file, CLI args take precedence
pub fn merge_config(args: &Cli, config: RadioProgConfig) -> Result<Settings> {
    config
        .validate()
        .map_err(|e| anyhow!("Invalid config: {}", e))?;

    let chirpc = args
        .chirpc
        .clone()
        .unwrap_or_else(|| config.chirpc_path.clone());

    if let Some(image) = &args.image {
        if image.trim().is_empty() {
            return Err(anyhow!("--image must not be empty"));
        }
    }

    Ok(Settings {
        chirpc,
        models: config.radio_models(),
        images_dir: config.images_path,
        image_extension: config.image_extension,
        preselection: Preselection {
            port: args.port.clone(),
            model: args.model.clone(),
            action: args.action,
            image: args.image.clone(),
        },
    })
}
