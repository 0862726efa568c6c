use std::{env, path::PathBuf};

use color_eyre::Result;
use dialer::{EmbeddedReference, FileReference, ReferenceProvider};
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::Deserialize;
use tracing::info;

use crate::cli::Cli;

/// Knobs of the form session and the terminal loop.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct FormConfig {
    pub tick_rate: f64,
    pub frame_rate: f64,
    pub mouse: bool,
    /// Country selected when the form mounts; the catalog default otherwise.
    #[serde(default)]
    pub default_country: Option<String>,
    /// RON file replacing the embedded reference data.
    #[serde(default)]
    pub reference_file: Option<PathBuf>,
    pub show_counter: bool,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            tick_rate: 4.0,
            frame_rate: 30.0,
            mouse: true,
            default_country: None,
            reference_file: None,
            show_counter: false,
            seed: None,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub form: FormConfig,
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

impl Config {
    pub fn new(cli: &Cli) -> Result<Self, config::ConfigError> {
        Self::load(get_config_dir(), cli)
    }

    fn load(config_dir: PathBuf, cli: &Cli) -> Result<Self, config::ConfigError> {
        let defaults = FormConfig::default();
        let mut builder = config::Config::builder()
            .set_default("tick_rate", defaults.tick_rate)?
            .set_default("frame_rate", defaults.frame_rate)?
            .set_default("mouse", defaults.mouse)?
            .set_default("show_counter", defaults.show_counter)?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.toml", config::FileFormat::Toml),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            let source = config::File::from(config_dir.join(file))
                .format(*format)
                .required(false);
            builder = builder.add_source(source);
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            info!("No configuration file found, running on defaults");
        }

        // CLI zuletzt, damit Flags alles überschreiben
        builder = builder
            .set_override_option("tick_rate", cli.tick_rate)?
            .set_override_option("frame_rate", cli.frame_rate)?
            .set_override_option("default_country", cli.country.clone())?
            .set_override_option("seed", cli.seed)?;
        if cli.show_counter {
            builder = builder.set_override("show_counter", true)?;
        }
        if cli.no_mouse {
            builder = builder.set_override("mouse", false)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;

        Ok(cfg)
    }

    /// Where the countries and messages come from.
    pub fn reference_provider(&self) -> Box<dyn ReferenceProvider> {
        match &self.form.reference_file {
            Some(path) => Box::new(FileReference::new(path.clone())),
            None => Box::new(EmbeddedReference),
        }
    }
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = DATA_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "chicken105", env!("CARGO_PKG_NAME"))
}
