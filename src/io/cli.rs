use crate::error::{Error, Result};
use crate::io::config::Config;
use clap::{ArgAction, Parser};
use log::info;
use std::path::PathBuf;

/// Command-line overrides on top of an optional TOML scene file.
#[derive(Parser, Debug, Default)]
#[command(name = "painter3d")]
#[command(about = "Software renderer drawing triangle meshes with the painter's algorithm")]
#[command(args_override_self = true)]
pub struct Cli {
    /// Scene configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Mesh file to render; bare names are also looked up under assets/
    #[arg(short, long, value_name = "FILE")]
    pub mesh: Option<PathBuf>,

    /// Camera position
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true, action = ArgAction::Set)]
    pub origin: Option<Vec<f64>>,

    /// Point the camera faces
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true, action = ArgAction::Set)]
    pub look_at: Option<Vec<f64>>,

    /// Aspect ratio of the view window
    #[arg(long, num_args = 2, value_names = ["H", "V"], action = ArgAction::Set)]
    pub aspect: Option<Vec<f64>>,

    /// Pixels per unit of the view window
    #[arg(short, long)]
    pub resolution: Option<u32>,

    /// Per-channel color jitter applied to every face
    #[arg(long)]
    pub variance: Option<i32>,

    /// Background color
    #[arg(long, num_args = 3, value_names = ["R", "G", "B"], action = ArgAction::Set)]
    pub background: Option<Vec<i32>>,

    /// Output image path
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Seed for the color jitter, for reproducible renders
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    /// Loads the config file (or defaults) and applies the command-line overrides.
    pub fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading config file: {}", path.display());
                Config::load(path)?
            }
            None => {
                info!("Using default settings");
                Config::default()
            }
        };

        if let Some(mesh) = self.mesh {
            config.scene.mesh = mesh;
        }
        if let Some(variance) = self.variance {
            config.scene.variance = variance;
        }
        if let Some(origin) = to_array("origin", self.origin.as_deref())? {
            config.camera.origin = origin;
        }
        if let Some(look_at) = to_array("look-at", self.look_at.as_deref())? {
            config.camera.look_at = look_at;
        }
        if let Some(aspect) = to_array("aspect", self.aspect.as_deref())? {
            config.render.aspect_ratio = aspect;
        }
        if let Some(resolution) = self.resolution {
            config.render.resolution = resolution;
        }
        if let Some(background) = to_array("background", self.background.as_deref())? {
            config.render.background = background;
        }
        if let Some(output) = self.output {
            config.render.output = output;
        }

        Ok(config)
    }
}

fn to_array<T: Copy, const N: usize>(flag: &str, values: Option<&[T]>) -> Result<Option<[T; N]>> {
    values
        .map(|values| {
            values.try_into().map_err(|_| {
                Error::Config(format!(
                    "--{flag} takes {N} values, got {}",
                    values.len()
                ))
            })
        })
        .transpose()
}
