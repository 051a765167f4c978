use clap::Parser;
use log::{error, info};
use painter3d::app;
use painter3d::io::cli::Cli;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => {
            info!("Using color seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let result = cli
        .into_config()
        .and_then(|config| app::run(&config, &mut rng));

    match result {
        Ok(summary) => {
            info!(
                "Done. Wrote {} ({} of {} faces drawn)",
                summary.output.display(),
                summary.drawn_faces,
                summary.faces
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
