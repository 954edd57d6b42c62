use std::process::ExitCode;

use tracing_subscriber::prelude::*;

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::builder().from_env_lossy())
        .with(tracing_subscriber::fmt::Layer::default().compact())
        .init();

    let paths = std::env::args().skip(1).collect::<Vec<_>>();
    if paths.is_empty() {
        eprintln!("Usage: imgpeek-info <FILE>...");
        return ExitCode::FAILURE;
    }

    let mut exit_code = ExitCode::SUCCESS;
    for path in paths {
        match imgpeek::detect_path(&path) {
            Ok(info) => println!("{path}: {} {}x{}", info.format, info.width, info.height),
            Err(err) => {
                tracing::error!("Could not open {path}: {err}");
                eprintln!("{path}: {err}");
                exit_code = ExitCode::FAILURE;
            }
        }
    }

    exit_code
}
