//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - initializes logging
//! - loads the model bundle (fatal on failure)
//! - serves the HTTP API or runs one of the offline subcommands

use std::path::Path;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::{Command, ModelArgs, PredictArgs, QueryArgs, ServeArgs};
use crate::client::PoleClient;
use crate::error::AppError;
use crate::models::ModelBundle;
use crate::predict::Predictor;
use crate::server::AppState;

/// Entry point for the `poles` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    // `poles` and `poles --port 8080` behave like `poles serve ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Serve(args) => handle_serve(args),
        Command::Predict(args) => handle_predict(args),
        Command::Check(args) => handle_check(args),
        Command::Query(args) => handle_query(args),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

/// Load the bundle; any failure is fatal for the calling subcommand.
fn load_bundle(args: &ModelArgs) -> Result<ModelBundle, AppError> {
    load_bundle_from(&args.models_dir)
}

fn load_bundle_from(dir: &Path) -> Result<ModelBundle, AppError> {
    ModelBundle::load(dir).map_err(|e| {
        error!(dir = %dir.display(), "model bundle failed to load: {e}");
        AppError::from(e)
    })
}

fn handle_serve(args: ServeArgs) -> Result<(), AppError> {
    // The bundle must be complete before anything is bound.
    let bundle = load_bundle(&args.model)?;
    let state = AppState::new(Predictor::new(bundle));
    let addr = args.socket_addr();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::new(4, format!("Failed to start async runtime: {e}")))?;

    runtime.block_on(crate::server::serve(addr, state))
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let predictor = Predictor::new(load_bundle(&args.model)?);
    let rows: Vec<Vec<f64>> = args.features.into_iter().map(|f| f.0).collect();

    let prediction = predictor.predict(&rows)?;
    info!(rows = prediction.len(), "prediction complete");

    if args.json {
        let json = serde_json::to_string_pretty(&prediction)
            .map_err(|e| AppError::new(3, format!("Failed to encode prediction: {e}")))?;
        println!("{json}");
    } else {
        print!("{}", crate::report::format_predictions(&prediction));
    }
    Ok(())
}

fn handle_check(args: ModelArgs) -> Result<(), AppError> {
    let bundle = load_bundle(&args)?;
    print!("{}", crate::report::format_bundle_summary(&bundle));
    Ok(())
}

fn handle_query(args: QueryArgs) -> Result<(), AppError> {
    let client = PoleClient::new(&args.url)?;

    let health = client.health()?;
    println!(
        "{}: status={} modelo_cargado={}",
        client.base_url(),
        health.status,
        health.modelo_cargado
    );

    if let Some(features) = args.features {
        let tipo = client.predict_type(&features.0)?;
        let poles = client.predict_poles(&features.0)?;
        println!("tipo_sistema: {}", tipo.tipo_sistema);
        println!(
            "s1: {}",
            crate::report::format_pole(nalgebra::Complex::new(poles.polo_s1_real, poles.polo_s1_imag))
        );
        println!(
            "s2: {}",
            crate::report::format_pole(nalgebra::Complex::new(poles.polo_s2_real, poles.polo_s2_imag))
        );
    }
    Ok(())
}

/// Rewrite argv so `poles` defaults to `poles serve`.
///
/// Rules:
/// - `poles`                       -> `poles serve`
/// - `poles --port 8080 ...`       -> `poles serve --port 8080 ...`
/// - `poles --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("serve".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "serve".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_serves() {
        assert_eq!(rewrite_args(args(&["poles"])), args(&["poles", "serve"]));
    }

    #[test]
    fn leading_flags_are_serve_flags() {
        assert_eq!(
            rewrite_args(args(&["poles", "--port", "8080"])),
            args(&["poles", "serve", "--port", "8080"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        for argv in [
            args(&["poles", "--help"]),
            args(&["poles", "check", "-m", "models"]),
            args(&["poles", "predict", "-f", "1,2,3"]),
        ] {
            assert_eq!(rewrite_args(argv.clone()), argv);
        }
    }

    #[test]
    fn load_failure_is_fatal_with_startup_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_bundle_from(dir.path()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("scaler_X.json"), "{err}");
    }
}
