//! Command-line parsing for the RLC pole prediction service.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! serving and prediction code. Options that matter for deployment can also be
//! supplied through the environment (or a `.env` file).

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "poles", version, about = "RLC damping type and pole prediction service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the model bundle and serve the HTTP API.
    Serve(ServeArgs),
    /// Predict damping type and poles for one or more feature vectors offline.
    Predict(PredictArgs),
    /// Load and validate the model bundle, then print a summary.
    Check(ModelArgs),
    /// Call a running service.
    Query(QueryArgs),
}

/// Location of the model bundle.
#[derive(Debug, Args, Clone)]
pub struct ModelArgs {
    /// Directory holding the six model artifacts.
    #[arg(short = 'm', long, env = "POLES_MODELS_DIR", default_value = "models")]
    pub models_dir: PathBuf,
}

#[derive(Debug, Args, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Address to bind.
    #[arg(long, env = "POLES_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to bind.
    #[arg(short = 'p', long, env = "POLES_PORT", default_value_t = 5001)]
    pub port: u16,
}

impl ServeArgs {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Comma-separated feature vector; repeat for a batch.
    #[arg(short = 'f', long = "features", value_name = "X1,X2,...", required = true, allow_hyphen_values = true, value_parser = parse_features)]
    pub features: Vec<FeatureArg>,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct QueryArgs {
    /// Base URL of the service.
    #[arg(long, env = "POLES_API_URL", default_value = "http://127.0.0.1:5001")]
    pub url: String,

    /// Comma-separated feature vector. Without it only `/health` is queried.
    #[arg(short = 'f', long = "features", value_name = "X1,X2,...", allow_hyphen_values = true, value_parser = parse_features)]
    pub features: Option<FeatureArg>,
}

/// One feature vector given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureArg(pub Vec<f64>);

/// Parse `"1.0, 2.5,3"` into a feature vector.
pub fn parse_features(raw: &str) -> Result<FeatureArg, String> {
    let values = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|e| format!("invalid feature value '{s}': {e}"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if values.is_empty() {
        return Err("feature vector is empty".to_string());
    }
    Ok(FeatureArg(values))
}
