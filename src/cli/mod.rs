//! CLI module for the Laptop Price Estimator
//!
//! Provides subcommands:
//! - `serve`: run the HTTP API
//! - `predict`: estimate one configuration and print the result as JSON
//! - `options`: print the choices accepted for each input

pub mod options;
pub mod predict;
pub mod serve;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Laptop Price Estimator - regression estimates with comparable listings
#[derive(Parser)]
#[command(name = "laptop-price-estimator")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Estimate the price of one configuration
    Predict(predict::PredictArgs),

    /// Print the accepted input choices
    Options,
}

/// Shared startup for every command: `.env`, layered config, logging
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&config.logging);

    Ok(config)
}
