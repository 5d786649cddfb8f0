//! fourierpaint: paint Gaussian bumps into a Fourier spectrum from the terminal.

mod app;
mod audio;
mod commands;
mod config;
mod logging;
mod setup;
mod spectrum;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(e) = app::run().await {
        tracing::error!("Fatal error: {e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
