use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use sunics_core::config::Config;

pub async fn run(config: &Config) -> Result<()> {
    let client = super::generator_client(config)?;

    client
        .health()
        .await
        .with_context(|| format!("Backend at {} is not healthy", config.server_url))?;

    println!("{} {}", config.server_url.dimmed(), "ok".green());
    Ok(())
}
