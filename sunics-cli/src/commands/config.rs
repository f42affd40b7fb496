use anyhow::Result;
use owo_colors::OwoColorize;
use sunics_core::config::Config;

pub fn run(config: &Config) -> Result<()> {
    let config_path = Config::config_path()?;

    if !config_path.exists() {
        Config::create_default_config(&config_path)?;
        println!("Created {}", config_path.display().dimmed());
        println!();
    }

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Output:     {}", config.output_dir().display());
    println!();
    println!("{}", "Endpoints".bold());
    println!("  Generate:   {}", config.server_url);
    println!("  Search:     {}", config.search_url);
    println!();
    println!("{}", "Language".bold());
    println!("  {}", config.language);

    Ok(())
}
