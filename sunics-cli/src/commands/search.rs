use anyhow::{Result, bail};
use owo_colors::OwoColorize;
use sunics_core::config::Config;

use crate::render::{Render, render_coordinates};

pub async fn run(config: &Config, query: &str, pick: Option<usize>) -> Result<()> {
    let client = super::search_client(config)?;
    let mut page = super::new_page(config);

    let Some(pending) = page.begin_search(query) else {
        bail!("{}", page.search_status());
    };

    let spinner = crate::utils::tui::create_spinner(page.search_status().to_string());
    let result = client.search(&pending.query).await;
    spinner.finish_and_clear();

    let failed = result.is_err();
    page.complete_search(pending, result);
    if failed {
        bail!("{}", page.search_status());
    }

    println!("{}", page.search_status().dimmed());
    println!("{}", page.results().render());

    if let Some(n) = pick {
        if n == 0 || !page.select_result(n - 1) {
            bail!("No usable result #{} to pick", n);
        }
        println!();
        println!("{}", page.search_status().green());
        println!("{}", render_coordinates(page.renderer(), page.coordinates()));
    }

    Ok(())
}
