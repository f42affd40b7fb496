use std::path::PathBuf;

use anyhow::{Result, bail};
use chrono::{Days, Local, NaiveDate};
use owo_colors::OwoColorize;
use sunics_core::config::Config;
use sunics_core::download::DirectorySink;

use super::TerminalPage;
use crate::render::render_coordinates;

pub struct GenerateArgs {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub place: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub duration: String,
    pub no_sunrise: bool,
    pub no_sunset: bool,
    pub sunrise_title: Option<String>,
    pub sunset_title: Option<String>,
    pub output: Option<PathBuf>,
}

pub async fn run(config: &Config, args: GenerateArgs) -> Result<()> {
    let mut page = super::new_page(config);

    if let Some(place) = &args.place {
        let client = super::search_client(config)?;
        let spinner = crate::utils::tui::create_spinner(format!("Searching for {}...", place));
        page.search(&client, place).await;
        spinner.finish_and_clear();

        select_first_place(&mut page, place)?;
        println!("{}", page.search_status().dimmed());
    } else if args.lat.is_none() && args.lon.is_none() {
        println!("{}", page.search_status().dimmed());
    }

    fill_form(&mut page, &args, Local::now().date_naive());

    let Some(pending) = page.begin_submit() else {
        bail!("{}", validation_message(&page));
    };

    println!("{}", render_coordinates(page.renderer(), page.coordinates()));
    println!(
        "   {} → {}",
        pending.request.start_date, pending.request.end_date
    );

    let client = super::generator_client(config)?;
    let spinner = crate::utils::tui::create_spinner(page.form_status().to_string());
    let result = client.generate(&pending.request).await;
    spinner.finish_and_clear();

    let mut sink = DirectorySink::new(args.output.unwrap_or_else(|| config.output_dir()));
    match page.complete_submit(pending, result, &mut sink) {
        Some(path) => {
            println!("{} {}", page.form_status().green(), path.display().dimmed());
            Ok(())
        }
        None => bail!("{}", page.form_status()),
    }
}

/// Take the top search hit as the location.
fn select_first_place(page: &mut TerminalPage, place: &str) -> Result<()> {
    if !page.select_result(0) {
        bail!("No location found for '{}': {}", place, page.search_status());
    }
    Ok(())
}

/// Copy the command line into the form fields.
fn fill_form(page: &mut TerminalPage, args: &GenerateArgs, today: NaiveDate) {
    if args.place.is_none() && (args.lat.is_some() || args.lon.is_some()) {
        page.edit_coordinates(
            args.lat.as_deref().unwrap_or_default(),
            args.lon.as_deref().unwrap_or_default(),
        );
    }

    page.form.start_date = args.from.clone().unwrap_or_else(|| format_date(today));
    page.form.end_date = match &args.to {
        Some(to) => to.clone(),
        None => default_end_date(&page.form.start_date, today),
    };
    page.form.duration = args.duration.clone();
    page.form.sunrise_title = args.sunrise_title.clone().unwrap_or_default();
    page.form.sunset_title = args.sunset_title.clone().unwrap_or_default();
    page.set_include_sunrise(!args.no_sunrise);
    page.set_include_sunset(!args.no_sunset);
}

/// `DEFAULT_RANGE_DAYS` after the start date, or after `today` when the start
/// does not parse. Blank when the range runs past the last representable
/// date, which then fails validation as a missing field.
fn default_end_date(start_date: &str, today: NaiveDate) -> String {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap_or(today);
    range_end(start).map(format_date).unwrap_or_default()
}

fn range_end(start: NaiveDate) -> Option<NaiveDate> {
    start.checked_add_days(Days::new(super::DEFAULT_RANGE_DAYS))
}

/// The message a rejected form shows: the inline inclusion error if there is
/// one, otherwise the form status.
fn validation_message(page: &TerminalPage) -> &str {
    if page.include_error().is_empty() {
        page.form_status()
    } else {
        page.include_error()
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
