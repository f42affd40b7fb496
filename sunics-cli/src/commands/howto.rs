use anyhow::Result;
use owo_colors::OwoColorize;
use sunics_core::config::Config;
use sunics_core::dialog::DialogEvent;

pub fn run(config: &Config) -> Result<()> {
    let mut page = super::new_page(config);
    let labels = page.renderer();

    for key in ["title", "intro", "intro_2"] {
        if let Some(text) = labels.text_for_key(key) {
            println!("{}", text);
            println!();
        }
    }

    if !page.dialog_event(DialogEvent::TriggerClick) {
        return Ok(());
    }

    let text = page.help_text();
    let Some((heading, body)) = text.split_first() else {
        return Ok(());
    };
    println!("{}", heading.bold());

    if let Some((disclaimer, steps)) = body.split_last() {
        for (i, step) in steps.iter().enumerate() {
            println!("  {}. {}", i + 1, step);
        }
        println!();
        println!("{}", disclaimer.dimmed());
    }

    Ok(())
}
