//! # Rendering
//!
//! Records print as pretty JSON on stdout so output can be piped into `jq`.
//! Messages follow, one per line, styled by level with `console`, which drops
//! the colors when stdout is not a terminal.

use anyhow::Result;
use bumoapp::commands::{CmdMessage, CmdResult, MessageLevel};
use bumoapp::config::BumoConfig;
use console::Style;
use std::path::Path;

fn level_style(level: &MessageLevel) -> Style {
    match level {
        MessageLevel::Info => Style::new().dim(),
        MessageLevel::Success => Style::new().green(),
        MessageLevel::Warning => Style::new().yellow(),
    }
}

pub fn render_message(message: &CmdMessage) -> String {
    level_style(&message.level)
        .apply_to(&message.content)
        .to_string()
}

/// Render everything a command produced, records first.
pub fn render_result(result: &CmdResult) -> Result<String> {
    let mut out = String::new();

    if !result.listed_records.is_empty() {
        out.push_str(&serde_json::to_string_pretty(&result.listed_records)?);
        out.push('\n');
    } else if let [record] = result.affected_records.as_slice() {
        out.push_str(&serde_json::to_string_pretty(record)?);
        out.push('\n');
    }

    for message in &result.messages {
        out.push_str(&render_message(message));
        out.push('\n');
    }
    Ok(out)
}

pub fn print_result(result: &CmdResult) -> Result<()> {
    print!("{}", render_result(result)?);
    Ok(())
}

pub fn print_config(data_root: &Path, config: &BumoConfig) -> Result<()> {
    let key = Style::new().bold();
    println!("{} = {}", key.apply_to("data_root"), data_root.display());
    println!("{} = {}", key.apply_to("max_upload_bytes"), config.max_upload_bytes);
    println!(
        "{} = {}",
        key.apply_to("allowed_extensions"),
        serde_json::to_string(&config.allowed_extensions())?
    );
    println!("{} = {}", key.apply_to("orphan_grace_secs"), config.orphan_grace_secs);
    Ok(())
}
