use chrono::{DateTime, Utc};
use colored::Colorize;
use scansheet::api::{CmdMessage, MessageLevel};
use scansheet::config::SheetConfig;
use scansheet::model::{ListedCode, SessionStats};
use timeago::Formatter;

const SCANNED_MARKER: &str = "✓";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_error(message: &str) {
    println!("{}", message.red());
}

pub(super) fn print_listing(listed: &[ListedCode]) {
    for entry in listed {
        let position = format!("{:>5}.", entry.position);
        if entry.scanned {
            println!(
                "{} {} {}",
                position.dimmed(),
                entry.code.as_str().dimmed(),
                SCANNED_MARKER.green()
            );
        } else {
            println!("{} {}", position.yellow(), entry.code);
        }
    }
}

pub(super) fn print_stats(stats: &SessionStats, generated_at: Option<DateTime<Utc>>) {
    println!("Total: {}", stats.total);
    println!("Scanned: {}", stats.confirmed.to_string().green());
    println!("Remaining: {}", stats.remaining.to_string().yellow());
    if let Some(at) = generated_at {
        println!("{}", format!("generated {}", format_time_ago(at)).dimmed());
    }
}

pub(super) fn print_config(config: &SheetConfig) {
    let page = &config.page;
    let barcode = &config.barcode;
    println!(
        "page = {} x {} mm, margins {} / {} mm",
        page.width_mm, page.height_mm, page.margin_x_mm, page.margin_y_mm
    );
    println!("grid = {} columns x {} rows", page.columns, page.rows);
    println!(
        "barcode = {} px modules, {} px bars, {} quiet modules, {} mm padding",
        barcode.module_px, barcode.bar_height_px, barcode.quiet_zone_modules, barcode.padding_mm
    );
    if barcode.caption {
        println!("caption = {} pt", barcode.caption_size_pt);
    } else {
        println!("caption = off");
    }
    println!("output = {}", config.output);
    println!("max_codes = {}", config.max_codes);
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}
