use countdown_core::{
    AppConfig, AppConfigExt, CountdownConfig, CountdownEvent, CountdownHandle, EventKind,
};
use std::io::Write;

use crate::CliContext;

fn lookup(ctx: &CliContext, id: u64) -> Result<(String, CountdownHandle), String> {
    ctx.get(id).ok_or_else(|| format!("error: no countdown #{id}\n"))
}

pub fn list(ctx: &CliContext) -> Result<(), String> {
    let entries = ctx.entries();
    if entries.is_empty() {
        println!("No countdowns mounted");
        return Ok(());
    }

    println!("{:<6} {:<24} {:<10} {:<16} Format", "Id", "Label", "State", "Time");
    println!("{}", "-".repeat(72));

    for (id, label, countdown) in entries {
        let countdown = countdown.borrow();
        let follow_marker = if ctx.is_followed(id) { " (following)" } else { "" };
        println!(
            "{:<6} {:<24} {:<10} {:<16} {}{}",
            id.get(),
            label,
            countdown.state(),
            countdown.data().formatted_time,
            countdown.format(),
            follow_marker
        );
    }

    println!("\nTotal: {} countdowns, ticker {}", ctx.ticker.len(), running_label(ctx));
    Ok(())
}

pub fn show(ctx: &CliContext, id: u64) -> Result<(), String> {
    let (label, countdown) = lookup(ctx, id)?;
    let countdown = countdown.borrow();
    let data = countdown.data();

    println!("{} {}", countdown.id(), label);
    println!("  state:     {}", countdown.state());
    println!("  formatted: {}", data.formatted_time);
    println!("  fragments: {}", data.fragments.join(" | "));
    println!("  remain:    {}ms of {}ms", data.remain, countdown.time());
    println!(
        "  mode:      {}{}",
        if countdown.millisecond() { "millisecond" } else { "second" },
        if countdown.auto_start() { ", auto-start" } else { "" }
    );
    Ok(())
}

pub fn start(ctx: &CliContext, id: u64) -> Result<(), String> {
    let (label, countdown) = lookup(ctx, id)?;
    countdown.borrow_mut().start();
    println!("Started {label}");
    Ok(())
}

pub fn pause(ctx: &CliContext, id: u64) -> Result<(), String> {
    let (label, countdown) = lookup(ctx, id)?;
    countdown.borrow_mut().pause();
    println!("Paused {label} at {}", countdown.borrow().data().formatted_time);
    Ok(())
}

pub fn reset(ctx: &CliContext, id: u64) -> Result<(), String> {
    let (label, countdown) = lookup(ctx, id)?;
    countdown.borrow_mut().reset();
    println!("Reset {label}");
    Ok(())
}

pub fn set_time(ctx: &CliContext, id: u64, ms: i64) -> Result<(), String> {
    let (label, countdown) = lookup(ctx, id)?;
    countdown.borrow_mut().set_time(ms);
    println!("{label} set to {}ms", countdown.borrow().time());
    Ok(())
}

pub fn add(ctx: &CliContext, config: CountdownConfig, save: bool) -> Result<(), String> {
    if config.format.is_empty() {
        return Err("error: format must not be empty\n".to_string());
    }
    let id = ctx.mount(&config);
    println!("Mounted countdown #{}", id.get());

    if save {
        let mut app_config = ctx.config.borrow_mut();
        app_config.countdowns.push(config);
        app_config.save().map_err(|e| format!("error: {e}\n"))?;
        println!("Saved to startup countdowns");
    }
    Ok(())
}

pub fn remove(ctx: &CliContext, id: u64) -> Result<(), String> {
    let label = ctx
        .unmount(id)
        .ok_or_else(|| format!("error: no countdown #{id}\n"))?;
    println!("Removed {label}, ticker {}", running_label(ctx));
    Ok(())
}

pub fn follow(ctx: &CliContext, id: u64) -> Result<(), String> {
    let following = ctx
        .toggle_follow(id)
        .ok_or_else(|| format!("error: no countdown #{id}\n"))?;
    if following {
        println!("Following #{id}");
    } else {
        println!("Stopped following #{id}");
    }
    Ok(())
}

pub fn show_config(ctx: &CliContext) -> Result<(), String> {
    match AppConfig::config_path() {
        Ok(path) => println!("Config file: {}", path.display()),
        Err(e) => println!("Config file: unavailable ({e})"),
    }

    let config = ctx.config.borrow();
    println!("Frame interval: {}ms", config.frame_interval_ms);
    println!("Startup countdowns:");
    for countdown in &config.countdowns {
        println!(
            "  {:<24} time={}ms format={:?} millisecond={} auto_start={}",
            countdown.label.as_deref().unwrap_or("-"),
            countdown.time_ms,
            countdown.format,
            countdown.millisecond,
            countdown.auto_start
        );
    }
    Ok(())
}

pub fn exit() -> Result<(), String> {
    write!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())
}

/// React to a notification from the ticker.
pub fn handle_event(ctx: &CliContext, event: CountdownEvent) {
    match event.kind {
        EventKind::Finish => {
            let label = ctx.label(event.id).unwrap_or_default();
            let at = chrono::Local::now().format("%H:%M:%S");
            println!("\n{} {label} finished at {at}", event.id);
        }
        EventKind::Tick { remain_ms } if ctx.is_followed(event.id) => {
            if let Some((label, countdown)) = ctx.get(event.id.get()) {
                let formatted = countdown.borrow().data().formatted_time;
                println!("{} {label} {formatted} ({remain_ms}ms)", event.id);
            }
        }
        _ => {
            tracing::trace!(countdown = %event.id, kind = ?event.kind, "Event");
        }
    }
}

fn running_label(ctx: &CliContext) -> &'static str {
    if ctx.ticker.is_running() { "running" } else { "idle" }
}
