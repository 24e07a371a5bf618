use clap::{Parser, Subcommand};
use countdown_cli::{CliContext, commands, input_lines, logging, prompt};
use countdown_core::{
    AppConfig, AppConfigExt, CountdownConfig, IntervalFrameSource, SystemClock, Ticker,
    event_channel,
};
use std::io::Write;
use std::rc::Rc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init();

    // Countdowns are !Send; the frame source spawns onto this LocalSet
    let local = tokio::task::LocalSet::new();
    local.run_until(run()).await
}

async fn run() -> Result<(), String> {
    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Falling back to default configuration");
        AppConfig::default()
    });

    Ticker::install_shared(Ticker::new(
        IntervalFrameSource::from_millis(config.frame_interval_ms),
        Rc::new(SystemClock),
    ));

    let (events_tx, mut events) = event_channel();
    let ctx = CliContext::new(config, Ticker::shared(), events_tx);
    let mounted = ctx.mount_configured();
    println!("Mounted {mounted} countdowns. Type `help` for commands.");

    let mut lines = input_lines();
    prompt()?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.map_err(|e| e.to_string())? else {
                    break;
                };
                let line = line.trim();
                if line.is_empty() {
                    prompt()?;
                    continue;
                }

                match respond(line, &ctx) {
                    Ok(quit) => {
                        if quit {
                            break;
                        }
                    }
                    Err(err) => {
                        write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                        std::io::stdout().flush().map_err(|e| e.to_string())?;
                    }
                }
                prompt()?;
            }
            Some(event) = events.recv() => commands::handle_event(&ctx, event),
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "countdown")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List mounted countdowns
    List,
    /// Show the render snapshot of one countdown
    Show { id: u64 },
    Start { id: u64 },
    Pause { id: u64 },
    Reset { id: u64 },
    /// Change the total duration (resets the countdown)
    SetTime {
        id: u64,
        #[arg(allow_negative_numbers = true)]
        ms: i64,
    },
    /// Mount a new countdown
    Add {
        #[arg(short, long, default_value_t = countdown_core::config::DEFAULT_TIME_MS, allow_negative_numbers = true)]
        time: i64,
        #[arg(short, long, default_value = countdown_core::config::DEFAULT_FORMAT)]
        format: String,
        #[arg(short, long)]
        label: Option<String>,
        #[arg(long)]
        millisecond: bool,
        /// Do not start automatically
        #[arg(long)]
        manual: bool,
        /// Also mount it on future startups
        #[arg(long)]
        save: bool,
    },
    /// Unmount a countdown
    Remove { id: u64 },
    /// Toggle printing every tick of a countdown
    Follow { id: u64 },
    Config,
    Exit,
}

fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "countdown".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match cli.command {
        Some(Commands::List) => commands::list(ctx)?,
        Some(Commands::Show { id }) => commands::show(ctx, id)?,
        Some(Commands::Start { id }) => commands::start(ctx, id)?,
        Some(Commands::Pause { id }) => commands::pause(ctx, id)?,
        Some(Commands::Reset { id }) => commands::reset(ctx, id)?,
        Some(Commands::SetTime { id, ms }) => commands::set_time(ctx, id, ms)?,
        Some(Commands::Add {
            time,
            format,
            label,
            millisecond,
            manual,
            save,
        }) => {
            let mut config = CountdownConfig::with_time(time)
                .format(format)
                .millisecond(millisecond)
                .auto_start(!manual);
            config.label = label;
            commands::add(ctx, config, save)?
        }
        Some(Commands::Remove { id }) => commands::remove(ctx, id)?,
        Some(Commands::Follow { id }) => commands::follow(ctx, id)?,
        Some(Commands::Config) => commands::show_config(ctx)?,
        Some(Commands::Exit) => {
            commands::exit()?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
