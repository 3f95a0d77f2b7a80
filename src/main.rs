//! Renders a single progress frame for a style and percentage.
//!
//! ```bash
//! progress-loader --loader bar --percentage 50
//! progress-loader --loader time_clock --percentage 75 --color green
//! ```

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use progress_loader::{Color, ProgressSnapshot, RenderConfig, Style, render_line};

#[derive(Parser, Debug)]
#[command(
    name = "progress-loader",
    version,
    about = "Render a single progress loader frame",
    after_help = "Example usage:\n  progress-loader --loader bar --percentage 50\n  progress-loader --loader spinner --percentage 75"
)]
struct Args {
    /// Progress percentage (0-100): how much of the task is completed
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    percentage: Option<u8>,

    /// Type of loader to display: bar, spinner, dots or clock (alias: time_clock)
    #[arg(long)]
    loader: Option<Style>,

    /// Label shown before the indicator
    #[arg(long, default_value = "Progress")]
    desc: String,

    /// Line color: default, blue, green or red
    #[arg(long, default_value = "default")]
    color: Color,

    /// Number of cells in the bar
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..))]
    width: u16,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "warn"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();
    log::debug!("{args:?}");

    let (Some(style), Some(percentage)) = (args.loader, args.percentage) else {
        if let Err(err) = Args::command().print_help() {
            log::error!("failed to print help: {err}");
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    };

    let config = RenderConfig {
        style,
        color: args.color,
        width: usize::from(args.width),
        ..RenderConfig::default()
    };
    let snapshot = ProgressSnapshot::new(args.desc, "%", u64::from(percentage), Some(100), None);

    let line = render_line(&config, &snapshot, 0);
    println!("{}", config.color.paint_for(&line, Some(owo_colors::Stream::Stdout)));
    ExitCode::SUCCESS
}
