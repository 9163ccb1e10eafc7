mod app;
mod config;
mod core;
mod effect;
mod platform;

use std::path::PathBuf;

use anyhow::Result;
use argh::FromArgs;
use shoji_config::format_key_spec;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shoji - tag-based window management core
#[derive(FromArgs)]
struct Cli {
    #[argh(subcommand)]
    command: Option<SubCommand>,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum SubCommand {
    Start(StartCmd),
    Check(CheckCmd),
    Version(VersionCmd),
}

/// Run the core: events in on stdin, instructions out on stdout
#[derive(FromArgs)]
#[argh(subcommand, name = "start")]
struct StartCmd {
    /// path to the configuration file
    #[argh(option)]
    config: Option<PathBuf>,
}

/// Validate the configuration and print the compiled tables
#[derive(FromArgs)]
#[argh(subcommand, name = "check")]
struct CheckCmd {
    /// path to the configuration file
    #[argh(option)]
    config: Option<PathBuf>,
}

/// Show version information
#[derive(FromArgs)]
#[argh(subcommand, name = "version")]
struct VersionCmd {}

fn main() -> Result<()> {
    let cli: Cli = argh::from_env();

    match cli.command {
        None => {
            // No subcommand - show help (simulate --help)
            let args: Vec<&str> = vec!["shoji", "--help"];
            match Cli::from_args(&args[..1], &args[1..]) {
                Ok(_) => {}
                Err(e) => {
                    println!("{}", e.output);
                }
            }
            Ok(())
        }
        Some(SubCommand::Start(cmd)) => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(std::io::stderr)
                .init();

            tracing::info!("shoji starting");
            app::App::run(cmd.config)
        }
        Some(SubCommand::Check(cmd)) => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(std::io::stderr)
                .init();

            check(cmd.config)
        }
        Some(SubCommand::Version(_)) => {
            println!("shoji {}", VERSION);
            Ok(())
        }
    }
}

fn check(path: Option<PathBuf>) -> Result<()> {
    let file = config::load(path.as_deref())?;
    let compiled = config::compile(file)?;

    println!("tags: {}", compiled.tags.join(" "));
    println!("layouts:");
    for i in 0..compiled.layouts.len() {
        if let Some(layout) = compiled.layouts.get(i) {
            let arrange = if layout.arrange.is_some() {
                "arranged"
            } else {
                "floating"
            };
            println!("  {} {} ({})", i, layout.symbol, arrange);
        }
    }
    println!("rules: {}", compiled.rules.len());
    println!("key bindings:");
    for binding in &compiled.bindings.keys {
        println!(
            "  {} -> {:?}",
            format_key_spec(&binding.mods, &binding.key),
            binding.action
        );
    }
    println!("button bindings:");
    for binding in &compiled.bindings.buttons {
        println!(
            "  {:?} {:?}+{:?} -> {:?}",
            binding.context, binding.mods, binding.button, binding.action
        );
    }
    println!("config ok");
    Ok(())
}
