//! Theme Variants CLI
//!
//! Usage:
//!   theme-variants [OPTIONS] [COMMAND]
//!
//! Commands:
//!   build  Build every theme variant
//!   list   Show the theme file each variant produces
//!
//! Options:
//!   -C, --root <DIR>     Project root
//!   -c, --config <FILE>  Layout file (TOML format)
//!   -v, --verbose        Increase log verbosity
//!   -q, --quiet          Suppress progress output
//!   -h, --help           Print help

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use theme_variants::{BuildLayout, ConsoleReporter, Project, Reporter, SilentReporter};

#[derive(Parser)]
#[command(name = "theme-variants")]
#[command(about = "Generate color theme variants from a single template", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Project root containing package.json and backgrounds.json
    #[arg(short = 'C', long, default_value = ".", global = true)]
    root: PathBuf,

    /// Layout file (defaults to <root>/theme-variants.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Build every theme variant
    Build,
    /// Show the theme file each variant produces, without writing anything
    List,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        print_intro();
        return;
    };

    let layout = match &cli.config {
        Some(path) => BuildLayout::from_file(path),
        None => BuildLayout::discover(&cli.root),
    };
    let project = match layout.and_then(|layout| Project::load(&cli.root, layout)) {
        Ok(project) => project,
        Err(e) => {
            eprintln!("Error: {}", e.report());
            process::exit(1);
        }
    };

    let result = match command {
        Command::Build => {
            let mut reporter: Box<dyn Reporter> = if cli.quiet {
                Box::new(SilentReporter)
            } else {
                Box::new(ConsoleReporter::stdout(io::stdout().is_terminal()))
            };
            project.build(reporter.as_mut()).map(|summary| {
                tracing::debug!(
                    removed = summary.removed.len(),
                    written = summary.written.len(),
                    "build finished"
                );
            })
        }
        Command::List => project.plan().map(|plans| {
            for plan in plans {
                println!(
                    "{:<20} {}",
                    plan.variant.name,
                    plan.destination
                        .strip_prefix(&project.root)
                        .unwrap_or(&plan.destination)
                        .display()
                );
            }
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e.report());
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn print_intro() {
    println!(
        r#"Theme Variants - generate color theme variants from a single template

USAGE:
    theme-variants [OPTIONS] build
    theme-variants [OPTIONS] list

OPTIONS:
    -C, --root <DIR>      Project root (default: current directory)
    -c, --config <FILE>   Layout file (default: <root>/theme-variants.toml)
    -v, --verbose         More logging (repeatable)
    -q, --quiet           No progress output
    -h, --help            Print help

PROJECT:
    package.json                       name, version, humanized
    backgrounds.json                   [{{ "name": ..., "color": {{ "rgb": ..., "hex": ... }} }}]
    templates/template.hidden-tmTheme  template with {{{{name}}}}, {{{{bg_rgb}}}}, {{{{bg_hex}}}}

Run `theme-variants build` to write one .tmTheme file per background."#
    );
}
