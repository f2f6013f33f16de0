mod debug_report;
mod host;

use clap::{Args, Parser, Subcommand, ValueEnum};
use mission_line::{Context, Options, apply_candidate, identifier_at, parse_verbose, suggest};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Parse and complete mission-line text.
#[derive(Parser)]
#[command(name = "mission-line", version, about = "Parse and complete mission-line text")]
struct Cli {
    #[command(flatten)]
    host: HostArgs,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Force ANSI color output
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable ANSI color output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct HostArgs {
    /// JSON file listing extra modules
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Directory of `<name>.json` profile files
    #[arg(long, global = true)]
    profiles: Option<PathBuf>,

    /// Largest module count any bomb casing can hold
    #[arg(long, global = true, default_value_t = Options::default().max_modules)]
    max_modules: u32,

    /// Allow `factory:` settings
    #[arg(long, global = true)]
    factory: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a mission from a line, or list what is wrong with it
    Parse {
        /// Mission line; read from stdin when omitted
        text: Option<String>,
    },

    /// List completion candidates at a cursor
    Suggest {
        text: String,
        /// Byte offset of the cursor (default: end of text)
        #[arg(long)]
        cursor: Option<usize>,
    },

    /// Apply the N-th completion candidate at a cursor
    Apply {
        text: String,
        /// Byte offset of the cursor (default: end of text)
        #[arg(long)]
        cursor: Option<usize>,
        /// Index into the candidate list
        #[arg(long)]
        pick: usize,
    },

    /// Show the identifier under a byte offset
    Hover {
        text: String,
        #[arg(long)]
        offset: usize,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let color = if cli.color {
        true
    } else if cli.no_color {
        false
    } else {
        io::stdout().is_terminal()
    };

    let catalog = match host::load_catalog(cli.host.catalog.as_deref()) {
        Ok(catalog) => catalog,
        Err(err) => exit_with(&err.to_string()),
    };
    let profiles = match host::load_profiles(cli.host.profiles.as_deref()) {
        Ok(profiles) => profiles,
        Err(err) => exit_with(&err.to_string()),
    };
    let ctx = Context::new(&catalog, &profiles);
    let options = Options { max_modules: cli.host.max_modules, factory_enabled: cli.host.factory };

    let code = match cli.command {
        Commands::Parse { text } => {
            let text = match text {
                Some(text) => text,
                None => read_stdin_input(),
            };
            cmd_parse(&text, &ctx, &options, cli.output, color)
        }
        Commands::Suggest { text, cursor } => {
            let cursor = cursor.unwrap_or(text.len());
            let candidates = suggest(&text, cursor, &ctx, &options);
            match cli.output {
                OutputFormat::Json => print_json(&candidates),
                OutputFormat::Text => debug_report::print_candidates(&text, cursor, &candidates, color),
            }
            0
        }
        Commands::Apply { text, cursor, pick } => {
            let cursor = cursor.unwrap_or(text.len());
            let candidates = suggest(&text, cursor, &ctx, &options);
            let Some(candidate) = candidates.get(pick) else {
                exit_with(&format!("error: no candidate {pick} ({} available)", candidates.len()));
            };
            let (out, cursor) = apply_candidate(&text, cursor, candidate);
            match cli.output {
                OutputFormat::Json => print_json(&serde_json::json!({ "text": out, "cursor": cursor })),
                OutputFormat::Text => println!("{out}\n{cursor}"),
            }
            0
        }
        Commands::Hover { text, offset } => {
            let hover = identifier_at(&text, offset, &ctx);
            match cli.output {
                OutputFormat::Json => print_json(&hover),
                OutputFormat::Text => debug_report::print_hover(hover.as_ref(), color),
            }
            if hover.is_some() { 0 } else { 1 }
        }
    };
    process::exit(code);
}

fn cmd_parse(text: &str, ctx: &Context<'_>, options: &Options, output: OutputFormat, color: bool) -> i32 {
    let report = parse_verbose(text, ctx, options);
    let code = if report.result.is_ok() { 0 } else { 1 };

    match output {
        OutputFormat::Json => {
            let value = match &report.result {
                Ok(mission) => serde_json::json!({
                    "ok": true,
                    "mission": mission,
                    "canonical": mission.to_canonical(),
                }),
                Err(diagnostics) => serde_json::json!({ "ok": false, "diagnostics": diagnostics.messages() }),
            };
            print_json(&value);
        }
        OutputFormat::Text => debug_report::print_parse(&report, color),
    }
    code
}

fn print_json(value: &impl serde::Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("error: failed to serialize output: {err}");
            process::exit(1);
        }
    }
}

fn read_stdin_input() -> String {
    let mut buffer = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut buffer) {
        exit_with(&format!("error: failed to read stdin: {err}"));
    }
    buffer.trim_end_matches(['\r', '\n']).to_string()
}

fn exit_with(message: &str) -> ! {
    eprintln!("{message}");
    process::exit(2);
}
