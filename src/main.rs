//! Str Templates CLI
//!
//! Usage:
//!   str-templates [OPTIONS] [FILE]
//!
//! Options:
//!   --set <KEY=VALUE>    Replace placeholder KEY with VALUE (repeatable)
//!   --remove <KEY>       Remove placeholder KEY (repeatable)
//!   -c, --config <FILE>  Format configuration (TOML format)
//!   --strict             Fail on lines not indented in whole units
//!   --no-format          Skip the reformatting passes
//!   --demo               Print the built-in example program
//!   -h, --help           Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use str_templates::{FormatConfig, Placeholder, Template};

#[derive(Parser)]
#[command(name = "str-templates")]
#[command(about = "Fill placeholders in a line-based code template and reformat it")]
struct Cli {
    /// Template file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Replace a placeholder with a literal string; numeric keys are `$N` placeholders
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    assignments: Vec<(Placeholder, String)>,

    /// Remove a placeholder, deleting lines left blank
    #[arg(long = "remove", value_name = "KEY", value_parser = parse_placeholder)]
    removals: Vec<Placeholder>,

    /// Format configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fail on lines not indented in whole units
    #[arg(long)]
    strict: bool,

    /// Skip the reformatting passes
    #[arg(long)]
    no_format: bool,

    /// Print the built-in example program
    #[arg(long)]
    demo: bool,
}

fn parse_placeholder(key: &str) -> Result<Placeholder, String> {
    if key.is_empty() {
        return Err("placeholder name must not be empty".to_string());
    }
    Ok(match key.parse::<u32>() {
        Ok(n) => Placeholder::Index(n),
        Err(_) => Placeholder::Named(key.to_string()),
    })
}

fn parse_assignment(arg: &str) -> Result<(Placeholder, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", arg))?;
    Ok((parse_placeholder(key)?, value.to_string()))
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "str_templates=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    // Load format configuration
    let mut config = match &cli.config {
        Some(path) => match FormatConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => FormatConfig::default(),
    };
    if cli.strict {
        config = config.with_strict_indent(true);
    }

    let (mut template, filename) = if cli.demo {
        (demo_program(), "<demo>".to_string())
    } else {
        let (source, filename) = match read_input(cli.input.as_ref()) {
            Ok(read) => read,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        };
        (Template::from_lines(source.lines()), filename)
    };

    for (placeholder, value) in cli.assignments {
        if !template.replace(placeholder.clone(), value) {
            tracing::warn!(%placeholder, "placeholder not found in template");
        }
    }
    for placeholder in cli.removals {
        if !template.remove(placeholder.clone()) {
            tracing::warn!(%placeholder, "placeholder not found in template");
        }
    }
    for placeholder in template.placeholders() {
        tracing::warn!(%placeholder, "placeholder left unresolved");
    }

    if !cli.no_format {
        // Keep the unformatted text around for error reports
        let before = template.text();
        if let Err(e) = template.reformat(&config) {
            eprint!("{}", e.format(&before, &filename));
            std::process::exit(1);
        }
    }

    print!("{}", template.text());
}

fn read_input(path: Option<&PathBuf>) -> Result<(String, String), String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .map(|content| (content, path.display().to_string()))
            .map_err(|e| format!("reading file '{}': {}", path.display(), e)),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map(|_| (buffer, "<stdin>".to_string()))
                .map_err(|e| format!("reading from stdin: {}", e))
        }
    }
}

/// The toy C program used to show off composition
fn demo_program() -> Template {
    let mut main = Template::new();
    main.open_append()
        .line("$1                             ")
        .line("int main(void)                 ")
        .line("{                              ")
        .line("    int x = f($2);             ")
        .line("    for (int i = 0; i<x; i++)  ")
        .line("    {                          ")
        .line("        $for_body$             ")
        .line("    }                          ")
        .line("}");

    main.replace(1, heading());
    main.replace(2, "\"hello\"");
    main.replace("for_body", for_body());
    main
}

fn heading() -> Template {
    let mut heading = Template::new();
    heading
        .open_append()
        .line("//Copyright(2020) DFG")
        .line("//ss")
        .line("");
    heading
}

fn for_body() -> Template {
    let mut body = Template::new();
    body.open_append()
        .line("if (i == 0)    ")
        .line("{              ")
        .line("    f2($1);    ")
        .line("    $remove_me$")
        .line("}");

    body.replace(1, "1+1");
    body.remove("remove_me");
    body
}
