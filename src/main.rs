// src/main.rs
//
// html-modularize — split a monolithic HTML document into a static-site shell
//
// Reads INPUT, takes the markup between `<body>` and the first `<script>`,
// strips inline onclick/onchange/ondragstart handlers and leftover
// `showSec('<id>',this)` calls, then writes OUTPUT: a fresh document linking
// main.css and the src/main.js module.
//
// Logging goes to stderr; set HTML_MODULARIZE_LOG to override the level.

use clap::{ArgAction, Parser};
use html_modularize::{run, BuildConfig, CallMarker};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Additional inline attribute to strip (repeatable)
    #[arg(long = "attr", value_name = "NAME")]
    attrs: Vec<String>,

    /// Additional section id whose showSec call is removed (repeatable)
    #[arg(long = "section", value_name = "ID")]
    sections: Vec<String>,

    /// Additional literal call expression to remove, e.g. "toggleAll(true)" (repeatable)
    #[arg(long = "marker", value_name = "CALL")]
    markers: Vec<String>,

    /// Do not derive section ids from id="sec-..." in the document
    #[arg(long = "no-discover", action = ArgAction::SetTrue)]
    no_discover: bool,

    /// Document title, inserted unescaped (must not contain '<' or '&')
    #[arg(long)]
    title: Option<String>,

    /// Stylesheet href, inserted unescaped (must not contain '"', '<', '>' or '&')
    #[arg(long)]
    stylesheet: Option<String>,

    /// Script module src, inserted unescaped (must not contain '"', '<', '>' or '&')
    #[arg(long)]
    script: Option<String>,

    /// Debug logging
    #[arg(short, long, action = ArgAction::SetTrue, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, action = ArgAction::SetTrue)]
    quiet: bool,

    /// Monolithic source document
    input: PathBuf,

    /// Destination for the generated shell
    output: PathBuf,
}

impl Cli {
    fn config(&self) -> BuildConfig {
        let mut config = BuildConfig::default();
        config.attributes.extend(self.attrs.iter().cloned());
        config.sections.extend(self.sections.iter().cloned());
        config
            .markers
            .extend(self.markers.iter().map(|m| CallMarker::new(m.as_str())));
        config.discover_sections = !self.no_discover;
        if let Some(title) = &self.title {
            config.shell.title = title.clone();
        }
        if let Some(stylesheet) = &self.stylesheet {
            config.shell.stylesheet = stylesheet.clone();
        }
        if let Some(script) = &self.script {
            config.shell.script = script.clone();
        }
        config
    }
}

fn init_tracing(quiet: bool, verbose: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env("HTML_MODULARIZE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    match run(&cli.input, &cli.output, &cli.config()) {
        Ok(chars) => {
            println!("Done: wrote {chars} chars to {}", cli.output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
