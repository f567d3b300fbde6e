mod clipboard;
mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "forge-sdd",
    about = "Specification-Driven Development toolkit for Atlassian Forge apps",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .forge-sdd/; for init, the parent directory)
    #[arg(long, global = true, env = "FORGE_SDD_ROOT")]
    root: Option<PathBuf>,

    /// Toolkit directory to install from (default: the toolkit built into this binary)
    #[arg(long, global = true, env = "FORGE_SDD_TOOLKIT")]
    toolkit: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Log progress at info level
    #[arg(long, global = true, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new SDD project
    Init {
        /// Project name: lowercase letters, numbers, and hyphens (prompted when omitted)
        name: Option<String>,

        /// Forge product the project targets: basic, jira, confluence
        #[arg(long, short = 't', default_value = "basic")]
        template: String,
    },

    /// Refresh prompts, templates, and schemas and stamp the current binary version
    Update,

    /// Print the prompt for an SDD stage
    Prompt {
        /// ideate, architect, plan, implement, test, operate
        stage: String,

        /// Also copy the prompt to the clipboard
        #[arg(long, short = 'c')]
        copy: bool,
    },

    /// Copy a document template into docs/
    Template {
        /// specification, ADD, implementation-plan, test-plan
        #[arg(value_name = "TYPE")]
        doc_type: String,

        /// Output path (default: docs/<TYPE>-<date>.md)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Validate a document's frontmatter against its schema
    Validate {
        file: PathBuf,

        /// Document type (default: the frontmatter `type:` field)
        #[arg(long = "type", short = 't', value_name = "TYPE")]
        doc_type: Option<String>,
    },

    /// Report path rewrites per toolkit prompt and check none are left behind
    Audit,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let toolkit = cli.toolkit.as_deref();

    let result = match cli.command {
        Commands::Init { name, template } => {
            let parent = root::init_parent(cli.root.as_deref());
            cmd::init::run(&parent, name.as_deref(), &template, toolkit, cli.json)
        }
        Commands::Update => {
            let root = root::resolve_root(cli.root.as_deref());
            cmd::update::run(&root, toolkit, cli.json)
        }
        Commands::Prompt { stage, copy } => {
            let root = root::resolve_root(cli.root.as_deref());
            cmd::prompt::run(&root, &stage, copy, cli.json)
        }
        Commands::Template { doc_type, output } => {
            let root = root::resolve_root(cli.root.as_deref());
            cmd::template::run(&root, &doc_type, output.as_deref(), cli.json)
        }
        Commands::Validate { file, doc_type } => {
            let root = root::resolve_root(cli.root.as_deref());
            cmd::validate::run(&root, &file, doc_type.as_deref(), cli.json)
        }
        Commands::Audit => cmd::audit::run(toolkit, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
