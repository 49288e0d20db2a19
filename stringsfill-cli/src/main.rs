mod edit;
mod resolve;
mod translate;
mod view;

use clap::{Parser, Subcommand};

use crate::edit::run_remove_command;
use crate::resolve::load_settings;
use crate::translate::run_translate_command;
use crate::view::{print_copy, print_export, print_list, print_missing, print_show};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Optional TOML settings file (layout and translation service)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List resources and how complete each language is.
    List {
        /// Directory holding the `<lang>.lproj` folders
        root: String,
    },

    /// Print each key with its source text and translation.
    Show {
        root: String,
        /// Resource file name, with or without extension
        #[arg(short, long)]
        file: String,
        #[arg(short, long)]
        lang: String,
    },

    /// Print the keys a language has no translation for.
    Missing {
        root: String,
        /// Resource file name, with or without extension
        #[arg(short, long)]
        file: String,
        #[arg(short, long)]
        lang: String,
    },

    /// Print a language as `.strings` text in source key order.
    Export {
        root: String,
        #[arg(short, long)]
        file: String,
        #[arg(short, long)]
        lang: String,
    },

    /// Print the statement of a single translation.
    Copy {
        root: String,
        #[arg(short, long)]
        file: String,
        #[arg(short, long)]
        lang: String,
        #[arg(short, long)]
        key: String,
    },

    /// Remove a translation and save the language.
    Remove {
        root: String,
        #[arg(short, long)]
        file: String,
        #[arg(short, long)]
        lang: String,
        #[arg(short, long)]
        key: String,
    },

    /// Translate every missing key of a language and save it.
    Translate {
        root: String,
        #[arg(short, long)]
        file: String,
        #[arg(short, long)]
        lang: String,
    },
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout carries command output
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let result = load_settings(args.config.as_deref()).and_then(|settings| match args.commands {
        Commands::List { root } => print_list(&root, &settings),
        Commands::Show { root, file, lang } => print_show(&root, &file, &lang, &settings),
        Commands::Missing { root, file, lang } => print_missing(&root, &file, &lang, &settings),
        Commands::Export { root, file, lang } => print_export(&root, &file, &lang, &settings),
        Commands::Copy {
            root,
            file,
            lang,
            key,
        } => print_copy(&root, &file, &lang, &key, &settings),
        Commands::Remove {
            root,
            file,
            lang,
            key,
        } => run_remove_command(&root, &file, &lang, &key, &settings),
        Commands::Translate { root, file, lang } => {
            run_translate_command(&root, &file, &lang, &settings)
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
