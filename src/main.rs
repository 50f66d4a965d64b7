//! bubblekeys - dry-run keymap inspector
//!
//! Loads a YAML keymap tree and answers questions about it without opening
//! a window: what the processed tree looks like, which handler a key press
//! reaches from a context, and what is bound there.

mod cli;
mod dump;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use bubblekeys::config_paths;
use bubblekeys::keymap::{
    effective_bindings, load_keymap_file_with, preprocess, resolve_match, LoadOptions,
    ShortcutTree,
};

use cli::{CliArgs, Command};

fn main() -> Result<()> {
    bubblekeys::tracing::init();

    let args = CliArgs::parse();
    run(args)
}

fn run(args: CliArgs) -> Result<()> {
    let platform = args.platform();
    let path = keymap_path(&args)?;
    let options = LoadOptions {
        platform,
        strict: args.strict,
    };

    let raw = load_keymap_file_with(&path, &options)
        .with_context(|| format!("Failed to load keymap {}", path.display()))?;
    let tree = preprocess(&raw, platform);

    match args.command {
        Command::Tree { json } => {
            if json {
                let dump = dump::TreeDump::from_tree(&tree);
                println!("{}", serde_json::to_string_pretty(&dump)?);
            } else {
                print!("{}", dump::outline(&tree));
            }
        }
        Command::Resolve {
            context,
            combo,
            code,
        } => {
            let event = cli::synthesize_event(&combo, code.as_deref(), platform);
            println!("{}", describe_resolution(&tree, &context, &event));
        }
        Command::Bindings { context } => {
            let bindings = effective_bindings(&tree, &context);
            if bindings.is_empty() {
                println!("no bindings reachable from {:?}", context);
            }
            for binding in bindings {
                println!(
                    "{:<24} {:<24} [{}]",
                    binding.combination.display_string(platform),
                    dump::describe(binding.handler),
                    tree.node(binding.node).context()
                );
            }
        }
    }

    Ok(())
}

fn keymap_path(args: &CliArgs) -> Result<PathBuf> {
    match &args.keymap {
        Some(path) => Ok(path.clone()),
        None => config_paths::keymap_file()
            .context("No config directory available; pass --keymap explicitly"),
    }
}

fn describe_resolution(
    tree: &ShortcutTree<String>,
    context: &str,
    event: &bubblekeys::KeyEvent,
) -> String {
    match resolve_match(tree, Some(context), event) {
        Some(resolution) => format!(
            "{} => {} (bound in {:?})",
            resolution.combination,
            dump::describe(resolution.handler),
            tree.node(resolution.node).context()
        ),
        None => format!("{:?} is unhandled in {:?}", event.key, context),
    }
}
