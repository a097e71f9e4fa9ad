//! Command-line interface
//!
//! Supports:
//! - Resolving key tokens step by step against a view hierarchy
//! - Listing the default bindings of a view
//! - Checking a keymap file for rejected entries

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::keymap::{
    apply_user_keymaps, display_sequence, load_keymap_file, split_tokens, DefaultTable, KeyAction,
    KeyBindingManager, KeySequenceReader, KeymapError, ViewId,
};

/// Resolve terminal key sequences against per-view keybindings
#[derive(Parser, Debug)]
#[command(name = "viewkeys", version, about = "Resolve key sequences against view keybindings")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Feed key tokens one at a time and print each verdict
    Resolve {
        /// Extra keymap file applied after the user keymaps
        #[arg(short = 'k', long, value_name = "FILE")]
        keymap: Option<PathBuf>,

        /// View hierarchy, most specific first (repeatable)
        #[arg(long = "view", value_name = "VIEW", value_parser = parse_view)]
        views: Vec<ViewId>,

        /// Skip ./keymap.yaml and the user keymap
        #[arg(long)]
        no_user_keymaps: bool,

        /// Print one JSON object per step
        #[arg(long)]
        json: bool,

        /// Key tokens, e.g. `g g` or `<C-w>w`
        #[arg(value_name = "KEYS", required = true)]
        keys: Vec<String>,
    },

    /// List the default bindings of a view
    List {
        #[arg(long, value_name = "VIEW", default_value = "main", value_parser = parse_view)]
        view: ViewId,
    },

    /// Validate a keymap file
    Check {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}

fn parse_view(s: &str) -> Result<ViewId, KeymapError> {
    s.parse()
}

/// One resolution step, as printed by `resolve`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub token: String,
    pub sequence: String,
    pub verdict: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl StepReport {
    fn new(token: &str, sequence: String, outcome: &KeyAction) -> Self {
        let (verdict, action) = match outcome {
            KeyAction::Execute(action) => ("execute", Some(action.name().to_string())),
            KeyAction::Remap(keys) => ("remap", Some(keys.clone())),
            KeyAction::AwaitMore => ("await", None),
            KeyAction::NoMatch => ("no-match", None),
        };
        Self {
            token: token.to_string(),
            sequence,
            verdict,
            action,
        }
    }
}

/// Feed every token of `keys` through a reader, reporting each step
pub fn resolve_steps(
    manager: &KeyBindingManager,
    hierarchy: &[ViewId],
    keys: &[String],
) -> Vec<StepReport> {
    let mut reader = KeySequenceReader::new();
    keys.iter()
        .flat_map(|arg| split_tokens(arg))
        .map(|token| if token == "<" { "<lt>" } else { token })
        .map(|token| {
            let sequence = format!("{}{}", reader.pending(), token);
            let outcome = reader.feed(manager, hierarchy, token);
            StepReport::new(token, sequence, &outcome)
        })
        .collect()
}

/// Run the parsed command, returning the process exit code
pub fn run(args: CliArgs) -> Result<ExitCode> {
    let mut out = std::io::stdout().lock();

    match args.command {
        CliCommand::Resolve {
            keymap,
            views,
            no_user_keymaps,
            json,
            keys,
        } => {
            let mut manager = KeyBindingManager::with_builtin_defaults();
            if !no_user_keymaps {
                for e in apply_user_keymaps(&mut manager) {
                    writeln!(std::io::stderr(), "warning: {}", e)?;
                }
            }
            if let Some(path) = keymap {
                let parsed = load_keymap_file(&path)
                    .with_context(|| format!("Failed to load keymap {}", path.display()))?;
                for e in &parsed.rejected {
                    writeln!(std::io::stderr(), "warning: {}", e)?;
                }
                parsed.apply(&mut manager);
            }

            for step in resolve_steps(&manager, &views, &keys) {
                if json {
                    writeln!(out, "{}", serde_json::to_string(&step)?)?;
                } else {
                    writeln!(
                        out,
                        "{:<12} {:<9} {}",
                        display_sequence(&step.sequence),
                        step.verdict,
                        step.action.as_deref().unwrap_or("")
                    )?;
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        CliCommand::List { view } => {
            let table = DefaultTable::builtin();
            for (action, keys) in table.help_entries(view) {
                let keys: Vec<_> = keys.iter().map(|k| display_sequence(k)).collect();
                writeln!(
                    out,
                    "{:<24} {:<26} {}",
                    action.name(),
                    action.description(),
                    keys.join(", ")
                )?;
            }
            Ok(ExitCode::SUCCESS)
        }

        CliCommand::Check { path } => {
            let parsed = load_keymap_file(&path)
                .with_context(|| format!("Failed to load keymap {}", path.display()))?;
            for e in &parsed.rejected {
                writeln!(out, "rejected: {}", e)?;
            }
            writeln!(
                out,
                "{}: {} valid, {} rejected",
                path.display(),
                parsed.entries.len(),
                parsed.rejected.len()
            )?;
            Ok(if parsed.rejected.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
    }
}
