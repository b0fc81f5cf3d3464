#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod cmd;
mod document;
mod error;

use error::Result;

#[derive(Parser)]
#[command(name = "valnav", about = "Navigate JSON documents with paths and patterns")]
struct Cli {
	/// Raise log verbosity (`-v` debug, `-vv` trace). `RUST_LOG` takes precedence.
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbose: u8,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Follow a deterministic path and print the value it reaches.
	Traverse {
		path: PathBuf,
		expr: String,
		#[arg(long)]
		json: bool,
	},
	/// Enumerate every concrete path matching a pattern.
	Match {
		path: PathBuf,
		expr: String,
		#[arg(long)]
		json: bool,
		/// Order matches by rendered path.
		#[arg(long)]
		sort: bool,
		/// Stop after this many matches.
		#[arg(long)]
		limit: Option<usize>,
	},
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> Result<()> {
	let cli = Cli::parse();
	cmd::init_tracing(cli.verbose);

	match cli.command {
		Commands::Traverse { path, expr, json } => cmd::traverse::run(&cmd::traverse::TraverseArgs { path, expr, json }),
		Commands::Match {
			path,
			expr,
			json,
			sort,
			limit,
		} => cmd::matches::run(&cmd::matches::MatchArgs {
			path,
			expr,
			json,
			sort,
			limit,
		}),
	}
}
