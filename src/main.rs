#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "valbridge", about = "Host/native value marshaling tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Decode {
		value: PathBuf,
		#[arg(long)]
		shape: PathBuf,
		#[arg(long)]
		max_depth: Option<u32>,
	},
	Roundtrip {
		value: PathBuf,
		#[arg(long)]
		shape: PathBuf,
	},
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> valbridge::marshal::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Decode { value, shape, max_depth } => cmd::decode::run(value, shape, max_depth),
		Commands::Roundtrip { value, shape } => cmd::roundtrip::run(value, shape),
	}
}
