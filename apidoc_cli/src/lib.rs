//! Argument surface for the `apidoc` binary.

use std::path::PathBuf;

use clap::Parser;

/// Compile tagged comment blocks from a source tree into one consolidated
/// markdown API reference.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct ApidocCli {
	/// Root file or directory to scan.
	#[arg(default_value = ".")]
	pub path: PathBuf,

	/// Save the result to a file instead of standard output.
	#[arg(long, short)]
	pub file: Option<PathBuf>,

	/// Overwrite the output file if it already exists.
	#[arg(long, short)]
	pub overwrite: bool,

	/// Comment-start token.
	#[arg(long, short)]
	pub comment: Option<String>,

	/// File extension (without dot) of the files to scan.
	#[arg(long, short)]
	pub extension: Option<String>,

	/// Output format; only `md` is supported.
	#[arg(long = "format", short = 't', default_value = "md")]
	pub format: String,

	/// Tab width used during line normalization; 0 keeps literal tabs.
	#[arg(long)]
	pub tab: Option<usize>,

	/// Preferred category order, separated by `--order-sep`.
	#[arg(long)]
	pub order: Option<String>,

	/// Separator for the `--order` list.
	#[arg(long, default_value = ",")]
	pub order_sep: String,

	/// Enable verbose logging; repeat for more detail.
	#[arg(long, short, action = clap::ArgAction::Count)]
	pub verbose: u8,
}
