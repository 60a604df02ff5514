use std::io::Write;
use std::process;

use apidoc_cli::ApidocCli;
use apidoc_core::ApidocConfig;
use apidoc_core::ApidocError;
use apidoc_core::ApidocResult;
use apidoc_core::Options;
use apidoc_core::render;
use apidoc_core::scan_path;
use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream;

fn main() {
	let args = ApidocCli::parse();
	init_tracing(args.verbose);

	if let Err(e) = run(&args) {
		eprintln!("error: {e}");
		process::exit(1);
	}
}

fn init_tracing(verbosity: u8) {
	use tracing_subscriber::layer::SubscriberExt;
	use tracing_subscriber::util::SubscriberInitExt;

	let level = match verbosity {
		0 => tracing::Level::WARN,
		1 => tracing::Level::INFO,
		2 => tracing::Level::DEBUG,
		_ => tracing::Level::TRACE,
	};
	let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());
	let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

	tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

fn run(args: &ApidocCli) -> ApidocResult<()> {
	if args.format != "md" {
		return Err(ApidocError::UnsupportedFormat(args.format.clone()));
	}

	let options = build_options(args)?;
	let report = scan_path(&args.path, &options)?;
	for diagnostic in &report.diagnostics {
		report_error(&diagnostic.message());
	}

	if report.registry.is_empty() {
		return Err(ApidocError::NoApis);
	}

	let rendered = render(&report.registry, &options.order);
	for diagnostic in &rendered.diagnostics {
		report_error(&diagnostic.message());
	}

	write_output(args, &rendered.markdown)
}

/// Build the run-wide options: defaults, then `apidoc.toml` at the scanned
/// root, then command-line flags.
fn build_options(args: &ApidocCli) -> ApidocResult<Options> {
	let mut options = Options::default();

	if let Some(config) = ApidocConfig::load(&args.path)? {
		options.apply_config(&config);
	}

	if let Some(comment) = &args.comment {
		options.comment.clone_from(comment);
	}
	if let Some(extension) = &args.extension {
		options.extension.clone_from(extension);
	}
	if let Some(tab) = args.tab {
		options.tab_width = tab;
	}
	if let Some(order) = &args.order {
		options.order = order
			.split(args.order_sep.as_str())
			.map(str::trim)
			.filter(|name| !name.is_empty())
			.map(str::to_string)
			.collect();
	}

	Ok(options)
}

fn write_output(args: &ApidocCli, markdown: &str) -> ApidocResult<()> {
	match &args.file {
		Some(path) => {
			if path.exists() && !args.overwrite {
				return Err(ApidocError::OutputExists {
					path: path.display().to_string(),
				});
			}
			std::fs::write(path, markdown)?;
			Ok(())
		}
		None => {
			let mut stdout = std::io::stdout().lock();
			stdout.write_all(markdown.as_bytes())?;
			Ok(())
		}
	}
}

/// Non-fatal diagnostics go to stderr, highlighted when the terminal
/// supports color.
fn report_error(message: &str) {
	eprintln!(
		"{}",
		message.if_supports_color(Stream::Stderr, |text| text.bright_red())
	);
}
