use miette::Diagnostic;
use thiserror::Error;

/// Fatal failures that abort the whole run. Non-fatal conditions are
/// reported as [`ScanDiagnostic`](crate::ScanDiagnostic) or
/// [`RenderDiagnostic`](crate::RenderDiagnostic) values instead.
#[derive(Debug, Diagnostic, Error)]
pub enum ApidocError {
	#[error(transparent)]
	#[diagnostic(code(apidoc::io_error))]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	#[diagnostic(code(apidoc::walk_error))]
	Walk(#[from] walkdir::Error),

	#[error("failed to parse apidoc.toml: {0}")]
	#[diagnostic(code(apidoc::config_parse))]
	ConfigParse(String),

	#[error("no API definitions found in this dir or file")]
	#[diagnostic(code(apidoc::no_apis))]
	NoApis,

	#[error("unsupported output format `{0}`, only `md` is supported")]
	#[diagnostic(code(apidoc::unsupported_format))]
	UnsupportedFormat(String),

	#[error("output file `{path}` already exists, pass --overwrite to replace it")]
	#[diagnostic(code(apidoc::output_exists))]
	OutputExists {
		/// The path that refused to be clobbered.
		path: String,
	},
}

/// Result alias used throughout the crate.
pub type ApidocResult<T> = Result<T, ApidocError>;
