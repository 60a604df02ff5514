use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::PoisonError;

use tracing::debug;
use walkdir::WalkDir;

use crate::Options;
use crate::error::ApidocResult;
use crate::parser::FileParser;
use crate::parser::ParseDiagnostic;
use crate::registry::Registry;
use crate::registry::SharedRegistry;

/// A non-fatal problem found while scanning. The offending unit of work is
/// skipped and the run continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanDiagnostic {
	/// The file the problem was found in.
	pub file: PathBuf,
	/// What went wrong.
	pub kind: ScanDiagnosticKind,
}

/// The kind of problem a [`ScanDiagnostic`] reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanDiagnosticKind {
	/// The file could not be read; its contents are omitted from the output.
	UnreadableFile {
		/// The underlying I/O error.
		reason: String,
	},
	/// A data line's marker offset does not fit within the line as read.
	DataMarkerOutOfRange {
		/// 1-based line number.
		line: usize,
	},
}

impl ScanDiagnostic {
	/// Human-readable message for this diagnostic.
	pub fn message(&self) -> String {
		match &self.kind {
			ScanDiagnosticKind::UnreadableFile { reason } => {
				format!("{}: {reason}", self.file.display())
			}
			ScanDiagnosticKind::DataMarkerOutOfRange { line } => {
				format!(
					"{}:{line}: data marker offset exceeds line length, line skipped",
					self.file.display()
				)
			}
		}
	}

	fn line(&self) -> usize {
		match &self.kind {
			ScanDiagnosticKind::UnreadableFile { .. } => 0,
			ScanDiagnosticKind::DataMarkerOutOfRange { line } => *line,
		}
	}
}

/// Everything gathered from one scan: the populated registry plus non-fatal
/// diagnostics sorted by file and line for deterministic reporting.
#[derive(Debug)]
pub struct ScanReport {
	/// The registry populated by every file parser.
	pub registry: Registry,
	/// Non-fatal diagnostics from all files.
	pub diagnostics: Vec<ScanDiagnostic>,
}

/// Walk `root` (a directory or a single file), parse every file with the
/// configured extension concurrently, and aggregate the results.
///
/// One task is spawned per matched file. The shared registry's mutex is the
/// only synchronization between tasks, and the scope exit is the join
/// barrier that makes the registry safe to read. A file that cannot be read
/// becomes one diagnostic and one omission, never a failed run; a failure of
/// the walk itself is fatal.
pub fn scan_path(root: &Path, options: &Options) -> ApidocResult<ScanReport> {
	let files = collect_files(root, &options.extension)?;
	debug!(count = files.len(), "matched source files");

	let registry = SharedRegistry::default();
	let diagnostics = Mutex::new(Vec::new());

	rayon::scope(|scope| {
		for file in &files {
			let registry = &registry;
			let diagnostics = &diagnostics;
			scope.spawn(move |_| {
				let found = parse_file(file, options, registry);
				if !found.is_empty() {
					diagnostics
						.lock()
						.unwrap_or_else(PoisonError::into_inner)
						.extend(found);
				}
			});
		}
	});

	let mut diagnostics = diagnostics.into_inner().unwrap_or_else(PoisonError::into_inner);
	diagnostics.sort_by(|a, b| (&a.file, a.line()).cmp(&(&b.file, b.line())));

	Ok(ScanReport {
		registry: registry.into_inner(),
		diagnostics,
	})
}

fn parse_file(path: &Path, options: &Options, registry: &SharedRegistry) -> Vec<ScanDiagnostic> {
	let source = match fs::read_to_string(path) {
		Ok(source) => source,
		Err(err) => {
			return vec![ScanDiagnostic {
				file: path.to_path_buf(),
				kind: ScanDiagnosticKind::UnreadableFile {
					reason: err.to_string(),
				},
			}];
		}
	};

	let found = FileParser::new(options).parse(&source, registry);
	debug!(file = %path.display(), "parsed");

	found
		.into_iter()
		.map(|diagnostic| {
			let ParseDiagnostic::DataMarkerOutOfRange { line } = diagnostic;
			ScanDiagnostic {
				file: path.to_path_buf(),
				kind: ScanDiagnosticKind::DataMarkerOutOfRange { line },
			}
		})
		.collect()
}

/// Collect regular files under `root` whose extension matches. `root` may
/// itself be a file. Walk failures abort the scan.
fn collect_files(root: &Path, extension: &str) -> ApidocResult<Vec<PathBuf>> {
	let mut files = Vec::new();
	for entry in WalkDir::new(root) {
		let entry = entry?;
		if !entry.file_type().is_file() {
			continue;
		}
		let path = entry.path();
		if path.extension().and_then(|ext| ext.to_str()) == Some(extension) {
			files.push(path.to_path_buf());
		}
	}
	Ok(files)
}
