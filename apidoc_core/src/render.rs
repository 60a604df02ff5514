use std::slice;

use crate::parser::Api;
use crate::parser::Section;
use crate::registry::Category;
use crate::registry::Registry;

/// A reference that could not be resolved while rendering. The reference is
/// skipped and the rest of the document is unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderDiagnostic {
	/// `@APIIncl` named a sub-API with no registered entry.
	MissingSubApi {
		/// The unresolved fragment name.
		name: String,
		/// The API whose reference list named it.
		api: String,
	},
	/// `@RespIncl` named a response fragment with no registered entry.
	MissingSubResp {
		/// The unresolved fragment name.
		name: String,
		/// The API whose reference list named it.
		api: String,
	},
	/// `@HeaderIncl` named a header fragment with no registered entry.
	MissingSubHeader {
		/// The unresolved fragment name.
		name: String,
		/// The API whose section named it.
		api: String,
	},
}

impl RenderDiagnostic {
	/// Human-readable message for this diagnostic.
	pub fn message(&self) -> String {
		match self {
			Self::MissingSubApi { name, api } => {
				format!(r#"sub-api "{name}" for api "{api}" not found"#)
			}
			Self::MissingSubResp { name, api } => {
				format!(r#"sub-response "{name}" for api "{api}" not found"#)
			}
			Self::MissingSubHeader { name, api } => {
				format!(r#"sub-header "{name}" for api "{api}" not found"#)
			}
		}
	}
}

/// The rendered document plus any unresolved-reference diagnostics.
#[derive(Debug)]
pub struct Rendered {
	/// The complete markdown document.
	pub markdown: String,
	/// Unresolved references, in document order.
	pub diagnostics: Vec<RenderDiagnostic>,
}

/// Render a fully populated registry into one markdown document.
///
/// Categories named in `order` come first (a listed category with no APIs is
/// skipped without consuming an index), then the remaining categories in
/// first-seen registration order, all sharing one running 1-based index.
pub fn render(registry: &Registry, order: &[String]) -> Rendered {
	let mut renderer = Renderer {
		registry,
		out: String::new(),
		diagnostics: Vec::new(),
	};
	renderer.document(order);
	Rendered {
		markdown: renderer.out,
		diagnostics: renderer.diagnostics,
	}
}

struct Renderer<'a> {
	registry: &'a Registry,
	out: String,
	diagnostics: Vec<RenderDiagnostic>,
}

impl<'a> Renderer<'a> {
	fn document(&mut self, order: &[String]) {
		let registry = self.registry;
		let mut index = 1;
		let mut done: Vec<&str> = Vec::new();

		for name in order {
			let Some(category) = registry.categories().iter().find(|c| &c.name == name) else {
				continue;
			};
			if category.apis.is_empty() || done.contains(&name.as_str()) {
				continue;
			}
			self.category(category, index);
			index += 1;
			done.push(name.as_str());
		}

		for category in registry.categories() {
			if category.apis.is_empty() || done.contains(&category.name.as_str()) {
				continue;
			}
			self.category(category, index);
			index += 1;
		}
	}

	fn category(&mut self, category: &'a Category, index: usize) {
		self.line(&format!("#### {index}. {}", category.name));
		for (i, api) in category.apis.iter().enumerate() {
			self.api(api, Some(i + 1), true);
			self.out.push('\n');
		}
	}

	/// Render one API. `index` is the 1-based position within its category,
	/// or `None` when the API is inlined as a sub-API (no heading). Section
	/// labels are written only when `write_section_name` is set.
	fn api(&mut self, api: &'a Api, index: Option<usize>, write_section_name: bool) {
		let registry = self.registry;
		if let Some(index) = index {
			self.line(&format!("##### {index}. {}", api.name));
		}
		for desc in &api.desc {
			self.line(&format!("{desc}  "));
		}

		if write_section_name {
			if let Some(req) = &api.req {
				self.sections("Request", true, slice::from_ref(req), &api.name);
			}
		}
		self.sections("Response", write_section_name, &api.resps, &api.name);

		for name in &api.subresps {
			match registry.subresp(name) {
				Some(section) => {
					// Suppress the label when the API already wrote one for
					// its own response sections.
					let label = write_section_name && api.resps.is_empty();
					self.sections("Response", label, slice::from_ref(section), &api.name);
				}
				None => {
					self.diagnostics.push(RenderDiagnostic::MissingSubResp {
						name: name.clone(),
						api: api.name.clone(),
					});
				}
			}
		}

		for name in &api.subapis {
			match registry.subapi(name) {
				Some(sub) => self.api(sub, None, false),
				None => {
					self.diagnostics.push(RenderDiagnostic::MissingSubApi {
						name: name.clone(),
						api: api.name.clone(),
					});
				}
			}
		}
	}

	fn sections(&mut self, label: &str, write_label: bool, sections: &[Section], api_name: &str) {
		if sections.is_empty() {
			return;
		}
		if write_label {
			self.line(&format!("* **{label}**"));
		}
		for section in sections {
			self.section(section, api_name);
		}
	}

	fn section(&mut self, section: &Section, api_name: &str) {
		let registry = self.registry;
		self.line(&format!("    * {}  ", section.header_line));
		for name in &section.subheaders {
			match registry.subheader(name) {
				// Only the fragment's header lines are spliced in, not its
				// data lines.
				Some(fragment) => self.body_lines(&fragment.headers),
				None => {
					self.diagnostics.push(RenderDiagnostic::MissingSubHeader {
						name: name.clone(),
						api: api_name.to_string(),
					});
				}
			}
		}
		self.body_lines(&section.headers);
		self.body_lines(&section.datas);
	}

	fn body_lines(&mut self, lines: &[String]) {
		for line in lines {
			self.line(&format!("      {line}  "));
		}
	}

	fn line(&mut self, text: &str) {
		self.out.push_str(text);
		self.out.push('\n');
	}
}
