use std::borrow::Cow;

use crate::Options;
use crate::registry::SharedRegistry;
use crate::tag::CATEGORY_MARKER;
use crate::tag::DATA_MARKER;
use crate::tag::Tag;
use crate::tag::match_tag;

/// A request or response body: one status line plus ordered header lines and
/// ordered raw data lines. `subheaders` names header fragments to splice in
/// during rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
	/// The status/summary line — the first untagged line after the opening
	/// tag. Header fragments have none.
	pub header_line: String,
	/// Header lines in source order.
	pub headers: Vec<String>,
	/// Raw data lines in source order, original formatting preserved.
	pub datas: Vec<String>,
	/// Names of header fragments referenced via `@HeaderIncl`.
	pub subheaders: Vec<String>,
}

/// A single documented API: a name, description lines, at most one request
/// section, ordered response sections, and reference lists naming shared
/// fragments registered elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Api {
	/// The API name used for headings and diagnostics.
	pub name: String,
	/// Description lines in source order.
	pub desc: Vec<String>,
	/// The request section. A second `@Req` replaces the first.
	pub req: Option<Section>,
	/// Response sections in source order.
	pub resps: Vec<Section>,
	/// Names of response fragments referenced via `@RespIncl`.
	pub subresps: Vec<String>,
	/// Names of sub-APIs referenced via `@APIIncl`.
	pub subapis: Vec<String>,
}

impl Api {
	fn named(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}
}

/// A non-fatal problem found while parsing one file. The offending line is
/// skipped and parsing continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseDiagnostic {
	/// The data marker's offset, computed on the tab-expanded line, does not
	/// land inside the line as read.
	DataMarkerOutOfRange {
		/// 1-based line number.
		line: usize,
	},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
	Init,
	Api,
	Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DataState {
	Status,
	Header,
	Data,
}

/// Where the section currently under construction belongs once it closes.
#[derive(Debug)]
enum SectionSlot {
	Request,
	Response,
	SubResp(String),
	SubHeader(String),
}

/// Where the API currently under construction is registered once it closes.
#[derive(Debug)]
enum ApiSlot {
	Category(String),
	Named(String),
}

#[derive(Debug)]
struct OpenSection {
	slot: SectionSlot,
	section: Section,
}

#[derive(Debug)]
struct OpenApi {
	slot: ApiSlot,
	api: Api,
}

/// The per-file parsing state machine. One instance consumes the lines of
/// one file and hands every completed API and fragment to the registry;
/// until that moment it only touches objects it allocated itself.
#[derive(Debug)]
pub struct FileParser<'a> {
	options: &'a Options,
	block: BlockState,
	data: DataState,
	category: String,
	api: Option<OpenApi>,
	section: Option<OpenSection>,
	diagnostics: Vec<ParseDiagnostic>,
}

impl<'a> FileParser<'a> {
	/// Create a parser with the run-wide options. The default category
	/// applies until a `@Category` directive replaces it.
	pub fn new(options: &'a Options) -> Self {
		Self {
			options,
			block: BlockState::Init,
			data: DataState::Status,
			category: crate::registry::DEFAULT_CATEGORY.to_string(),
			api: None,
			section: None,
			diagnostics: Vec::new(),
		}
	}

	/// Parse one file's contents, registering every completed API and
	/// fragment into `registry`. Returns the non-fatal diagnostics
	/// encountered along the way.
	pub fn parse(mut self, source: &str, registry: &SharedRegistry) -> Vec<ParseDiagnostic> {
		for (index, raw) in source.lines().enumerate() {
			self.feed(index + 1, raw, registry);
		}
		// End of input closes whatever is still open.
		self.flush_section(registry);
		self.flush_api(registry);
		self.diagnostics
	}

	fn feed(&mut self, linum: usize, raw: &str, registry: &SharedRegistry) {
		let expanded = expand_tabs(raw, self.options.tab_width);
		let trimmed = expanded.trim_start();
		let Some(rest) = trimmed.strip_prefix(self.options.comment.as_str()) else {
			// Comment blocks cannot span non-comment lines.
			self.block = BlockState::Init;
			return;
		};

		let mut text = rest.trim();
		// A second comment token later on the same line starts a trailing
		// comment; everything from that point is discarded.
		if let Some(pos) = text.find(self.options.comment.as_str()) {
			if pos > 0 {
				text = text[..pos].trim_end();
			}
		}
		if text.is_empty() {
			return;
		}

		match match_tag(text) {
			Some((tag, rest)) => self.directive(tag, rest, registry),
			None => self.body_line(linum, raw, &expanded, text),
		}
	}

	fn directive(&mut self, tag: Tag, rest: &str, registry: &SharedRegistry) {
		match tag {
			Tag::Category => {
				self.category = rest.trim().to_string();
			}
			Tag::Api => {
				self.flush_section(registry);
				self.flush_api(registry);
				let (name, category) = split_inline_category(rest);
				let category = category.unwrap_or_else(|| self.category.clone());
				self.api = Some(OpenApi {
					slot: ApiSlot::Category(category),
					api: Api::named(name),
				});
				self.block = BlockState::Api;
			}
			Tag::SubApi => {
				self.flush_section(registry);
				self.flush_api(registry);
				let name = rest.trim();
				self.api = Some(OpenApi {
					slot: ApiSlot::Named(name.to_string()),
					api: Api::named(name),
				});
				self.block = BlockState::Api;
			}
			Tag::ApiIncl => {
				if let Some(open) = &mut self.api {
					open.api.subapis.extend(split_names(rest));
				}
			}
			Tag::EndApi => {
				self.flush_section(registry);
				self.flush_api(registry);
				self.block = BlockState::Init;
			}
			Tag::Header => {
				self.flush_section(registry);
				self.section = Some(OpenSection {
					slot: SectionSlot::SubHeader(rest.trim().to_string()),
					section: Section::default(),
				});
				self.block = BlockState::Body;
				// Header fragments have no status line.
				self.data = DataState::Header;
			}
			Tag::HeaderIncl => {
				if let Some(open) = &mut self.section {
					open.section.subheaders.extend(split_names(rest));
				}
			}
			Tag::Req | Tag::Resp => {
				if self.block == BlockState::Init || self.api.is_none() {
					return;
				}
				self.flush_section(registry);
				let slot = if tag == Tag::Req {
					SectionSlot::Request
				} else {
					SectionSlot::Response
				};
				self.section = Some(OpenSection {
					slot,
					section: Section::default(),
				});
				self.block = BlockState::Body;
				self.data = DataState::Status;
			}
			Tag::SubResp => {
				self.flush_section(registry);
				self.section = Some(OpenSection {
					slot: SectionSlot::SubResp(rest.trim().to_string()),
					section: Section::default(),
				});
				self.block = BlockState::Body;
				self.data = DataState::Status;
			}
			Tag::RespIncl => {
				if let Some(open) = &mut self.api {
					open.api.subresps.extend(split_names(rest));
				}
			}
		}
	}

	fn body_line(&mut self, linum: usize, raw: &str, expanded: &str, text: &str) {
		match self.block {
			BlockState::Init => {}
			BlockState::Api => {
				if let Some(open) = &mut self.api {
					open.api.desc.push(text.to_string());
				}
			}
			BlockState::Body => {
				let Some(open) = &mut self.section else { return };
				match self.data {
					DataState::Status => {
						open.section.header_line = text.to_string();
						self.data = DataState::Header;
					}
					DataState::Header if !text.starts_with(DATA_MARKER) => {
						open.section.headers.push(text.to_string());
					}
					DataState::Header | DataState::Data => {
						self.data = DataState::Data;
						if !text.starts_with(DATA_MARKER) {
							return;
						}
						// The marker offset is computed on the tab-expanded
						// line but applied to the line as read, so the data
						// keeps its original formatting.
						let Some(pos) = expanded.find(DATA_MARKER) else {
							return;
						};
						match raw.get(pos + DATA_MARKER.len()..) {
							Some(data) => open.section.datas.push(data.to_string()),
							None => {
								self.diagnostics
									.push(ParseDiagnostic::DataMarkerOutOfRange { line: linum });
							}
						}
					}
				}
			}
		}
	}

	fn flush_section(&mut self, registry: &SharedRegistry) {
		let Some(open) = self.section.take() else {
			return;
		};
		match open.slot {
			SectionSlot::Request => {
				if let Some(api) = &mut self.api {
					api.api.req = Some(open.section);
				}
			}
			SectionSlot::Response => {
				if let Some(api) = &mut self.api {
					api.api.resps.push(open.section);
				}
			}
			SectionSlot::SubResp(name) => registry.add_subresp(name, open.section),
			SectionSlot::SubHeader(name) => registry.add_subheader(name, open.section),
		}
	}

	fn flush_api(&mut self, registry: &SharedRegistry) {
		let Some(open) = self.api.take() else {
			return;
		};
		match open.slot {
			ApiSlot::Category(category) => registry.add_api(&category, open.api),
			ApiSlot::Named(name) => registry.add_subapi(name, open.api),
		}
	}
}

fn expand_tabs(line: &str, width: usize) -> Cow<'_, str> {
	if width == 0 || !line.contains('\t') {
		Cow::Borrowed(line)
	} else {
		Cow::Owned(line.replace('\t', &" ".repeat(width)))
	}
}

/// Split an `@API` remainder into the name and an optional inline `@C`
/// category override.
fn split_inline_category(rest: &str) -> (String, Option<String>) {
	match rest.split_once(CATEGORY_MARKER) {
		Some((name, category)) => (name.trim().to_string(), Some(category.trim().to_string())),
		None => (rest.trim().to_string(), None),
	}
}

/// Split a comma-separated reference list into trimmed, non-empty names.
fn split_names(rest: &str) -> Vec<String> {
	rest.split(',')
		.map(str::trim)
		.filter(|name| !name.is_empty())
		.map(str::to_string)
		.collect()
}
