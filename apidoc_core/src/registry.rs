use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::parser::Api;
use crate::parser::Section;

/// Category assigned to APIs declared before any `@Category` directive.
pub const DEFAULT_CATEGORY: &str = "global";

/// A named category with its APIs in registration order.
#[derive(Debug, Default)]
pub struct Category {
	/// The category name used for the rendered heading.
	pub name: String,
	/// APIs in the order they were registered.
	pub apis: Vec<Api>,
}

/// The consolidated store all file parsers write into: categorized APIs plus
/// the three named-fragment tables. Name collisions resolve last-write-wins;
/// overwritten entries are silently replaced.
#[derive(Debug, Default)]
pub struct Registry {
	categories: Vec<Category>,
	subapis: HashMap<String, Api>,
	subresps: HashMap<String, Section>,
	subheaders: HashMap<String, Section>,
}

impl Registry {
	/// Append an API to a category, creating the category on first use.
	/// Categories keep their first-seen order so rendering is deterministic.
	pub fn add_api(&mut self, category: &str, api: Api) {
		match self.categories.iter_mut().find(|c| c.name == category) {
			Some(existing) => existing.apis.push(api),
			None => {
				self.categories.push(Category {
					name: category.to_string(),
					apis: vec![api],
				});
			}
		}
	}

	/// Register a sub-API under its name.
	pub fn add_subapi(&mut self, name: String, api: Api) {
		self.subapis.insert(name, api);
	}

	/// Register a response fragment under its name.
	pub fn add_subresp(&mut self, name: String, section: Section) {
		self.subresps.insert(name, section);
	}

	/// Register a header fragment under its name.
	pub fn add_subheader(&mut self, name: String, section: Section) {
		self.subheaders.insert(name, section);
	}

	/// Categories in first-seen registration order.
	pub fn categories(&self) -> &[Category] {
		&self.categories
	}

	/// Look up a sub-API by name.
	pub fn subapi(&self, name: &str) -> Option<&Api> {
		self.subapis.get(name)
	}

	/// Look up a response fragment by name.
	pub fn subresp(&self, name: &str) -> Option<&Section> {
		self.subresps.get(name)
	}

	/// Look up a header fragment by name.
	pub fn subheader(&self, name: &str) -> Option<&Section> {
		self.subheaders.get(name)
	}

	/// True when no API was registered under any category. Named fragments
	/// alone do not make a document.
	pub fn is_empty(&self) -> bool {
		self.categories.iter().all(|c| c.apis.is_empty())
	}
}

/// Thread-safe wrapper handed to the per-file parser workers. Each insert
/// takes the coarse lock for the duration of one mutation. Reads only become
/// possible once [`into_inner`](Self::into_inner) unwraps the registry after
/// all workers have joined, so the type system rules out concurrent reads.
#[derive(Debug, Default)]
pub struct SharedRegistry {
	inner: Mutex<Registry>,
}

impl SharedRegistry {
	fn lock(&self) -> MutexGuard<'_, Registry> {
		// An insert cannot leave the registry in a partial state, so a
		// poisoned lock is still usable.
		self.inner.lock().unwrap_or_else(PoisonError::into_inner)
	}

	/// Append an API to a category's ordered list.
	pub fn add_api(&self, category: &str, api: Api) {
		self.lock().add_api(category, api);
	}

	/// Register a sub-API under its name.
	pub fn add_subapi(&self, name: String, api: Api) {
		self.lock().add_subapi(name, api);
	}

	/// Register a response fragment under its name.
	pub fn add_subresp(&self, name: String, section: Section) {
		self.lock().add_subresp(name, section);
	}

	/// Register a header fragment under its name.
	pub fn add_subheader(&self, name: String, section: Section) {
		self.lock().add_subheader(name, section);
	}

	/// Unwrap the registry once every writer has finished.
	pub fn into_inner(self) -> Registry {
		self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
	}
}
