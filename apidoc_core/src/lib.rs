//! `apidoc` compiles specially tagged comment blocks scattered across a
//! source tree into a single consolidated markdown API reference. Comment
//! blocks declare categorized APIs with request and response sections, plus
//! named fragments (sub-APIs, sub-responses, sub-headers) that are defined
//! once and included by reference from anywhere else in the tree.

pub use error::*;
pub use options::*;
pub use parser::*;
pub use registry::*;
pub use render::*;
pub use scan::*;
pub use tag::*;

mod error;
mod options;
mod parser;
mod registry;
mod render;
mod scan;
mod tag;
