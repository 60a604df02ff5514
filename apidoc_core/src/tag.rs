/// A directive token beginning a structural instruction within a stripped
/// comment line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
	/// `@Category <name>` — set the default category for subsequent APIs.
	Category,
	/// `@API <name>[@C<category>]` — open a new categorized API.
	Api,
	/// `@EndAPI` — close the current block.
	EndApi,
	/// `@SubAPI <name>` — open a new API registered by name only.
	SubApi,
	/// `@APIIncl <n1,n2,...>` — reference sub-APIs from the current API.
	ApiIncl,
	/// `@Header <name>` — open a named header fragment.
	Header,
	/// `@HeaderIncl <n1,...>` — reference header fragments from the current
	/// section.
	HeaderIncl,
	/// `@SubResp <name>` — open a named response fragment.
	SubResp,
	/// `@RespIncl <n1,...>` — reference response fragments from the current
	/// API.
	RespIncl,
	/// `@Resp` — open a new response section on the current API.
	Resp,
	/// `@Req` — open (or replace) the request section of the current API.
	Req,
}

/// Marker introducing a raw data line inside a section body. Matched by a
/// direct prefix check while inside a section, never through [`match_tag`].
pub const DATA_MARKER: &str = "->";

/// Marker splitting an inline category override off an `@API` line.
pub const CATEGORY_MARKER: &str = "@C";

/// Tokens ordered longest first. Several tokens have a shorter token as
/// their prefix (`@APIIncl`/`@API`, `@HeaderIncl`/`@Header`,
/// `@RespIncl`/`@Resp`), so the more specific token must be tried first.
const TOKENS: &[(&str, Tag)] = &[
	("@HeaderIncl", Tag::HeaderIncl),
	("@Category", Tag::Category),
	("@RespIncl", Tag::RespIncl),
	("@APIIncl", Tag::ApiIncl),
	("@SubResp", Tag::SubResp),
	("@EndAPI", Tag::EndApi),
	("@SubAPI", Tag::SubApi),
	("@Header", Tag::Header),
	("@Resp", Tag::Resp),
	("@API", Tag::Api),
	("@Req", Tag::Req),
];

/// Classify a stripped comment line by exact literal prefix. Returns the
/// matched tag together with the remainder of the line after the token, or
/// `None` for an untagged line.
pub fn match_tag(line: &str) -> Option<(Tag, &str)> {
	TOKENS
		.iter()
		.find(|(token, _)| line.starts_with(token))
		.map(|(token, tag)| (*tag, &line[token.len()..]))
}
