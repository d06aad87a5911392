use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum MdmergeError {
	#[error(transparent)]
	#[diagnostic(code(mdmerge::io_error))]
	Io(#[from] std::io::Error),

	#[error("input too large: {size} bytes (limit: {limit} bytes)")]
	#[diagnostic(
		code(mdmerge::input_too_large),
		help("raise `max_input_bytes` under `[limits]` in mdmerge.toml or merge a smaller section")
	)]
	InputTooLarge { size: usize, limit: usize },

	#[error("document too deeply nested: depth {depth} exceeds the limit of {limit}")]
	#[diagnostic(
		code(mdmerge::too_deeply_nested),
		help("raise `max_depth` under `[limits]` in mdmerge.toml or flatten the list indentation")
	)]
	TooDeeplyNested { depth: usize, limit: usize },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(mdmerge::config_parse),
		help("check that mdmerge.toml is valid TOML with [limits] and/or [merge] sections")
	)]
	ConfigParse(String),

	#[error("failure to load markdown: {0}")]
	#[diagnostic(code(mdmerge::markdown))]
	Markdown(String),

	#[error("section not found: `{0}`")]
	#[diagnostic(
		code(mdmerge::missing_section),
		help("add `<!-- anchor:{0} -->` and `<!-- /anchor:{0} -->` markers or a matching heading")
	)]
	MissingSection(String),

	#[error("missing closing marker for anchor: `{0}`")]
	#[diagnostic(
		code(mdmerge::unclosed_section),
		help("add `<!-- /anchor:{0} -->` to close this section")
	)]
	UnclosedSection(String),
}

pub type MdmergeResult<T> = Result<T, MdmergeError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
