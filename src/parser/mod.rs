/// Relationship filter parser
///
/// Parses the compact relationship filter syntax used by the path procedures,
/// e.g. `KNOWS|<WORKS_WITH|IS_MANAGER_OF>`, using the pest library.

pub mod ast;
mod builder;

use ast::TypeDirectionSpec;
use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

#[derive(Parser)]
#[grammar = "parser/rel_filter.pest"]
pub struct RelFilterParser;

/// Grammar errors
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("Invalid relationship filter: {0}")]
    Syntax(#[from] Box<pest::error::Error<Rule>>),

    #[error("Segment {segment} ('{text}') has both '<' and '>'")]
    ConflictingDirection { segment: usize, text: String },
}

pub type GrammarResult<T> = Result<T, GrammarError>;

/// Parse a relationship filter into its ordered (type, direction) entries
///
/// # Arguments
/// * `input` - Filter text; `""` means any type in any direction
///
/// # Returns
/// * `Ok(TypeDirectionSpec)` - Entries in the order they were written
/// * `Err(GrammarError)` - Malformed filter
///
/// # Examples
/// ```
/// use filtered_paths::parser::parse_rel_filter;
///
/// let spec = parse_rel_filter("KNOWS|<WORKS_WITH|IS_MANAGER_OF>").unwrap();
/// assert_eq!(spec.len(), 3);
/// ```
pub fn parse_rel_filter(input: &str) -> GrammarResult<TypeDirectionSpec> {
    let pairs = RelFilterParser::parse(Rule::rel_filter, input).map_err(Box::new)?;

    builder::build_spec(pairs)
}
