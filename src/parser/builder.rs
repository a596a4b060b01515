/// Converts the pest parse tree into a `TypeDirectionSpec`

use super::ast::{RelType, TypeDirection, TypeDirectionSpec};
use super::{GrammarError, GrammarResult, Rule};
use crate::types::Direction;
use pest::iterators::{Pair, Pairs};

/// Build the filter from the top-level `rel_filter` pairs
pub fn build_spec(pairs: Pairs<Rule>) -> GrammarResult<TypeDirectionSpec> {
    let mut entries = Vec::new();

    for pair in pairs {
        if pair.as_rule() != Rule::rel_filter {
            continue;
        }
        for segment in pair.into_inner() {
            if segment.as_rule() == Rule::segment {
                entries.push(build_segment(entries.len(), segment)?);
            }
        }
    }

    Ok(TypeDirectionSpec::new(entries))
}

fn build_segment(index: usize, pair: Pair<Rule>) -> GrammarResult<TypeDirection> {
    let text = pair.as_str().to_string();
    let mut incoming = false;
    let mut outgoing = false;
    let mut rel_type = RelType::Wildcard;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::incoming => incoming = true,
            Rule::outgoing => outgoing = true,
            Rule::rel_type => rel_type = RelType::Named(inner.as_str().to_string()),
            _ => {}
        }
    }

    let direction = match (incoming, outgoing) {
        (true, true) => {
            return Err(GrammarError::ConflictingDirection {
                segment: index,
                text: text.trim().to_string(),
            })
        }
        (true, false) => Direction::Incoming,
        (false, true) => Direction::Outgoing,
        (false, false) => Direction::Both,
    };

    Ok(TypeDirection::new(rel_type, direction))
}
