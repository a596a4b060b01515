/// Path procedures
///
/// The two callable entry points, one per bound type:
/// - `algo.allSimplePathsFiltered`: integer property range, inclusive
/// - `algo.allSimplePathsFilteredDt`: timestamp property range, exclusive
///
/// Both parse the relationship filter before touching the graph, then return
/// a lazy sequence of `PathResult` records.

mod result;

pub use result::PathResult;

use crate::algorithms::{find_all_paths, AlgorithmError, AllSimplePaths, PathExpander, PropertyRange};
use crate::parser::{parse_rel_filter, GrammarError};
use crate::storage::GraphRead;
use crate::types::Graphid;
use chrono::{DateTime, FixedOffset};
use thiserror::Error;

/// Procedure errors
#[derive(Error, Debug)]
pub enum ProcedureError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Algorithm(#[from] AlgorithmError),
}

pub type ProcedureResult<T> = Result<T, ProcedureError>;

/// Signature and description of a registered procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcedureInfo {
    pub name: &'static str,
    pub signature: &'static str,
    pub description: &'static str,
}

/// Procedures exposed by this crate
pub const PROCEDURES: [ProcedureInfo; 2] = [
    ProcedureInfo {
        name: "algo.allSimplePathsFiltered",
        signature: "algo.allSimplePathsFiltered(startNode, endNode, 'KNOWS|<WORKS_WITH|IS_MANAGER_OF>', 5, propertyName, min, max) YIELD path, weight",
        description: "All simple paths with at most maxNodes nodes whose relationships have an integer property in [min, max]",
    },
    ProcedureInfo {
        name: "algo.allSimplePathsFilteredDt",
        signature: "algo.allSimplePathsFilteredDt(startNode, endNode, 'KNOWS|<WORKS_WITH|IS_MANAGER_OF>', 5, propertyName, minDt, maxDt) YIELD path, weight",
        description: "All simple paths with at most maxNodes nodes whose relationships have a timestamp property strictly between minDt and maxDt",
    },
];

/// Look up a procedure by name
pub fn procedure(name: &str) -> Option<&'static ProcedureInfo> {
    PROCEDURES.iter().find(|p| p.name == name)
}

/// Lazy sequence of path records
pub struct PathResults<'g, G: GraphRead + ?Sized> {
    paths: Option<AllSimplePaths<'g, G>>,
}

impl<'g, G: GraphRead + ?Sized> PathResults<'g, G> {
    fn empty() -> Self {
        Self { paths: None }
    }

    /// Paths yielded so far
    pub fn paths_found(&self) -> usize {
        self.paths.as_ref().map_or(0, AllSimplePaths::paths_found)
    }
}

impl<G: GraphRead + ?Sized> Iterator for PathResults<'_, G> {
    type Item = ProcedureResult<PathResult>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.paths.as_mut()?.next()?;
        Some(
            next.map(|path| PathResult::from(&path))
                .map_err(ProcedureError::from),
        )
    }
}

/// `algo.allSimplePathsFiltered`
///
/// # Arguments
/// * `graph` - Consistent view of the graph
/// * `start`, `end` - Path endpoints
/// * `rel_filter` - Relationship filter, e.g. `KNOWS|<WORKS_WITH|IS_MANAGER_OF>`
/// * `max_nodes` - Maximum number of vertices per path; `< 1` yields nothing
/// * `property` - Relationship property to check
/// * `min`, `max` - Inclusive integer bounds
///
/// # Errors
/// * `ProcedureError::Grammar` for a malformed filter, before any traversal
/// * `ProcedureError::Algorithm` if an endpoint does not exist
#[allow(clippy::too_many_arguments)]
pub fn all_simple_paths_filtered<'g, G>(
    graph: &'g G,
    start: Graphid,
    end: Graphid,
    rel_filter: &str,
    max_nodes: i64,
    property: &str,
    min: i64,
    max: i64,
) -> ProcedureResult<PathResults<'g, G>>
where
    G: GraphRead + ?Sized,
{
    run(
        graph,
        start,
        end,
        rel_filter,
        max_nodes,
        PropertyRange::integer(property, min, max),
    )
}

/// `algo.allSimplePathsFilteredDt`
///
/// Same as [`all_simple_paths_filtered`], with exclusive timestamp bounds.
#[allow(clippy::too_many_arguments)]
pub fn all_simple_paths_filtered_dt<'g, G>(
    graph: &'g G,
    start: Graphid,
    end: Graphid,
    rel_filter: &str,
    max_nodes: i64,
    property: &str,
    min: DateTime<FixedOffset>,
    max: DateTime<FixedOffset>,
) -> ProcedureResult<PathResults<'g, G>>
where
    G: GraphRead + ?Sized,
{
    run(
        graph,
        start,
        end,
        rel_filter,
        max_nodes,
        PropertyRange::timestamp(property, min, max),
    )
}

fn run<'g, G>(
    graph: &'g G,
    start: Graphid,
    end: Graphid,
    rel_filter: &str,
    max_nodes: i64,
    range: PropertyRange,
) -> ProcedureResult<PathResults<'g, G>>
where
    G: GraphRead + ?Sized,
{
    let spec = parse_rel_filter(rel_filter)?;

    let Ok(max_nodes) = usize::try_from(max_nodes) else {
        return Ok(PathResults::empty());
    };

    let paths = find_all_paths(graph, start, end, max_nodes, PathExpander::new(spec, range))?;
    Ok(PathResults { paths: Some(paths) })
}
