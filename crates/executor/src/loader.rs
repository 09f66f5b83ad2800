use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{info, warn};

use super::error::Error;
use common::types::{Edge, FileWeight, Weight};
use sssp_core::EdgeList;

/// Upper bound on edges reserved up front, so a bogus `m` in the header
/// cannot trigger a huge allocation before any edge has been read.
const MAX_PREALLOCATED_EDGES: usize = 1 << 20;

/// A graph read from disk, with the bookkeeping of what the loader dropped.
#[derive(Debug, Clone)]
pub struct LoadedGraph {
    /// Edge count announced by the header.
    pub declared_edges: usize,
    /// Edges dropped for out-of-range endpoints.
    pub skipped_edges: usize,
    pub graph: EdgeList,
}

impl LoadedGraph {
    pub fn num_nodes(&self) -> usize {
        self.graph.num_nodes()
    }

    /// Edges that survived loading.
    pub fn num_edges(&self) -> usize {
        self.graph.num_edges()
    }
}

/// Reads the plain-text graph format:
///
/// ```text
/// n m
/// u1 v1 w1
/// ...
/// um vm wm
/// ```
///
/// Tokens may be separated by any whitespace. Anything after the `m`-th edge
/// is ignored. Weights must fit in a 32-bit signed integer; a larger one is
/// an `InvalidEdge` error.
pub struct GraphLoader {
    path: PathBuf,
}

impl GraphLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        GraphLoader { path: path.into() }
    }

    pub fn load(&self) -> Result<LoadedGraph, Error> {
        let text = fs::read_to_string(&self.path).map_err(|source| Error::IoError {
            path: self.path.clone(),
            source,
        })?;

        let loaded = self.parse(&text)?;
        info!(
            path = %self.path.display(),
            nodes = loaded.num_nodes(),
            edges = loaded.num_edges(),
            skipped = loaded.skipped_edges,
            "Loaded graph"
        );
        Ok(loaded)
    }

    /// Parses graph text. `self.path` is only used for error messages.
    pub fn parse(&self, text: &str) -> Result<LoadedGraph, Error> {
        let mut tokens = text.split_ascii_whitespace();

        let (Some(num_nodes), Some(declared_edges)) = (
            next_value::<usize>(&mut tokens),
            next_value::<usize>(&mut tokens),
        ) else {
            return Err(Error::InvalidHeader {
                path: self.path.clone(),
            });
        };

        let mut edges: Vec<Edge> = Vec::with_capacity(declared_edges.min(MAX_PREALLOCATED_EDGES));
        let mut skipped_edges = 0;

        for index in 0..declared_edges {
            let (Some(u), Some(v), Some(w)) = (
                next_value::<i64>(&mut tokens),
                next_value::<i64>(&mut tokens),
                next_value::<FileWeight>(&mut tokens),
            ) else {
                return Err(Error::InvalidEdge {
                    path: self.path.clone(),
                    index,
                });
            };

            match (vertex(u, num_nodes), vertex(v, num_nodes)) {
                (Some(u), Some(v)) => edges.push((u, v, Weight::from(w))),
                _ => {
                    warn!(u, v, "Edge out of range, skipping");
                    skipped_edges += 1;
                }
            }
        }

        if skipped_edges > 0 {
            warn!(
                skipped = skipped_edges,
                kept = edges.len(),
                "Dropped edges with out-of-range endpoints"
            );
        }

        Ok(LoadedGraph {
            declared_edges,
            skipped_edges,
            graph: EdgeList::new(num_nodes, edges)?,
        })
    }
}

fn next_value<'a, T: FromStr>(tokens: &mut impl Iterator<Item = &'a str>) -> Option<T> {
    tokens.next()?.parse().ok()
}

/// Maps a raw endpoint to a vertex id if it lies in `[0, num_nodes)`.
fn vertex(raw: i64, num_nodes: usize) -> Option<usize> {
    usize::try_from(raw).ok().filter(|&id| id < num_nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(text: &str) -> Result<LoadedGraph, Error> {
        GraphLoader::new("inline.txt").parse(text)
    }

    #[test]
    fn parses_well_formed_graph() {
        let loaded = parse("4 4\n0 1 1\n1 2 2\n0 2 5\n2 3 1\n").unwrap();

        assert_eq!(loaded.num_nodes(), 4);
        assert_eq!(loaded.num_edges(), 4);
        assert_eq!(loaded.declared_edges, 4);
        assert_eq!(loaded.skipped_edges, 0);
        assert_eq!(
            loaded.graph.edges(),
            &[(0, 1, 1), (1, 2, 2), (0, 2, 5), (2, 3, 1)]
        );
    }

    #[test]
    fn tolerates_arbitrary_whitespace() {
        let loaded = parse("  3\t2\n\n0   1\n-4\n 1 2 7   trailing tokens ignored").unwrap();

        assert_eq!(loaded.graph.edges(), &[(0, 1, -4), (1, 2, 7)]);
    }

    #[test]
    fn drops_out_of_range_edges() {
        let loaded = parse("3 4\n0 1 1\n0 3 2\n-1 2 5\n1 2 3\n").unwrap();

        assert_eq!(loaded.declared_edges, 4);
        assert_eq!(loaded.skipped_edges, 2);
        assert_eq!(loaded.num_edges(), 2);
        assert_eq!(loaded.graph.edges(), &[(0, 1, 1), (1, 2, 3)]);
    }

    #[test]
    fn empty_edge_section() {
        let loaded = parse("1 0\n").unwrap();

        assert_eq!(loaded.num_nodes(), 1);
        assert_eq!(loaded.num_edges(), 0);
    }

    #[test]
    fn missing_header_is_an_error() {
        assert!(matches!(parse(""), Err(Error::InvalidHeader { .. })));
        assert!(matches!(parse("5"), Err(Error::InvalidHeader { .. })));
        assert!(matches!(parse("five 2"), Err(Error::InvalidHeader { .. })));
        assert!(matches!(parse("-3 2"), Err(Error::InvalidHeader { .. })));
    }

    #[test]
    fn truncated_edge_list_reports_index() {
        let result = parse("3 3\n0 1 1\n1 2\n");

        match result {
            Err(Error::InvalidEdge { index, .. }) => assert_eq!(index, 1),
            other => panic!("Expected InvalidEdge, got: {:?}", other),
        }
    }

    #[test]
    fn weights_at_the_32_bit_limits_are_accepted() {
        let loaded = parse("2 2\n0 1 2147483647\n1 0 -2147483648\n").unwrap();

        assert_eq!(
            loaded.graph.edges(),
            &[(0, 1, 2_147_483_647), (1, 0, -2_147_483_648)]
        );
    }

    #[test]
    fn weight_beyond_32_bits_is_an_error() {
        let too_heavy = parse("2 1\n0 1 1000000000000000000\n");
        assert!(matches!(too_heavy, Err(Error::InvalidEdge { index: 0, .. })));

        let too_light = parse("3 2\n0 1 -5\n1 0 -9000000000000000000\n");
        assert!(matches!(too_light, Err(Error::InvalidEdge { index: 1, .. })));

        let just_over = parse("2 1\n0 1 2147483648\n");
        assert!(matches!(just_over, Err(Error::InvalidEdge { index: 0, .. })));
    }

    #[test]
    fn non_numeric_weight_is_an_error() {
        let result = parse("2 1\n0 1 heavy\n");
        assert!(matches!(result, Err(Error::InvalidEdge { index: 0, .. })));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        temp_file
            .write_all(b"3 1\n0 1 4\n")
            .expect("Failed to write mock content");

        let loaded = GraphLoader::new(temp_file.path()).load().unwrap();

        assert_eq!(loaded.num_nodes(), 3);
        assert_eq!(loaded.graph.edges(), &[(0, 1, 4)]);
    }

    #[test]
    fn load_file_not_found() {
        let result = GraphLoader::new("non_existent_graph.txt").load();

        if let Err(Error::IoError { source, .. }) = result {
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        } else {
            panic!("Expected IoError, got: {:?}", result.err());
        }
    }
}
