use std::fmt;

use sssp_core::Execution;

/// Which shortest-path engine a binary drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    BellmanFord,
    Dijkstra,
    FloydWarshall,
}

impl EngineKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            EngineKind::BellmanFord => "Bellman-Ford",
            EngineKind::Dijkstra => "Dijkstra",
            EngineKind::FloydWarshall => "Floyd-Warshall",
        }
    }

    pub fn binary_name(&self) -> &'static str {
        match self {
            EngineKind::BellmanFord => "bellman_ford",
            EngineKind::Dijkstra => "dijkstra",
            EngineKind::FloydWarshall => "floyd_warshall",
        }
    }

    pub fn is_single_source(&self) -> bool {
        !matches!(self, EngineKind::FloydWarshall)
    }

    /// Line announcing the chosen engine and mode, e.g.
    /// `Running parallel Dijkstra with 4 threads...`.
    pub fn running_line(&self, execution: Execution) -> String {
        match execution {
            Execution::Sequential => format!("Running sequential {}...", self.display_name()),
            Execution::Parallel { threads } => format!(
                "Running parallel {} with {} threads...",
                self.display_name(),
                threads
            ),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_line_names_mode() {
        assert_eq!(
            EngineKind::BellmanFord.running_line(Execution::from_threads(0)),
            "Running sequential Bellman-Ford..."
        );
        assert_eq!(
            EngineKind::FloydWarshall.running_line(Execution::from_threads(8)),
            "Running parallel Floyd-Warshall with 8 threads..."
        );
    }

    #[test]
    fn only_floyd_warshall_is_all_pairs() {
        assert!(EngineKind::BellmanFord.is_single_source());
        assert!(EngineKind::Dijkstra.is_single_source());
        assert!(!EngineKind::FloydWarshall.is_single_source());
    }
}
