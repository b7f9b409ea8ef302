//! Hardware connectivity graphs.

use std::collections::VecDeque;

use petgraph::algo::connected_components;
use petgraph::graph::UnGraph;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};

/// Undirected connectivity graph of physical qubits.
///
/// The physical qubit count is one more than the largest index appearing in
/// an edge. Reversed and repeated edges collapse onto the first occurrence;
/// self-loops are rejected. Serialized as its edge list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<(u32, u32)>", into = "Vec<(u32, u32)>")]
pub struct Architecture {
    /// Connected qubit pairs, in first-seen order.
    edges: Vec<(u32, u32)>,
    /// Number of physical qubits.
    num_qubits: u32,
    /// Adjacency list for fast lookup.
    adjacency: FxHashMap<u32, Vec<u32>>,
    /// All-pairs BFS distances. `dist_matrix[from][to]` is `u32::MAX` when unreachable.
    dist_matrix: Vec<Vec<u32>>,
    /// `pred_matrix[from][to]` is the hop before `to` on a shortest path from `from`.
    pred_matrix: Vec<Vec<u32>>,
}

impl PartialEq for Architecture {
    fn eq(&self, other: &Self) -> bool {
        self.num_qubits == other.num_qubits
            && self.edges.len() == other.edges.len()
            && self.edges.iter().all(|&(a, b)| other.is_edge(a, b))
    }
}

impl Architecture {
    /// Build an architecture from an edge list.
    pub fn from_edges(edges: impl IntoIterator<Item = (u32, u32)>) -> IrResult<Self> {
        let mut arch = Self {
            edges: vec![],
            num_qubits: 0,
            adjacency: FxHashMap::default(),
            dist_matrix: vec![],
            pred_matrix: vec![],
        };
        for (a, b) in edges {
            if a == b {
                return Err(IrError::InvalidArchitecture(format!(
                    "self-loop on physical qubit {a}"
                )));
            }
            arch.add_edge(a, b);
        }
        if arch.edges.is_empty() {
            return Err(IrError::InvalidArchitecture("no edges".into()));
        }
        arch.num_qubits = arch
            .edges
            .iter()
            .map(|&(a, b)| a.max(b) + 1)
            .max()
            .unwrap_or(0);
        arch.precompute_distances();
        Ok(arch)
    }

    fn add_edge(&mut self, q1: u32, q2: u32) {
        if self.is_edge(q1, q2) {
            return;
        }
        self.edges.push((q1, q2));
        self.adjacency.entry(q1).or_default().push(q2);
        self.adjacency.entry(q2).or_default().push(q1);
    }

    /// Linear chain `0-1-2-...-(n-1)`.
    pub fn linear(n: u32) -> IrResult<Self> {
        Self::from_edges((1..n).map(|i| (i - 1, i)))
    }

    /// Star with qubit 0 at the center.
    pub fn star(n: u32) -> IrResult<Self> {
        Self::from_edges((1..n).map(|i| (0, i)))
    }

    /// Every pair connected.
    pub fn full(n: u32) -> IrResult<Self> {
        Self::from_edges((0..n).flat_map(|i| ((i + 1)..n).map(move |j| (i, j))))
    }

    /// Rectangular grid of `rows × cols` qubits numbered row-major.
    ///
    /// Qubit `i * cols + j` connects to its right neighbour and to the
    /// qubit below it.
    pub fn lattice(rows: u32, cols: u32) -> IrResult<Self> {
        let mut edges = Vec::new();
        for i in 0..rows {
            for j in 0..cols {
                let current = i * cols + j;
                if j + 1 != cols {
                    edges.push((current, current + 1));
                }
                if i + 1 != rows {
                    edges.push((current, current + cols));
                }
            }
        }
        Self::from_edges(edges)
    }

    /// This architecture with additional edges.
    pub fn with_extra_edges(&self, extra: impl IntoIterator<Item = (u32, u32)>) -> IrResult<Self> {
        Self::from_edges(self.edges.iter().copied().chain(extra))
    }

    fn precompute_distances(&mut self) {
        let n = self.num_qubits as usize;
        self.dist_matrix = vec![vec![u32::MAX; n]; n];
        self.pred_matrix = vec![vec![u32::MAX; n]; n];

        for src in 0..n {
            self.dist_matrix[src][src] = 0;
            let mut queue = VecDeque::new();
            queue.push_back(src as u32);

            while let Some(current) = queue.pop_front() {
                let cur = current as usize;
                for &neighbor in self.adjacency.get(&current).into_iter().flatten() {
                    let nb = neighbor as usize;
                    if self.dist_matrix[src][nb] == u32::MAX {
                        self.dist_matrix[src][nb] = self.dist_matrix[src][cur] + 1;
                        self.pred_matrix[src][nb] = current;
                        queue.push_back(neighbor);
                    }
                }
            }
        }
    }

    /// Whether `(q1, q2)` or `(q2, q1)` is an edge.
    #[inline]
    pub fn is_edge(&self, q1: u32, q2: u32) -> bool {
        self.adjacency
            .get(&q1)
            .is_some_and(|neighbors| neighbors.contains(&q2))
    }

    /// Get the number of physical qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Get the edges.
    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    /// Get neighbors of a qubit.
    pub fn neighbors(&self, qubit: u32) -> impl Iterator<Item = u32> + '_ {
        self.adjacency
            .get(&qubit)
            .map(|v| v.iter().copied())
            .into_iter()
            .flatten()
    }

    /// Number of connected components, counting isolated qubits.
    pub fn num_components(&self) -> usize {
        let graph = UnGraph::<(), ()>::from_edges(self.edges.iter().copied());
        // `from_edges` sizes the graph by the largest index, which is num_qubits - 1.
        connected_components(&graph)
    }

    /// Whether every physical qubit can reach every other.
    pub fn is_connected(&self) -> bool {
        self.num_components() == 1
    }

    /// Shortest-path distance in edges, `None` if unreachable or out of range.
    pub fn distance(&self, from: u32, to: u32) -> Option<u32> {
        let d = *self.dist_matrix.get(from as usize)?.get(to as usize)?;
        (d != u32::MAX).then_some(d)
    }

    /// A shortest path `from → to` including both endpoints.
    pub fn shortest_path(&self, from: u32, to: u32) -> Option<Vec<u32>> {
        self.distance(from, to)?;
        let f = from as usize;
        let mut path = vec![to];
        let mut current = to;
        while current != from {
            let pred = self.pred_matrix[f][current as usize];
            if pred == u32::MAX {
                return None;
            }
            path.push(pred);
            current = pred;
        }
        path.reverse();
        Some(path)
    }
}

impl TryFrom<Vec<(u32, u32)>> for Architecture {
    type Error = IrError;

    fn try_from(edges: Vec<(u32, u32)>) -> IrResult<Self> {
        Self::from_edges(edges)
    }
}

impl From<Architecture> for Vec<(u32, u32)> {
    fn from(arch: Architecture) -> Self {
        arch.edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_edges_counts_qubits() {
        let arch = Architecture::from_edges([(0, 1), (0, 2)]).unwrap();
        assert_eq!(arch.num_qubits(), 3);
        assert!(arch.is_edge(2, 0));
        assert!(!arch.is_edge(1, 2));
    }

    #[test]
    fn test_duplicate_and_reversed_edges_collapse() {
        let arch = Architecture::from_edges([(0, 1), (1, 0), (0, 1), (1, 2)]).unwrap();
        assert_eq!(arch.edges(), &[(0, 1), (1, 2)]);
    }

    #[test]
    fn test_rejects_self_loop_and_empty() {
        assert!(Architecture::from_edges([(1, 1)]).is_err());
        assert!(Architecture::from_edges(std::iter::empty()).is_err());
    }

    #[test]
    fn test_lattice_2x3() {
        let arch = Architecture::lattice(2, 3).unwrap();
        assert_eq!(arch.num_qubits(), 6);
        assert_eq!(
            arch.edges(),
            &[(0, 1), (0, 3), (1, 2), (1, 4), (2, 5), (3, 4), (4, 5)]
        );
    }

    #[test]
    fn test_lattice_with_extra_edge() {
        let arch = Architecture::lattice(3, 2)
            .unwrap()
            .with_extra_edges([(0, 6)])
            .unwrap();
        assert_eq!(arch.num_qubits(), 7);
        assert!(arch.is_edge(6, 0));
    }

    #[test]
    fn test_distance_and_path() {
        let arch = Architecture::linear(5).unwrap();
        assert_eq!(arch.distance(0, 4), Some(4));
        assert_eq!(arch.shortest_path(0, 3), Some(vec![0, 1, 2, 3]));
        assert_eq!(arch.shortest_path(2, 2), Some(vec![2]));
        assert_eq!(arch.distance(0, 9), None);
    }

    #[test]
    fn test_connectivity() {
        assert!(Architecture::star(4).unwrap().is_connected());
        let split = Architecture::from_edges([(0, 1), (2, 3)]).unwrap();
        assert_eq!(split.num_components(), 2);
        assert!(!split.is_connected());
        assert_eq!(split.distance(0, 3), None);
        assert_eq!(split.shortest_path(0, 3), None);
    }

    #[test]
    fn test_isolated_qubit_counts_as_component() {
        let arch = Architecture::from_edges([(0, 2)]).unwrap();
        assert_eq!(arch.num_qubits(), 3);
        assert_eq!(arch.num_components(), 2);
    }

    #[test]
    fn test_serde_as_edge_list() {
        let arch = Architecture::full(3).unwrap();
        let json = serde_json::to_string(&arch).unwrap();
        assert_eq!(json, "[[0,1],[0,2],[1,2]]");
        let back: Architecture = serde_json::from_str(&json).unwrap();
        assert_eq!(back, arch);
        assert_eq!(back.distance(1, 2), Some(1));
    }
}
