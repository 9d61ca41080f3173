//! Bounded simple-cycle enumeration.
//!
//! Listing every simple cycle of a directed graph is exponential in the
//! worst case, so the search runs under explicit caps and says so when it
//! stops early. Callers must never treat a truncated search as "no cycles".

use lorekeep_core::CycleLimits;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a cycle search stopped before exhausting the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruncationReason {
    /// `max_cycles` cycles were already found.
    CycleLimit,
    /// The DFS expanded `max_steps` edges.
    StepLimit,
}

impl fmt::Display for TruncationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TruncationReason::CycleLimit => write!(f, "cycle limit reached"),
            TruncationReason::StepLimit => write!(f, "step limit reached"),
        }
    }
}

/// Outcome of a cycle search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleSearch<N = String> {
    /// The search completed and found nothing.
    Acyclic,
    /// The search completed; these are all the simple cycles.
    Found(Vec<Vec<N>>),
    /// The search stopped early; these are the cycles found so far.
    Truncated {
        cycles: Vec<Vec<N>>,
        reason: TruncationReason,
    },
}

impl<N> CycleSearch<N> {
    /// The cycles found, complete or not.
    pub fn cycles(&self) -> &[Vec<N>] {
        match self {
            CycleSearch::Acyclic => &[],
            CycleSearch::Found(cycles) => cycles,
            CycleSearch::Truncated { cycles, .. } => cycles,
        }
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self, CycleSearch::Truncated { .. })
    }

    pub fn truncation(&self) -> Option<TruncationReason> {
        match self {
            CycleSearch::Truncated { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    /// Converts node labels, keeping the search status.
    pub fn map_nodes<M>(self, mut f: impl FnMut(N) -> M) -> CycleSearch<M> {
        let mut convert = |cycles: Vec<Vec<N>>| -> Vec<Vec<M>> {
            cycles
                .into_iter()
                .map(|cycle| cycle.into_iter().map(&mut f).collect())
                .collect()
        };
        match self {
            CycleSearch::Acyclic => CycleSearch::Acyclic,
            CycleSearch::Found(cycles) => CycleSearch::Found(convert(cycles)),
            CycleSearch::Truncated { cycles, reason } => CycleSearch::Truncated {
                cycles: convert(cycles),
                reason,
            },
        }
    }
}

/// Keeps only the edges that stay inside a strongly connected component.
///
/// Every cycle lies within one component, so the dropped edges can never
/// close one. Acyclic regions end up with no edges at all.
fn component_edges(adjacency: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut graph: DiGraph<(), ()> = DiGraph::with_capacity(adjacency.len(), 0);
    for _ in adjacency {
        graph.add_node(());
    }
    for (from, successors) in adjacency.iter().enumerate() {
        for &to in successors {
            graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
        }
    }

    let mut component = vec![0usize; adjacency.len()];
    for (id, members) in tarjan_scc(&graph).into_iter().enumerate() {
        for node in members {
            component[node.index()] = id;
        }
    }

    adjacency
        .iter()
        .enumerate()
        .map(|(from, successors)| {
            successors
                .iter()
                .copied()
                .filter(|&to| component[to] == component[from])
                .collect()
        })
        .collect()
}

/// Enumerates the simple cycles of a graph given as sorted, deduplicated
/// successor lists.
///
/// Every cycle is reported once, rooted at its lowest node and listed in
/// edge order. Self-loops are cycles of length one. The search only walks
/// edges inside strongly connected components, so the step budget is spent
/// where cycles can exist.
pub fn simple_cycles(adjacency: &[Vec<usize>], limits: CycleLimits) -> CycleSearch<usize> {
    let adjacency = component_edges(adjacency);
    let node_count = adjacency.len();
    let mut cycles: Vec<Vec<usize>> = Vec::new();
    let mut steps = 0usize;
    let mut on_path = vec![false; node_count];

    for start in 0..node_count {
        let mut path = vec![start];
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
        on_path[start] = true;

        while let Some(top) = stack.last_mut() {
            let node = top.0;
            let Some(&next) = adjacency[node].get(top.1) else {
                stack.pop();
                path.pop();
                on_path[node] = false;
                continue;
            };
            top.1 += 1;

            steps += 1;
            if steps > limits.max_steps {
                return CycleSearch::Truncated {
                    cycles,
                    reason: TruncationReason::StepLimit,
                };
            }

            if next == start {
                if cycles.len() == limits.max_cycles {
                    return CycleSearch::Truncated {
                        cycles,
                        reason: TruncationReason::CycleLimit,
                    };
                }
                cycles.push(path.clone());
            } else if next > start && !on_path[next] {
                on_path[next] = true;
                path.push(next);
                stack.push((next, 0));
            }
        }
    }

    if cycles.is_empty() {
        CycleSearch::Acyclic
    } else {
        CycleSearch::Found(cycles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits(max_cycles: usize, max_steps: usize) -> CycleLimits {
        CycleLimits {
            max_cycles,
            max_steps,
        }
    }

    #[test]
    fn test_acyclic() {
        // 0 → 1 → 2
        let adjacency = vec![vec![1], vec![2], vec![]];
        assert_eq!(
            simple_cycles(&adjacency, CycleLimits::default()),
            CycleSearch::Acyclic
        );
    }

    #[test]
    fn test_two_cycle() {
        let adjacency = vec![vec![1], vec![0]];
        let search = simple_cycles(&adjacency, CycleLimits::default());
        assert_eq!(search, CycleSearch::Found(vec![vec![0, 1]]));
    }

    #[test]
    fn test_self_loop() {
        let adjacency = vec![vec![0], vec![]];
        assert_eq!(
            simple_cycles(&adjacency, CycleLimits::default()).cycles(),
            &[vec![0]]
        );
    }

    #[test]
    fn test_overlapping_cycles_each_once() {
        // 0 ⇄ 1, 1 ⇄ 2, 0 → 2
        let adjacency = vec![vec![1, 2], vec![0, 2], vec![1]];
        let search = simple_cycles(&adjacency, CycleLimits::default());
        let mut cycles = search.cycles().to_vec();
        cycles.sort();
        assert_eq!(cycles, vec![vec![0, 1], vec![0, 2, 1], vec![1, 2]]);
    }

    #[test]
    fn test_cycle_limit_truncates() {
        let adjacency = vec![vec![1], vec![0, 2], vec![1]];
        let search = simple_cycles(&adjacency, limits(1, 1_000));
        assert_eq!(search.cycles().len(), 1);
        assert_eq!(search.truncation(), Some(TruncationReason::CycleLimit));
    }

    #[test]
    fn test_exact_cycle_limit_is_not_truncated() {
        let adjacency = vec![vec![1], vec![0]];
        let search = simple_cycles(&adjacency, limits(1, 1_000));
        assert!(!search.is_truncated());
    }

    #[test]
    fn test_step_limit_truncates() {
        // Complete graph on 6 nodes has many cycles and many more paths.
        let adjacency: Vec<Vec<usize>> = (0..6)
            .map(|i| (0..6).filter(|&j| j != i).collect())
            .collect();
        let search = simple_cycles(&adjacency, limits(usize::MAX, 50));
        assert_eq!(search.truncation(), Some(TruncationReason::StepLimit));
    }

    #[test]
    fn test_layered_dag_does_not_exhaust_steps() {
        // 12 layers of 3, each node linked to every node of the next layer:
        // 3^11 paths, no cycles.
        let adjacency: Vec<Vec<usize>> = (0..36)
            .map(|i| {
                let next = (i / 3 + 1) * 3;
                if next < 36 {
                    (next..next + 3).collect()
                } else {
                    Vec::new()
                }
            })
            .collect();
        assert_eq!(
            simple_cycles(&adjacency, CycleLimits::default()),
            CycleSearch::Acyclic
        );
    }

    #[test]
    fn test_cycle_behind_acyclic_prefix() {
        // 0 → 1 → 2 ⇄ 3
        let adjacency = vec![vec![1], vec![2], vec![3], vec![2]];
        let search = simple_cycles(&adjacency, limits(10, 3));
        assert_eq!(search, CycleSearch::Found(vec![vec![2, 3]]));
    }

    #[test]
    fn test_map_nodes_keeps_status() {
        let search = CycleSearch::Truncated {
            cycles: vec![vec![0usize, 1]],
            reason: TruncationReason::StepLimit,
        };
        let mapped = search.map_nodes(|n| format!("n{n}"));
        assert_eq!(mapped.cycles(), &[vec!["n0".to_string(), "n1".to_string()]]);
        assert!(mapped.is_truncated());
    }
}
