//! Counterparty graph for a wallet
//!
//! Nodes are account keys seen in program events across the wallet's recent
//! transactions; edges run from the analyzed wallet to each counterparty,
//! weighted by how often the counterparty appeared. A key appearing in five
//! transactions gets weight five, which the views use for sizing.

use crate::models::shorten_address;
use crate::rpc::EnrichedTransaction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// One node in the counterparty graph
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub address: String,
    /// Occurrences across the scanned transactions (0 for the center)
    pub frequency: u32,
    pub is_center: bool,
}

/// Directed graph from an analyzed wallet to its counterparties
pub struct CounterpartyGraph {
    center: String,
    graph: DiGraph<GraphNode, u32>,
    index: HashMap<String, NodeIndex>,
}

impl CounterpartyGraph {
    /// Build the graph from enriched transactions.
    ///
    /// Every account key in a program event counts as one occurrence; the
    /// analyzed wallet itself is excluded. Duplicate keys within a single
    /// transaction count separately, matching occurrence-based weighting.
    pub fn build(center: &str, transactions: &[EnrichedTransaction]) -> Self {
        let mut graph = DiGraph::new();
        let mut index = HashMap::new();

        let center_idx = graph.add_node(GraphNode {
            address: center.to_string(),
            frequency: 0,
            is_center: true,
        });
        index.insert(center.to_string(), center_idx);

        for tx in transactions {
            for account in tx.program_accounts() {
                if account == center {
                    continue;
                }

                let node_idx = *index.entry(account.to_string()).or_insert_with(|| {
                    graph.add_node(GraphNode {
                        address: account.to_string(),
                        frequency: 0,
                        is_center: false,
                    })
                });
                graph[node_idx].frequency += 1;

                match graph.find_edge(center_idx, node_idx) {
                    Some(edge) => graph[edge] += 1,
                    None => {
                        graph.add_edge(center_idx, node_idx, 1);
                    }
                }
            }
        }

        tracing::debug!(
            center,
            nodes = graph.node_count(),
            "Built counterparty graph"
        );

        Self {
            center: center.to_string(),
            graph,
            index,
        }
    }

    pub fn center(&self) -> &str {
        &self.center
    }

    /// Node count including the center
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Distinct counterparties
    pub fn counterparty_count(&self) -> usize {
        self.graph.node_count().saturating_sub(1)
    }

    /// Total occurrences across all counterparties
    pub fn total_interactions(&self) -> u32 {
        self.graph.edge_weights().sum()
    }

    /// Occurrence count for one counterparty
    pub fn frequency(&self, address: &str) -> Option<u32> {
        self.index
            .get(address)
            .map(|idx| self.graph[*idx].frequency)
    }

    /// Counterparties sorted by frequency descending, address ascending on
    /// ties so output is stable.
    pub fn counterparties(&self) -> Vec<&GraphNode> {
        let mut nodes: Vec<&GraphNode> = self
            .graph
            .node_weights()
            .filter(|n| !n.is_center)
            .collect();
        nodes.sort_by(|a, b| {
            b.frequency
                .cmp(&a.frequency)
                .then_with(|| a.address.cmp(&b.address))
        });
        nodes
    }

    /// The `n` most frequent counterparties
    pub fn top(&self, n: usize) -> Vec<&GraphNode> {
        let mut nodes = self.counterparties();
        nodes.truncate(n);
        nodes
    }

    /// Render as Graphviz DOT, edges labeled with occurrence counts.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph counterparties {\n");
        out.push_str("    rankdir=LR;\n");
        out.push_str(&format!(
            "    \"{}\" [label=\"{}\", shape=doublecircle];\n",
            self.center,
            shorten_address(&self.center)
        ));

        for node in self.counterparties() {
            out.push_str(&format!(
                "    \"{}\" [label=\"{}\"];\n",
                node.address,
                shorten_address(&node.address)
            ));
            out.push_str(&format!(
                "    \"{}\" -> \"{}\" [label=\"{}\"];\n",
                self.center, node.address, node.frequency
            ));
        }

        out.push_str("}\n");
        out
    }
}
