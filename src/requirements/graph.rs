// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 genflow contributors

//! Requirement dependency graph
//!
//! Collects the transitive closure of a set of requirements into a graph
//! for inspection and rendering. Edges point from a dependency to the
//! requirement that needs it.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeMap, HashSet, VecDeque};

use crate::errors::GenflowError;
use crate::requirements::RequirementRef;

/// Graph of requirements keyed by name
pub struct RequirementGraph {
    graph: DiGraph<String, ()>,
    name_to_index: BTreeMap<String, NodeIndex>,
}

impl RequirementGraph {
    /// Build the graph reachable from `roots`, rejecting cycles
    pub fn build(roots: &[RequirementRef]) -> Result<Self, GenflowError> {
        let mut builder = Self {
            graph: DiGraph::new(),
            name_to_index: BTreeMap::new(),
        };

        let mut queue: VecDeque<RequirementRef> = roots.iter().cloned().collect();
        let mut expanded: HashSet<String> = HashSet::new();

        while let Some(node) = queue.pop_front() {
            let name = node.name().to_string();
            if !expanded.insert(name.clone()) {
                continue;
            }

            let node_index = builder.node(&name);
            for dep in node.require() {
                let dep_index = builder.node(dep.name());
                if !builder.graph.contains_edge(dep_index, node_index) {
                    builder.graph.add_edge(dep_index, node_index, ());
                }
                queue.push_back(dep);
            }
        }

        builder.validate_acyclic()?;
        Ok(builder)
    }

    fn node(&mut self, name: &str) -> NodeIndex {
        if let Some(index) = self.name_to_index.get(name) {
            return *index;
        }
        let index = self.graph.add_node(name.to_string());
        self.name_to_index.insert(name.to_string(), index);
        index
    }

    fn validate_acyclic(&self) -> Result<(), GenflowError> {
        match toposort(&self.graph, None) {
            Ok(_) => Ok(()),
            Err(cycle) => Err(GenflowError::CircularRequirement {
                chain: self.find_cycle_members(cycle.node_id()),
            }),
        }
    }

    /// Follow edges from `start` until a node repeats
    fn find_cycle_members(&self, start: NodeIndex) -> Vec<String> {
        use petgraph::visit::{depth_first_search, Control, DfsEvent};

        let mut chain = vec![self.graph[start].clone()];

        depth_first_search(&self.graph, Some(start), |event| match event {
            DfsEvent::BackEdge(_, target) if target == start => Control::Break(()),
            DfsEvent::TreeEdge(_, target) => {
                chain.push(self.graph[target].clone());
                Control::Continue
            }
            _ => Control::Continue,
        });

        chain.push(self.graph[start].clone());
        chain
    }

    /// Names in an order where dependencies come first
    pub fn install_order(&self) -> Vec<String> {
        toposort(&self.graph, None)
            .map(|nodes| nodes.into_iter().map(|n| self.graph[n].clone()).collect())
            .unwrap_or_default()
    }

    /// Direct dependencies of a requirement
    pub fn dependencies(&self, name: &str) -> Option<Vec<String>> {
        let node = self.name_to_index.get(name)?;
        let mut deps: Vec<String> = self
            .graph
            .neighbors_directed(*node, petgraph::Direction::Incoming)
            .map(|n| self.graph[n].clone())
            .collect();
        deps.sort();
        Some(deps)
    }

    /// Requirements that need `name`
    pub fn dependents(&self, name: &str) -> Option<Vec<String>> {
        let node = self.name_to_index.get(name)?;
        let mut deps: Vec<String> = self
            .graph
            .neighbors_directed(*node, petgraph::Direction::Outgoing)
            .map(|n| self.graph[n].clone())
            .collect();
        deps.sort();
        Some(deps)
    }

    pub fn names(&self) -> Vec<&str> {
        self.name_to_index.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    fn edges(&self) -> Vec<(&str, &str)> {
        let mut edges: Vec<(&str, &str)> = self
            .graph
            .edge_indices()
            .filter_map(|edge| self.graph.edge_endpoints(edge))
            .map(|(from, to)| (self.graph[from].as_str(), self.graph[to].as_str()))
            .collect();
        edges.sort();
        edges
    }

    /// Generate Mermaid diagram of the graph
    pub fn to_mermaid(&self) -> String {
        // Mermaid ids cannot contain '-'
        fn id(name: &str) -> String {
            name.replace('-', "_")
        }

        let mut out = String::from("graph TD\n");

        for name in self.name_to_index.keys() {
            out.push_str(&format!("    {}[{}]\n", id(name), name));
        }

        for (from, to) in self.edges() {
            out.push_str(&format!("    {} --> {}\n", id(from), id(to)));
        }

        out
    }

    /// Generate DOT diagram of the graph
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph requirements {\n");
        out.push_str("    rankdir=BT;\n");
        out.push_str("    node [shape=box, style=rounded];\n\n");

        for (from, to) in self.edges() {
            out.push_str(&format!("    \"{}\" -> \"{}\";\n", from, to));
        }

        for (name, node) in &self.name_to_index {
            if self.graph.neighbors_undirected(*node).count() == 0 {
                out.push_str(&format!("    \"{}\";\n", name));
            }
        }

        out.push_str("}\n");
        out
    }

    /// Text listing in installation order
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        for (i, name) in self.install_order().iter().enumerate() {
            out.push_str(&format!("{}. {}", i + 1, name));

            let deps = self.dependencies(name).unwrap_or_default();
            if !deps.is_empty() {
                out.push_str(&format!(" [requires: {}]", deps.join(", ")));
            }

            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::tests::FakeRequirement;
    use crate::requirements::{self, Requirement};
    use std::sync::{Arc, Mutex};

    struct Cyclic {
        name: &'static str,
        next: &'static str,
    }

    impl Requirement for Cyclic {
        fn name(&self) -> &str {
            self.name
        }

        fn is_installed(&self) -> bool {
            true
        }

        fn install(&self) -> anyhow::Result<()> {
            Ok(())
        }

        fn require(&self) -> Vec<RequirementRef> {
            let next: RequirementRef = Arc::new(Cyclic {
                name: self.next,
                next: self.name,
            });
            vec![next]
        }
    }

    #[test]
    fn test_builtin_graph() {
        let graph = RequirementGraph::build(&requirements::builtin()).unwrap();

        assert_eq!(graph.len(), 5);
        assert_eq!(graph.dependencies("yapf").unwrap(), vec!["pip"]);
        assert_eq!(graph.dependents("java").unwrap(), vec!["google-java-format"]);

        let order = graph.install_order();
        let pos = |n: &str| order.iter().position(|x| x == n).unwrap();
        assert!(pos("java") < pos("google-java-format"));
        assert!(pos("pip") < pos("yapf"));
    }

    #[test]
    fn test_shared_dependency_is_one_node() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let shared: RequirementRef = Arc::new(FakeRequirement::new("shared", &log));
        let a: RequirementRef =
            Arc::new(FakeRequirement::new("a", &log).with_deps(vec![shared.clone()]));
        let b: RequirementRef = Arc::new(FakeRequirement::new("b", &log).with_deps(vec![shared]));

        let graph = RequirementGraph::build(&[a, b]).unwrap();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.dependents("shared").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_cycle_detection() {
        let root: RequirementRef = Arc::new(Cyclic {
            name: "a",
            next: "b",
        });

        let result = RequirementGraph::build(&[root]);
        match result {
            Err(GenflowError::CircularRequirement { chain }) => {
                assert!(chain.contains(&"a".to_string()));
                assert!(chain.contains(&"b".to_string()));
            }
            _ => panic!("Expected CircularRequirement"),
        }
    }

    #[test]
    fn test_renderers() {
        let graph = RequirementGraph::build(&[requirements::google_java_format()]).unwrap();

        let mermaid = graph.to_mermaid();
        assert!(mermaid.contains("graph TD"));
        assert!(mermaid.contains("java --> google_java_format"));

        let dot = graph.to_dot();
        assert!(dot.contains("\"java\" -> \"google-java-format\";"));

        assert_eq!(graph.to_text(), "1. java\n2. google-java-format [requires: java]\n");
    }
}
