//! Dependency graph over generated definitions.
//!
//! Vertices are records, lists, and one synthetic root per function. An edge
//! `A -> B` means A's definition or codec refers to B, so B must be emitted
//! first. Edges only go one level down; deeper shapes are reached through
//! their own vertices.


use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};

use crate::table::{ListId, RecordId, TypeRef, TypeTable};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vertex {
    Record(RecordId),
    List(ListId),
    /// The parameter list of the function at this index. Never emitted.
    Root(usize),
}

impl Vertex {
    fn of(ty: TypeRef) -> Option<Self> {
        match ty {
            TypeRef::Scalar(_) => None,
            TypeRef::Record(id) => Some(Self::Record(id)),
            TypeRef::List(id) => Some(Self::List(id)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Vertex -> its direct dependencies, both in insertion order.
    edges: IndexMap<Vertex, IndexSet<Vertex>>,
}

impl DependencyGraph {
    /// Build the graph for every interned shape plus one root per signature.
    pub fn build(table: &TypeTable, signatures: &[Vec<TypeRef>]) -> Result<Self> {
        let mut graph = Self::default();

        for (id, record) in table.records() {
            let owner = Vertex::Record(id);
            graph.add_vertex(owner);
            for field in &record.fields {
                graph.add_dependency(table, owner, field.ty)?;
            }
        }

        for (id, list) in table.lists() {
            let owner = Vertex::List(id);
            graph.add_vertex(owner);
            graph.add_dependency(table, owner, list.elem)?;
        }

        for (index, types) in signatures.iter().enumerate() {
            let root = Vertex::Root(index);
            graph.add_vertex(root);
            for &ty in types {
                graph.add_dependency(table, root, ty)?;
            }
        }

        debug!(
            vertices = graph.edges.len(),
            edges = graph.edge_count(),
            "built dependency graph"
        );
        Ok(graph)
    }

    fn add_vertex(&mut self, vertex: Vertex) {
        self.edges.entry(vertex).or_default();
    }

    fn add_dependency(&mut self, table: &TypeTable, owner: Vertex, ty: TypeRef) -> Result<()> {
        let Some(dep) = Vertex::of(ty) else {
            return Ok(());
        };
        if dep == owner {
            return Err(Error::CyclicTypeGraph(vec![vertex_name(table, owner)]));
        }

        trace!(owner = ?owner, dep = ?dep, "dependency");
        self.edges.entry(owner).or_default().insert(dep);
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(IndexSet::len).sum()
    }

    pub fn dependencies(&self, vertex: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.edges.get(&vertex).into_iter().flatten().copied()
    }

    /// Linearize dependencies-first by peeling sinks layer by layer.
    ///
    /// Each round removes every vertex with no remaining dependencies, in
    /// insertion order. Roots are removed but not returned. A round with no
    /// sink means the remaining vertices form a cycle.
    pub fn topological_order(&self, table: &TypeTable) -> Result<Vec<Vertex>> {
        let mut remaining = self.edges.clone();
        let mut order = Vec::with_capacity(remaining.len());

        while !remaining.is_empty() {
            let sinks: Vec<Vertex> = remaining
                .iter()
                .filter(|(_, deps)| deps.is_empty())
                .map(|(&v, _)| v)
                .collect();

            if sinks.is_empty() {
                let names = remaining
                    .keys()
                    .filter(|v| !matches!(v, Vertex::Root(_)))
                    .map(|&v| vertex_name(table, v))
                    .collect();
                return Err(Error::CyclicTypeGraph(names));
            }

            for sink in &sinks {
                remaining.shift_remove(sink);
            }
            for deps in remaining.values_mut() {
                deps.retain(|d| !sinks.contains(d));
            }

            order.extend(sinks.into_iter().filter(|v| !matches!(v, Vertex::Root(_))));
        }

        Ok(order)
    }
}

pub(crate) fn vertex_name(table: &TypeTable, vertex: Vertex) -> String {
    match vertex {
        Vertex::Record(id) => table.record(id).name.clone(),
        Vertex::List(id) => table.list(id).descriptor.clone(),
        Vertex::Root(index) => format!("<root {index}>"),
    }
}
