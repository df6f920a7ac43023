use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{Endpoint, GraphError};

/// Dense vertex index. Assigned in insertion order, never reused.
pub type VertexId = usize;

/// Index into the label arena. An undirected edge stores one slot that both
/// directed entries point at.
pub(crate) type SlotId = usize;

/// A directed entry in an adjacency list.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub target: VertexId,
    pub(crate) slot: SlotId,
}

/// Generic labeled graph: vertex arena + adjacency lists + label arena.
///
/// Edges are stored per ordered pair. `outgoing[a]` lists entries leaving a,
/// `incoming[b]` lists entries arriving at b, both in insertion order so
/// neighbor enumeration is deterministic. Undirected insertion creates two
/// directed entries sharing one label slot.
#[derive(Debug, Clone)]
pub struct Graph<V, E> {
    vertices: Vec<V>,
    index: HashMap<V, VertexId>,
    outgoing: Vec<Vec<Edge>>,
    incoming: Vec<Vec<Edge>>,
    slots: HashMap<(VertexId, VertexId), SlotId>,
    labels: Vec<E>,
}

impl<V, E> Graph<V, E>
where
    V: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            index: HashMap::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
            slots: HashMap::new(),
            labels: Vec::new(),
        }
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(vertex_count: usize, edge_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            index: HashMap::with_capacity(vertex_count),
            outgoing: Vec::with_capacity(vertex_count),
            incoming: Vec::with_capacity(vertex_count),
            slots: HashMap::with_capacity(edge_count),
            labels: Vec::with_capacity(edge_count),
        }
    }

    /// Add a vertex if absent. Returns its index either way.
    pub fn insert_vertex(&mut self, v: V) -> VertexId {
        if let Some(&id) = self.index.get(&v) {
            return id;
        }
        let id = self.vertices.len();
        self.index.insert(v.clone(), id);
        self.vertices.push(v);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        id
    }

    /// Resolve a vertex to its index.
    pub fn id_of<Q>(&self, v: &Q) -> Option<VertexId>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(v).copied()
    }

    /// The vertex stored at `id`. Panics on an index this graph never issued.
    pub fn vertex(&self, id: VertexId) -> &V {
        &self.vertices[id]
    }

    pub fn has_vertex<Q>(&self, v: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(v)
    }

    pub fn has_edge<Q>(&self, u: &Q, v: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match (self.id_of(u), self.id_of(v)) {
            (Some(a), Some(b)) => self.slots.contains_key(&(a, b)),
            _ => false,
        }
    }

    /// Insert an undirected edge between two existing vertices.
    ///
    /// Both `(u, v)` and `(v, u)` resolve to the same label afterwards.
    /// Re-inserting an existing pair replaces its label.
    pub fn insert_undirected<Q>(&mut self, u: &Q, v: &Q, label: E) -> Result<(), GraphError>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (a, b) = self.endpoints(u, v)?;
        self.link_undirected(a, b, label);
        Ok(())
    }

    /// Insert a single directed edge `u -> v` between two existing vertices.
    pub fn insert_directed<Q>(&mut self, u: &Q, v: &Q, label: E) -> Result<(), GraphError>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (a, b) = self.endpoints(u, v)?;
        self.link_directed(a, b, label);
        Ok(())
    }

    fn endpoints<Q>(&self, u: &Q, v: &Q) -> Result<(VertexId, VertexId), GraphError>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let a = self
            .id_of(u)
            .ok_or(GraphError::MissingVertex(Endpoint::Source))?;
        let b = self
            .id_of(v)
            .ok_or(GraphError::MissingVertex(Endpoint::Target))?;
        Ok((a, b))
    }

    /// Index-level undirected insert. Both ids must come from this graph.
    pub(crate) fn link_undirected(&mut self, a: VertexId, b: VertexId, label: E) {
        let slot = match self.slots.get(&(a, b)).or_else(|| self.slots.get(&(b, a))) {
            Some(&slot) => {
                self.labels[slot] = label;
                slot
            }
            None => {
                self.labels.push(label);
                self.labels.len() - 1
            }
        };
        self.attach(a, b, slot);
        self.attach(b, a, slot);
    }

    /// Index-level directed insert. A pair that already shared a slot with its
    /// reverse is detached onto a fresh slot.
    pub(crate) fn link_directed(&mut self, a: VertexId, b: VertexId, label: E) {
        self.labels.push(label);
        let slot = self.labels.len() - 1;
        self.attach(a, b, slot);
    }

    /// Point the ordered pair `(a, b)` at `slot`, creating adjacency entries on
    /// first use.
    fn attach(&mut self, a: VertexId, b: VertexId, slot: SlotId) {
        match self.slots.insert((a, b), slot) {
            Some(old) if old == slot => {}
            Some(_) => {
                for e in self.outgoing[a].iter_mut().filter(|e| e.target == b) {
                    e.slot = slot;
                }
                for e in self.incoming[b].iter_mut().filter(|e| e.target == a) {
                    e.slot = slot;
                }
            }
            None => {
                self.outgoing[a].push(Edge { target: b, slot });
                self.incoming[b].push(Edge { target: a, slot });
            }
        }
    }

    /// Label of edge `(u, v)`, or None when the pair is not connected.
    pub fn label<Q>(&self, u: &Q, v: &Q) -> Option<&E>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let a = self.id_of(u)?;
        let b = self.id_of(v)?;
        self.label_between(a, b)
    }

    /// Mutable label of edge `(u, v)`. For an undirected edge the change is
    /// visible from both directions.
    pub fn label_mut<Q>(&mut self, u: &Q, v: &Q) -> Option<&mut E>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let a = self.id_of(u)?;
        let b = self.id_of(v)?;
        self.label_between_mut(a, b)
    }

    pub(crate) fn label_between(&self, a: VertexId, b: VertexId) -> Option<&E> {
        self.slots.get(&(a, b)).map(|&slot| &self.labels[slot])
    }

    pub(crate) fn label_between_mut(&mut self, a: VertexId, b: VertexId) -> Option<&mut E> {
        let slot = *self.slots.get(&(a, b))?;
        self.labels.get_mut(slot)
    }

    pub(crate) fn slot_label(&self, slot: SlotId) -> &E {
        &self.labels[slot]
    }

    /// Outgoing adjacency entries by index.
    pub fn out_edges(&self, id: VertexId) -> &[Edge] {
        self.outgoing.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Incoming adjacency entries by index. `Edge::target` is the source vertex.
    pub fn in_edges(&self, id: VertexId) -> &[Edge] {
        self.incoming.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Vertices reachable via one edge leaving `v`. Empty for an unknown vertex.
    pub fn out_neighbors<'a, Q>(&'a self, v: &Q) -> impl Iterator<Item = &'a V> + 'a
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
    {
        let edges = self.id_of(v).map(|id| self.out_edges(id)).unwrap_or(&[]);
        edges.iter().map(move |e| &self.vertices[e.target])
    }

    /// Vertices with an edge arriving at `v`. Empty for an unknown vertex.
    pub fn in_neighbors<'a, Q>(&'a self, v: &Q) -> impl Iterator<Item = &'a V> + 'a
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
    {
        let edges = self.id_of(v).map(|id| self.in_edges(id)).unwrap_or(&[]);
        edges.iter().map(move |e| &self.vertices[e.target])
    }

    pub fn out_degree<Q>(&self, v: &Q) -> usize
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.id_of(v).map_or(0, |id| self.out_edges(id).len())
    }

    pub fn in_degree<Q>(&self, v: &Q) -> usize
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.id_of(v).map_or(0, |id| self.in_edges(id).len())
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of directed entries. An undirected edge counts twice.
    pub fn num_edges(&self) -> usize {
        self.slots.len()
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = &V> {
        self.vertices.iter()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let vertex_mem = self.vertices.len() * (2 * size_of::<V>() + size_of::<VertexId>() + 16);
        let adjacency: usize = self
            .outgoing
            .iter()
            .chain(self.incoming.iter())
            .map(|v| v.len() * size_of::<Edge>())
            .sum();
        let slot_mem = self.slots.len() * (size_of::<(VertexId, VertexId)>() + size_of::<SlotId>());
        let label_mem = self.labels.len() * size_of::<E>();

        vertex_mem + adjacency + slot_mem + label_mem
    }
}

impl<V, E> Default for Graph<V, E>
where
    V: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
