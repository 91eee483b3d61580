//! Path arena

use super::*;
use crate::camera::Endpoint;
use crate::common::*;
use crate::geometry::*;
use crate::interaction::*;
use crate::spectrum::*;
use std::ops::Index;

/// Owns the nodes of the subpaths built for one sample. Nodes refer to
/// their parents by `NodeId` and are immutable once pushed.
#[derive(Clone, Debug, Default)]
pub struct PathArena {
    nodes: Vec<PathNode>,
}

impl PathArena {
    /// Create a new empty `PathArena`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty `PathArena` with room for `n` nodes.
    ///
    /// * `n` - Initial capacity.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(n),
        }
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Removes all nodes.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Removes all nodes pushed after `len()` returned `mark`. Ids of the
    /// removed nodes must not be used afterwards.
    ///
    /// * `mark` - Number of nodes to keep.
    pub fn truncate(&mut self, mark: usize) {
        self.nodes.truncate(mark);
    }

    /// Returns a node.
    ///
    /// * `id` - The node.
    pub fn node(&self, id: NodeId) -> &PathNode {
        &self.nodes[id.0]
    }

    /// Returns the parent of a node.
    ///
    /// * `id` - The node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Returns an iterator from a node back to the root of its subpath,
    /// starting with the node itself.
    ///
    /// * `id` - The node.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            next: Some(id),
        }
    }

    /// Adds a subpath root sampled from a sensor or emitter.
    ///
    /// * `subpath`  - The subpath the root starts.
    /// * `endpoint` - The sampled endpoint.
    /// * `samples`  - The random numbers used to sample it.
    pub fn push_root(&mut self, subpath: Subpath, endpoint: Endpoint, samples: [Float; 3]) -> NodeId {
        let id = NodeId(self.nodes.len());
        trace!(
            "{subpath:?} root {id} at {} weight {} pdf {}",
            endpoint.interaction.position(),
            endpoint.weight,
            endpoint.pdf
        );
        self.nodes.push(PathNode {
            subpath,
            kind: NodeKind::Root,
            depth: 0,
            parent: None,
            interaction: endpoint.interaction,
            cumulative_weight: endpoint.weight,
            pdf: endpoint.pdf,
            specular: endpoint.specular,
            geometric_factor: 1.0,
            incident: None,
            samples,
        });
        id
    }

    /// Adds a surface hit reached by scattering from `parent`.
    ///
    /// * `parent`      - The node the ray was scattered from.
    /// * `sr`          - The scattered ray.
    /// * `interaction` - Local behaviour at the hit.
    /// * `samples`     - The random numbers used to scatter.
    pub fn push_scattering(
        &mut self,
        parent: NodeId,
        sr: &ScatteredRay,
        interaction: ArcInteraction,
        samples: [Float; 3],
    ) -> NodeId {
        self.push_child(NodeKind::Scattering, parent, sr, interaction, samples)
    }

    /// Adds the environment hit of an escaped eye subpath ray.
    ///
    /// * `parent`      - The node the ray was scattered from.
    /// * `sr`          - The scattered ray.
    /// * `interaction` - The environment, positioned at infinity.
    /// * `samples`     - The random numbers used to scatter.
    pub fn push_terminal(
        &mut self,
        parent: NodeId,
        sr: &ScatteredRay,
        interaction: ArcInteraction,
        samples: [Float; 3],
    ) -> NodeId {
        self.push_child(NodeKind::Terminal, parent, sr, interaction, samples)
    }

    fn push_child(
        &mut self,
        kind: NodeKind,
        parent: NodeId,
        sr: &ScatteredRay,
        interaction: ArcInteraction,
        samples: [Float; 3],
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        let p = &self.nodes[parent.0];
        let incident = direction(&p.position(), &interaction.position())
            .unwrap_or_else(|| sr.ray.d.normalize());
        let node = PathNode {
            subpath: p.subpath,
            kind,
            depth: p.depth + 1,
            parent: Some(parent),
            cumulative_weight: p.cumulative_weight * sr.color,
            pdf: sr.pdf,
            specular: sr.is_specular(),
            geometric_factor: geometric_factor(p.interaction.as_ref(), interaction.as_ref()),
            incident: Some(incident),
            interaction,
            samples,
        };
        trace!(
            "{:?} {kind:?} {id} depth {} at {} weight {} pdf {} g {}",
            node.subpath,
            node.depth,
            node.position(),
            node.cumulative_weight,
            node.pdf,
            node.geometric_factor
        );
        self.nodes.push(node);
        id
    }

    /// Returns the unit direction from one node to another.
    ///
    /// * `from` - Start node.
    /// * `to`   - End node.
    pub fn direction(&self, from: NodeId, to: NodeId) -> Option<Vector3f> {
        direction(&self.nodes[from.0].position(), &self.nodes[to.0].position())
    }

    /// Returns the geometric factor between two nodes.
    ///
    /// * `a` - First node.
    /// * `b` - Second node.
    pub fn geometric_factor(&self, a: NodeId, b: NodeId) -> Float {
        geometric_factor(
            self.nodes[a.0].interaction.as_ref(),
            self.nodes[b.0].interaction.as_ref(),
        )
    }

    /// Samples the direction in which the subpath continues past a node.
    /// Terminal nodes never scatter.
    ///
    /// * `id` - The node.
    /// * `ru` - First random number.
    /// * `rv` - Second random number.
    /// * `rj` - Third random number.
    pub fn sample(&self, id: NodeId, ru: Float, rv: Float, rj: Float) -> Option<ScatteredRay> {
        let node = &self.nodes[id.0];
        if node.kind == NodeKind::Terminal {
            return None;
        }
        node.interaction
            .sample(node.incident.as_ref(), node.subpath.mode(), ru, rv, rj)
    }

    /// Evaluates the scattering function of a node for a subpath that
    /// continues along `wo`.
    ///
    /// * `id` - The node.
    /// * `wo` - Unit departure direction.
    pub fn scatter(&self, id: NodeId, wo: &Vector3f) -> Spectrum {
        let node = &self.nodes[id.0];
        node.interaction
            .scatter(node.incident.as_ref(), wo, node.subpath.mode())
    }

    /// Returns the density of the subpath continuing from a node along `wo`.
    ///
    /// * `id` - The node.
    /// * `wo` - Unit departure direction.
    pub fn pdf_toward(&self, id: NodeId, wo: &Vector3f) -> Float {
        let node = &self.nodes[id.0];
        node.interaction
            .pdf(node.incident.as_ref(), wo, node.subpath.mode())
    }

    /// Returns the density with which the opposite subpath, arriving at a
    /// node along `wi`, would scatter toward the node's parent. Roots return 1.
    ///
    /// * `id` - The node.
    /// * `wi` - Unit arrival direction of the opposite subpath.
    pub fn reverse_pdf_toward(&self, id: NodeId, wi: &Vector3f) -> Float {
        let node = &self.nodes[id.0];
        match node.parent.and_then(|parent| self.direction(id, parent)) {
            Some(wo) => node
                .interaction
                .pdf(Some(wi), &wo, node.subpath.mode().flip()),
            None if node.parent.is_none() => 1.0,
            None => 0.0,
        }
    }

    /// Returns the area density with which the scene's emitter samples the
    /// vertex of a non-root node.
    ///
    /// * `id` - The node.
    pub fn source_pdf(&self, id: NodeId) -> Float {
        let node = &self.nodes[id.0];
        if node.is_root() {
            0.0
        } else {
            node.interaction.source_pdf()
        }
    }

    /// Returns the density with which an emitter root at the vertex of a
    /// non-root node would emit along `wo`.
    ///
    /// * `id` - The node.
    /// * `wo` - Unit direction away from the vertex.
    pub fn source_pdf_toward(&self, id: NodeId, wo: &Vector3f) -> Float {
        let node = &self.nodes[id.0];
        if node.is_root() {
            0.0
        } else {
            node.interaction.source_pdf_toward(wo)
        }
    }

    /// Returns true if a non-root node lies on an emitter.
    ///
    /// * `id` - The node.
    pub fn is_emissive(&self, id: NodeId) -> bool {
        let node = &self.nodes[id.0];
        !node.is_root() && node.interaction.is_emissive()
    }

    /// Returns the radiance a non-root node emits toward its parent.
    ///
    /// * `id` - The node.
    pub fn emission(&self, id: NodeId) -> Spectrum {
        self.nodes[id.0]
            .parent
            .and_then(|parent| self.direction(id, parent))
            .map_or(Spectrum::ZERO, |wo| self.nodes[id.0].interaction.emission(&wo))
    }
}

impl Index<NodeId> for PathArena {
    type Output = PathNode;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

/// Iterator from a node back to the root of its subpath.
pub struct Ancestors<'a> {
    arena: &'a PathArena,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.arena.parent(id);
        Some(id)
    }
}
