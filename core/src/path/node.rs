//! Path nodes

use crate::common::*;
use crate::geometry::*;
use crate::interaction::*;
use crate::spectrum::*;
use std::fmt;

/// Index of a node within a `PathArena`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Returns the position of the node in its arena.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The subpath a node belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Subpath {
    /// Started at the sensor.
    Eye,

    /// Started at an emitter.
    Light,
}

impl Subpath {
    /// Returns the quantity transported by the subpath.
    pub fn mode(&self) -> TransportMode {
        match self {
            Self::Eye => TransportMode::Radiance,
            Self::Light => TransportMode::Importance,
        }
    }
}

/// How a node came to be.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Sampled from a sensor or emitter.
    Root,

    /// A surface hit appended by the random walk.
    Scattering,

    /// An eye subpath ray that escaped into the environment. It lies at
    /// infinity and never scatters.
    Terminal,
}

/// A vertex of a subpath.
#[derive(Clone)]
pub struct PathNode {
    /// The subpath the node belongs to.
    pub subpath: Subpath,

    /// How the node was created.
    pub kind: NodeKind,

    /// Number of scattering events since the root.
    pub depth: usize,

    /// The previous node on the subpath, `None` for roots.
    pub parent: Option<NodeId>,

    /// Local behaviour at the vertex.
    pub interaction: ArcInteraction,

    /// Product of the root weight and all throughputs up to this node.
    pub cumulative_weight: Spectrum,

    /// Density of reaching this node from its parent (projected solid angle), or the
    /// area density of the root.
    pub pdf: Float,

    /// True if the node was reached through a delta-distributed event.
    pub specular: bool,

    /// Geometric factor between this node and its parent (1 for roots).
    pub geometric_factor: Float,

    /// Unit direction of travel from the parent to this node.
    pub incident: Option<Vector3f>,

    /// The random numbers that created the node.
    pub samples: [Float; 3],
}

impl PathNode {
    /// Returns the location of the node.
    pub fn position(&self) -> Position {
        self.interaction.position()
    }

    /// Returns true if the node lies at infinity.
    pub fn is_at_infinity(&self) -> bool {
        self.position().is_at_infinity()
    }

    /// Returns true for sensor and emitter roots.
    pub fn is_root(&self) -> bool {
        self.kind == NodeKind::Root
    }

    /// Returns true if the node is on the light subpath.
    pub fn is_on_light_path(&self) -> bool {
        self.subpath == Subpath::Light
    }

    /// Returns true if the node is on the eye subpath.
    pub fn is_on_eye_path(&self) -> bool {
        self.subpath == Subpath::Eye
    }
}

impl fmt::Debug for PathNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathNode")
            .field("subpath", &self.subpath)
            .field("kind", &self.kind)
            .field("depth", &self.depth)
            .field("parent", &self.parent)
            .field("position", &self.position())
            .field("cumulative_weight", &self.cumulative_weight)
            .field("pdf", &self.pdf)
            .field("specular", &self.specular)
            .field("geometric_factor", &self.geometric_factor)
            .finish()
    }
}
