//! Joined paths

use super::*;

/// A read-only view of a light subpath tail and an eye subpath tail that
/// are joined into one path. Either tail may be absent.
#[derive(Copy, Clone)]
pub struct Path<'a> {
    /// The arena holding both subpaths.
    pub arena: &'a PathArena,

    /// Last node of the light subpath.
    pub light_tail: Option<NodeId>,

    /// Last node of the eye subpath.
    pub eye_tail: Option<NodeId>,
}

impl<'a> Path<'a> {
    /// Create a new `Path`.
    ///
    /// * `arena`      - The arena holding both subpaths.
    /// * `light_tail` - Last node of the light subpath.
    /// * `eye_tail`   - Last node of the eye subpath.
    pub fn new(arena: &'a PathArena, light_tail: Option<NodeId>, eye_tail: Option<NodeId>) -> Self {
        Self {
            arena,
            light_tail,
            eye_tail,
        }
    }

    /// Returns the light tail node.
    pub fn light(&self) -> Option<&'a PathNode> {
        self.light_tail.map(|id| self.arena.node(id))
    }

    /// Returns the eye tail node.
    pub fn eye(&self) -> Option<&'a PathNode> {
        self.eye_tail.map(|id| self.arena.node(id))
    }

    /// Returns the number of light subpath vertices.
    pub fn light_path_length(&self) -> usize {
        self.light().map_or(0, |n| n.depth + 1)
    }

    /// Returns the number of eye subpath vertices.
    pub fn eye_path_length(&self) -> usize {
        self.eye().map_or(0, |n| n.depth + 1)
    }

    /// Returns the number of edges of the joined path.
    pub fn length(&self) -> usize {
        (self.light_path_length() + self.eye_path_length()).saturating_sub(1)
    }

    /// Returns true if both tails are present.
    pub fn is_complete(&self) -> bool {
        self.light_tail.is_some() && self.eye_tail.is_some()
    }

    /// Returns the vertices ordered from the emitter to the sensor.
    pub fn vertices(&self) -> Vec<NodeId> {
        let mut v: Vec<NodeId> = self
            .light_tail
            .map(|id| self.arena.ancestors(id).collect())
            .unwrap_or_default();
        v.reverse();
        if let Some(id) = self.eye_tail {
            v.extend(self.arena.ancestors(id));
        }
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Endpoint;
    use crate::geometry::*;
    use crate::path::fixtures::*;
    use crate::spectrum::*;

    fn arena_with_chains() -> (PathArena, NodeId, NodeId, NodeId) {
        let mut arena = PathArena::new();
        let light = arena.push_root(
            Subpath::Light,
            Endpoint::new(lambert(0.0, Vector3f::Z_AXIS), Spectrum::ONE, 1.0, false),
            [0.0; 3],
        );
        let eye = arena.push_root(
            Subpath::Eye,
            Endpoint::new(lambert(3.0, -Vector3f::Z_AXIS), Spectrum::ONE, 1.0, false),
            [0.0; 3],
        );
        let sr = arena.sample(eye, 0.0, 0.0, 0.0).unwrap();
        let hit = arena.push_scattering(eye, &sr, lambert(1.0, Vector3f::Z_AXIS), [0.0; 3]);
        (arena, light, eye, hit)
    }

    #[test]
    fn lengths_count_vertices_and_edges() {
        let (arena, light, _, hit) = arena_with_chains();
        let path = Path::new(&arena, Some(light), Some(hit));
        assert_eq!(path.light_path_length(), 1);
        assert_eq!(path.eye_path_length(), 2);
        assert_eq!(path.length(), 2);
        assert!(path.is_complete());

        let empty = Path::new(&arena, None, None);
        assert_eq!(empty.length(), 0);
        assert!(!empty.is_complete());
    }

    #[test]
    fn vertices_run_from_emitter_to_sensor() {
        let (arena, light, eye, hit) = arena_with_chains();
        let path = Path::new(&arena, Some(light), Some(hit));
        assert_eq!(path.vertices(), vec![light, hit, eye]);

        let eye_only = Path::new(&arena, None, Some(hit));
        assert_eq!(eye_only.vertices(), vec![hit, eye]);
        assert!(eye_only.light().is_none());
    }
}
