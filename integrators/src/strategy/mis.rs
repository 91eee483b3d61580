//! Multiple Importance Sampling

use super::*;
use crate::expand;
use std::fmt;

/// Maps the area density of a technique to its share of the weight.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Heuristic {
    /// Weights proportional to the densities.
    Balance,

    /// Weights proportional to the densities raised to an exponent.
    Power(Float),
}

impl Heuristic {
    /// Returns the power heuristic with the usual exponent of 2.
    pub fn power() -> Self {
        Self::Power(2.0)
    }

    fn apply(&self, pdf: Float) -> Float {
        match self {
            Self::Balance => pdf,
            Self::Power(exponent) => pdf.powf(*exponent),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Balance => write!(f, "balance"),
            Self::Power(exponent) => write!(f, "power({exponent})"),
        }
    }
}

/// Traces both subpaths and weights each connection against every other
/// way of splitting the same path into a light and an eye subpath.
#[derive(Copy, Clone, Debug)]
pub struct MultipleImportanceSamplingStrategy {
    /// Maximum number of light subpath vertices; 0 skips the light subpath.
    max_light_depth: usize,

    /// Maximum number of eye subpath vertices; 0 skips the eye subpath.
    max_eye_depth: usize,

    /// Combines the densities of competing techniques.
    heuristic: Heuristic,
}

impl MultipleImportanceSamplingStrategy {
    /// Create a new `MultipleImportanceSamplingStrategy`.
    ///
    /// * `max_light_depth` - Maximum number of light subpath vertices.
    /// * `max_eye_depth`   - Maximum number of eye subpath vertices.
    /// * `heuristic`       - Combines the densities of competing techniques.
    pub fn new(max_light_depth: usize, max_eye_depth: usize, heuristic: Heuristic) -> Self {
        debug!("MIS strategy with {heuristic} heuristic, depths {max_light_depth}/{max_eye_depth}");
        Self {
            max_light_depth,
            max_eye_depth,
            heuristic,
        }
    }

    /// Create a new `MultipleImportanceSamplingStrategy` using the balance
    /// heuristic.
    ///
    /// * `max_light_depth` - Maximum number of light subpath vertices.
    /// * `max_eye_depth`   - Maximum number of eye subpath vertices.
    pub fn balance(max_light_depth: usize, max_eye_depth: usize) -> Self {
        Self::new(max_light_depth, max_eye_depth, Heuristic::Balance)
    }

    /// Create a new `MultipleImportanceSamplingStrategy` using the power
    /// heuristic.
    ///
    /// * `max_light_depth` - Maximum number of light subpath vertices.
    /// * `max_eye_depth`   - Maximum number of eye subpath vertices.
    pub fn power(max_light_depth: usize, max_eye_depth: usize) -> Self {
        Self::new(max_light_depth, max_eye_depth, Heuristic::power())
    }

    /// Fills `pdf[s + 1..]` with the densities of the techniques that move
    /// vertices of the eye subpath onto the light subpath, relative to
    /// `pdf[s]`.
    fn walk_eye_subpath(&self, path: &Path, eye: NodeId, gle: Float, pdf: &mut [Float]) {
        let arena = path.arena;
        let s = path.light_path_length();
        let k = pdf.len() - 2;

        if s < self.max_light_depth {
            let forward = match path.light_tail {
                Some(light) => {
                    arena
                        .direction(light, eye)
                        .map_or(0.0, |v| arena.pdf_toward(light, &v))
                        * gle
                }
                None => arena.source_pdf(eye),
            };
            pdf[s + 1] = pdf[s] * ratio(forward, area_pdf(arena, eye));
        }

        let mut zjp2 = path.light_tail;
        let mut zjp1 = eye;
        for i in s + 1..=k {
            if i + 1 > self.max_light_depth {
                break;
            }
            let Some(zj) = arena.parent(zjp1) else {
                break;
            };

            let reverse = match zjp2 {
                Some(zjp2) if arena[zjp2].specular => arena[zjp2].pdf,
                Some(zjp2) => arena
                    .direction(zjp2, zjp1)
                    .map_or(0.0, |v| arena.reverse_pdf_toward(zjp1, &v)),
                None => arena
                    .direction(zjp1, zj)
                    .map_or(0.0, |v| arena.source_pdf_toward(zjp1, &v)),
            };
            pdf[i + 1] = pdf[i]
                * ratio(reverse * arena[zjp1].geometric_factor, area_pdf(arena, zj));

            zjp2 = Some(zjp1);
            zjp1 = zj;
        }

        // A specular node blocks the connections on both sides of the vertex
        // that scattered into it.
        let mut previous = false;
        for (i, zj) in (s..=k).zip(arena.ancestors(eye)) {
            let specular = arena[zj].specular;
            if previous || specular {
                pdf[i + 1] = 0.0;
            }
            previous = specular;
        }
    }

    /// Fills `pdf[..s - 1]` with the densities of the techniques that move
    /// vertices of the light subpath onto the eye subpath, relative to
    /// `pdf[s]`.
    fn walk_light_subpath(&self, path: &Path, light: NodeId, gle: Float, pdf: &mut [Float]) {
        let arena = path.arena;
        let s = path.light_path_length();
        let t = path.eye_path_length();
        let k = pdf.len() - 2;

        // Without an eye node the next technique would start an eye subpath
        // on the light tail, which the aperture cannot do.
        if t < self.max_eye_depth {
            if let Some(eye) = path.eye_tail {
                let forward = arena
                    .direction(eye, light)
                    .map_or(0.0, |v| arena.pdf_toward(eye, &v))
                    * gle;
                pdf[s - 1] = pdf[s] * ratio(forward, area_pdf(arena, light));
            }
        }

        let mut yip1 = path.eye_tail;
        let mut yi = light;
        for i in (1..s).rev() {
            if k + 2 - i > self.max_eye_depth {
                break;
            }
            let Some(yim1) = arena.parent(yi) else {
                break;
            };

            let reverse = match yip1 {
                Some(yip1) if arena[yip1].specular => arena[yip1].pdf,
                Some(yip1) => arena
                    .direction(yip1, yi)
                    .map_or(0.0, |v| arena.reverse_pdf_toward(yi, &v)),
                None => 0.0,
            };
            pdf[i - 1] = pdf[i]
                * ratio(reverse * arena[yi].geometric_factor, area_pdf(arena, yim1));

            yip1 = Some(yi);
            yi = yim1;
        }

        let mut previous = false;
        for (i, yim1) in (1..=s).rev().zip(arena.ancestors(light)) {
            let specular = arena[yim1].specular;
            if previous || specular {
                pdf[i - 1] = 0.0;
            }
            previous = specular;
        }
    }
}

impl BidiPathStrategy for MultipleImportanceSamplingStrategy {
    fn trace_eye_path(
        &self,
        scene: &dyn Scene,
        sensor: &dyn Sensor,
        p: &Point2f,
        arena: &mut PathArena,
        rng: &mut dyn Random,
    ) -> Option<NodeId> {
        if self.max_eye_depth == 0 {
            return None;
        }
        let root = sample_eye_root(sensor, p, arena, rng);
        expand(scene, arena, root, self.max_eye_depth - 1, rng)
    }

    fn trace_light_path(
        &self,
        scene: &dyn Scene,
        emitter: &dyn Emitter,
        arena: &mut PathArena,
        rng: &mut dyn Random,
    ) -> Option<NodeId> {
        if self.max_light_depth == 0 {
            return None;
        }
        let root = sample_light_root(emitter, arena, rng);
        expand(scene, arena, root, self.max_light_depth - 1, rng)
    }

    fn weight(&self, path: &Path) -> Float {
        let s = path.light_path_length();
        let t = path.eye_path_length();
        if s + t < 2 {
            return 0.0;
        }
        let k = s + t - 1;

        let gle = match (path.light_tail, path.eye_tail) {
            (Some(light), Some(eye)) => path.arena.geometric_factor(light, eye),
            _ => 1.0,
        };

        // pdf[i] is the density of the technique with i light subpath
        // vertices relative to the one that produced the path.
        let mut pdf = vec![0.0; k + 2];
        pdf[s] = 1.0;

        if let Some(eye) = path.eye_tail {
            self.walk_eye_subpath(path, eye, gle, &mut pdf);
        }
        if let Some(light) = path.light_tail {
            self.walk_light_subpath(path, light, gle, &mut pdf);
        }

        // The aperture is not part of the scene.
        pdf[k + 1] = 0.0;

        let total: Float = pdf.iter().map(|&p| self.heuristic.apply(p)).sum();
        if total > 0.0 && total.is_finite() {
            self.heuristic.apply(pdf[s]) / total
        } else {
            0.0
        }
    }
}

/// Returns the area density with which a node was reached from its parent.
fn area_pdf(arena: &PathArena, id: NodeId) -> Float {
    arena[id].pdf * arena[id].geometric_factor
}

/// Returns `num / den`, or 0 when either is not positive.
fn ratio(num: Float, den: Float) -> Float {
    if num > 0.0 && den > 0.0 {
        num / den
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use pbrt_core::camera::Endpoint;
    use pbrt_core::rng::SequenceRandom;
    use pbrt_core::spectrum::*;
    use float_cmp::*;
    use proptest::prelude::*;

    /// Wall points from the emitter end of a path; the last one is seen by
    /// the pinhole.
    fn wall_points(n: usize, twist: Float) -> Vec<Point3f> {
        let mut points: Vec<Point3f> = (0..n - 1)
            .map(|i| {
                let a = twist + 1.3 * i as Float;
                wall_point(Vector3f::new(a.cos(), a.sin(), -0.4 + 0.2 * i as Float))
            })
            .collect();
        points.push(wall_point(Vector3f::new(0.2 * twist.sin(), 0.1, 1.0)));
        points
    }

    /// Splits the path through `points` into `s` light vertices and the
    /// rest, ending at the pinhole, and returns the weight of the split.
    fn split_weight(strategy: &dyn BidiPathStrategy, points: &[Point3f], s: usize) -> Float {
        let furnace = furnace(0.5);
        let sensor = pinhole();
        let mut arena = PathArena::new();

        let light = (s > 0).then(|| {
            let root = light_root_at(&furnace, &mut arena, points[0]);
            extend_through(&furnace, &mut arena, root, &points[1..s])
        });
        let last = points[points.len() - 1];
        let eye = eye_root_toward(&sensor, &mut arena, last);
        let eye_points: Vec<Point3f> = points[s..].iter().rev().copied().collect();
        let eye = extend_through(&furnace, &mut arena, eye, &eye_points);

        strategy.weight(&Path::new(&arena, light, Some(eye)))
    }

    #[test]
    fn direct_view_splits_two_ways() {
        // A wall seen directly is either hit by the eye subpath or
        // connected to the pinhole.
        let strategy = MultipleImportanceSamplingStrategy::balance(4, 4);
        let points = wall_points(1, 0.0);
        let w1 = split_weight(&strategy, &points, 1);
        let w0 = split_weight(&strategy, &points, 0);
        assert!(approx_eq!(f64, w0 + w1, 1.0, epsilon = 1e-9));
        assert!(w0 > 0.0 && w1 > 0.0);
    }

    #[test]
    fn depth_limits_remove_techniques() {
        let points = wall_points(3, 0.4);
        // Light subpaths of a single vertex: only s = 0 and s = 1 remain.
        let strategy = MultipleImportanceSamplingStrategy::balance(1, 8);
        let w0 = split_weight(&strategy, &points, 0);
        let w1 = split_weight(&strategy, &points, 1);
        assert!(approx_eq!(f64, w0 + w1, 1.0, epsilon = 1e-9));

        // Eye subpaths of a single vertex: only light tracing remains.
        let strategy = MultipleImportanceSamplingStrategy::balance(8, 1);
        assert!(approx_eq!(f64, split_weight(&strategy, &points, 3), 1.0, epsilon = 1e-9));
    }

    #[test]
    fn specular_emitter_cannot_be_hit_by_the_eye_subpath() {
        let furnace = furnace(0.5);
        let strategy = MultipleImportanceSamplingStrategy::power(4, 4);
        let target = wall_point(Vector3f::new(0.0, 0.2, 1.0));
        let weight = |specular: bool| {
            let mut arena = PathArena::new();
            let wall = surface(furnace.intersect(&Ray::new(Point3f::ORIGIN, -Vector3f::Z_AXIS)));
            let area = furnace.area();
            let light = arena.push_root(
                Subpath::Light,
                Endpoint::new(wall, Spectrum::splat(area), 1.0 / area, specular),
                [0.0; 3],
            );
            let eye = eye_root_toward(&pinhole(), &mut arena, target);
            let hit = extend_through(&furnace, &mut arena, eye, &[target]);
            strategy.weight(&Path::new(&arena, Some(light), Some(hit)))
        };
        let diffuse = weight(false);
        let specular = weight(true);
        assert!(diffuse > 0.0 && diffuse < 1.0);
        assert!(specular > diffuse);
    }

    #[test]
    fn every_absent_combination_is_handled() {
        let furnace = furnace(0.5);
        let strategy = MultipleImportanceSamplingStrategy::power(3, 3);
        let mut arena = PathArena::new();
        let mut rng = SequenceRandom::new(&[0.3, 0.6, 0.2]);
        let light = strategy.trace_light_path(&furnace, &furnace, &mut arena, &mut rng);
        let eye = strategy.trace_eye_path(
            &furnace,
            &pinhole(),
            &Point2f::new(0.5, 0.5),
            &mut arena,
            &mut rng,
        );
        assert_eq!(strategy.weight(&Path::new(&arena, None, None)), 0.0);
        assert_eq!(strategy.weight(&Path::new(&arena, light, None)), 0.0);
        let w = strategy.weight(&Path::new(&arena, None, eye));
        assert!((0.0..=1.0).contains(&w));
        let w = strategy.weight(&Path::new(&arena, light, eye));
        assert!((0.0..=1.0).contains(&w));

        let eye_root = Path::new(&arena, None, eye.map(|e| arena.ancestors(e).last().unwrap()));
        assert_eq!(strategy.weight(&eye_root), 0.0);
    }

    #[test]
    fn skipped_subpaths_are_absent() {
        let furnace = furnace(0.5);
        let strategy = MultipleImportanceSamplingStrategy::balance(0, 0);
        let mut arena = PathArena::new();
        let mut rng = SequenceRandom::new(&[0.5]);
        assert!(strategy
            .trace_light_path(&furnace, &furnace, &mut arena, &mut rng)
            .is_none());
        assert!(strategy
            .trace_eye_path(&furnace, &pinhole(), &Point2f::new(0.5, 0.5), &mut arena, &mut rng)
            .is_none());
        assert_eq!(rng.draws(), 0);
    }

    proptest! {
        #[test]
        fn weights_of_all_splits_sum_to_one(n in 1usize..6, twist in 0.0..6.0f64, power in proptest::bool::ANY) {
            let strategy = if power {
                MultipleImportanceSamplingStrategy::power(10, 10)
            } else {
                MultipleImportanceSamplingStrategy::balance(10, 10)
            };
            let points = wall_points(n, twist);
            let weights: Vec<Float> = (0..=n).map(|s| split_weight(&strategy, &points, s)).collect();
            prop_assert!(weights.iter().all(|w| (0.0..=1.0 + 1e-12).contains(w)));
            let total: Float = weights.iter().sum();
            prop_assert!(approx_eq!(f64, total, 1.0, epsilon = 1e-9), "weights {:?}", weights);
        }
    }
}
