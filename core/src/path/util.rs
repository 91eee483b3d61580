//! Path utilities

use crate::common::*;
use crate::geometry::*;
use crate::interaction::*;

/// Returns the unit direction from one position to another, or `None` if
/// both lie at infinity or coincide.
///
/// * `from` - Start position.
/// * `to`   - End position.
pub fn direction(from: &Position, to: &Position) -> Option<Vector3f> {
    match (from, to) {
        (Position::Direction(_), Position::Direction(_)) => None,
        (Position::Direction(d), Position::Point(_)) => Some(-d.normalize()),
        (Position::Point(_), Position::Direction(d)) => Some(d.normalize()),
        (Position::Point(p), Position::Point(q)) => {
            let v = *q - *p;
            if v.length_squared() > 0.0 {
                Some(v.normalize())
            } else {
                None
            }
        }
    }
}

/// Returns the geometric factor coupling two vertices: the product of the
/// clamped cosines divided by the squared distance. A vertex at infinity
/// contributes only the other vertex's cosine; two vertices at infinity
/// are not coupled.
///
/// * `a` - First vertex.
/// * `b` - Second vertex.
pub fn geometric_factor(a: &dyn Interaction, b: &dyn Interaction) -> Float {
    match (a.position(), b.position()) {
        (Position::Direction(_), Position::Direction(_)) => 0.0,
        (Position::Point(_), Position::Direction(d)) => max(a.cosine(&d.normalize()), 0.0),
        (Position::Direction(d), Position::Point(_)) => max(b.cosine(&d.normalize()), 0.0),
        (Position::Point(p), Position::Point(q)) => {
            let v = q - p;
            let d2 = v.length_squared();
            if d2 == 0.0 {
                return 0.0;
            }
            let v = v / d2.sqrt();
            max(a.cosine(&v), 0.0) * max(b.cosine(&-v), 0.0) / d2
        }
    }
}

/// Returns true if two positions are of the same kind and agree within
/// machine epsilon in every coordinate.
///
/// * `a` - First position.
/// * `b` - Second position.
pub fn is_same_position(a: &Position, b: &Position) -> bool {
    if a.is_at_infinity() != b.is_at_infinity() {
        return false;
    }
    let u = a.to_vector();
    let v = b.to_vector();
    nearly_equal(u.x, v.x, MACHINE_EPSILON)
        && nearly_equal(u.y, v.y, MACHINE_EPSILON)
        && nearly_equal(u.z, v.z, MACHINE_EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::*;
    use float_cmp::*;

    struct Facing {
        p: Position,
        n: Vector3f,
    }

    impl Interaction for Facing {
        fn position(&self) -> Position {
            self.p
        }

        fn cosine(&self, v: &Vector3f) -> Float {
            self.n.dot(v)
        }

        fn sample(
            &self,
            _wi: Option<&Vector3f>,
            _mode: TransportMode,
            _ru: Float,
            _rv: Float,
            _rj: Float,
        ) -> Option<ScatteredRay> {
            None
        }

        fn scatter(&self, _wi: Option<&Vector3f>, _wo: &Vector3f, _mode: TransportMode) -> Spectrum {
            Spectrum::ZERO
        }

        fn pdf(&self, _wi: Option<&Vector3f>, _wo: &Vector3f, _mode: TransportMode) -> Float {
            0.0
        }
    }

    fn point(x: Float, y: Float, z: Float, n: Vector3f) -> Facing {
        Facing {
            p: Position::Point(Point3f::new(x, y, z)),
            n,
        }
    }

    #[test]
    fn direction_handles_points_at_infinity() {
        let p = Position::Point(Point3f::new(1.0, 0.0, 0.0));
        let inf = Position::Direction(Vector3f::new(0.0, 0.0, 2.0));
        assert_eq!(direction(&p, &inf), Some(Vector3f::Z_AXIS));
        assert_eq!(direction(&inf, &p), Some(-Vector3f::Z_AXIS));
        assert_eq!(direction(&inf, &inf), None);
        assert_eq!(direction(&p, &p), None);
    }

    #[test]
    fn geometric_factor_of_facing_points() {
        let a = point(0.0, 0.0, 0.0, Vector3f::Z_AXIS);
        let b = point(0.0, 0.0, 2.0, -Vector3f::Z_AXIS);
        assert!(approx_eq!(f64, geometric_factor(&a, &b), 0.25));
        assert!(approx_eq!(f64, geometric_factor(&b, &a), 0.25));
    }

    #[test]
    fn geometric_factor_clamps_back_facing() {
        let a = point(0.0, 0.0, 0.0, -Vector3f::Z_AXIS);
        let b = point(0.0, 0.0, 2.0, -Vector3f::Z_AXIS);
        assert_eq!(geometric_factor(&a, &b), 0.0);
    }

    #[test]
    fn geometric_factor_with_infinity_uses_single_cosine() {
        let a = point(0.0, 0.0, 0.0, Vector3f::Z_AXIS);
        let inf = Facing {
            p: Position::Direction(Vector3f::new(0.0, 0.6, 0.8)),
            n: Vector3f::ZERO,
        };
        assert!(approx_eq!(f64, geometric_factor(&a, &inf), 0.8));
        assert!(approx_eq!(f64, geometric_factor(&inf, &a), 0.8));
        assert_eq!(geometric_factor(&inf, &inf), 0.0);
    }

    #[test]
    fn same_position_requires_same_kind() {
        let p = Position::Point(Point3f::new(0.0, 0.0, 1.0));
        let d = Position::Direction(Vector3f::Z_AXIS);
        assert!(is_same_position(&p, &p));
        assert!(!is_same_position(&p, &d));
        assert!(!is_same_position(&p, &Position::Point(Point3f::new(0.0, 0.0, 1.1))));
    }
}
