use glam::Vec2;

use super::queries::{circle_center_distance, polygon_closest_point};
use crate::core::shape::{Collidable, ShapeKind};
use crate::utils::allocator::ShapeId;

/// Result of probing one shape's face normals against another shape.
#[derive(Debug, Clone, Copy)]
pub struct Penetration {
    pub depth: f32,
    pub face: usize,
    pub support: Vec2,
}

/// Separating-axis helpers over polygon vertex/normal slices.
pub struct SatProbe;

impl SatProbe {
    /// Vertex maximizing the dot product with `direction`; ties keep the
    /// first vertex encountered.
    pub fn support_point(vertices: &[Vec2], direction: Vec2) -> Vec2 {
        let mut best_projection = f32::NEG_INFINITY;
        let mut best = Vec2::ZERO;
        for &vertex in vertices {
            let projection = vertex.dot(direction);
            if projection > best_projection {
                best_projection = projection;
                best = vertex;
            }
        }
        best
    }

    /// One-sided penetration probe: for every face normal of A, take B's
    /// support point along the reversed normal and keep the largest signed
    /// distance. Negative depth means the shapes are not separated along
    /// any of A's axes; a full overlap decision needs the probe in BOTH
    /// directions. Depths are weighted by edge length because the normals
    /// are not unit length.
    pub fn penetration(
        a_vertices: &[Vec2],
        a_normals: &[Vec2],
        b_vertices: &[Vec2],
    ) -> Penetration {
        let mut best = Penetration {
            depth: f32::NEG_INFINITY,
            face: 0,
            support: Vec2::ZERO,
        };
        for (i, (&normal, &vertex)) in a_normals.iter().zip(a_vertices).enumerate() {
            let support = Self::support_point(b_vertices, -normal);
            let depth = normal.dot(support - vertex);
            if depth > best.depth {
                best = Penetration {
                    depth,
                    face: i,
                    support,
                };
            }
        }
        best
    }
}

/// A detected overlap, handed to the resolve handler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub reference: ShapeId,
    pub incident: ShapeId,
    /// Face of the reference shape chosen as the resolution axis; `None`
    /// for circle/circle pairs, which have no face concept.
    pub face: Option<usize>,
    pub support: Vec2,
}

/// Exact pairwise overlap tests.
pub struct NarrowPhase;

impl NarrowPhase {
    pub fn test(a: &Collidable, b: &Collidable) -> Option<Contact> {
        match (&a.kind, &b.kind) {
            (
                ShapeKind::Circle {
                    center: center_a,
                    radius: radius_a,
                },
                ShapeKind::Circle {
                    center: center_b,
                    radius: radius_b,
                },
            ) => {
                // Touching circles (distance == r_a + r_b) do not overlap.
                if circle_center_distance(*center_a, *center_b) < radius_a + radius_b {
                    Some(Contact {
                        reference: a.id,
                        incident: b.id,
                        face: None,
                        support: Vec2::ZERO,
                    })
                } else {
                    None
                }
            }
            (ShapeKind::Circle { center, radius }, ShapeKind::Polygon { .. }) => {
                Self::circle_polygon(b, a, *center, *radius)
            }
            (ShapeKind::Polygon { .. }, ShapeKind::Circle { center, radius }) => {
                Self::circle_polygon(a, b, *center, *radius)
            }
            (ShapeKind::Polygon { .. }, ShapeKind::Polygon { .. }) => {
                let probe_ab = SatProbe::penetration(a.vertices(), a.normals(), b.vertices());
                let probe_ba = SatProbe::penetration(b.vertices(), b.normals(), a.vertices());

                // Overlap requires BOTH one-sided probes negative; a single
                // negative probe is a near miss.
                if probe_ab.depth < 0.0 && probe_ba.depth < 0.0 {
                    // Resolve along the shallower axis (less negative depth).
                    let contact = if probe_ab.depth > probe_ba.depth {
                        Contact {
                            reference: a.id,
                            incident: b.id,
                            face: Some(probe_ab.face),
                            support: probe_ab.support,
                        }
                    } else {
                        Contact {
                            reference: b.id,
                            incident: a.id,
                            face: Some(probe_ba.face),
                            support: probe_ba.support,
                        }
                    };
                    Some(contact)
                } else {
                    None
                }
            }
        }
    }

    /// Circle against polygon, normalized polygon-first. The boundary case
    /// (distance == radius) counts as an overlap.
    fn circle_polygon(
        polygon: &Collidable,
        circle: &Collidable,
        center: Vec2,
        radius: f32,
    ) -> Option<Contact> {
        let closest = polygon_closest_point(polygon.vertices(), center);
        if closest.distance <= radius {
            Some(Contact {
                reference: polygon.id,
                incident: circle.id,
                face: Some(closest.face),
                support: closest.point,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ]
    }

    #[test]
    fn support_point_keeps_first_of_tied_vertices() {
        let vertices = square();
        // Both right-edge corners project equally along +x; the first one
        // encountered wins.
        let support = SatProbe::support_point(&vertices, Vec2::X);
        assert_eq!(support, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn penetration_is_negative_for_overlapping_squares() {
        let a = Collidable::aabb(0.0, 0.0, 10.0, 10.0);
        let b = Collidable::aabb(5.0, 5.0, 10.0, 10.0);
        let probe = SatProbe::penetration(a.vertices(), a.normals(), b.vertices());
        assert!(probe.depth < 0.0, "depth was {}", probe.depth);
    }

    #[test]
    fn penetration_depth_scales_with_edge_length() {
        // Same geometry, doubled edge lengths: reported depth doubles too
        // because the probing normals keep their edge-length magnitude.
        let small = Collidable::aabb(0.0, 0.0, 2.0, 2.0);
        let wide = Collidable::aabb(0.0, 0.0, 4.0, 4.0);
        let target = Collidable::aabb(1.0, 0.0, 2.0, 2.0);

        let shallow = SatProbe::penetration(small.vertices(), small.normals(), target.vertices());
        let deep = SatProbe::penetration(wide.vertices(), wide.normals(), target.vertices());
        assert_relative_eq!(deep.depth, 2.0 * shallow.depth, epsilon = 1e-4);
    }

    #[test]
    fn touching_circles_do_not_overlap() {
        let a = Collidable::circle(0.0, 0.0, 2.0).unwrap();
        let b = Collidable::circle(5.0, 0.0, 3.0).unwrap();
        assert!(NarrowPhase::test(&a, &b).is_none());

        let c = Collidable::circle(4.9, 0.0, 3.0).unwrap();
        assert!(NarrowPhase::test(&a, &c).is_some());
    }

    #[test]
    fn circle_touching_polygon_boundary_overlaps() {
        let polygon = Collidable::aabb(5.0, 5.0, 10.0, 10.0);
        let circle = Collidable::circle(12.0, 5.0, 2.0).unwrap();

        let contact = NarrowPhase::test(&polygon, &circle).expect("boundary contact is inclusive");
        // Polygon is always the reference shape of a mixed pair.
        assert_eq!(contact.reference, polygon.id);
        assert_eq!(contact.face, Some(1));
        assert_relative_eq!(contact.support.x, 10.0);
        assert_relative_eq!(contact.support.y, 5.0);
    }

    #[test]
    fn one_sided_probe_alone_is_not_an_overlap() {
        // Triangle sits diagonally off the square's corner: the square's
        // axes see overlapping projections (probe < 0) while the triangle's
        // diagonal face is a separating axis (probe > 0).
        let a = Collidable::polygon(square()).unwrap();
        let b = Collidable::polygon(vec![
            Vec2::new(12.0, 9.0),
            Vec2::new(13.0, 13.0),
            Vec2::new(9.0, 12.0),
        ])
        .unwrap();

        let probe_ab = SatProbe::penetration(a.vertices(), a.normals(), b.vertices());
        let probe_ba = SatProbe::penetration(b.vertices(), b.normals(), a.vertices());
        assert!(probe_ab.depth < 0.0, "probe_ab was {}", probe_ab.depth);
        assert!(probe_ba.depth > 0.0, "probe_ba was {}", probe_ba.depth);

        assert!(NarrowPhase::test(&a, &b).is_none());
        assert!(NarrowPhase::test(&b, &a).is_none());
    }

    #[test]
    fn overlapping_polygons_resolve_along_the_shallower_axis() {
        let mut a = Collidable::aabb(0.0, 0.0, 10.0, 10.0);
        let mut b = Collidable::aabb(8.0, 0.0, 10.0, 10.0);
        a.id = crate::utils::allocator::ShapeId::new(0, 0);
        b.id = crate::utils::allocator::ShapeId::new(1, 0);

        let contact = NarrowPhase::test(&a, &b).expect("boxes overlap");
        assert!(contact.face.is_some());
        assert!(contact.reference == a.id || contact.reference == b.id);
        assert_ne!(contact.reference, contact.incident);
    }
}
