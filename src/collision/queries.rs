use glam::Vec2;

/// Ephemeral two-endpoint segment used inside distance computations.
#[derive(Debug, Clone, Copy)]
pub struct LineSegment {
    pub a: Vec2,
    pub b: Vec2,
}

impl LineSegment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.closest_point_to(point).1
    }

    /// Closest point on the segment and its distance to `point`.
    ///
    /// The projection parameter is clamped to [0, 1]; a zero-length
    /// segment degenerates to point-to-point distance.
    pub fn closest_point_to(&self, point: Vec2) -> (Vec2, f32) {
        let span = self.b - self.a;
        let length_squared = span.length_squared();
        if length_squared == 0.0 {
            return (self.a, point.distance(self.a));
        }
        let t = ((point - self.a).dot(span) / length_squared).clamp(0.0, 1.0);
        let closest = self.a + span * t;
        (closest, point.distance(closest))
    }
}

/// Even-odd horizontal ray-cast containment test.
pub fn polygon_contains_point(vertices: &[Vec2], point: Vec2) -> bool {
    if vertices.is_empty() {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (vi, vj) = (vertices[i], vertices[j]);
        if (vi.y > point.y) != (vj.y > point.y)
            && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// True iff every vertex of `inner` lies inside `outer`.
///
/// Vertex sampling only: exact for convex-in-convex containment with
/// non-crossing edges, which is all the quadtree placement needs.
pub fn polygon_contains_polygon(outer: &[Vec2], inner: &[Vec2]) -> bool {
    inner
        .iter()
        .all(|&vertex| polygon_contains_point(outer, vertex))
}

/// Minimum distance from `point` to the polygon's boundary.
pub fn polygon_distance_to_point(vertices: &[Vec2], point: Vec2) -> f32 {
    polygon_closest_point(vertices, point).distance
}

/// Closest boundary point together with the edge that owns it.
#[derive(Debug, Clone, Copy)]
pub struct ClosestEdgePoint {
    pub distance: f32,
    pub point: Vec2,
    pub face: usize,
}

pub fn polygon_closest_point(vertices: &[Vec2], point: Vec2) -> ClosestEdgePoint {
    let mut best = ClosestEdgePoint {
        distance: f32::INFINITY,
        point: Vec2::ZERO,
        face: 0,
    };
    let count = vertices.len();
    for i in 0..count {
        let edge = LineSegment::new(vertices[i], vertices[(i + 1) % count]);
        let (closest, distance) = edge.closest_point_to(point);
        if distance < best.distance {
            best = ClosestEdgePoint {
                distance,
                point: closest,
                face: i,
            };
        }
    }
    best
}

/// Plain center-to-center Euclidean distance.
pub fn circle_center_distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}
