use imageproc::point::Point;

/// A closed external boundary extracted from an edge map.
///
/// Points are vertices in working-image coordinates, in traversal order.
/// The boundary is implicitly closed (last point connects back to the first).
#[derive(Debug, Clone)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    /// Enclosed area via the shoelace formula (absolute value).
    pub fn area(&self) -> f64 {
        let pts = &self.points;
        let n = pts.len();
        if n < 3 {
            return 0.0;
        }
        let signed: f64 = (0..n)
            .map(|i| {
                let j = (i + 1) % n;
                pts[i].x as f64 * pts[j].y as f64 - pts[j].x as f64 * pts[i].y as f64
            })
            .sum::<f64>()
            / 2.0;
        signed.abs()
    }

    /// Axis-aligned bounding box as (min_x, min_y, max_x, max_y).
    pub fn bounding_box(&self) -> Option<(i32, i32, i32, i32)> {
        let first = self.points.first()?;
        let mut bbox = (first.x, first.y, first.x, first.y);
        for p in &self.points {
            bbox.0 = bbox.0.min(p.x);
            bbox.1 = bbox.1.min(p.y);
            bbox.2 = bbox.2.max(p.x);
            bbox.3 = bbox.3.max(p.y);
        }
        Some(bbox)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
