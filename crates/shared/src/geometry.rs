//! Planar site geometry.
//!
//! Site coordinates are already planar, so projection is the identity: a
//! vertex at (x, y) in the dataset is drawn at (x, y) in the SVG view box.

use std::fmt::Write;

use crate::error::{Result, SiteError};

/// Fraction of the view box a framed feature may occupy.
const FRAME_FILL: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    fn from_position(pos: &[f64]) -> Result<Self> {
        match pos {
            [x, y, ..] => Ok(Point::new(*x, *y)),
            _ => Err(SiteError::precondition(format!(
                "position needs two coordinates, got {}",
                pos.len()
            ))),
        }
    }
}

/// A polyline; polygon rings are stored `closed` without the repeated vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub vertices: Vec<Point>,
    pub closed: bool,
}

/// Flattened geometry of one feature: free-standing points plus lines/rings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    pub points: Vec<Point>,
    pub lines: Vec<Line>,
}

/// Axis-aligned bounding box `[[x0, y0], [x1, y1]]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    fn extend(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }
}

impl Shape {
    pub fn from_geometry(geometry: &geojson::Geometry) -> Result<Self> {
        let mut shape = Shape::default();
        shape.push_value(&geometry.value)?;
        Ok(shape)
    }

    fn push_value(&mut self, value: &geojson::Value) -> Result<()> {
        use geojson::Value;
        match value {
            Value::Point(pos) => self.points.push(Point::from_position(pos)?),
            Value::MultiPoint(positions) => {
                for pos in positions {
                    self.points.push(Point::from_position(pos)?);
                }
            }
            Value::LineString(line) => self.push_line(line, false)?,
            Value::MultiLineString(lines) => {
                for line in lines {
                    self.push_line(line, false)?;
                }
            }
            Value::Polygon(rings) => {
                for ring in rings {
                    self.push_line(ring, true)?;
                }
            }
            Value::MultiPolygon(polygons) => {
                for ring in polygons.iter().flatten() {
                    self.push_line(ring, true)?;
                }
            }
            Value::GeometryCollection(geometries) => {
                for g in geometries {
                    self.push_value(&g.value)?;
                }
            }
        }
        Ok(())
    }

    fn push_line(&mut self, positions: &[Vec<f64>], closed: bool) -> Result<()> {
        let mut vertices = positions
            .iter()
            .map(|p| Point::from_position(p))
            .collect::<Result<Vec<_>>>()?;
        // GeoJSON rings repeat their first vertex; the SVG path closes with Z instead.
        if closed && vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if !vertices.is_empty() {
            self.lines.push(Line { vertices, closed });
        }
        Ok(())
    }

    /// Bounding box of every vertex and point, `None` for an empty shape.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut all = self
            .points
            .iter()
            .chain(self.lines.iter().flat_map(|l| l.vertices.iter()));
        let first = *all.next()?;
        let mut bounds = Bounds {
            min: first,
            max: first,
        };
        for p in all {
            bounds.extend(*p);
        }
        Some(bounds)
    }

    /// SVG path data; points become circles of `point_radius`.
    pub fn path_data(&self, point_radius: f64) -> String {
        let mut d = String::new();
        for line in &self.lines {
            for (i, v) in line.vertices.iter().enumerate() {
                let cmd = if i == 0 { 'M' } else { 'L' };
                let _ = write!(d, "{}{},{}", cmd, v.x, v.y);
            }
            if line.closed {
                d.push('Z');
            }
        }
        let r = point_radius;
        for p in &self.points {
            let _ = write!(
                d,
                "M{},{}m0,{}a{},{} 0 1,1 0,{}a{},{} 0 1,1 0,{}z",
                p.x,
                p.y,
                r,
                r,
                r,
                -2.0 * r,
                r,
                r,
                2.0 * r
            );
        }
        d
    }
}

/// Pan/zoom state: screen = k * site + (x, y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: ZoomTransform = ZoomTransform {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    pub fn apply(&self, p: Point) -> Point {
        Point::new(p.x * self.k + self.x, p.y * self.k + self.y)
    }

    pub fn invert(&self, p: Point) -> Point {
        Point::new((p.x - self.x) / self.k, (p.y - self.y) / self.k)
    }

    /// Transform that centres `bounds` in a `width`×`height` view, filling
    /// 90% of the tighter axis, never zooming past `max_zoom`.
    ///
    /// Zero-area bounds (a single point) divide to infinity and clamp to
    /// `max_zoom`.
    pub fn frame(bounds: &Bounds, width: f64, height: f64, max_zoom: f64) -> Self {
        let ratio = (bounds.width() / width).max(bounds.height() / height);
        let k = max_zoom.min(FRAME_FILL / ratio);
        let c = bounds.center();
        ZoomTransform {
            k,
            x: width / 2.0 - k * c.x,
            y: height / 2.0 - k * c.y,
        }
    }

    /// Rescale to `new_k` keeping the view point `anchor` over the same site point.
    pub fn zoom_at(&self, anchor: Point, new_k: f64) -> Self {
        let site = self.invert(anchor);
        ZoomTransform {
            k: new_k,
            x: anchor.x - site.x * new_k,
            y: anchor.y - site.y * new_k,
        }
    }

    pub fn translate_by(&self, dx: f64, dy: f64) -> Self {
        ZoomTransform {
            k: self.k,
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Stroke width that keeps outlines at one screen unit.
    pub fn stroke_width(&self) -> f64 {
        1.0 / self.k
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> Shape {
        let geometry = geojson::Geometry::new(geojson::Value::Polygon(vec![vec![
            vec![x0, y0],
            vec![x0 + size, y0],
            vec![x0 + size, y0 + size],
            vec![x0, y0 + size],
            vec![x0, y0],
        ]]));
        Shape::from_geometry(&geometry).unwrap()
    }

    #[test]
    fn test_polygon_ring_drops_closing_vertex() {
        let shape = square(10.0, 20.0, 5.0);
        assert_eq!(shape.lines.len(), 1);
        assert_eq!(shape.lines[0].vertices.len(), 4);
        assert!(shape.lines[0].closed);
    }

    #[test]
    fn test_polygon_path_data() {
        let shape = square(10.0, 20.0, 5.0);
        assert_eq!(shape.path_data(4.5), "M10,20L15,20L15,25L10,25Z");
    }

    #[test]
    fn test_linestring_path_is_open() {
        let geometry = geojson::Geometry::new(geojson::Value::LineString(vec![
            vec![0.0, 0.0],
            vec![3.0, 4.0],
        ]));
        let shape = Shape::from_geometry(&geometry).unwrap();
        assert_eq!(shape.path_data(4.5), "M0,0L3,4");
    }

    #[test]
    fn test_point_path_is_circle() {
        let geometry = geojson::Geometry::new(geojson::Value::Point(vec![100.0, 50.0]));
        let shape = Shape::from_geometry(&geometry).unwrap();
        assert_eq!(
            shape.path_data(4.5),
            "M100,50m0,4.5a4.5,4.5 0 1,1 0,-9a4.5,4.5 0 1,1 0,9z"
        );
    }

    #[test]
    fn test_short_position_rejected() {
        let geometry = geojson::Geometry::new(geojson::Value::Point(vec![1.0]));
        let err = Shape::from_geometry(&geometry).unwrap_err();
        assert!(matches!(err, SiteError::PreconditionViolation { .. }));
    }

    #[test]
    fn test_bounds_of_polygon() {
        let b = square(10.0, 20.0, 5.0).bounds().unwrap();
        assert_eq!(b.min, Point::new(10.0, 20.0));
        assert_eq!(b.max, Point::new(15.0, 25.0));
        assert_eq!(b.center(), Point::new(12.5, 22.5));
    }

    #[test]
    fn test_bounds_of_empty_shape() {
        assert!(Shape::default().bounds().is_none());
    }

    #[test]
    fn test_bounds_span_geometry_collection() {
        let geometry = geojson::Geometry::new(geojson::Value::GeometryCollection(vec![
            geojson::Geometry::new(geojson::Value::Point(vec![-5.0, 2.0])),
            geojson::Geometry::new(geojson::Value::LineString(vec![
                vec![0.0, 0.0],
                vec![8.0, 9.0],
            ])),
        ]));
        let b = Shape::from_geometry(&geometry).unwrap().bounds().unwrap();
        assert_eq!(b.min, Point::new(-5.0, 0.0));
        assert_eq!(b.max, Point::new(8.0, 9.0));
    }

    #[test]
    fn test_frame_uses_tighter_axis() {
        // 52 wide in a 520 view → ratio 0.1; 30 tall in 600 → 0.05. k = 0.9 / 0.1 = 9 → capped at 8.
        let b = Bounds {
            min: Point::new(0.0, 0.0),
            max: Point::new(52.0, 30.0),
        };
        let t = ZoomTransform::frame(&b, 520.0, 600.0, 8.0);
        assert!((t.k - 8.0).abs() < 1e-9);

        let b = Bounds {
            min: Point::new(100.0, 100.0),
            max: Point::new(360.0, 200.0),
        };
        let t = ZoomTransform::frame(&b, 520.0, 600.0, 8.0);
        assert!((t.k - 1.8).abs() < 1e-9);
        // The centre of the bounds lands on the centre of the view.
        let c = t.apply(b.center());
        assert!((c.x - 260.0).abs() < 1e-9);
        assert!((c.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_frame_point_clamps_to_max_zoom() {
        let b = Bounds {
            min: Point::new(40.0, 40.0),
            max: Point::new(40.0, 40.0),
        };
        let t = ZoomTransform::frame(&b, 520.0, 600.0, 8.0);
        assert_eq!(t.k, 8.0);
        assert!((t.x - (260.0 - 320.0)).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_at_keeps_anchor_fixed() {
        let t = ZoomTransform {
            k: 2.0,
            x: -30.0,
            y: 10.0,
        };
        let anchor = Point::new(200.0, 150.0);
        let before = t.invert(anchor);
        let zoomed = t.zoom_at(anchor, 5.0);
        let after = zoomed.invert(anchor);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_stroke_width_follows_scale() {
        assert_eq!(ZoomTransform::default().stroke_width(), 1.0);
        let t = ZoomTransform::IDENTITY.zoom_at(Point::new(0.0, 0.0), 4.0);
        assert_eq!(t.stroke_width(), 0.25);
    }

    #[test]
    fn test_translate_by() {
        let t = ZoomTransform::IDENTITY.translate_by(5.0, -3.0);
        assert_eq!(t.apply(Point::new(1.0, 1.0)), Point::new(6.0, -2.0));
    }
}
