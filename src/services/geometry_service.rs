// src/services/geometry_service.rs
//
// Turns a line of text into extruded, beveled triangle geometry.
// Glyph outlines are flattened into polygons, capped with lyon's fill
// tessellator and joined front to back by rings of side walls.

use glam::{Vec2, Vec3};
use lyon::geom::{CubicBezierSegment, QuadraticBezierSegment};
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers,
};
use std::f32::consts::FRAC_PI_2;
use ttf_parser::OutlineBuilder;

use super::font_service::GlyphSource;
use crate::config::ExtrusionParams;
use crate::errors::GeometryError;
use crate::models::TextGeometry;

// Squared distance under which two outline points count as the same point
const WELD_EPSILON_SQ: f32 = 1e-10;
// Sharp corners would push the bevel miter towards infinity
const MIN_MITER_COS: f32 = 0.25;

/// Collects flattened glyph contours in text space (y up, pen starting at x = 0).
struct ContourCollector {
    contours: Vec<Vec<Vec2>>,
    current: Vec<Vec2>,
    origin_x: f32,
    scale: f32,
    curve_segments: u32,
}

impl ContourCollector {
    fn new(scale: f32, curve_segments: u32) -> Self {
        Self {
            contours: Vec::new(),
            current: Vec::new(),
            origin_x: 0.0,
            scale,
            curve_segments: curve_segments.max(1),
        }
    }

    fn to_text_space(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(self.origin_x + x * self.scale, y * self.scale)
    }

    fn last_point(&self) -> Vec2 {
        self.current.last().copied().unwrap_or(Vec2::ZERO)
    }

    fn sample_curve(&mut self, sample: impl Fn(f32) -> lyon::math::Point) {
        for i in 1..=self.curve_segments {
            let p = sample(i as f32 / self.curve_segments as f32);
            self.current.push(Vec2::new(p.x, p.y));
        }
    }

    fn finish_contour(&mut self) {
        let mut contour = std::mem::take(&mut self.current);
        contour.dedup_by(|a, b| a.distance_squared(*b) < WELD_EPSILON_SQ);
        while contour.len() > 1
            && contour[0].distance_squared(contour[contour.len() - 1]) < WELD_EPSILON_SQ
        {
            contour.pop();
        }
        if contour.len() >= 3 {
            self.contours.push(contour);
        }
    }

    fn into_contours(mut self) -> Vec<Vec<Vec2>> {
        self.finish_contour();
        self.contours
    }
}

impl OutlineBuilder for ContourCollector {
    fn move_to(&mut self, x: f32, y: f32) {
        self.finish_contour();
        let p = self.to_text_space(x, y);
        self.current.push(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.to_text_space(x, y);
        self.current.push(p);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let from = self.last_point();
        let ctrl = self.to_text_space(x1, y1);
        let to = self.to_text_space(x, y);
        let segment = QuadraticBezierSegment {
            from: point(from.x, from.y),
            ctrl: point(ctrl.x, ctrl.y),
            to: point(to.x, to.y),
        };
        self.sample_curve(|t| segment.sample(t));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let from = self.last_point();
        let ctrl1 = self.to_text_space(x1, y1);
        let ctrl2 = self.to_text_space(x2, y2);
        let to = self.to_text_space(x, y);
        let segment = CubicBezierSegment {
            from: point(from.x, from.y),
            ctrl1: point(ctrl1.x, ctrl1.y),
            ctrl2: point(ctrl2.x, ctrl2.y),
            to: point(to.x, to.y),
        };
        self.sample_curve(|t| segment.sample(t));
    }

    fn close(&mut self) {
        self.finish_contour();
    }
}

pub struct GeometryBuilder {
    tessellator: FillTessellator,
}

impl Default for GeometryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryBuilder {
    pub fn new() -> Self {
        Self {
            tessellator: FillTessellator::new(),
        }
    }

    /// Builds the geometry for `text` laid out on a single line.
    ///
    /// The result only depends on the arguments. Characters the font lacks are
    /// skipped; text without any visible outline is an error, as is empty text.
    pub fn build(
        &mut self,
        text: &str,
        glyphs: &dyn GlyphSource,
        params: &ExtrusionParams,
    ) -> Result<TextGeometry, GeometryError> {
        if text.is_empty() {
            return Err(GeometryError::EmptyText);
        }

        let contours = layout_contours(text, glyphs, params);
        if contours.is_empty() {
            return Err(GeometryError::NoOutlines(text.to_string()));
        }

        let rings = ring_layout(params);
        let (z_front, z_back) = match (rings.first(), rings.last()) {
            (Some(front), Some(back)) => (front.0, back.0),
            _ => return Err(GeometryError::NoOutlines(text.to_string())),
        };

        let mut positions: Vec<Vec3> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();

        // Caps
        let cap = self.tessellate_caps(&contours)?;
        let front_base = positions.len() as u32;
        positions.extend(cap.vertices.iter().map(|v| v.extend(z_front)));
        for tri in cap.indices.chunks_exact(3) {
            indices.extend_from_slice(&[
                front_base + tri[0],
                front_base + tri[2],
                front_base + tri[1],
            ]);
        }
        let back_base = positions.len() as u32;
        positions.extend(cap.vertices.iter().map(|v| v.extend(z_back)));
        indices.extend(cap.indices.iter().map(|i| back_base + i));

        // Side walls with bevels
        let outward_sign = outward_sign(&contours);
        for contour in &contours {
            let directions = bevel_directions(contour, outward_sign);
            let n = contour.len() as u32;
            let first_ring = positions.len() as u32;

            for &(z, offset) in &rings {
                positions.extend(
                    contour
                        .iter()
                        .zip(&directions)
                        .map(|(p, d)| (*p + *d * offset).extend(z)),
                );
            }

            for r in 0..(rings.len() as u32 - 1) {
                let a = first_ring + r * n;
                let b = a + n;
                for i in 0..n {
                    let j = (i + 1) % n;
                    indices.extend_from_slice(&[a + i, a + j, b + j, a + i, b + j, b + i]);
                }
            }
        }

        tracing::trace!(
            "Built {:?}: {} vertices, {} triangles",
            text,
            positions.len(),
            indices.len() / 3
        );

        TextGeometry::new(positions, indices)
            .ok_or_else(|| GeometryError::NoOutlines(text.to_string()))
    }

    fn tessellate_caps(
        &mut self,
        contours: &[Vec<Vec2>],
    ) -> Result<VertexBuffers<Vec2, u32>, GeometryError> {
        let mut builder = Path::builder();
        for contour in contours {
            builder.begin(point(contour[0].x, contour[0].y));
            for p in &contour[1..] {
                builder.line_to(point(p.x, p.y));
            }
            builder.end(true);
        }
        let path = builder.build();

        let mut buffers: VertexBuffers<Vec2, u32> = VertexBuffers::new();
        let options = FillOptions::tolerance(0.01).with_fill_rule(FillRule::NonZero);
        self.tessellator
            .tessellate_path(
                &path,
                &options,
                &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex| {
                    Vec2::new(vertex.position().x, vertex.position().y)
                }),
            )
            .map_err(|e| GeometryError::Tessellation(format!("{:?}", e)))?;

        Ok(buffers)
    }
}

/// Convenience wrapper for one-off builds.
pub fn build_text_geometry(
    text: &str,
    glyphs: &dyn GlyphSource,
    params: &ExtrusionParams,
) -> Result<TextGeometry, GeometryError> {
    GeometryBuilder::new().build(text, glyphs, params)
}

fn layout_contours(text: &str, glyphs: &dyn GlyphSource, params: &ExtrusionParams) -> Vec<Vec<Vec2>> {
    let scale = params.size / glyphs.units_per_em();
    let mut collector = ContourCollector::new(scale, params.curve_segments);

    for ch in text.chars() {
        collector.finish_contour();
        match glyphs.outline_glyph(ch, &mut collector) {
            Some(advance) => collector.origin_x += advance * scale,
            None => tracing::debug!("No glyph for {:?}, skipping", ch),
        }
    }

    collector.into_contours()
}

/// (z, outline offset) for every ring of side-wall vertices, front to back.
/// The first and last ring carry no offset; they border the caps.
fn ring_layout(params: &ExtrusionParams) -> Vec<(f32, f32)> {
    if !params.bevel_enabled || params.bevel_segments == 0 {
        return vec![(0.0, 0.0), (params.depth, 0.0)];
    }

    let segments = params.bevel_segments;
    let bevel_ring = |b: u32| {
        let angle = b as f32 / segments as f32 * FRAC_PI_2;
        (
            params.bevel_thickness * angle.cos(),
            params.bevel_size * angle.sin(),
        )
    };

    let mut rings = Vec::with_capacity(2 * segments as usize + 2);
    rings.extend((0..segments).map(bevel_ring).map(|(z, offset)| (-z, offset)));
    rings.push((0.0, params.bevel_size));
    rings.push((params.depth, params.bevel_size));
    rings.extend(
        (0..segments)
            .rev()
            .map(bevel_ring)
            .map(|(z, offset)| (params.depth + z, offset)),
    );
    rings
}

fn signed_area(contour: &[Vec2]) -> f32 {
    let n = contour.len();
    0.5 * (0..n)
        .map(|i| contour[i].perp_dot(contour[(i + 1) % n]))
        .sum::<f32>()
}

/// +1 when the right-hand normal of an outline edge points away from the filled
/// area, -1 otherwise. Outer contours dominate the total area, which fixes the
/// font's winding convention.
fn outward_sign(contours: &[Vec<Vec2>]) -> f32 {
    let total: f32 = contours.iter().map(|c| signed_area(c)).sum();
    if total < 0.0 {
        -1.0
    } else {
        1.0
    }
}

fn edge_normal(from: Vec2, to: Vec2, outward_sign: f32) -> Vec2 {
    let d = to - from;
    let len = d.length();
    if len <= f32::EPSILON {
        return Vec2::ZERO;
    }
    Vec2::new(d.y, -d.x) / len * outward_sign
}

/// Per-vertex bevel direction: the corner miter, scaled so that both adjacent
/// edges move out by the full offset.
fn bevel_directions(contour: &[Vec2], outward_sign: f32) -> Vec<Vec2> {
    let n = contour.len();
    (0..n)
        .map(|i| {
            let prev = contour[(i + n - 1) % n];
            let cur = contour[i];
            let next = contour[(i + 1) % n];
            let n0 = edge_normal(prev, cur, outward_sign);
            let n1 = edge_normal(cur, next, outward_sign);

            let sum = n0 + n1;
            let len = sum.length();
            if len <= f32::EPSILON {
                return n0;
            }
            let miter = sum / len;
            let reference = if n0 == Vec2::ZERO { n1 } else { n0 };
            miter / miter.dot(reference).max(MIN_MITER_COS)
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::services::font_service::tests::bundled_font;

    /// Deterministic test font: 1000 units per em, every letter is an
    /// 800 x 800 square, `O` has a square hole, `c` is built from curves.
    pub(crate) struct BlockFont {
        pub clockwise: bool,
    }

    impl BlockFont {
        fn square(&self, sink: &mut dyn OutlineBuilder, min: f32, max: f32, outer: bool) {
            let corners = [(min, min), (min, max), (max, max), (max, min)];
            // outer contours clockwise in TrueType, holes the other way
            let reversed = outer != self.clockwise;
            let order: Vec<_> = if reversed {
                corners.iter().rev().copied().collect()
            } else {
                corners.to_vec()
            };
            sink.move_to(order[0].0, order[0].1);
            for &(x, y) in &order[1..] {
                sink.line_to(x, y);
            }
            sink.close();
        }
    }

    impl GlyphSource for BlockFont {
        fn units_per_em(&self) -> f32 {
            1000.0
        }

        fn outline_glyph(&self, ch: char, sink: &mut dyn OutlineBuilder) -> Option<f32> {
            match ch {
                ' ' => Some(500.0),
                'O' => {
                    self.square(sink, 0.0, 800.0, true);
                    self.square(sink, 200.0, 600.0, false);
                    Some(1000.0)
                }
                'c' => {
                    sink.move_to(0.0, 0.0);
                    sink.quad_to(400.0, 800.0, 800.0, 0.0);
                    sink.curve_to(600.0, -200.0, 200.0, -200.0, 0.0, 0.0);
                    sink.close();
                    Some(1000.0)
                }
                c if c.is_alphanumeric() => {
                    self.square(sink, 0.0, 800.0, true);
                    Some(1000.0)
                }
                _ => None,
            }
        }
    }

    const TOLERANCE: f32 = 1e-4;

    fn assert_close(actual: Vec3, expected: Vec3) {
        assert!(
            (actual - expected).abs().max_element() < TOLERANCE,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    fn block_font() -> BlockFont {
        BlockFont { clockwise: true }
    }

    #[test]
    fn test_single_glyph_bounds_include_bevel() {
        let geometry =
            build_text_geometry("A", &block_font(), &ExtrusionParams::main_text()).unwrap();
        let bbox = geometry.bounding_box();
        // 800 units at 70 / 1000 = 56, grown by the 1.5 bevel size
        assert_close(bbox.min, Vec3::new(-1.5, -1.5, -2.0));
        assert_close(bbox.max, Vec3::new(57.5, 57.5, 22.0));
    }

    #[test]
    fn test_winding_convention_does_not_matter() {
        let params = ExtrusionParams::main_text();
        let cw = build_text_geometry("AO", &BlockFont { clockwise: true }, &params).unwrap();
        let ccw = build_text_geometry("AO", &BlockFont { clockwise: false }, &params).unwrap();
        assert_close(cw.bounding_box().min, ccw.bounding_box().min);
        assert_close(cw.bounding_box().max, ccw.bounding_box().max);
    }

    #[test]
    fn test_glyphs_advance_and_center_offset() {
        let geometry =
            build_text_geometry("A A", &block_font(), &ExtrusionParams::main_text()).unwrap();
        let bbox = geometry.bounding_box();
        // A (70) + space (35) + A (56) + bevel
        assert!((bbox.max.x - 162.5).abs() < TOLERANCE);
        assert!((bbox.center_offset_x() + 82.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_holes_shrink_under_the_bevel() {
        let geometry =
            build_text_geometry("O", &block_font(), &ExtrusionParams::main_text()).unwrap();
        // hole spans 14..42, the bevel moves it 1.5 inwards
        let inner_corner = Vec3::new(15.5, 15.5, 0.0);
        let expanded_corner = Vec3::new(12.5, 12.5, 0.0);
        let positions = geometry.positions();
        assert!(positions.iter().any(|p| (*p - inner_corner).length() < TOLERANCE));
        assert!(!positions.iter().any(|p| (*p - expanded_corner).length() < TOLERANCE));
    }

    #[test]
    fn test_bevel_disabled() {
        let params = ExtrusionParams {
            bevel_enabled: false,
            ..ExtrusionParams::main_text()
        };
        let geometry = build_text_geometry("A", &block_font(), &params).unwrap();
        let bbox = geometry.bounding_box();
        assert_close(bbox.min, Vec3::new(0.0, 0.0, 0.0));
        assert_close(bbox.max, Vec3::new(56.0, 56.0, 20.0));
        // two caps of two triangles each, four walls of two triangles each
        assert_eq!(geometry.triangle_count(), 4 + 8);
    }

    #[test]
    fn test_ring_layout() {
        let rings = ring_layout(&ExtrusionParams::main_text());
        assert_eq!(rings.len(), 8);
        assert_eq!(rings[0], (-2.0, 0.0));
        assert_eq!(rings[3], (0.0, 1.5));
        assert_eq!(rings[4], (20.0, 1.5));
        assert_eq!(rings[7], (22.0, 0.0));
        assert!(rings.windows(2).all(|w| w[0].0 <= w[1].0));
    }

    #[test]
    fn test_curve_segments_control_smoothness() {
        let coarse = ExtrusionParams {
            curve_segments: 2,
            ..ExtrusionParams::main_text()
        };
        let fine = ExtrusionParams {
            curve_segments: 12,
            ..ExtrusionParams::main_text()
        };
        let coarse = build_text_geometry("c", &block_font(), &coarse).unwrap();
        let fine = build_text_geometry("c", &block_font(), &fine).unwrap();
        assert!(fine.positions().len() > coarse.positions().len());
    }

    #[test]
    fn test_empty_and_invisible_text() {
        let params = ExtrusionParams::main_text();
        assert_eq!(
            build_text_geometry("", &block_font(), &params),
            Err(GeometryError::EmptyText)
        );
        assert_eq!(
            build_text_geometry("  ", &block_font(), &params),
            Err(GeometryError::NoOutlines("  ".to_string()))
        );
        // unknown characters are skipped without advancing
        let geometry = build_text_geometry("#A", &block_font(), &params).unwrap();
        assert!((geometry.bounding_box().min.x + 1.5).abs() < TOLERANCE);
    }

    #[test]
    fn test_builds_are_deterministic() {
        let font = bundled_font();
        let params = ExtrusionParams::main_text();
        let mut builder = GeometryBuilder::new();
        let first = builder.build("Hello", &font, &params).unwrap();
        let second = builder.build("Hello", &font, &params).unwrap();
        assert_eq!(first.bounding_box(), second.bounding_box());
        assert_eq!(
            first.bounding_box().center_offset_x(),
            second.bounding_box().center_offset_x()
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_bundled_font_geometry() {
        let font = bundled_font();
        let geometry = build_text_geometry("Hi", &font, &ExtrusionParams::main_text()).unwrap();
        let bbox = geometry.bounding_box();
        assert!(geometry.triangle_count() > 0);
        assert!((bbox.min.z + 2.0).abs() < TOLERANCE);
        assert!((bbox.max.z - 22.0).abs() < TOLERANCE);
        assert!(bbox.size().x > 0.0 && bbox.size().x < 200.0);
        assert!(bbox.max.y > 40.0);
    }
}
