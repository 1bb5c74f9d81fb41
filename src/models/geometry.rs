// src/models/geometry.rs
//
// Triangle geometry produced for a line of text

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Vec3>,
    {
        let mut points = points.into_iter();
        let first = *points.next()?;
        Some(points.fold(Self { min: first, max: first }, |bbox, p| Self {
            min: bbox.min.min(*p),
            max: bbox.max.max(*p),
        }))
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// x translation that centers a mesh of this width about the origin,
    /// assuming the geometry starts near x = 0 like laid-out text does.
    pub fn center_offset_x(&self) -> f32 {
        -0.5 * (self.max.x - self.min.x)
    }
}

/// Indexed triangle list. Immutable once built; meshes share it through `Rc`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextGeometry {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
    bounding_box: BoundingBox,
}

impl TextGeometry {
    /// Returns `None` for geometry without vertices, which has no bounding box.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Option<Self> {
        debug_assert!(indices.len() % 3 == 0);
        debug_assert!(indices.iter().all(|&i| (i as usize) < positions.len()));
        let bounding_box = BoundingBox::from_points(&positions)?;
        Some(Self {
            positions,
            indices,
            bounding_box,
        })
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            [
                self.positions[tri[0] as usize],
                self.positions[tri[1] as usize],
                self.positions[tri[2] as usize],
            ]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box() {
        let points = [
            Vec3::new(1.0, -2.0, 0.0),
            Vec3::new(-3.0, 4.0, 2.0),
            Vec3::new(0.0, 0.0, -1.0),
        ];
        let bbox = BoundingBox::from_points(&points).unwrap();
        assert_eq!(bbox.min, Vec3::new(-3.0, -2.0, -1.0));
        assert_eq!(bbox.max, Vec3::new(1.0, 4.0, 2.0));
        assert_eq!(bbox.center_offset_x(), -2.0);
        assert!(BoundingBox::from_points(&Vec::<Vec3>::new()).is_none());
    }

    #[test]
    fn test_triangles() {
        let geometry = TextGeometry::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z],
            vec![0, 1, 2, 0, 2, 3],
        )
        .unwrap();
        assert_eq!(geometry.triangle_count(), 2);
        let tris: Vec<_> = geometry.triangles().collect();
        assert_eq!(tris[1], [Vec3::ZERO, Vec3::Y, Vec3::Z]);
        assert_eq!(geometry.bounding_box().size(), Vec3::ONE);
    }
}
