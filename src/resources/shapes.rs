//! Primitive shape generators
//!
//! Pure geometry. Every generator returns a [`MeshData`] with position,
//! normal, and uv per vertex, sized to a unit footprint so the scene can
//! shape it with a non-uniform scale:
//!
//! - plane: 2x2 in XZ at y = 0, normal +Y
//! - cube: unit, centered at the origin
//! - cylinder / tapered cylinder: base radius 1 at y = 0, height 1
//! - sphere: radius 1, centered at the origin
//! - torus: major radius 1 in the XY plane, tube radius as given

use crate::backend::types::Vertex;
use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

/// CPU-side mesh ready for upload
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Append `other`, rebasing its indices
    pub fn append(&mut self, other: &MeshData) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + offset));
    }
}

/// One side of the unit cube
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeFace {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Front,
        CubeFace::Back,
        CubeFace::Left,
        CubeFace::Right,
        CubeFace::Top,
        CubeFace::Bottom,
    ];
}

pub fn plane() -> MeshData {
    let normal = Vec3::Y;
    MeshData {
        vertices: vec![
            Vertex::new(Vec3::new(-1.0, 0.0, -1.0), normal, Vec2::new(0.0, 1.0)),
            Vertex::new(Vec3::new(1.0, 0.0, -1.0), normal, Vec2::new(1.0, 1.0)),
            Vertex::new(Vec3::new(1.0, 0.0, 1.0), normal, Vec2::new(1.0, 0.0)),
            Vertex::new(Vec3::new(-1.0, 0.0, 1.0), normal, Vec2::new(0.0, 0.0)),
        ],
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

/// A single 1x1 face of the unit cube, with its own uv space
pub fn cube_face(face: CubeFace) -> MeshData {
    let h = 0.5;
    let (positions, normal) = match face {
        CubeFace::Front => (
            [
                Vec3::new(-h, -h, h),
                Vec3::new(h, -h, h),
                Vec3::new(h, h, h),
                Vec3::new(-h, h, h),
            ],
            Vec3::Z,
        ),
        CubeFace::Back => (
            [
                Vec3::new(h, -h, -h),
                Vec3::new(-h, -h, -h),
                Vec3::new(-h, h, -h),
                Vec3::new(h, h, -h),
            ],
            -Vec3::Z,
        ),
        CubeFace::Right => (
            [
                Vec3::new(h, -h, h),
                Vec3::new(h, -h, -h),
                Vec3::new(h, h, -h),
                Vec3::new(h, h, h),
            ],
            Vec3::X,
        ),
        CubeFace::Left => (
            [
                Vec3::new(-h, -h, -h),
                Vec3::new(-h, -h, h),
                Vec3::new(-h, h, h),
                Vec3::new(-h, h, -h),
            ],
            -Vec3::X,
        ),
        CubeFace::Top => (
            [
                Vec3::new(-h, h, h),
                Vec3::new(h, h, h),
                Vec3::new(h, h, -h),
                Vec3::new(-h, h, -h),
            ],
            Vec3::Y,
        ),
        CubeFace::Bottom => (
            [
                Vec3::new(-h, -h, -h),
                Vec3::new(h, -h, -h),
                Vec3::new(h, -h, h),
                Vec3::new(-h, -h, h),
            ],
            -Vec3::Y,
        ),
    };

    let uvs = [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ];

    MeshData {
        vertices: positions
            .iter()
            .zip(uvs.iter())
            .map(|(&position, &uv)| Vertex::new(position, normal, uv))
            .collect(),
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

pub fn cube() -> MeshData {
    let mut data = MeshData::default();
    for face in CubeFace::ALL {
        data.append(&cube_face(face));
    }
    data
}

/// Cylinder of radius 1 from y = 0 to y = 1
pub fn cylinder(segments: u32, cap_bottom: bool, cap_top: bool) -> MeshData {
    tapered_cylinder(segments, 1.0, cap_bottom, cap_top)
}

/// Cylinder whose radius shrinks from 1 at the base to `top_radius` at y = 1
pub fn tapered_cylinder(
    segments: u32,
    top_radius: f32,
    cap_bottom: bool,
    cap_top: bool,
) -> MeshData {
    let mut data = MeshData::default();

    for i in 0..=segments {
        let angle = i as f32 / segments as f32 * TAU;
        let (sin, cos) = angle.sin_cos();
        let normal = Vec3::new(cos, 1.0 - top_radius, sin).normalize();
        let u = i as f32 / segments as f32;

        data.vertices.push(Vertex::new(
            Vec3::new(cos, 0.0, sin),
            normal,
            Vec2::new(u, 0.0),
        ));
        data.vertices.push(Vertex::new(
            Vec3::new(cos * top_radius, 1.0, sin * top_radius),
            normal,
            Vec2::new(u, 1.0),
        ));
    }
    for i in 0..segments {
        let base = i * 2;
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 1, base + 3]);
    }

    if cap_bottom {
        append_disk(&mut data, segments, 1.0, 0.0, -Vec3::Y);
    }
    if cap_top {
        append_disk(&mut data, segments, top_radius, 1.0, Vec3::Y);
    }
    data
}

fn append_disk(data: &mut MeshData, segments: u32, radius: f32, y: f32, normal: Vec3) {
    let center = data.vertices.len() as u32;
    data.vertices
        .push(Vertex::new(Vec3::new(0.0, y, 0.0), normal, Vec2::splat(0.5)));

    for i in 0..=segments {
        let angle = i as f32 / segments as f32 * TAU;
        let (sin, cos) = angle.sin_cos();
        data.vertices.push(Vertex::new(
            Vec3::new(cos * radius, y, sin * radius),
            normal,
            Vec2::new(0.5 + cos * 0.5, 0.5 + sin * 0.5),
        ));
    }
    for i in 0..segments {
        data.indices
            .extend_from_slice(&[center, center + 1 + i, center + 2 + i]);
    }
}

/// Unit sphere centered at the origin
pub fn sphere(sectors: u32, stacks: u32) -> MeshData {
    let mut data = MeshData::default();

    for stack in 0..=stacks {
        let phi = stack as f32 / stacks as f32 * PI;
        let y = phi.cos();
        let ring = phi.sin();
        for sector in 0..=sectors {
            let theta = sector as f32 / sectors as f32 * TAU;
            let (sin_t, cos_t) = theta.sin_cos();
            let position = Vec3::new(ring * cos_t, y, ring * sin_t);
            data.vertices.push(Vertex::new(
                position,
                position,
                Vec2::new(
                    sector as f32 / sectors as f32,
                    1.0 - stack as f32 / stacks as f32,
                ),
            ));
        }
    }
    grid_indices(&mut data.indices, stacks, sectors);
    data
}

/// Full torus in the XY plane, major radius 1
pub fn torus(major_segments: u32, tube_segments: u32, tube_radius: f32) -> MeshData {
    torus_sweep(major_segments, tube_segments, tube_radius, TAU)
}

/// Half torus, swept through 180 degrees
pub fn half_torus(major_segments: u32, tube_segments: u32, tube_radius: f32) -> MeshData {
    torus_sweep(major_segments, tube_segments, tube_radius, PI)
}

fn torus_sweep(
    major_segments: u32,
    tube_segments: u32,
    tube_radius: f32,
    sweep: f32,
) -> MeshData {
    let mut data = MeshData::default();

    for i in 0..=major_segments {
        let u = i as f32 / major_segments as f32 * sweep;
        let (sin_u, cos_u) = u.sin_cos();
        for j in 0..=tube_segments {
            let v = j as f32 / tube_segments as f32 * TAU;
            let (sin_v, cos_v) = v.sin_cos();
            let ring = 1.0 + tube_radius * cos_v;
            data.vertices.push(Vertex::new(
                Vec3::new(ring * cos_u, ring * sin_u, tube_radius * sin_v),
                Vec3::new(cos_v * cos_u, cos_v * sin_u, sin_v),
                Vec2::new(
                    i as f32 / major_segments as f32,
                    j as f32 / tube_segments as f32,
                ),
            ));
        }
    }
    grid_indices(&mut data.indices, major_segments, tube_segments);
    data
}

fn grid_indices(indices: &mut Vec<u32>, rows: u32, columns: u32) {
    for row in 0..rows {
        for column in 0..columns {
            let a = row * (columns + 1) + column;
            let b = a + columns + 1;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_abs_position(data: &MeshData) -> f32 {
        data.vertices
            .iter()
            .map(|v| v.position.abs().max_element())
            .fold(0.0, f32::max)
    }

    #[test]
    fn test_plane_lies_flat() {
        let data = plane();
        assert_eq!(data.vertices.len(), 4);
        assert_eq!(data.indices.len(), 6);
        for vertex in &data.vertices {
            assert_eq!(vertex.position.y, 0.0);
            assert_eq!(vertex.normal, Vec3::Y);
        }
        assert_eq!(max_abs_position(&data), 1.0);
    }

    #[test]
    fn test_cube_is_unit_sized() {
        let data = cube();
        assert_eq!(data.vertices.len(), 24);
        assert_eq!(data.indices.len(), 36);
        for vertex in &data.vertices {
            assert_eq!(vertex.position.abs().max_element(), 0.5);
            assert!((vertex.normal.length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_cube_face_matches_its_normal() {
        for face in CubeFace::ALL {
            let data = cube_face(face);
            assert_eq!(data.vertices.len(), 4);
            let normal = data.vertices[0].normal;
            for vertex in &data.vertices {
                assert_eq!(vertex.normal, normal);
                // Every corner of a face lies on the plane the normal points away from
                assert!((vertex.position.dot(normal) - 0.5).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_cylinder_counts_and_radius() {
        let segments = 8;
        let data = cylinder(segments, true, true);
        let side_vertices = 2 * (segments + 1) as usize;
        let cap_vertices = 2 * (segments + 2) as usize;
        assert_eq!(data.vertices.len(), side_vertices + cap_vertices);
        assert_eq!(data.indices.len(), (6 * segments + 2 * 3 * segments) as usize);

        for vertex in data.vertices.iter().take(side_vertices) {
            let radial = Vec2::new(vertex.position.x, vertex.position.z);
            assert!((radial.length() - 1.0).abs() < 1e-5);
            assert!(vertex.normal.y.abs() < 1e-6);
        }
    }

    #[test]
    fn test_cylinder_without_caps_is_sides_only() {
        let segments = 8;
        let data = cylinder(segments, false, false);
        assert_eq!(data.vertices.len(), 2 * (segments + 1) as usize);
        assert_eq!(data.indices.len(), 6 * segments as usize);
    }

    #[test]
    fn test_tapered_cylinder_narrows_to_top() {
        let data = tapered_cylinder(12, 0.5, false, false);
        for vertex in &data.vertices {
            let radial = Vec2::new(vertex.position.x, vertex.position.z).length();
            if vertex.position.y > 0.5 {
                assert!((radial - 0.5).abs() < 1e-5);
            } else {
                assert!((radial - 1.0).abs() < 1e-5);
            }
            // Slanted sides tilt the normal upward
            assert!(vertex.normal.y > 0.0);
            assert!((vertex.normal.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_sphere_vertices_are_unit_length() {
        let data = sphere(16, 8);
        assert_eq!(data.vertices.len(), 17 * 9);
        for vertex in &data.vertices {
            assert!((vertex.position.length() - 1.0).abs() < 1e-5);
            assert!((vertex.position - vertex.normal).length() < 1e-5);
        }
    }

    #[test]
    fn test_torus_stays_inside_its_radii() {
        let tube_radius = 0.2;
        let data = torus(24, 12, tube_radius);
        for vertex in &data.vertices {
            let ring = Vec2::new(vertex.position.x, vertex.position.y).length();
            assert!(ring >= 1.0 - tube_radius - 1e-5);
            assert!(ring <= 1.0 + tube_radius + 1e-5);
        }
    }

    #[test]
    fn test_half_torus_covers_half_the_sweep() {
        let data = half_torus(24, 12, 0.2);
        for vertex in &data.vertices {
            assert!(vertex.position.y >= -1e-5);
        }
        let full = torus(24, 12, 0.2);
        assert_eq!(data.vertices.len(), full.vertices.len());
        assert_eq!(data.indices.len(), full.indices.len());
    }

    #[test]
    fn test_append_rebases_indices() {
        let mut data = plane();
        data.append(&plane());
        assert_eq!(data.vertices.len(), 8);
        assert_eq!(data.indices.len(), 12);
        assert_eq!(data.indices[6], 4);
        assert!(data.indices.iter().all(|&i| (i as usize) < data.vertices.len()));
    }
}
