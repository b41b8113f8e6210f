//! CPU-side geometry for the decorative shapes, with the vibrant gradient
//! baked into vertex colors along the y axis.

use glam::Vec3;

use crate::palette::{self, GradientStops};
use crate::passing::ShapeKind;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Flat-shaded tetrahedron inscribed in a sphere of `radius`.
pub fn tetrahedron(radius: f32) -> MeshData {
    let corners: [Vec3; 4] = [
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
    ]
    .map(|v| v.normalize() * radius);
    let faces: [[usize; 3]; 4] = [[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]];

    let mut mesh = MeshData::default();
    for face in faces {
        let [a, b, c] = face.map(|i| corners[i]);
        let normal = (b - a).cross(c - a).normalize();
        let base = mesh.vertices.len() as u32;
        for p in [a, b, c] {
            mesh.vertices.push(Vertex {
                position: p.to_array(),
                normal: normal.to_array(),
                color: [1.0; 3],
            });
        }
        mesh.indices.extend([base, base + 1, base + 2]);
    }
    mesh
}

/// Smooth-shaded UV sphere.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut mesh = MeshData::default();

    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        let theta = v * std::f32::consts::PI;
        for seg in 0..=segments {
            let u = seg as f32 / segments as f32;
            let phi = u * std::f32::consts::TAU;
            let dir = Vec3::new(
                theta.sin() * phi.cos(),
                theta.cos(),
                theta.sin() * phi.sin(),
            );
            mesh.vertices.push(Vertex {
                position: (dir * radius).to_array(),
                normal: dir.to_array(),
                color: [1.0; 3],
            });
        }
    }

    let stride = segments + 1;
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * stride + seg;
            let b = a + stride;
            // counter-clockwise from outside
            mesh.indices.extend([a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    mesh
}

/// Axis-aligned box with per-face normals.
pub fn cuboid(extent: f32) -> MeshData {
    let h = extent * 0.5;
    // (normal, two in-plane tangents)
    let faces: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Y, Vec3::NEG_Z),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::NEG_Z, Vec3::X),
        (Vec3::Z, Vec3::Y, Vec3::NEG_X),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];
    let mut mesh = MeshData::default();
    for (n, t1, t2) in faces {
        let base = mesh.vertices.len() as u32;
        for (s1, s2) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = n * h + t1 * (s1 * h) + t2 * (s2 * h);
            mesh.vertices.push(Vertex {
                position: p.to_array(),
                normal: n.to_array(),
                color: [1.0; 3],
            });
        }
        mesh.indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// Bake the gradient into vertex colors along the y extent of the mesh.
pub fn apply_position_gradient(mesh: &mut MeshData, stops: &GradientStops) {
    let (mut min_y, mut max_y) = (f32::MAX, f32::MIN);
    for v in &mesh.vertices {
        min_y = min_y.min(v.position[1]);
        max_y = max_y.max(v.position[1]);
    }
    let span = (max_y - min_y).max(f32::EPSILON);
    for v in &mut mesh.vertices {
        let t = (v.position[1] - min_y) / span;
        v.color = palette::sample(stops, t).to_array();
    }
}

/// Geometry for a pooled transient shape.
pub fn passing_mesh(kind: ShapeKind, stops: &GradientStops) -> MeshData {
    let mut mesh = match kind {
        ShapeKind::Tetra => tetrahedron(0.4),
        ShapeKind::Sphere => uv_sphere(0.35, 16, 16),
        ShapeKind::Box => cuboid(0.38),
    };
    apply_position_gradient(&mut mesh, stops);
    mesh
}

/// Geometry for an anchored shape (larger than the transients).
pub fn anchored_mesh(kind: ShapeKind, stops: &GradientStops) -> MeshData {
    let mut mesh = match kind {
        ShapeKind::Tetra => tetrahedron(0.65),
        ShapeKind::Sphere => uv_sphere(0.52, 24, 24),
        ShapeKind::Box => cuboid(0.6),
    };
    apply_position_gradient(&mut mesh, stops);
    mesh
}
