use scene_core::mesh::{self, MeshData};
use scene_core::palette::{vibrant_stops, ThemeColors};
use scene_core::passing::ShapeKind;

fn normals_are_unit(mesh: &MeshData) {
    for v in &mesh.vertices {
        let [x, y, z] = v.normal;
        let len = (x * x + y * y + z * z).sqrt();
        assert!((len - 1.0).abs() < 1e-4, "non-unit normal {:?}", v.normal);
    }
}

#[test]
fn tetrahedron_is_four_flat_faces() {
    let mesh = mesh::tetrahedron(0.4);
    assert_eq!(mesh.vertices.len(), 12);
    assert_eq!(mesh.indices.len(), 12);
    normals_are_unit(&mesh);
    // every vertex sits on the circumscribing sphere
    for v in &mesh.vertices {
        let [x, y, z] = v.position;
        let r = (x * x + y * y + z * z).sqrt();
        assert!((r - 0.4).abs() < 1e-5);
    }
}

#[test]
fn uv_sphere_has_expected_topology() {
    let mesh = mesh::uv_sphere(0.35, 16, 16);
    assert_eq!(mesh.vertices.len(), 17 * 17);
    assert_eq!(mesh.indices.len(), (16 * 16 * 6) as usize);
    normals_are_unit(&mesh);
    for v in &mesh.vertices {
        let [x, y, z] = v.position;
        let r = (x * x + y * y + z * z).sqrt();
        assert!((r - 0.35).abs() < 1e-5);
    }
}

#[test]
fn cuboid_has_six_faces_with_axis_normals() {
    let mesh = mesh::cuboid(0.6);
    assert_eq!(mesh.vertices.len(), 24);
    assert_eq!(mesh.indices.len(), 36);
    normals_are_unit(&mesh);
    for v in &mesh.vertices {
        for c in v.position {
            assert!(c.abs() <= 0.3 + 1e-6);
        }
        // normals are axis-aligned
        let nonzero = v.normal.iter().filter(|n| n.abs() > 1e-6).count();
        assert_eq!(nonzero, 1);
    }
}

#[test]
fn position_gradient_spans_the_stop_list() {
    let stops = vibrant_stops(&ThemeColors::default());
    let mut mesh = mesh::cuboid(0.6);
    mesh::apply_position_gradient(&mut mesh, &stops);

    let bottom = stops.first().unwrap().1;
    let top = stops.last().unwrap().1;
    for v in &mesh.vertices {
        let c = glam::Vec3::from(v.color);
        if (v.position[1] - (-0.3)).abs() < 1e-6 {
            assert!((c - bottom).length() < 1e-4, "bottom vertex off-gradient");
        }
        if (v.position[1] - 0.3).abs() < 1e-6 {
            assert!((c - top).length() < 1e-4, "top vertex off-gradient");
        }
    }
}

#[test]
fn shape_meshes_build_for_every_kind() {
    let stops = vibrant_stops(&ThemeColors::default());
    for kind in [ShapeKind::Tetra, ShapeKind::Sphere, ShapeKind::Box] {
        for mesh in [mesh::passing_mesh(kind, &stops), mesh::anchored_mesh(kind, &stops)] {
            assert!(!mesh.vertices.is_empty());
            assert!(mesh.index_count() > 0);
            assert_eq!(mesh.indices.len() % 3, 0);
            // gradient baked: colors no longer the white placeholder
            assert!(mesh.vertices.iter().any(|v| v.color != [1.0, 1.0, 1.0]));
        }
    }
}
