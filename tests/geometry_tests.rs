//! Integration tests for the geometry pipeline.
//!
//! Every seed shape is run through the same checks, parameterized with
//! `rstest`:
//!
//! - **Invariants**: attribute lengths agree and every element is in range
//! - **Growth law**: one tessellation round quadruples the triangles and adds
//!   three vertices per input triangle
//! - **Tangent space**: solved tangents are unit length and orthogonal to the
//!   vertex normals
//! - **Upload**: flattened buffers match the mesh layout

use geometry_engine::mesh::generators::{cube, grid, octa_sphere, octahedron, triangle, uv_sphere};
use geometry_engine::{
    compute_tangent_frames, compute_tangents_and_bitangents, tessellate, DegeneratePolicy,
    GeometryError, MeshData, MeshRecipe, Pose, Scene, RenderObject, TangentAccumulation,
    TangentOptions, TransformNode,
};
use glam::Vec3;
use rstest::rstest;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn assert_invariants(mesh: &MeshData) {
    assert_eq!(mesh.vertices.len(), mesh.normals.len());
    assert_eq!(mesh.vertices.len(), mesh.tex_coords.len());
    assert_eq!(mesh.elements.len() % 3, 0);
    assert!(mesh
        .elements
        .iter()
        .all(|&i| (i as usize) < mesh.vertices.len()));
    assert!(mesh.validate().is_ok());
}

// ============================================================================
// Invariants and growth
// ============================================================================

#[rstest]
#[case::grid(grid(4, 3).unwrap())]
#[case::cube(cube())]
#[case::octahedron(octahedron())]
#[case::uv_sphere(uv_sphere(12, 6).unwrap())]
#[case::triangle(triangle())]
fn test_tessellation_preserves_invariants(#[case] seed: MeshData) {
    init_logging();
    assert_invariants(&seed);

    let mut mesh = seed.clone();
    for _ in 0..3 {
        let next = tessellate(1, &mesh).unwrap();
        assert_invariants(&next);
        assert_eq!(next.index_count(), 4 * mesh.index_count());
        assert_eq!(
            next.vertex_count(),
            mesh.vertex_count() + 3 * (mesh.index_count() / 3)
        );
        mesh = next;
    }

    let direct = tessellate(3, &seed).unwrap();
    assert_eq!(direct, mesh);
}

#[rstest]
#[case::grid(grid(2, 2).unwrap())]
#[case::cube(cube())]
#[case::octahedron(octahedron())]
fn test_zero_iterations_is_identity(#[case] seed: MeshData) {
    let copy = tessellate(0, &seed).unwrap();
    assert_eq!(copy.vertices, seed.vertices);
    assert_eq!(copy.normals, seed.normals);
    assert_eq!(copy.tex_coords, seed.tex_coords);
    assert_eq!(copy.elements, seed.elements);
}

#[test]
fn test_concrete_counts() {
    let quad = grid(1, 1).unwrap();
    assert_eq!(quad.vertex_count(), 4);
    assert_eq!(quad.elements, vec![0, 1, 3, 0, 3, 2]);

    let cube = cube();
    assert_eq!(cube.vertex_count(), 24);
    assert_eq!(cube.triangle_count(), 12);

    let split = tessellate(1, &cube).unwrap();
    assert_eq!(split.vertex_count(), 60);
    assert_eq!(split.triangle_count(), 48);
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(5)]
fn test_octa_sphere_converges(#[case] iterations: u32) {
    let sphere = octa_sphere(iterations).unwrap();
    assert_eq!(sphere.triangle_count(), 8 * 4usize.pow(iterations));
    for v in &sphere.vertices {
        assert!((v.length() - 1.0).abs() < 1e-4, "{v}");
    }
    for n in &sphere.normals {
        assert!((n.length() - 1.0).abs() < 1e-4, "{n}");
    }
}

#[test]
fn test_index_overflow_is_an_error() {
    // 6 + 8 * (4^k - 1) vertices: 32766 after six rounds, 131070 after seven
    let seed = octahedron();
    assert_eq!(tessellate(6, &seed).unwrap().vertex_count(), 32_766);
    assert!(matches!(
        tessellate(7, &seed),
        Err(GeometryError::IndexOverflow { .. })
    ));
}

// ============================================================================
// Tangent space
// ============================================================================

#[rstest]
#[case::grid(tessellate(2, &grid(3, 3).unwrap()).unwrap())]
#[case::cube(tessellate(1, &cube()).unwrap())]
#[case::octa_sphere(octa_sphere(3).unwrap())]
#[case::triangle(triangle())]
fn test_tangents_orthogonal_to_normals(
    #[case] mesh: MeshData,
    #[values(TangentAccumulation::Overwrite, TangentAccumulation::Average)]
    accumulation: TangentAccumulation,
) {
    init_logging();
    let options = TangentOptions::new().with_accumulation(accumulation);
    let frames = compute_tangent_frames(&mesh, &options).unwrap();
    assert_eq!(frames.tangents.len(), mesh.vertex_count());
    assert_eq!(frames.bitangents.len(), mesh.vertex_count());
    assert!(frames.fallback_vertices.is_empty());

    for (t, n) in frames.tangents.iter().zip(&mesh.normals) {
        assert!(t.dot(*n).abs() < 1e-5);
        assert!((t.length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn test_uv_sphere_never_emits_nan() {
    init_logging();
    let mesh = uv_sphere(16, 8).unwrap();
    assert!(compute_tangents_and_bitangents(&mesh).is_err());

    let options = TangentOptions::new().with_degenerate_policy(DegeneratePolicy::Fallback);
    let frames = compute_tangent_frames(&mesh, &options).unwrap();
    assert!(!frames.fallback_vertices.is_empty());
    assert!(frames.tangents.iter().all(|t| t.is_finite()));
    assert!(frames.bitangents.iter().all(|b| b.is_finite()));
}

// ============================================================================
// Recipes, transforms and upload
// ============================================================================

#[test]
fn test_recipe_to_draw_call() {
    init_logging();
    let mesh = MeshRecipe::octa_sphere(2).build().unwrap();
    let vertex_count = mesh.vertex_count();

    let mut scene = Scene::new();
    scene.add_object(RenderObject::new(
        TransformNode::new(mesh).with_pose(
            Pose::new()
                .with_translation(Vec3::new(2.2, 0.0, 0.0))
                .with_scale(Vec3::new(1.0, 2.0, 1.0)),
        ),
        0,
    ));
    scene.add_axis_gizmo(10.0, 0.005, 1);

    let materials = vec![true, false];
    let calls: Vec<_> = scene.draw_calls(&materials).collect();
    assert_eq!(calls.len(), 1);

    let call = calls[0];
    assert_eq!(call.buffers.positions.len(), vertex_count * 3);
    assert_eq!(call.buffers.normals.len(), vertex_count * 3);
    assert_eq!(call.buffers.tangents.len(), vertex_count * 3);
    assert_eq!(call.buffers.bitangents.len(), vertex_count * 3);
    assert_eq!(call.buffers.tex_coords.len(), vertex_count * 2);
    assert_eq!(call.buffers.indices.len(), 8 * 16 * 3);
    assert_eq!(&call.uniforms.model[12..15], &[2.2, 0.0, 0.0]);
    // Inverse-transpose of diag(1, 2, 1)
    assert!((call.uniforms.normal_matrix[4] - 0.5).abs() < 1e-6);
}

#[test]
fn test_interleaved_upload_matches_planar() {
    let mesh = MeshRecipe::cube().build().unwrap();
    let buffers = mesh.to_buffers();
    let vertices = mesh.interleaved();
    for (i, v) in vertices.iter().enumerate() {
        assert_eq!(v.position, buffers.positions[i * 3..i * 3 + 3]);
        assert_eq!(v.uv, buffers.tex_coords[i * 2..i * 2 + 2]);
        assert_eq!(v.tangent, buffers.tangents[i * 3..i * 3 + 3]);
    }
}
