//! Mass property tests on composite and displaced meshes.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use mesh_mass_properties::{
    InertiaTensor, MassProperties, MassPropertiesError, TriangleMesh,
    oracle::compute_tetrahedron_inertia_by_brute_force_with_resolution,
};
use nalgebra::{Point3, Vector3, point};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn translated_box(extents: [f32; 3], translation: Vector3<f32>) -> TriangleMesh {
    let mut mesh = TriangleMesh::create_box(extents[0], extents[1], extents[2]);
    mesh.translate(&translation);
    mesh
}

fn merged(meshes: &[TriangleMesh]) -> TriangleMesh {
    let mut positions = Vec::new();
    let mut indices = Vec::new();

    for mesh in meshes {
        let offset = positions.len() as u32;
        positions.extend_from_slice(mesh.positions());
        indices.extend(mesh.indices().iter().map(|index| index + offset));
    }

    TriangleMesh::new(positions, indices).unwrap()
}

#[test]
fn should_compute_mass_properties_of_box_far_from_origin() {
    init_logging();

    let translation = Vector3::new(10.0, -4.0, 3.0);
    let properties =
        MassProperties::of_triangle_mesh(&translated_box([1.0, 2.0, 0.5], translation)).unwrap();

    assert_relative_eq!(properties.volume(), 1.0, max_relative = 1e-4);
    assert_abs_diff_eq!(
        properties.center_of_mass(),
        &Point3::from(translation),
        epsilon = 1e-4
    );
    assert_abs_diff_eq!(
        properties.inertia_tensor(),
        &InertiaTensor::from_diagonal_elements(
            (4.0 + 0.25) / 12.0,
            (0.25 + 1.0) / 12.0,
            (1.0 + 4.0) / 12.0
        ),
        epsilon = 2e-3
    );
}

#[test]
fn should_combine_disjoint_parts() {
    init_logging();

    // A unit cube centered at x = 2 and a 2x1x1 box centered at x = -1 have
    // their common center of mass at the origin
    let mesh = merged(&[
        translated_box([1.0, 1.0, 1.0], Vector3::new(2.0, 0.0, 0.0)),
        translated_box([2.0, 1.0, 1.0], Vector3::new(-1.0, 0.0, 0.0)),
    ]);

    let properties = MassProperties::of_triangle_mesh(&mesh).unwrap();

    assert_relative_eq!(properties.volume(), 3.0, max_relative = 1e-5);
    assert_abs_diff_eq!(
        properties.center_of_mass(),
        &Point3::origin(),
        epsilon = 1e-5
    );
    assert_abs_diff_eq!(
        properties.inertia_tensor(),
        &InertiaTensor::from_diagonal_elements(0.5, 7.0, 7.0),
        epsilon = 1e-4
    );
}

#[test]
fn should_match_brute_force_inertia_for_tetrahedron_mesh() {
    init_logging();

    let corners = [
        point![1.0, 0.5, -0.5],
        point![2.5, 1.0, 0.0],
        point![1.5, 2.0, 0.5],
        point![1.25, 1.0, 1.75],
    ];
    let properties =
        MassProperties::of_triangle_mesh(&TriangleMesh::create_tetrahedron(corners)).unwrap();

    assert!(properties.volume() > 0.0);

    let centered_corners =
        corners.map(|corner| Point3::from(corner - properties.center_of_mass()));
    let brute_force =
        compute_tetrahedron_inertia_by_brute_force_with_resolution(&centered_corners, 200);

    assert_abs_diff_eq!(
        properties.inertia_tensor(),
        &brute_force,
        epsilon = 3e-2 * brute_force.max_abs_element()
    );
}

#[test]
fn should_approach_analytic_mass_properties_of_sphere() {
    init_logging();

    let radius = 1.5;
    let translation = Vector3::new(3.0, -1.0, 2.0);

    let mut mesh = TriangleMesh::create_sphere(radius, 40);
    mesh.translate(&translation);

    let properties = MassProperties::of_triangle_mesh(&mesh).unwrap();

    let volume = 4.0 / 3.0 * std::f32::consts::PI * radius.powi(3);
    let moment = 0.4 * volume * radius.powi(2);

    assert_relative_eq!(properties.volume(), volume, max_relative = 2e-2);
    assert_abs_diff_eq!(
        properties.center_of_mass(),
        &Point3::from(translation),
        epsilon = 1e-3
    );
    assert_abs_diff_eq!(
        properties.inertia_tensor(),
        &InertiaTensor::from_diagonal_elements(moment, moment, moment),
        epsilon = 3e-2 * moment
    );
}

#[test]
fn should_agree_with_moments_about_principal_axes_of_box() {
    let properties =
        MassProperties::of_triangle_mesh(&TriangleMesh::create_box(1.0, 2.0, 3.0)).unwrap();

    let principal_moments = properties.inertia_tensor().principal_moments();

    assert_relative_eq!(
        principal_moments,
        Vector3::new(5.0 / 12.0, 10.0 / 12.0, 13.0 / 12.0) * 6.0,
        max_relative = 1e-4
    );
    assert_relative_eq!(
        properties
            .inertia_tensor()
            .moment_about_axis(&Vector3::z_axis()),
        principal_moments.x,
        max_relative = 1e-4
    );
}

#[test]
fn should_reject_index_referencing_missing_vertex() {
    let mesh = TriangleMesh::create_box(1.0, 1.0, 1.0);
    let mut indices = mesh.indices().to_vec();
    indices.push(0);
    indices.push(1);
    indices.push(42);

    assert_eq!(
        TriangleMesh::new(mesh.positions().to_vec(), indices),
        Err(MassPropertiesError::VertexIndexOutOfBounds {
            triangle: 12,
            index: 42,
            vertex_count: 8
        })
    );
}
