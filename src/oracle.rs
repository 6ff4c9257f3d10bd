//! Independent reference computations of inertia, used for verifying the
//! analytic tetrahedron decomposition.
//!
//! Nothing in the mesh computation depends on these. The brute-force
//! integrator in particular is slow and only approximate.

use crate::{inertia::InertiaTensor, tetrahedron::Tetrahedron};
use nalgebra::{Matrix3, Point3, RealField, Vector3};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Number of voxels along the longest extent of the bounding box when
/// integrating tetrahedron inertia by brute force.
pub const BRUTE_FORCE_RESOLUTION: usize = 400;

/// Faces of a tetrahedron as indices into its four points.
const TETRAHEDRON_FACES: [[usize; 3]; 4] = [[0, 2, 1], [0, 3, 2], [0, 1, 3], [1, 2, 3]];

/// Computes the inertia tensor of a uniform box of the given mass with
/// respect to its center. `diagonal` holds the full edge lengths along the
/// x-, y- and z-axis.
pub fn compute_box_inertia(mass: f32, diagonal: &Vector3<f32>) -> InertiaTensor {
    let mass = mass / 12.0;
    let x = mass * diagonal.x.powi(2);
    let y = mass * diagonal.y.powi(2);
    let z = mass * diagonal.z.powi(2);

    InertiaTensor::from_diagonal_elements(y + z, z + x, x + y)
}

/// Computes the inertia tensor of a point of the given mass at the given
/// position, with respect to the origin.
pub fn compute_point_inertia(point: &Point3<f32>, mass: f32) -> InertiaTensor {
    InertiaTensor::from_matrix(compute_point_inertia_matrix(point, mass))
}

fn compute_point_inertia_matrix<F: RealField + Copy>(point: &Point3<F>, mass: F) -> Matrix3<F> {
    let mut matrix = Matrix3::zeros();

    if point.coords == Vector3::zeros() {
        return matrix;
    }

    let distance_squared = point.coords.norm_squared();

    for i in 0..3 {
        let point_i = point[i];
        matrix[(i, i)] = mass * (distance_squared - point_i * point_i);

        for j in (i + 1)..3 {
            let off_diagonal = -(mass * point_i * point[j]);
            matrix[(i, j)] = off_diagonal;
            matrix[(j, i)] = off_diagonal;
        }
    }

    matrix
}

/// Approximates the inertia tensor of the given uniform unit-density
/// tetrahedron with respect to the origin, by summing the point inertia of
/// every voxel center inside it. The bounding box of the tetrahedron is
/// divided into [`BRUTE_FORCE_RESOLUTION`] voxels along its longest extent.
///
/// This is expensive, with cost proportional to the cube of the resolution.
pub fn compute_tetrahedron_inertia_by_brute_force(points: &Tetrahedron) -> InertiaTensor {
    compute_tetrahedron_inertia_by_brute_force_with_resolution(points, BRUTE_FORCE_RESOLUTION)
}

/// Like [`compute_tetrahedron_inertia_by_brute_force`], but with the given
/// number of voxels along the longest extent of the bounding box.
///
/// # Panics
/// If `resolution` is zero.
pub fn compute_tetrahedron_inertia_by_brute_force_with_resolution(
    points: &Tetrahedron,
    resolution: usize,
) -> InertiaTensor {
    assert!(
        resolution > 0,
        "Tried to integrate tetrahedron inertia with zero resolution"
    );

    // The sum runs over millions of tiny contributions, which single
    // precision cannot accumulate
    let points = points.map(|point| point.cast::<f64>());

    let center = Point3::from(
        points
            .iter()
            .map(|point| point.coords)
            .sum::<Vector3<f64>>()
            * 0.25,
    );

    let face_planes = TETRAHEDRON_FACES.map(|[i, j, k]| {
        FacePlane::facing_away_from(&center, [&points[i], &points[j], &points[k]])
    });

    let (box_min, box_max) = points[1..].iter().fold(
        (points[0].coords, points[0].coords),
        |(box_min, box_max), point| (box_min.inf(&point.coords), box_max.sup(&point.coords)),
    );
    let diagonal = box_max - box_min;

    let delta = diagonal.max() / resolution as f64;
    if delta <= 0.0 {
        return InertiaTensor::zeros();
    }
    let voxel_volume = delta.powi(3);

    let voxel_counts = diagonal.map(|extent| ((extent / delta).ceil() as usize).max(1));

    let voxel_center = |index: usize, min: f64| min + (index as f64 + 0.5) * delta;

    let integrate_slice = |i: usize| -> Matrix3<f64> {
        let x = voxel_center(i, box_min.x);
        let mut slice_inertia = Matrix3::zeros();

        for j in 0..voxel_counts.y {
            let y = voxel_center(j, box_min.y);

            for k in 0..voxel_counts.z {
                let point = Point3::new(x, y, voxel_center(k, box_min.z));

                // The point is inside the tetrahedron if it is behind all
                // the face planes
                if face_planes.iter().all(|plane| plane.is_behind(&point)) {
                    slice_inertia += compute_point_inertia_matrix(&point, voxel_volume);
                }
            }
        }
        slice_inertia
    };

    #[cfg(feature = "rayon")]
    let matrix = (0..voxel_counts.x)
        .into_par_iter()
        .map(integrate_slice)
        .reduce(Matrix3::zeros, |a, b| a + b);

    #[cfg(not(feature = "rayon"))]
    let matrix = (0..voxel_counts.x)
        .map(integrate_slice)
        .fold(Matrix3::zeros(), |a, b| a + b);

    InertiaTensor::from_matrix(matrix.cast::<f32>())
}

#[derive(Clone, Copy, Debug)]
struct FacePlane {
    point: Point3<f64>,
    normal: Vector3<f64>,
}

impl FacePlane {
    fn facing_away_from(center: &Point3<f64>, [p0, p1, p2]: [&Point3<f64>; 3]) -> Self {
        let mut normal = (p1 - p0).cross(&(p2 - p1));
        if normal.dot(&(p0 - center)) < 0.0 {
            normal = -normal;
        }
        Self { point: *p0, normal }
    }

    fn is_behind(&self, point: &Point3<f64>) -> bool {
        (point - self.point).dot(&self.normal) <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::point;

    #[test]
    fn should_compute_box_inertia_from_closed_form() {
        let tensor = compute_box_inertia(12.0, &Vector3::new(1.0, 2.0, 3.0));
        assert_abs_diff_eq!(
            tensor,
            InertiaTensor::from_diagonal_elements(13.0, 10.0, 5.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn should_give_zero_inertia_for_point_at_origin() {
        assert_eq!(
            compute_point_inertia(&Point3::origin(), 5.0),
            InertiaTensor::zeros()
        );
    }

    #[test]
    fn should_compute_point_inertia() {
        let tensor = compute_point_inertia(&point![1.0, 2.0, 3.0], 2.0);
        assert_abs_diff_eq!(
            tensor,
            InertiaTensor::from_moments_and_products(
                &Vector3::new(26.0, 20.0, 10.0),
                &Vector3::new(4.0, 12.0, 6.0),
            ),
            epsilon = 1e-5
        );
    }

    #[test]
    fn should_integrate_inertia_of_corner_tetrahedron_about_origin() {
        // About the right-angle corner, the unit corner tetrahedron has
        // moments 1/30 and products of inertia 1/120
        let points = [
            Point3::origin(),
            point![1.0, 0.0, 0.0],
            point![0.0, 1.0, 0.0],
            point![0.0, 0.0, 1.0],
        ];

        let tensor = compute_tetrahedron_inertia_by_brute_force_with_resolution(&points, 200);

        let moment = 1.0 / 30.0;
        let product = 1.0 / 120.0;
        assert_abs_diff_eq!(
            tensor,
            InertiaTensor::from_moments_and_products(
                &Vector3::new(moment, moment, moment),
                &Vector3::new(product, product, product),
            ),
            epsilon = 2e-2 * moment
        );
    }

    #[test]
    fn should_give_zero_inertia_for_flat_tetrahedron() {
        let points = [Point3::origin(); 4];
        assert_eq!(
            compute_tetrahedron_inertia_by_brute_force_with_resolution(&points, 10),
            InertiaTensor::zeros()
        );
    }
}
