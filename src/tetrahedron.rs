//! Volume and inertia of individual tetrahedra.

use crate::inertia::InertiaTensor;
use nalgebra::{Matrix3, Point3, Vector3};

/// The four corners of a tetrahedron. The face made up of points 1, 2 and 3
/// is assumed wound counter-clockwise when seen from outside, with point 0
/// behind it.
pub type Tetrahedron = [Point3<f32>; 4];

/// Computes the signed volume of the given tetrahedron.
///
/// The volume is positive when the face `{1, 2, 3}` is wound counter-clockwise
/// as seen from the side opposite point 0, and negative otherwise. Negative
/// volumes are kept so that a closed mesh can be decomposed into tetrahedra
/// that add and subtract volume relative to a common apex.
#[inline]
pub fn compute_tetrahedron_volume(points: &Tetrahedron) -> f32 {
    // (face area * face normal) is half the cross product of two edges, and
    // the volume is a third of its projection onto the apex-to-face vector
    (points[2] - points[1])
        .cross(&(points[3] - points[2]))
        .dot(&(points[3] - points[0]))
        / 6.0
}

/// Computes the centroid of the given tetrahedron.
#[inline]
pub fn compute_tetrahedron_centroid(points: &Tetrahedron) -> Point3<f32> {
    let coordinate_sum: Vector3<f32> = points.iter().map(|point| point.coords).sum();
    Point3::from(coordinate_sum * 0.25)
}

/// Returns the given tetrahedron translated so that its centroid lies at the
/// origin, together with the original centroid.
#[inline]
pub fn center_tetrahedron(points: &Tetrahedron) -> (Tetrahedron, Point3<f32>) {
    let centroid = compute_tetrahedron_centroid(points);
    let centered = points.map(|point| Point3::from(point - centroid));
    (centered, centroid)
}

/// Computes the inertia tensor of the given tetrahedron with respect to its
/// centroid, for a uniform body of the given mass.
///
/// The points must already be expressed relative to the centroid (see
/// [`center_tetrahedron`]); the closed-form expressions are only valid when
/// the points sum to approximately zero. The mass may be negative, in which
/// case the whole tensor is negated.
///
/// The expressions follow Tonon (2005), "Explicit exact formulas for the 3-D
/// tetrahedron inertia tensor in terms of its vertex coordinates".
pub fn compute_tetrahedron_inertia(mass: f32, points: &Tetrahedron) -> InertiaTensor {
    let [p0, p1, p2, p3] = points;
    let mut matrix = Matrix3::zeros();

    for i in 0..3 {
        let j = (i + 1) % 3;
        let k = (j + 1) % 3;

        matrix[(i, i)] = mass
            * 0.1
            * (compute_pairwise_product_sum(p0[j], p1[j], p2[j], p3[j])
                + compute_pairwise_product_sum(p0[k], p1[k], p2[k], p3[k]));

        let product_of_inertia = mass
            * 0.05
            * (2.0 * (p0[j] * p0[k] + p1[j] * p1[k] + p2[j] * p2[k] + p3[j] * p3[k])
                + p0[j] * (p1[k] + p2[k] + p3[k])
                + p1[j] * (p0[k] + p2[k] + p3[k])
                + p2[j] * (p0[k] + p1[k] + p3[k])
                + p3[j] * (p0[k] + p1[k] + p2[k]));

        matrix[(j, k)] = -product_of_inertia;
        matrix[(k, j)] = -product_of_inertia;
    }

    InertiaTensor::from_matrix(matrix)
}

/// Sum of `a_m * a_n` over all index pairs with `m <= n`.
#[inline]
fn compute_pairwise_product_sum(a0: f32, a1: f32, a2: f32, a3: f32) -> f32 {
    a0 * (a0 + a1 + a2 + a3) + a1 * (a1 + a2 + a3) + a2 * (a2 + a3) + a3 * a3
}
