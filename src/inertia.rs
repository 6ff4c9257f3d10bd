//! Representation of inertia tensors and the parallel axis theorem.

use approx::{AbsDiffEq, RelativeEq};
use nalgebra::{Matrix3, UnitVector3, Vector3};
use std::ops::{Add, AddAssign, Neg};

/// The inertia tensor of a body with respect to some reference point.
///
/// The diagonal holds the moments of inertia about the x-, y- and z-axis,
/// while each off-diagonal element holds the negated product of inertia for
/// its pair of axes. The matrix is always symmetric.
///
/// Unlike the tensor of a physical body, this tensor may be negative, since
/// the tetrahedra a mesh is decomposed into carry signed volumes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InertiaTensor {
    matrix: Matrix3<f32>,
}

impl InertiaTensor {
    /// Creates an inertia tensor with all elements zero.
    #[inline]
    pub fn zeros() -> Self {
        Self::from_matrix(Matrix3::zeros())
    }

    /// Creates an inertia tensor corresponding to the given matrix, which is
    /// assumed symmetric.
    #[inline]
    pub const fn from_matrix(matrix: Matrix3<f32>) -> Self {
        Self { matrix }
    }

    /// Creates a diagonal inertia tensor with the given moments of inertia.
    #[inline]
    pub fn from_diagonal_elements(j_xx: f32, j_yy: f32, j_zz: f32) -> Self {
        Self::from_matrix(Matrix3::from_diagonal(&Vector3::new(j_xx, j_yy, j_zz)))
    }

    /// Creates an inertia tensor from the moments of inertia `(j_xx, j_yy,
    /// j_zz)` and the products of inertia `(j_xy, j_yz, j_zx)`. The products
    /// are negated when placed off the diagonal.
    #[inline]
    pub fn from_moments_and_products(
        moments_of_inertia: &Vector3<f32>,
        products_of_inertia: &Vector3<f32>,
    ) -> Self {
        let (j_xx, j_yy, j_zz) = (
            moments_of_inertia.x,
            moments_of_inertia.y,
            moments_of_inertia.z,
        );
        let (j_xy, j_yz, j_zx) = (
            -products_of_inertia.x,
            -products_of_inertia.y,
            -products_of_inertia.z,
        );

        Self::from_matrix(Matrix3::new(
            j_xx, j_xy, j_zx, //
            j_xy, j_yy, j_yz, //
            j_zx, j_yz, j_zz,
        ))
    }

    /// Returns a reference to the inertia matrix.
    #[inline]
    pub const fn matrix(&self) -> &Matrix3<f32> {
        &self.matrix
    }

    /// Computes the moment of inertia about the given axis passing through the
    /// same point this inertia tensor is defined with respect to.
    #[inline]
    pub fn moment_about_axis(&self, axis: &UnitVector3<f32>) -> f32 {
        axis.dot(&(self.matrix * axis.as_ref()))
    }

    /// Computes the principal moments of inertia, in ascending order.
    pub fn principal_moments(&self) -> Vector3<f32> {
        let mut moments: [f32; 3] = self.matrix.symmetric_eigenvalues().into();
        moments.sort_by(f32::total_cmp);
        Vector3::from(moments)
    }

    /// Returns the element with the largest magnitude.
    #[inline]
    pub fn max_abs_element(&self) -> f32 {
        self.matrix.amax()
    }

    /// Uses the parallel axis theorem to compute the inertia tensor with
    /// respect to a reference point, given that this tensor is defined with
    /// respect to the center of mass and that the center of mass has the
    /// given displacement from the reference point.
    pub fn shifted_from_center_of_mass(&self, mass: f32, displacement: &Vector3<f32>) -> Self {
        if *displacement == Vector3::zeros() {
            return *self;
        }
        Self::from_matrix(self.matrix + Self::compute_parallel_axis_matrix(mass, displacement))
    }

    /// Uses the parallel axis theorem to compute the inertia tensor with
    /// respect to the center of mass, given that this tensor is defined with
    /// respect to a reference point and that the center of mass has the
    /// given displacement from that point.
    ///
    /// This is the exact inverse of [`Self::shifted_from_center_of_mass`].
    pub fn shifted_to_center_of_mass(&self, mass: f32, displacement: &Vector3<f32>) -> Self {
        if *displacement == Vector3::zeros() {
            return *self;
        }
        Self::from_matrix(self.matrix - Self::compute_parallel_axis_matrix(mass, displacement))
    }

    /// Computes the differences that the parallel axis theorem adds to the
    /// moments of inertia `(j_xx, j_yy, j_zz)` and products of inertia `(j_xy,
    /// j_yz, j_zx)` when moving the reference point from the center of mass to
    /// a point the center of mass is displaced from by the given vector.
    #[inline]
    pub fn compute_parallel_axis_moments_and_products(
        mass: f32,
        displacement: &Vector3<f32>,
    ) -> (Vector3<f32>, Vector3<f32>) {
        let squared_displacement = displacement.component_mul(displacement);

        // |d|^2 - d_i^2 is the sum of the two other squared components
        let moment_of_inertia_deltas =
            mass * (squared_displacement.yzx() + squared_displacement.zxy());

        let product_of_inertia_deltas = mass * displacement.component_mul(&displacement.yzx());

        (moment_of_inertia_deltas, product_of_inertia_deltas)
    }

    fn compute_parallel_axis_matrix(mass: f32, displacement: &Vector3<f32>) -> Matrix3<f32> {
        let (moment_of_inertia_deltas, product_of_inertia_deltas) =
            Self::compute_parallel_axis_moments_and_products(mass, displacement);

        *Self::from_moments_and_products(&moment_of_inertia_deltas, &product_of_inertia_deltas)
            .matrix()
    }
}

impl Add for InertiaTensor {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::from_matrix(self.matrix + rhs.matrix)
    }
}

impl AddAssign for InertiaTensor {
    fn add_assign(&mut self, rhs: Self) {
        self.matrix += rhs.matrix;
    }
}

impl Neg for InertiaTensor {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::from_matrix(-self.matrix)
    }
}

impl AbsDiffEq for InertiaTensor {
    type Epsilon = <f32 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        Matrix3::abs_diff_eq(&self.matrix, &other.matrix, epsilon)
    }
}

impl RelativeEq for InertiaTensor {
    fn default_max_relative() -> Self::Epsilon {
        f32::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        Matrix3::relative_eq(&self.matrix, &other.matrix, epsilon, max_relative)
    }
}
