//! Computation of the mass properties of closed triangle meshes.

use crate::{
    error::{MassPropertiesError, Result},
    inertia::InertiaTensor,
    mesh::{self, TriangleMesh},
    tetrahedron::{self, Tetrahedron},
};
use approx::{AbsDiffEq, RelativeEq};
use nalgebra::{Point3, Vector3};

/// How close to zero the net volume of a mesh may be, relative to the summed
/// magnitudes of its tetrahedron volumes, before the mesh is considered to
/// enclose no volume.
pub const DEGENERATE_VOLUME_TOLERANCE: f32 = 1e-5;

/// The volume, center of mass and inertia tensor of a uniformly dense body
/// with unit density.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MassProperties {
    volume: f32,
    center_of_mass: Point3<f32>,
    inertia_tensor: InertiaTensor,
}

/// Running totals over the tetrahedra formed by the origin and each triangle.
#[derive(Copy, Clone, Debug)]
struct TetrahedronSums {
    n_tetrahedra: usize,
    volume: f32,
    absolute_volume: f32,
    volume_weighted_centroid: Vector3<f32>,
    inertia_tensor_about_origin: InertiaTensor,
}

impl MassProperties {
    /// Creates a new set of mass properties.
    pub fn new(volume: f32, center_of_mass: Point3<f32>, inertia_tensor: InertiaTensor) -> Self {
        Self {
            volume,
            center_of_mass,
            inertia_tensor,
        }
    }

    /// Computes the mass properties of the body enclosed by the given mesh.
    /// See [`Self::of_triangles`].
    ///
    /// # Errors
    /// See [`Self::of_triangles`].
    pub fn of_triangle_mesh(mesh: &TriangleMesh) -> Result<Self> {
        Self::of_triangles(mesh.triangle_vertex_positions())
    }

    /// Computes the mass properties of the body enclosed by the triangles
    /// given as vertex positions and three indices per triangle.
    ///
    /// # Errors
    /// Returns an error if the indices do not make up whole triangles, if an
    /// index is out of bounds or if the enclosed volume is degenerate.
    pub fn of_indexed_triangles(positions: &[Point3<f32>], indices: &[u32]) -> Result<Self> {
        mesh::validate_triangle_indices(positions.len(), indices)?;
        Self::of_triangles(mesh::triangle_vertex_positions(positions, indices))
    }

    /// Computes the mass properties of the uniformly dense body whose surface
    /// is made up of the given triangles. The surface is assumed closed (it
    /// may consist of disjoint parts) and each triangle wound
    /// counter-clockwise when seen from outside.
    ///
    /// Each triangle forms a tetrahedron with the origin. The signed volume,
    /// centroid and inertia tensor of each tetrahedron are accumulated, with
    /// inward-facing tetrahedra subtracting from the totals, before the
    /// summed inertia tensor is moved from the origin to the center of mass.
    ///
    /// If the surface is open or inconsistently wound, the result is wrong
    /// but finite. If it is wound inside out, the volume and inertia tensor
    /// are negated.
    ///
    /// # Errors
    /// Returns [`MassPropertiesError::DegenerateVolume`] if the net volume is
    /// zero or indistinguishable from rounding noise, in which case the
    /// center of mass is undefined.
    pub fn of_triangles<'a>(
        triangle_vertex_positions: impl IntoIterator<Item = [&'a Point3<f32>; 3]>,
    ) -> Result<Self> {
        let sums = with_trace_logging!("Summing tetrahedron mass properties"; {
            triangle_vertex_positions
                .into_iter()
                .fold(TetrahedronSums::zero(), TetrahedronSums::with_triangle)
        });

        let properties = sums.into_mass_properties()?;

        if properties.volume < 0.0 {
            log::warn!(
                "Mesh encloses negative volume {}, its triangles are likely wound inward",
                properties.volume
            );
        }

        log::debug!(
            "Computed mass properties from {} triangles: volume {}, center of mass {:?}",
            sums.n_tetrahedra,
            properties.volume,
            properties.center_of_mass
        );

        Ok(properties)
    }

    /// Returns the enclosed volume. It is negative for an inward-wound mesh.
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Returns the mass of the body for the given uniform density.
    pub fn mass(&self, density: f32) -> f32 {
        self.volume * density
    }

    /// Returns the center of mass of the body.
    pub fn center_of_mass(&self) -> &Point3<f32> {
        &self.center_of_mass
    }

    /// Returns the unit-density inertia tensor of the body, defined with
    /// respect to the center of mass.
    pub fn inertia_tensor(&self) -> &InertiaTensor {
        &self.inertia_tensor
    }
}

impl AbsDiffEq for MassProperties {
    type Epsilon = <f32 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        f32::abs_diff_eq(&self.volume, &other.volume, epsilon)
            && Point3::abs_diff_eq(&self.center_of_mass, &other.center_of_mass, epsilon)
            && InertiaTensor::abs_diff_eq(&self.inertia_tensor, &other.inertia_tensor, epsilon)
    }
}

impl RelativeEq for MassProperties {
    fn default_max_relative() -> Self::Epsilon {
        f32::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        f32::relative_eq(&self.volume, &other.volume, epsilon, max_relative)
            && Point3::relative_eq(
                &self.center_of_mass,
                &other.center_of_mass,
                epsilon,
                max_relative,
            )
            && InertiaTensor::relative_eq(
                &self.inertia_tensor,
                &other.inertia_tensor,
                epsilon,
                max_relative,
            )
    }
}

impl TetrahedronSums {
    fn zero() -> Self {
        Self {
            n_tetrahedra: 0,
            volume: 0.0,
            absolute_volume: 0.0,
            volume_weighted_centroid: Vector3::zeros(),
            inertia_tensor_about_origin: InertiaTensor::zeros(),
        }
    }

    fn with_triangle(self, [vertex_0, vertex_1, vertex_2]: [&Point3<f32>; 3]) -> Self {
        let points: Tetrahedron = [Point3::origin(), *vertex_0, *vertex_1, *vertex_2];

        let volume = tetrahedron::compute_tetrahedron_volume(&points);

        let (centered_points, centroid) = tetrahedron::center_tetrahedron(&points);

        let inertia_tensor_about_origin =
            tetrahedron::compute_tetrahedron_inertia(volume, &centered_points)
                .shifted_from_center_of_mass(volume, &centroid.coords);

        Self {
            n_tetrahedra: self.n_tetrahedra + 1,
            volume: self.volume + volume,
            absolute_volume: self.absolute_volume + volume.abs(),
            volume_weighted_centroid: self.volume_weighted_centroid + volume * centroid.coords,
            inertia_tensor_about_origin: self.inertia_tensor_about_origin
                + inertia_tensor_about_origin,
        }
    }

    fn is_degenerate(&self) -> bool {
        !self.volume.is_finite()
            || self.volume.abs() <= DEGENERATE_VOLUME_TOLERANCE * self.absolute_volume
    }

    fn into_mass_properties(self) -> Result<MassProperties> {
        if self.is_degenerate() {
            return Err(MassPropertiesError::DegenerateVolume {
                volume: self.volume,
            });
        }

        let center_of_mass = Point3::from(self.volume_weighted_centroid / self.volume);

        let inertia_tensor = self
            .inertia_tensor_about_origin
            .shifted_to_center_of_mass(self.volume, &center_of_mass.coords);

        Ok(MassProperties::new(
            self.volume,
            center_of_mass,
            inertia_tensor,
        ))
    }
}
