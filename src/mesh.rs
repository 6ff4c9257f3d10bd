//! Indexed triangle meshes.

use crate::error::{MassPropertiesError, Result};
use nalgebra::{Point3, Vector3};
use std::f32::consts::{PI, TAU};

/// A surface made of triangles, given as vertex positions and a flat list
/// with three vertex indices per triangle.
///
/// For mass properties to be meaningful, the surface must be closed and
/// every triangle wound counter-clockwise when seen from outside. This is
/// not checked.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct TriangleMesh {
    positions: Vec<Point3<f32>>,
    indices: Vec<u32>,
}

impl TriangleMesh {
    /// Creates a new mesh with the given vertex positions and triangle
    /// indices.
    ///
    /// # Errors
    /// Returns an error if the number of indices is not a multiple of three
    /// or if any index does not refer to one of the given positions.
    pub fn new(positions: Vec<Point3<f32>>, indices: Vec<u32>) -> Result<Self> {
        validate_triangle_indices(positions.len(), &indices)?;
        Ok(Self { positions, indices })
    }

    /// Creates a mesh representing a box with the given extents, centered at
    /// the origin and with the width, height and depth axes aligned with the
    /// x-, y- and z-axis. The triangles are wound to face outward.
    ///
    /// # Panics
    /// If any of the given extents are negative.
    pub fn create_box(extent_x: f32, extent_y: f32, extent_z: f32) -> Self {
        assert!(
            extent_x >= 0.0,
            "Tried to create box mesh with negative x-extent"
        );
        assert!(
            extent_y >= 0.0,
            "Tried to create box mesh with negative y-extent"
        );
        assert!(
            extent_z >= 0.0,
            "Tried to create box mesh with negative z-extent"
        );

        let hw = extent_x * 0.5;
        let hh = extent_y * 0.5;
        let hd = extent_z * 0.5;

        // Bit 0, 1 and 2 of the corner index select the positive side along
        // x, y and z
        let positions = (0..8_u32)
            .map(|corner| {
                Point3::new(
                    if corner & 1 == 0 { -hw } else { hw },
                    if corner & 2 == 0 { -hh } else { hh },
                    if corner & 4 == 0 { -hd } else { hd },
                )
            })
            .collect();

        // Corners of each face, counter-clockwise seen from outside
        let faces: [[u32; 4]; 6] = [
            [0, 4, 6, 2], // Left
            [1, 3, 7, 5], // Right
            [0, 1, 5, 4], // Bottom
            [2, 6, 7, 3], // Top
            [0, 2, 3, 1], // Front
            [4, 5, 7, 6], // Back
        ];

        let indices = faces
            .iter()
            .flat_map(|&[a, b, c, d]| [a, b, c, a, c, d])
            .collect();

        Self { positions, indices }
    }

    /// Creates a mesh approximating a sphere with the given radius, centered
    /// at the origin. The vertices lie on `n_rings` horizontal rings between
    /// the poles on the y-axis, each with `2 * n_rings + 2` vertices. The
    /// triangles are wound to face outward.
    ///
    /// # Panics
    /// If the radius is negative or `n_rings` is zero.
    pub fn create_sphere(radius: f32, n_rings: usize) -> Self {
        assert!(
            radius >= 0.0,
            "Tried to create sphere mesh with negative radius"
        );
        assert!(n_rings > 0, "Tried to create sphere mesh with no rings");

        let n_segments = 2 * n_rings + 2;

        let delta_theta = PI / (n_rings + 1) as f32;
        let delta_phi = TAU / n_segments as f32;

        let mut positions = Vec::with_capacity(n_rings * n_segments + 2);

        // Top and bottom pole
        positions.push(Point3::new(0.0, radius, 0.0));
        positions.push(Point3::new(0.0, -radius, 0.0));

        for ring in 0..n_rings {
            let (sin_theta, cos_theta) = ((ring + 1) as f32 * delta_theta).sin_cos();

            for segment in 0..n_segments {
                let (sin_phi, cos_phi) = (segment as f32 * delta_phi).sin_cos();

                positions.push(Point3::new(
                    radius * sin_theta * cos_phi,
                    radius * cos_theta,
                    radius * sin_theta * sin_phi,
                ));
            }
        }

        let vertex =
            |ring: usize, segment: usize| (2 + ring * n_segments + segment % n_segments) as u32;

        let mut indices = Vec::with_capacity(6 * n_rings * n_segments);

        for segment in 0..n_segments {
            indices.extend_from_slice(&[0, vertex(0, segment + 1), vertex(0, segment)]);

            for ring in 0..n_rings - 1 {
                indices.extend_from_slice(&[
                    vertex(ring, segment),
                    vertex(ring, segment + 1),
                    vertex(ring + 1, segment + 1),
                    vertex(ring, segment),
                    vertex(ring + 1, segment + 1),
                    vertex(ring + 1, segment),
                ]);
            }

            indices.extend_from_slice(&[
                vertex(n_rings - 1, segment),
                vertex(n_rings - 1, segment + 1),
                1,
            ]);
        }

        Self { positions, indices }
    }

    /// Creates a mesh with the four faces of the tetrahedron with the given
    /// corners, each wound to face away from the tetrahedron's centroid.
    pub fn create_tetrahedron(corners: [Point3<f32>; 4]) -> Self {
        let centroid = Point3::from(
            corners
                .iter()
                .map(|corner| corner.coords)
                .sum::<Vector3<f32>>()
                * 0.25,
        );

        let mut indices = Vec::with_capacity(12);

        for [i, j, k] in [[0, 2, 1], [0, 3, 2], [0, 1, 3], [1, 2, 3]] {
            let (p0, p1, p2) = (&corners[i], &corners[j], &corners[k]);
            let normal = (p1 - p0).cross(&(p2 - p1));

            if normal.dot(&(p0 - centroid)) < 0.0 {
                indices.extend_from_slice(&[i as u32, k as u32, j as u32]);
            } else {
                indices.extend_from_slice(&[i as u32, j as u32, k as u32]);
            }
        }

        Self {
            positions: corners.to_vec(),
            indices,
        }
    }

    /// Returns the vertex positions of the mesh.
    pub fn positions(&self) -> &[Point3<f32>] {
        &self.positions
    }

    /// Returns the triangle indices of the mesh, three per triangle.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Returns the number of vertices in the mesh.
    pub fn n_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangles in the mesh.
    pub fn n_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns an iterator over the three vertex positions of each triangle,
    /// in mesh order.
    pub fn triangle_vertex_positions(&self) -> impl Iterator<Item = [&Point3<f32>; 3]> {
        triangle_vertex_positions(&self.positions, &self.indices)
    }

    /// Moves every vertex by the given translation.
    pub fn translate(&mut self, translation: &Vector3<f32>) {
        for position in &mut self.positions {
            *position += translation;
        }
    }

    /// Reverses the winding order of every triangle, turning the surface
    /// inside out.
    pub fn flip_winding(&mut self) {
        for triangle in self.indices.chunks_exact_mut(3) {
            triangle.swap(1, 2);
        }
    }
}

/// Checks that the given indices make up whole triangles and only refer to
/// vertices below `vertex_count`.
///
/// # Errors
/// Returns [`MassPropertiesError::IncompleteTriangle`] or
/// [`MassPropertiesError::VertexIndexOutOfBounds`] on the first violation.
pub fn validate_triangle_indices(vertex_count: usize, indices: &[u32]) -> Result<()> {
    if indices.len() % 3 != 0 {
        return Err(MassPropertiesError::IncompleteTriangle {
            index_count: indices.len(),
        });
    }

    if let Some((position, &index)) = indices
        .iter()
        .enumerate()
        .find(|&(_, &index)| index as usize >= vertex_count)
    {
        return Err(MassPropertiesError::VertexIndexOutOfBounds {
            triangle: position / 3,
            index,
            vertex_count,
        });
    }

    Ok(())
}

/// Iterates over the three vertex positions of each triangle. The indices
/// must have passed [`validate_triangle_indices`].
pub(crate) fn triangle_vertex_positions<'a>(
    positions: &'a [Point3<f32>],
    indices: &'a [u32],
) -> impl Iterator<Item = [&'a Point3<f32>; 3]> {
    indices.chunks_exact(3).map(|triangle| {
        [
            &positions[triangle[0] as usize],
            &positions[triangle[1] as usize],
            &positions[triangle[2] as usize],
        ]
    })
}
