//! Volume, center of mass and inertia tensor of closed triangle meshes.
//!
//! The body enclosed by a mesh is decomposed into one tetrahedron per
//! triangle, all sharing the origin as apex. Each tetrahedron contributes its
//! signed volume, centroid and inertia tensor to running totals, so that
//! tetrahedra reaching outside the body cancel against those covering it.
//!
//! ```
//! use mesh_mass_properties::{MassProperties, TriangleMesh};
//!
//! let mesh = TriangleMesh::create_box(1.0, 2.0, 3.0);
//! let properties = MassProperties::of_triangle_mesh(&mesh)?;
//! assert!((properties.volume() - 6.0).abs() < 1e-5);
//! # Ok::<(), mesh_mass_properties::MassPropertiesError>(())
//! ```

#[macro_use]
mod macros;

pub mod error;
pub mod inertia;
pub mod mass_properties;
pub mod mesh;
pub mod oracle;
pub mod tetrahedron;

pub use error::{MassPropertiesError, Result};
pub use inertia::InertiaTensor;
pub use mass_properties::MassProperties;
pub use mesh::TriangleMesh;
