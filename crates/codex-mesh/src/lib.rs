//! Geodesic icosahedral sphere meshes with GeoJSON export.
//!
//! This crate builds a near-uniform triangular tessellation of the sphere by
//! subdividing a regular icosahedron, and exports its nodes, edges and faces
//! as GeoJSON feature collections.
//!
//! # Design principles
//!
//! - **Synchronous**: Pure batch computation, no threads or async
//! - **Immutable meshes**: A [`Mesh`] is built once per frequency and only read afterwards
//! - **Write last**: Artifacts are written only after everything is built in memory
//!
//! # Example
//!
//! ```no_run
//! use codex_mesh::{GenerationConfig, MeshExport, Resolution, generate};
//!
//! let config = GenerationConfig::new(Resolution::TargetLength { km: 732.0 });
//! let generated = generate(&config)?;
//! let export = MeshExport::build(&generated.mesh, config.densify)?;
//! export.write("out/v3_mesh")?;
//! # Ok::<(), codex_mesh::MeshError>(())
//! ```

pub mod config;
pub mod coords;
mod error;
pub mod export;
pub mod frequency;
pub mod icosahedron;
pub mod mesh;
pub mod stats;
pub mod subdivide;

pub use config::{GenerationConfig, Generated, Resolution, generate};
pub use coords::{EARTH_RADIUS_KM, GeoPoint};
pub use error::{MeshError, Result};
pub use export::{MeshExport, WrittenFiles};
pub use frequency::{FrequencyChoice, select_frequency};
pub use mesh::{Edge, Mesh};
pub use stats::EdgeStats;
