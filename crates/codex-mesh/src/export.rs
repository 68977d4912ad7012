//! GeoJSON export of mesh nodes, edges and faces.
//!
//! All three feature collections are serialized in memory and staged as
//! `.tmp` siblings before any final path is touched. A failed serialization or
//! staging write leaves no `.geojson` file behind; a failed rename can still
//! leave the earlier artifacts in place.
//! Positions use GeoJSON order, `[lon, lat]`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::coords::densify_arc;
use crate::error::{MeshError, Result};
use crate::mesh::Mesh;

/// Default number of points per exported edge.
pub const DEFAULT_DENSIFY: usize = 12;

/// GeoJSON geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: [f64; 2] },
    LineString { coordinates: Vec<[f64; 2]> },
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
}

/// The `"type"` tag of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    Feature,
}

/// The `"type"` tag of a feature collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionKind {
    FeatureCollection,
}

/// A GeoJSON feature with typed properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature<P> {
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    pub geometry: Geometry,
    pub properties: P,
}

impl<P> Feature<P> {
    fn new(geometry: Geometry, properties: P) -> Self {
        Self {
            kind: FeatureKind::Feature,
            geometry,
            properties,
        }
    }
}

/// A GeoJSON feature collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection<P> {
    #[serde(rename = "type")]
    pub kind: CollectionKind,
    pub features: Vec<Feature<P>>,
}

impl<P> FromIterator<Feature<P>> for FeatureCollection<P> {
    fn from_iter<I: IntoIterator<Item = Feature<P>>>(iter: I) -> Self {
        Self {
            kind: CollectionKind::FeatureCollection,
            features: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeProperties {
    pub id: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeProperties {
    pub u: u32,
    pub v: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceProperties {
    pub face_id: u32,
}

/// Nodes, edges and faces of one mesh as GeoJSON.
#[derive(Debug, Clone)]
pub struct MeshExport {
    pub nodes: FeatureCollection<NodeProperties>,
    pub edges: FeatureCollection<EdgeProperties>,
    pub faces: FeatureCollection<FaceProperties>,
}

/// Paths written by [`MeshExport::write`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    pub nodes: PathBuf,
    pub edges: PathBuf,
    pub faces: PathBuf,
}

impl MeshExport {
    /// Build all three collections, densifying each edge to `densify` points.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidArgument`] if `densify < 2`.
    pub fn build(mesh: &Mesh, densify: usize) -> Result<Self> {
        if densify < 2 {
            return Err(MeshError::invalid(
                "densify",
                format!("need at least 2 points per edge, got {densify}"),
            ));
        }

        let vertices = mesh.vertices();

        let nodes = (0..)
            .zip(vertices)
            .map(|(id, _)| {
                let point = mesh.geo_point(id);
                Feature::new(
                    Geometry::Point {
                        coordinates: point.lon_lat(),
                    },
                    NodeProperties { id },
                )
            })
            .collect();

        let edges = mesh
            .edges()
            .iter()
            .map(|e| -> Result<Feature<EdgeProperties>> {
                let line = densify_arc(vertices[e.u as usize], vertices[e.v as usize], densify)?;
                Ok(Feature::new(
                    Geometry::LineString {
                        coordinates: line.into_iter().map(|p| p.lon_lat()).collect(),
                    },
                    EdgeProperties { u: e.u, v: e.v },
                ))
            })
            .collect::<Result<_>>()?;

        let faces = (0..)
            .zip(mesh.faces())
            .map(|(face_id, &[a, b, c])| {
                let ring = [a, b, c, a]
                    .into_iter()
                    .map(|i| mesh.geo_point(i).lon_lat())
                    .collect();
                Feature::new(
                    Geometry::Polygon {
                        coordinates: vec![ring],
                    },
                    FaceProperties { face_id },
                )
            })
            .collect();

        Ok(Self {
            nodes,
            edges,
            faces,
        })
    }

    /// Output paths for a prefix such as `out/v3_mesh`.
    ///
    /// A trailing `/` on the prefix is ignored.
    #[must_use]
    pub fn paths_for(prefix: &str) -> WrittenFiles {
        let prefix = prefix.trim_end_matches('/');
        WrittenFiles {
            nodes: PathBuf::from(format!("{prefix}_nodes.geojson")),
            edges: PathBuf::from(format!("{prefix}_edges.geojson")),
            faces: PathBuf::from(format!("{prefix}_faces.geojson")),
        }
    }

    /// Serialize all collections, then write them next to `prefix`.
    ///
    /// The parent directory is created when missing. Each body goes to a
    /// `.tmp` sibling first and the three are renamed into place only once
    /// all of them are written. I/O failures are not retried.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::Json`] if serialization fails and
    /// [`MeshError::Io`] if a directory, staging write or rename fails.
    pub fn write(&self, prefix: &str) -> Result<WrittenFiles> {
        let paths = Self::paths_for(prefix);

        let nodes = to_json("nodes", &self.nodes)?;
        let edges = to_json("edges", &self.edges)?;
        let faces = to_json("faces", &self.faces)?;

        if let Some(dir) = paths.nodes.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| MeshError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let mut staged = Vec::with_capacity(3);
        for (path, body) in [
            (&paths.nodes, nodes),
            (&paths.edges, edges),
            (&paths.faces, faces),
        ] {
            let tmp = staging_path(path);
            if let Err(err) = write_file(&tmp, &body) {
                for (_, written) in &staged {
                    let _ = fs::remove_file(written);
                }
                return Err(err);
            }
            tracing::debug!(path = %tmp.display(), bytes = body.len(), "staged artifact");
            staged.push((path, tmp));
        }

        for (path, tmp) in staged {
            fs::rename(&tmp, path).map_err(|source| MeshError::Io {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), "wrote artifact");
        }

        Ok(paths)
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn to_json<T: Serialize>(context: &'static str, value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| MeshError::Json {
        context,
        message: e.to_string(),
    })
}

fn write_file(path: &Path, body: &str) -> Result<()> {
    fs::write(path, body).map_err(|source| MeshError::Io {
        path: path.to_path_buf(),
        source,
    })
}
