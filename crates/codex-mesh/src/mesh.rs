//! Global geodesic mesh assembly.
//!
//! Every icosahedron face is subdivided independently, then the per-face
//! patches are merged into one vertex array. Points that coincide along
//! shared face boundaries collapse to a single index via a grid hash keyed
//! on coordinates rounded to [`DEDUP_DECIMALS`] decimal places.

use std::collections::{BTreeSet, HashMap};

use glam::DVec3;

use crate::coords::{GeoPoint, great_circle_km};
use crate::error::{MeshError, Result};
use crate::icosahedron::{FACE_COUNT, Icosahedron};
use crate::subdivide::{patch_point_count, subdivide_face};

/// Decimal places used when comparing unit-sphere coordinates.
pub const DEDUP_DECIMALS: i32 = 8;

/// Largest frequency accepted by [`Mesh::build`].
pub const MAX_FREQUENCY: u32 = 256;

/// An undirected edge with `u < v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub u: u32,
    pub v: u32,
}

impl Edge {
    /// Canonicalize an index pair.
    #[must_use]
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            u: a.min(b),
            v: a.max(b),
        }
    }
}

/// A geodesic sphere tessellation at one frequency.
#[derive(Debug, Clone)]
pub struct Mesh {
    frequency: u32,
    vertices: Vec<DVec3>,
    faces: Vec<[u32; 3]>,
    edges: Vec<Edge>,
}

impl Mesh {
    /// Build the geodesic icosahedron of frequency `f`.
    ///
    /// Indices `0..12` are always the icosahedron corners.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidArgument`] if `f` is zero or above [`MAX_FREQUENCY`].
    pub fn build(f: u32) -> Result<Self> {
        if f > MAX_FREQUENCY {
            return Err(MeshError::invalid(
                "frequency",
                format!("{f} exceeds the maximum of {MAX_FREQUENCY}"),
            ));
        }
        if f == 0 {
            return Err(MeshError::invalid("frequency", "must be at least 1, got 0"));
        }

        let ico = Icosahedron::new();
        let f2 = (f as usize) * (f as usize);
        let mut dedup = VertexDedup::with_capacity(10 * f2 + 2);
        for v in ico.vertices {
            dedup.insert(v);
        }

        let mut faces = Vec::with_capacity(FACE_COUNT * f2);
        let mut local_to_global = Vec::with_capacity(patch_point_count(f));
        for face in 0..FACE_COUNT {
            let patch = subdivide_face(ico.face_corners(face), f)?;

            local_to_global.clear();
            local_to_global.extend(patch.points.iter().map(|&p| dedup.insert(p)));

            faces.extend(
                patch
                    .triangles
                    .iter()
                    .map(|tri| tri.map(|i| local_to_global[i as usize])),
            );
        }

        let edges: Vec<Edge> = faces
            .iter()
            .flat_map(|&[a, b, c]| [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)])
            .filter(|e| e.u != e.v)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mesh = Self {
            frequency: f,
            vertices: dedup.vertices,
            faces,
            edges,
        };

        tracing::debug!(
            frequency = f,
            vertices = mesh.vertices.len(),
            edges = mesh.edges.len(),
            faces = mesh.faces.len(),
            "assembled mesh"
        );

        Ok(mesh)
    }

    /// The subdivision frequency this mesh was built at.
    #[must_use]
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Unit-length vertex positions.
    #[must_use]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Triangles, counter-clockwise when viewed from outside.
    #[must_use]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Unique edges, sorted by `(u, v)`.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// `V - E + F`; always 2 for a closed sphere.
    #[must_use]
    pub fn euler_characteristic(&self) -> i64 {
        let count = |n: usize| i64::try_from(n).unwrap_or(i64::MAX);
        count(self.vertices.len()) - count(self.edges.len()) + count(self.faces.len())
    }

    /// Geographic position of vertex `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below `self.vertices().len()`.
    #[must_use]
    pub fn geo_point(&self, index: u32) -> GeoPoint {
        GeoPoint::from_unit(self.vertices[index as usize])
    }

    /// Great-circle length of every edge, in edge order.
    #[must_use]
    pub fn edge_lengths_km(&self, radius_km: f64) -> Vec<f64> {
        self.edges
            .iter()
            .map(|e| {
                great_circle_km(
                    self.vertices[e.u as usize],
                    self.vertices[e.v as usize],
                    radius_km,
                )
            })
            .collect()
    }
}

/// Grid hash over rounded coordinates.
struct VertexDedup {
    index: HashMap<[i64; 3], u32>,
    vertices: Vec<DVec3>,
}

impl VertexDedup {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
            vertices: Vec::with_capacity(capacity),
        }
    }

    fn insert(&mut self, p: DVec3) -> u32 {
        let vertices = &mut self.vertices;
        *self.index.entry(quantize(p)).or_insert_with(|| {
            #[allow(clippy::cast_possible_truncation)]
            let id = vertices.len() as u32;
            vertices.push(p);
            id
        })
    }
}

#[allow(clippy::cast_possible_truncation)]
fn quantize(p: DVec3) -> [i64; 3] {
    let scale = 10f64.powi(DEDUP_DECIMALS);
    p.to_array().map(|c| (c * scale).round() as i64)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;
    use crate::coords::EARTH_RADIUS_KM;

    #[test]
    fn test_frequency_one_is_icosahedron() {
        let mesh = Mesh::build(1).unwrap();
        assert_eq!(mesh.vertices().len(), 12);
        assert_eq!(mesh.edges().len(), 30);
        assert_eq!(mesh.faces().len(), 20);
    }

    #[test]
    fn test_frequency_two_counts() {
        let mesh = Mesh::build(2).unwrap();
        assert_eq!(mesh.faces().len(), 80);
        assert_eq!(mesh.vertices().len(), 42);
        assert_eq!(mesh.edges().len(), 120);
        assert_eq!(mesh.euler_characteristic(), 2);
    }

    #[test]
    fn test_zero_frequency_rejected() {
        assert!(matches!(
            Mesh::build(0),
            Err(MeshError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_excessive_frequency_rejected() {
        assert!(matches!(
            Mesh::build(MAX_FREQUENCY + 1),
            Err(MeshError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_base_vertices_come_first() {
        let ico = Icosahedron::new();
        let mesh = Mesh::build(4).unwrap();
        for (v, corner) in mesh.vertices().iter().zip(ico.vertices) {
            assert!((*v - corner).length() < 1e-12);
        }
    }

    #[test]
    fn test_edges_unique_sorted_and_owned_by_faces() {
        let mesh = Mesh::build(5).unwrap();
        let edges = mesh.edges();
        assert!(edges.windows(2).all(|w| w[0] < w[1]));
        assert!(edges.iter().all(|e| e.u < e.v));

        let from_faces: HashSet<Edge> = mesh
            .faces()
            .iter()
            .flat_map(|&[a, b, c]| [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)])
            .collect();
        assert_eq!(from_faces.len(), edges.len());
        assert!(edges.iter().all(|e| from_faces.contains(e)));
    }

    #[test]
    fn test_faces_reference_distinct_existing_vertices() {
        let mesh = Mesh::build(3).unwrap();
        let n = u32::try_from(mesh.vertices().len()).unwrap();
        for &[a, b, c] in mesh.faces() {
            assert!(a < n && b < n && c < n);
            assert!(a != b && b != c && c != a);
        }
    }

    #[test]
    fn test_faces_wound_outward() {
        let mesh = Mesh::build(4).unwrap();
        let v = mesh.vertices();
        for &[a, b, c] in mesh.faces() {
            let (pa, pb, pc) = (v[a as usize], v[b as usize], v[c as usize]);
            assert!((pb - pa).cross(pc - pa).dot(pa + pb + pc) > 0.0);
        }
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_geo_point_out_of_range_panics() {
        let mesh = Mesh::build(1).unwrap();
        let _ = mesh.geo_point(12);
    }

    #[test]
    fn test_vertex_round_trip_through_lat_lon() {
        let mesh = Mesh::build(6).unwrap();
        for (i, v) in mesh.vertices().iter().enumerate() {
            let back = mesh.geo_point(u32::try_from(i).unwrap()).to_unit();
            assert!((back - *v).length() < 1e-9);
        }
    }

    #[test]
    fn test_edge_lengths_shrink_with_frequency() {
        let coarse = Mesh::build(1).unwrap().edge_lengths_km(EARTH_RADIUS_KM);
        let fine = Mesh::build(4).unwrap().edge_lengths_km(EARTH_RADIUS_KM);
        let coarse_max = coarse.iter().copied().fold(0.0, f64::max);
        let fine_max = fine.iter().copied().fold(0.0, f64::max);
        assert!(fine_max < coarse_max);
        // Icosahedron edges subtend ~63.43 degrees.
        let expected = 63.434_948_822_922_01_f64.to_radians() * EARTH_RADIUS_KM;
        assert!((coarse[0] - expected).abs() < 1e-6);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_euler_and_counts(f in 1u32..=16) {
            let mesh = Mesh::build(f).unwrap();
            let f2 = (f * f) as usize;
            prop_assert_eq!(mesh.euler_characteristic(), 2);
            prop_assert_eq!(mesh.faces().len(), 20 * f2);
            prop_assert_eq!(mesh.edges().len(), 30 * f2);
            prop_assert_eq!(mesh.vertices().len(), 10 * f2 + 2);
        }

        #[test]
        fn prop_vertices_unit_length(f in 1u32..=12) {
            let mesh = Mesh::build(f).unwrap();
            for v in mesh.vertices() {
                prop_assert!((v.length() - 1.0).abs() < 1e-6);
            }
        }
    }
}
