//! Generation options and the in-memory pipeline.

use std::ops::RangeInclusive;

use crate::coords::EARTH_RADIUS_KM;
use crate::error::{MeshError, Result};
use crate::export::DEFAULT_DENSIFY;
use crate::frequency::{DEFAULT_SEARCH_RANGE, FrequencyChoice, select_frequency};
use crate::mesh::{MAX_FREQUENCY, Mesh};
use crate::stats::EdgeStats;

/// Default cap on the subdivision frequency.
pub const DEFAULT_MAX_FREQUENCY: u32 = 64;

/// How the subdivision frequency is determined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Use this frequency directly.
    Frequency(u32),
    /// Search for the frequency whose median edge length is closest to `km`.
    TargetLength { km: f64 },
}

impl Resolution {
    /// Build from the two mutually exclusive options. Exactly one must be set.
    pub fn from_options(frequency: Option<u32>, target_km: Option<f64>) -> Result<Self> {
        match (frequency, target_km) {
            (Some(f), None) => Ok(Self::Frequency(f)),
            (None, Some(km)) => Ok(Self::TargetLength { km }),
            (Some(_), Some(_)) => Err(MeshError::Config {
                detail: "provide exactly one of frequency or target length, not both".into(),
            }),
            (None, None) => Err(MeshError::Config {
                detail: "provide exactly one of frequency or target length".into(),
            }),
        }
    }
}

/// Options for one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub resolution: Resolution,
    /// Points per exported edge.
    pub densify: usize,
    /// Frequencies tried when searching by target length.
    pub search_range: RangeInclusive<u32>,
    /// Sphere radius used for edge lengths.
    pub radius_km: f64,
    /// Largest frequency this run may build.
    pub max_frequency: u32,
}

impl GenerationConfig {
    #[must_use]
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            densify: DEFAULT_DENSIFY,
            search_range: DEFAULT_SEARCH_RANGE,
            radius_km: EARTH_RADIUS_KM,
            max_frequency: DEFAULT_MAX_FREQUENCY,
        }
    }

    #[must_use]
    pub fn with_densify(mut self, densify: usize) -> Self {
        self.densify = densify;
        self
    }

    #[must_use]
    pub fn with_search_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.search_range = range;
        self
    }

    #[must_use]
    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    #[must_use]
    pub fn with_max_frequency(mut self, max_frequency: u32) -> Self {
        self.max_frequency = max_frequency;
        self
    }

    /// Check every option before any mesh is built.
    pub fn validate(&self) -> Result<()> {
        if self.densify < 2 {
            return Err(MeshError::invalid(
                "densify",
                format!("need at least 2 points per edge, got {}", self.densify),
            ));
        }
        if !(self.radius_km.is_finite() && self.radius_km > 0.0) {
            return Err(MeshError::invalid(
                "radius",
                format!("must be a positive number of kilometers, got {}", self.radius_km),
            ));
        }
        if self.max_frequency == 0 || self.max_frequency > MAX_FREQUENCY {
            return Err(MeshError::invalid(
                "max frequency",
                format!("must be within 1..={MAX_FREQUENCY}, got {}", self.max_frequency),
            ));
        }

        match self.resolution {
            Resolution::Frequency(f) => self.check_frequency(f),
            Resolution::TargetLength { km } => {
                if !(km.is_finite() && km > 0.0) {
                    return Err(MeshError::invalid(
                        "target length",
                        format!("must be a positive number of kilometers, got {km}"),
                    ));
                }
                let (start, end) = (*self.search_range.start(), *self.search_range.end());
                if start > end {
                    return Err(MeshError::invalid(
                        "search range",
                        format!("{start}..={end} is empty"),
                    ));
                }
                self.check_frequency(start)?;
                self.check_frequency(end)
            }
        }
    }

    fn check_frequency(&self, f: u32) -> Result<()> {
        if f == 0 {
            return Err(MeshError::invalid("frequency", "must be at least 1, got 0"));
        }
        if f > self.max_frequency {
            return Err(MeshError::invalid(
                "frequency",
                format!("{f} exceeds the configured maximum of {}", self.max_frequency),
            ));
        }
        Ok(())
    }
}

/// Result of [`generate`].
#[derive(Debug, Clone)]
pub struct Generated {
    pub mesh: Mesh,
    /// Present when the frequency came from a target length search.
    pub choice: Option<FrequencyChoice>,
    pub stats: EdgeStats,
}

/// Validate `config`, pick the frequency and build the mesh. Performs no I/O.
pub fn generate(config: &GenerationConfig) -> Result<Generated> {
    config.validate()?;

    let (frequency, choice) = match config.resolution {
        Resolution::Frequency(f) => (f, None),
        Resolution::TargetLength { km } => {
            let choice = select_frequency(km, config.search_range.clone(), config.radius_km)?;
            (choice.frequency, Some(choice))
        }
    };

    let mesh = Mesh::build(frequency)?;
    let stats = EdgeStats::compute(&mesh, config.radius_km)
        .ok_or_else(|| MeshError::invalid("mesh", "produced no edges"))?;

    Ok(Generated {
        mesh,
        choice,
        stats,
    })
}
