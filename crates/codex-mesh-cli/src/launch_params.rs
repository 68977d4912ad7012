//! Command-line parameter parsing.

use clap::{ArgGroup, Parser};
use codex_mesh::export::DEFAULT_DENSIFY;
use codex_mesh::{EARTH_RADIUS_KM, GenerationConfig, Resolution, Result};

/// Default lower bound of the frequency search.
const DEFAULT_MIN_F: u32 = 1;
/// Default upper bound of the frequency search.
const DEFAULT_MAX_F: u32 = 12;

/// Parameters for one generation run.
#[derive(Debug)]
pub struct LaunchParams {
    /// Output path prefix, e.g. `out/v3_mesh`.
    pub out: String,
    pub config: GenerationConfig,
}

#[derive(Parser, Debug)]
#[command(about = "Geodesic icosahedral mesh generator (GeoJSON)")]
#[command(group(ArgGroup::new("resolution").required(true).args(["f", "target_km"])))]
struct CliArgs {
    /// Output path prefix, e.g. out/v3_mesh.
    #[arg(long)]
    out: String,

    /// Subdivision frequency.
    #[arg(long)]
    f: Option<u32>,

    /// Target median edge length in kilometers.
    #[arg(long, alias = "target_km")]
    target_km: Option<f64>,

    /// Points per edge LineString.
    #[arg(long, default_value_t = DEFAULT_DENSIFY)]
    densify: usize,

    /// Smallest frequency tried when searching by target length.
    #[arg(long, default_value_t = DEFAULT_MIN_F)]
    min_f: u32,

    /// Largest frequency tried when searching by target length.
    #[arg(long, default_value_t = DEFAULT_MAX_F)]
    max_f: u32,

    /// Sphere radius in kilometers used for edge lengths.
    #[arg(long, default_value_t = EARTH_RADIUS_KM)]
    radius_km: f64,
}

impl CliArgs {
    fn into_params(self) -> Result<LaunchParams> {
        let resolution = Resolution::from_options(self.f, self.target_km)?;
        let config = GenerationConfig::new(resolution)
            .with_densify(self.densify)
            .with_search_range(self.min_f..=self.max_f)
            .with_radius_km(self.radius_km);
        config.validate()?;
        Ok(LaunchParams {
            out: self.out,
            config,
        })
    }
}

/// Parse launch parameters from the process arguments.
///
/// Argument syntax errors exit through clap; semantic errors are returned.
pub fn parse() -> Result<LaunchParams> {
    CliArgs::parse().into_params()
}
