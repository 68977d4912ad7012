//! Command-line geodesic mesh generator.
//!
//! Builds a geodesic icosahedron at a fixed frequency or at the frequency
//! whose median edge length best matches a target, then writes nodes, edges
//! and faces as GeoJSON.

mod launch_params;

use std::process::ExitCode;

use codex_mesh::{MeshExport, Resolution, generate};
use launch_params::LaunchParams;

fn run(params: &LaunchParams) -> codex_mesh::Result<()> {
    let generated = generate(&params.config)?;

    match (generated.choice, params.config.resolution) {
        (Some(choice), Resolution::TargetLength { km }) => tracing::info!(
            "[chooser] f={}  median={:.1} km  |Δ|={:.1} km  (target={km:.1} km)",
            choice.frequency,
            choice.median_km,
            choice.deviation_km
        ),
        _ => tracing::info!("[fixed] using f={}", generated.mesh.frequency()),
    }

    let mesh = &generated.mesh;
    tracing::info!(
        "[mesh] nodes={}  edges={}  faces={}",
        mesh.vertices().len(),
        mesh.edges().len(),
        mesh.faces().len()
    );
    tracing::info!(
        "[edges] median={:.1} km  min={:.1}  max={:.1}",
        generated.stats.median_km,
        generated.stats.min_km,
        generated.stats.max_km
    );

    let export = MeshExport::build(mesh, params.config.densify)?;
    let written = export.write(&params.out)?;
    for path in [&written.nodes, &written.edges, &written.faces] {
        tracing::info!("[write] {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let result = launch_params::parse().and_then(|params| run(&params));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
