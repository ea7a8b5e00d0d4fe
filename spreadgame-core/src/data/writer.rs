//! Long-format CSV export with a `#` metadata header.

use crate::data::generator::{GeneratedTrajectory, GeneratorConfig};
use crate::data::library::DataError;
use std::io::Write;
use std::path::Path;

/// Write the metadata block then one row per `(trajectory_id, time)`.
pub fn write_csv<W: Write>(
    mut writer: W,
    config: &GeneratorConfig,
    seed: Option<u64>,
    trajectories: &[GeneratedTrajectory],
) -> Result<(), DataError> {
    write_header(&mut writer, config, seed, trajectories).map_err(csv::Error::from)?;

    let mut csv_writer = csv::Writer::from_writer(writer);
    for trajectory in trajectories {
        for row in trajectory.rows() {
            csv_writer.serialize(row)?;
        }
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Create (or truncate) `path` and write the dataset to it.
pub fn write_csv_path(
    path: &Path,
    config: &GeneratorConfig,
    seed: Option<u64>,
    trajectories: &[GeneratedTrajectory],
) -> Result<(), DataError> {
    let io_err = |source| DataError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = std::fs::File::create(path).map_err(io_err)?;
    write_csv(std::io::BufWriter::new(file), config, seed, trajectories)
}

fn write_header<W: Write>(
    w: &mut W,
    config: &GeneratorConfig,
    seed: Option<u64>,
    trajectories: &[GeneratedTrajectory],
) -> std::io::Result<()> {
    let upward = trajectories.iter().filter(|t| t.trend_sign > 0.0).count();
    writeln!(w, "# Market Primitives Dataset")?;
    writeln!(w, "# Generated: {}", chrono::Local::now().to_rfc3339())?;
    writeln!(w, "# n_trajectories: {}", trajectories.len())?;
    writeln!(w, "# terminal_time: {}", config.terminal_time)?;
    match seed {
        Some(s) => writeln!(w, "# seed: {s}")?,
        None => writeln!(w, "# seed: none")?,
    }
    writeln!(
        w,
        "# noise_scales: asset_price={}, depth={}, resilience={}",
        config.noise_scale_asset_price, config.noise_scale_depth, config.noise_scale_resilience
    )?;
    writeln!(
        w,
        "# trend: slope={}, probability={}, upward={}/{}",
        config.trend_slope,
        config.trend_probability,
        upward,
        trajectories.len()
    )?;
    writeln!(
        w,
        "# cumsum: asset_price={}, depth={}, resilience={}",
        config.cumsum_asset_price, config.cumsum_depth, config.cumsum_resilience
    )?;
    writeln!(
        w,
        "# alpha: asset_price={}, depth={}, resilience={}",
        config.alpha_asset_price, config.alpha_depth, config.alpha_resilience
    )?;
    writeln!(
        w,
        "# offset: asset_price={}, depth={}, resilience={}",
        config.offset_asset_price, config.offset_depth, config.offset_resilience
    )?;
    writeln!(w, "#")?;
    Ok(())
}
