//! Stationary command: eigenvector, matrix power, and simulated occupancy.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use chainval_report::{Comparison, EigenvalueEntry, StationaryReport, to_json};
use chainval_stationary::{InitialDistribution, StationaryConfig, analyze_stationary};

use crate::cli::StationaryArgs;
use crate::demo;

/// Run the ergodic-chain analysis and print its report.
pub fn run(args: StationaryArgs) -> Result<()> {
    let _cmd = info_span!("stationary").entered();

    let matrix = demo::ergodic_chain().context("example ergodic chain is invalid")?;
    let config = build_config(&args);

    let analysis = analyze_stationary(&matrix, &config).context("stationary analysis failed")?;

    let eigen = Comparison::vectors(analysis.exact_eigen().view(), analysis.simulated().view())
        .context("failed to compare eigenvector result")?;
    let power = Comparison::vectors(analysis.exact_power().view(), analysis.simulated().view())
        .context("failed to compare matrix-power result")?;
    info!(
        eigen_max_abs_difference = eigen.max_abs_difference(),
        power_max_abs_difference = power.max_abs_difference(),
        "stationary comparisons built"
    );

    let selected = analysis.selected_eigenvalue();
    let report = StationaryReport {
        eigen,
        power,
        eigenvalues: analysis
            .eigenvalues()
            .iter()
            .map(|c| EigenvalueEntry::from((c.re, c.im)))
            .collect(),
        selected_eigenvalue: EigenvalueEntry::from((selected.re, selected.im)),
        eigenvalue_warning: analysis.eigenvalue_warning().map(|w| w.to_string()),
        power_exponent: analysis.power_exponent(),
        n_observations: analysis.n_observations(),
        seed: analysis.seed(),
    };

    if args.json {
        println!("{}", to_json(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

fn build_config(args: &StationaryArgs) -> StationaryConfig {
    let mut config = StationaryConfig::new();
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(n) = args.trajectories {
        config = config.with_n_trajectories(n);
    }
    if let Some(len) = args.length {
        config = config.with_trajectory_length(len);
    }
    if let Some(k) = args.power {
        config = config.with_power_exponent(k);
    }
    if args.index_weighted {
        config = config.with_initial_distribution(InitialDistribution::IndexWeighted);
    }
    config
}
