//! Absorption command: exact and simulated absorption probabilities.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use chainval_absorption::{AbsorptionConfig, analyze_absorption};
use chainval_report::{AbsorptionReport, Comparison, to_json};

use crate::cli::AbsorptionArgs;
use crate::demo;

/// Run the absorbing-chain analysis and print its report.
pub fn run(args: AbsorptionArgs) -> Result<()> {
    let _cmd = info_span!("absorption").entered();

    let matrix = demo::absorbing_chain().context("example absorbing chain is invalid")?;

    let mut config = AbsorptionConfig::new();
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(n) = args.trajectories {
        config = config.with_n_trajectories(n);
    }

    let analysis = analyze_absorption(&matrix, &demo::ABSORBING, &demo::TRANSIENT, &config)
        .context("absorption analysis failed")?;

    let comparison = Comparison::matrices(analysis.exact().view(), analysis.simulated().view())
        .and_then(|c| c.with_labels(&analysis.transient_labels(), &analysis.absorbing_labels()))
        .context("failed to compare absorption results")?;
    info!(
        max_abs_difference = comparison.max_abs_difference(),
        "absorption comparison built"
    );

    let report = AbsorptionReport::new(
        comparison,
        analysis.expected_steps().to_vec(),
        analysis.n_trajectories(),
        analysis.seed(),
    )
    .context("failed to build absorption report")?;

    if args.json {
        println!("{}", to_json(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}
