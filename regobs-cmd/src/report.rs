use anyhow::Context;
use log::info;
use regobs_core::{config::ReportConfig, report};
use std::path::Path;

/// Read field observations from `input` and write the column test report to
/// `output`. Returns the number of rows written.
pub fn run_tests_report(
    input: &Path,
    output: &Path,
    min_competence: Option<i32>,
) -> anyhow::Result<usize> {
    let mut config = ReportConfig::from_env();
    if let Some(level) = min_competence {
        config.min_competence = level;
    }

    let observations = report::read_observations(input)
        .with_context(|| format!("Failed to read observations from {}", input.display()))?;
    info!(
        "Loaded {} observations from {}",
        observations.len(),
        input.display()
    );

    let rows = report::collect_tests(&observations, &config);
    report::write_report_file(&rows, output)
        .with_context(|| format!("Failed to write report to {}", output.display()))?;
    Ok(rows.len())
}
