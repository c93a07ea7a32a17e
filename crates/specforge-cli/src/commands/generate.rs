//! Implementation of the `specforge generate` command.
//!
//! Responsibility: merge CLI overrides into the configured options, run the
//! generation service, and display results.

use tracing::{info, instrument};

use crate::{
    cli::{GenerateArgs, TargetArg},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let targets = TargetArg::resolve(&args.targets);
    let root = args.output.clone().unwrap_or_else(|| config.output.root.clone());
    if root.is_file() {
        return Err(CliError::InvalidInput {
            message: format!("output root {} is a file, not a directory", root.display()),
        });
    }
    let options = config.generation_options(targets, args.input, args.output);

    info!(
        input = %options.input.display(),
        targets = ?options.targets,
        "Generation started"
    );

    let report = super::generation_service().generate(&options)?;

    if output.is_json() {
        output.json(&report)?;
        return Ok(());
    }

    for api in &report.apis {
        output.header(&api.api_name)?;
        output.detail("source", api.path.display())?;
        output.detail("models", api.models)?;
        output.detail("entities", api.entities)?;
        output.detail("enums", api.enums)?;
        output.detail("endpoints", api.endpoints)?;
    }

    for skipped in &report.skipped {
        output.warning(skipped)?;
    }

    let targets: Vec<&str> = report.targets.iter().map(|t| t.as_str()).collect();
    output.success(&format!(
        "Generated {} files ({} backups) for {} under {}",
        report.files.len(),
        report.backups.len(),
        targets.join(", "),
        root.display(),
    ))?;

    Ok(())
}
