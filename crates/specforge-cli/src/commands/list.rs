//! Implementation of the `specforge list` command.

use crate::{cli::ListArgs, config::AppConfig, error::CliResult, output::OutputManager};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let input = args.input.unwrap_or_else(|| config.input.path.clone());
    let policy = config.projection_options().requiredness;

    let apis = super::generation_service().inspect(&input, &policy)?;

    if output.is_json() {
        // Bypasses quiet mode so the array stays parseable in pipes.
        output.json(&apis)?;
        return Ok(());
    }

    output.header(&format!("APIs in {}:", input.display()))?;
    for api in &apis {
        output.print(&format!(
            "  {:<20} {:>3} models  {:>3} entities  {:>3} enums  {:>3} endpoints  {}",
            api.api_name,
            api.models,
            api.entities,
            api.enums,
            api.endpoints,
            api.path.display()
        ))?;
    }

    Ok(())
}
