use anyhow::Result;

pub mod args;
mod exit_status;
pub mod report;
mod run;

pub use args::{Arguments, CheckKind, CommonArgs};
pub use exit_status::ExitStatus;
pub use run::{RunResult, run};

/// Validate one add-on, print the report and map the verdict to an exit status.
pub fn run_cli(args: &Arguments) -> Result<ExitStatus> {
    let result = run::run(args)?;
    report::print(&result);

    Ok(result.exit_status())
}
