use std::process::ExitCode;

/// Process exit status of `validate`.
///
/// Only blocking findings change the status. `shared` and
/// `recommend_wildcard` sections are printed but leave it at `Success`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// 0: every selected validator ran and nothing blocks.
    Success,
    /// 1: at least one `not_found`, `not_used` or `not_synced` finding.
    Failure,
    /// 2: the run aborted on an `AuditError` or a configuration error before
    /// a report could be printed.
    Error,
}

impl ExitStatus {
    /// Verdict for a completed run with `error_count` blocking findings.
    pub fn from_error_count(error_count: usize) -> Self {
        if error_count == 0 {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        let code = match status {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Error => 2,
        };
        ExitCode::from(code)
    }
}
