//! Record types handed to dashboard consumers.
//!
//! All records serialize with camelCase keys and lowercase status values.

mod execution;
mod filter;
mod stats;
mod user;
mod workflow;

pub use execution::{Execution, ExecutionStatus, STOPPED_BY_USER};
pub use filter::{ExecutionFilter, UserFilter, WorkflowFilter};
pub use stats::Stats;
pub use user::{User, UserRole, UserStatus};
pub use workflow::{Workflow, WorkflowStatus};

/// Parse a status selector, where `"all"` (or empty) means no constraint.
pub(crate) fn parse_selector<T>(value: &str) -> crate::Result<Option<T>>
where
    T: std::str::FromStr<Err = crate::FlowdashError>,
{
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        Ok(None)
    } else {
        value.parse().map(Some)
    }
}
