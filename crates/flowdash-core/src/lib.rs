pub mod config;
pub mod error;
pub mod http;
pub mod records;
pub mod settings;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::FlowdashConfig;
pub use error::{FlowdashError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
pub use records::{
    Execution, ExecutionFilter, ExecutionStatus, Stats, User, UserFilter, UserRole, UserStatus,
    Workflow, WorkflowFilter, WorkflowStatus,
};
pub use settings::{FileSettingsStore, MemorySettingsStore, N8nSettings, SettingsStore};
