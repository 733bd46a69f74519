//! Runtime pieces of the flowdash data layer: the demo store, the n8n
//! client, the routing data service and the dashboard JSON API.

pub mod dashboard;
pub mod demo;
pub mod n8n;
pub mod service;
pub mod transport;

pub use dashboard::{create_api_router, create_app, DashboardState};
pub use demo::DemoStore;
pub use n8n::N8nClient;
pub use service::{DataMode, DataService};
pub use transport::ReqwestTransport;
