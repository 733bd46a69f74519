//! Testing utilities for code built on the flowdash data layer.
//!
//! Enabled with the `testing` feature. The mock transport stands in for a
//! live n8n instance so routing and fallback can be verified without a
//! network.

pub mod mock_http;

pub use mock_http::{MockHttp, MockHttpBuilder, MockResponse, RecordedRequest};
