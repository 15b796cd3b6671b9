//! HTTP server: shared state and the hyper accept loop.

pub mod http;

pub use http::{run, AppState};
