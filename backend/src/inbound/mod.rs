//! Inbound adapters that translate external requests into resolver calls
//! while keeping framework details at the edge.

pub mod http;
