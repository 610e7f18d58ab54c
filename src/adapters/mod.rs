// Adapters layer: concrete implementations for external systems (http, random sources).

pub mod client;
pub mod http;
pub mod random;
