//! Service Boundary
//!
//! Request/response contract for callers that ask for synthesized sensor
//! data over a transport. Transport framing stays outside this crate.

pub mod config;
pub mod handler;
pub mod message;

pub use config::ServiceConfig;
pub use handler::{SynthesisService, DENIED_MESSAGE};
pub use message::{GenerationRequest, GenerationResponse};
