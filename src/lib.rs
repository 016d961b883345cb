//! Hello-world Lambda handler crate.
//!
//! This crate implements the invocation core of a containerized serverless
//! function: it normalizes an inbound HTTP request, negotiates whether the
//! caller wants JSON, HTML, or plain text, and assembles a response envelope
//! describing the invocation. An Axum front-end lets the same handler run as a
//! plain local HTTP server.

pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod negotiate;
pub mod render;
pub mod request;
pub mod response;
pub mod runtime;

pub use crate::config::{
    ConfigError, HandlerConfig, HandlerConfigBuilder, RuntimeConfig, RuntimeConfigBuilder,
};
pub use crate::context::InvocationContext;
pub use crate::error::{Error, Result};
pub use crate::handler::Handler;
pub use crate::negotiate::{BodyFormat, negotiate};
pub use crate::render::render_html;
pub use crate::request::RequestDescriptor;
pub use crate::response::{Payload, ResponseEnvelope};
pub use crate::runtime::{run, serve};
