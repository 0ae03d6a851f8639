//! Renshuu domain module.
//!
//! Everything that talks to the remote Renshuu API lives here:
//!
//! - `gateway.rs` - authenticated HTTP round-trips (`Gateway` trait, `HttpGateway`)
//! - `client.rs` - one typed method per remote endpoint
//! - `model.rs` - containers, terms and catalog flattening
//! - `resolver.rs` - name → container and query → term resolution
//! - `orchestrator.rs` - the compound add-by-name operations
//! - `envelope.rs` - the uniform success/error envelope
//! - `error.rs` - gateway and domain errors

mod client;
mod envelope;
mod error;
mod gateway;
mod model;
pub mod orchestrator;
pub mod resolver;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ApiResult, RenshuuClient};
pub use envelope::Envelope;
pub use error::{GatewayError, RenshuuError};
pub use gateway::{
    DEFAULT_BASE_URL, Gateway, GatewayRequest, GatewayResponse, HttpGateway, REQUEST_TIMEOUT,
    ResponseBody,
};
pub use model::{Container, ContainerKind, Term};
pub use orchestrator::{add_term_by_container_name, add_word_by_list_name, add_word_by_schedule_name};
