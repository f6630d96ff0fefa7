//! Curalink session layer
//!
//! Headless application layer for the marketplace messaging core: the
//! signed-in actor, the derived conversation list, the composer, and
//! best-effort remote mirroring. Rendering is left to the embedding UI.

mod composer;
mod mirror;
mod session;
mod telemetry;

pub use composer::{build_draft, SendOutcome};
pub use mirror::RemoteMirror;
pub use session::Session;
pub use telemetry::init_tracing;
