//! Fetches a VPN provider's server catalog and turns it into a validated,
//! deterministically sorted list of [`types::ServerDescriptor`]s.

pub mod apis;
pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod infra;
pub mod logging;
pub mod normalize;
pub mod observability;
pub mod types;

pub use app::UpdateUseCase;
pub use error::{CatalogError, ErrorKind, FetchError, Result};
pub use types::{CatalogSnapshot, RawServerRecord, ServerDescriptor, VpnType};
