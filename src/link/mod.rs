//! Link lookup boundary: wire payloads, the normalized [`LookupResult`], and the
//! two consumers of the link endpoints ([`DetailsLoader`] and [`HitRecorder`]).
//! Passwords cross this boundary as `SecretString` and are only exposed when a
//! wire payload is built; they must never be logged.

mod alias;
mod hits;
mod loader;
pub mod types;

pub use alias::Alias;
pub use hits::{HitRecorder, HitRequest};
pub use loader::{DetailsLoader, LinkApi, LookupRequest};
#[cfg(test)]
pub(crate) use loader::testing;
pub use types::{FailureCode, LinkDetails, LinkDetailsResponse, LookupResult};
