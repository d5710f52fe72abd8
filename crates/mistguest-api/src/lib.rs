// mistguest-api: Async Rust client for the Juniper Mist cloud API
//
// Covers the slice of the v1 REST surface needed for guest pre-authorization:
// identity, organizations, sites, WLANs, templates, site groups, guest
// authorizations, and wireless client stats.

pub mod client;
pub mod error;
pub mod guests;
pub mod identity;
pub mod models;
pub mod orgs;
pub mod sites;
pub mod transport;

pub use client::{MistClient, WriteReceipt};
pub use error::Error;
pub use guests::GuestScope;
pub use identity::OrgSummary;
pub use transport::{TlsMode, TransportConfig};
