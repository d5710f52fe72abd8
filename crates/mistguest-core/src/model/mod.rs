// ── Domain model ──
//
// The shapes handed to callers. Every type serializes to the JSON the
// portal frontend consumes, so field names here are part of the HTTP
// contract.

pub mod client;
pub mod guest;
pub mod network;
pub mod site;

pub use client::ConnectedClient;
pub use guest::{FieldUpdate, Guest, GuestAuthorization, GuestUpdate};
pub use network::GuestNetwork;
pub use site::{Site, SiteWlans};
