// mistguest-core: Guest pre-authorization logic between mistguest-api and
// the HTTP service.

pub mod config;
pub mod convert;
pub mod error;
pub mod fallback;
pub mod guests;
pub mod mac;
pub mod model;
pub mod portal;
pub mod resolver;
pub mod search;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{PortalConfig, TlsVerification};
pub use error::CoreError;
pub use guests::GuestManager;
pub use mac::MacAddress;
pub use mistguest_api::OrgSummary;
pub use portal::Portal;
pub use resolver::SiteResolver;
pub use search::ClientSearch;

pub use model::{
    ConnectedClient, FieldUpdate, Guest, GuestAuthorization, GuestNetwork, GuestUpdate, Site,
    SiteWlans,
};
