//! Spaceship DNS record management for DNS-01 challenges
//!
//! - [`split_fqdn`] - challenge FQDN to zone / record-name resolution
//! - [`SpaceshipClient`] - TXT record create/delete against the REST API

pub mod domain;
pub mod spaceship;

pub use domain::{split_fqdn, DomainParts};
pub use spaceship::{ApiCredentials, SpaceshipClient, DEFAULT_API_BASE};
