//! Spaceship DNS-01 webhook solver
//!
//! An ACME DNS-01 solver for Spaceship DNS, driven by an external
//! certificate-issuance orchestrator over a small webhook protocol.
//! Each challenge request is translated into one authenticated call
//! against the Spaceship REST API (create or delete a TXT record), with
//! credentials read from Kubernetes Secrets.
//!
//! # Architecture
//!
//! - [`solver`] - the host-facing [`ChallengeSolver`] capability and the
//!   [`SpaceshipSolver`] implementation
//! - [`server`] - the webhook protocol surface (axum)
//! - [`dns`] - FQDN splitting and the Spaceship API client
//! - [`kube`] - cluster connection resolution and the Secrets client
//! - [`error`] - solver error taxonomy

pub mod dns;
pub mod error;
pub mod kube;
pub mod server;
pub mod solver;

pub use error::{SolverError, SolverResult};
pub use server::{webhook_router, ChallengeResponse};
pub use solver::{ChallengeRequest, ChallengeSolver, SpaceshipSolver, SOLVER_NAME};
