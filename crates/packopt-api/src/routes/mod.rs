//! # API Route Modules
//!
//! - `optimize`: `POST /optimize`, the solver behind a JSON body.
//! - `packages`: `GET`/`POST /packages`, the versioned pack-size catalog.
//! - `health`: `GET /health` status document and the liveness/readiness
//!   probes.

pub mod health;
pub mod optimize;
pub mod packages;
