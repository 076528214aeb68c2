//! Lead Intake API Library
//!
//! Backend for university landing pages: validates lead-capture form
//! submissions and relays them to a configured webhook with bounded
//! retries, and serves the fee tables and brochures the pages link to.
//!
//! # Modules
//!
//! - `brochure`: Brochure text and download naming.
//! - `catalog`: Universities, fee schedules and page resolution.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Lead record and submission outcome.
//! - `routes`: Router assembly.
//! - `submission`: Resilient delivery of leads upstream.
//! - `tracking`: Form analytics events.
//! - `validation`: Field-level lead validation.

pub mod brochure;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod submission;
pub mod tracking;
pub mod validation;
