// Migration tool - pedantic lints relaxed for CLI ergonomics
#![allow(clippy::pedantic)]

//! # AV Configuration Migration Tool
//!
//! `avconfig-migrate` is a CLI tool and library that copies the legacy AV
//! configuration database (buildings, rooms, room configurations, devices
//! and device classes) into a document store, one `PUT` per document.
//!
//! ## Stages
//!
//! | Stage | Collection(s) | Document ID |
//! |-------|---------------|-------------|
//! | Buildings | `buildings` | building shortname |
//! | Rooms | `rooms` | `{building}-{room}` |
//! | Room configurations | `room_configurations` | configuration name |
//! | Devices | `devices`, `device_types` | `{building}-{room}-{device}`, class name |
//!
//! The first failed write stops the run; later stages never start.
//!
//! ## Quick Start
//!
//! ```bash
//! # From the environment (DB_ADDRESS, CONFIGURATION_DATABASE_MICROSERVICE_ADDRESS, ...)
//! avconfig-migrate run
//!
//! # From a config file, preview only
//! avconfig-migrate --config migration.yaml --dry-run
//! ```
//!
//! ## Configuration Example
//!
//! ```yaml
//! source:
//!   type: config_db
//!   url: http://config-db:8002
//!
//! destination:
//!   address: http://couch:5984
//!   username: admin
//!   password: secret
//!
//! options:
//!   tolerate_http_errors: false
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod connectors;
pub mod context;
pub mod destination;
pub mod error;
pub mod index;
pub mod model;
pub mod pipeline;
pub mod snapshot;
pub mod transform;

#[cfg(test)]
mod fixtures;

pub use config::{DestinationConfig, MigrationConfig, MigrationOptions, SourceConfig};
pub use connectors::{create_source, LegacySource};
pub use context::MigrationContext;
pub use destination::{DocumentSink, DryRunSink, HttpDocumentStore};
pub use error::{Error, Result};
pub use model::Collection;
pub use pipeline::{MigrationReport, Pipeline, Stage};
pub use snapshot::LegacySnapshot;
