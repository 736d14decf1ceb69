#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`IssueCollectorError`, `SnykError`)
//! - [`config`]: Collector configuration (`CollectorConfig`, builder)
//! - [`filter`]: Validated query and request body (`IssueQuery`, `IssuesFilter`)
//! - [`endpoints`]: Snyk URL construction (`SnykEndpoints`)
//! - [`client`]: Snyk HTTP abstraction (`SnykApi` trait, `ReqwestSnykClient`)
//! - [`classify`]: Aggregated response classification
//! - [`tickets`]: Ticket exclusion index (`TicketIndex`)
//! - [`types`]: Result types (`EnrichedIssue`, `IssueSet`)
//! - [`collector`]: Main orchestrator (`IssueCollector`)

pub mod classify;
pub mod client;
mod code;
pub mod collector;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod filter;
mod open_source;
pub mod tickets;
pub mod types;

// --- Public API Re-exports ---

// Collector (main orchestrator)
pub use collector::IssueCollector;

// Configuration
pub use config::{CollectorConfig, CollectorConfigBuilder, DEFAULT_MAX_PAGES};

// Error
pub use error::{IssueCollectorError, RequestContext, SnykError};

// Query
pub use filter::{IssueQuery, IssueQueryBuilder, IssueTypeFilter, IssuesFilter};

// Snyk API
pub use client::{ReqwestSnykClient, SnykApi};
pub use endpoints::SnykEndpoints;

// Classification
pub use classify::{AggregatedIssues, ProjectClassification};

// Results
pub use tickets::TicketIndex;
pub use types::{EnrichedIssue, IssueSet, ProjectIssues};
