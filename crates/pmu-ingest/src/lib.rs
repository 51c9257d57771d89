//! PMU description loading.
//!
//! This crate supplies the raw per-product documents that the normalizer
//! turns into tables.
//!
//! # Features
//!
//! - **Product catalog**: CPU families and their document file names; the
//!   product name is the file name up to its first `.`
//! - **Sources**: a local directory tree (`<root>/<family>/<document>`) or an
//!   HTTP base URL (`<base>/<family>/<document>`)
//! - **Classification**: JSON objects are structured documents; anything else
//!   is treated as an alias pointing at another product
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use pmu_ingest::{DirectorySource, ProductCatalog, load_document};
//!
//! let source = DirectorySource::new(Path::new("data/pmu/cpu"));
//! for entry in ProductCatalog::default().entries() {
//!     let document = load_document(&source, &entry)?;
//! }
//! ```

mod catalog;
mod document;
mod error;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === Catalog ===
pub use catalog::{ProductCatalog, ProductEntry, ProductFamily, product_name};

// === Sources ===
pub use source::{DEFAULT_BASE_URL, DirectorySource, DocumentSource, HttpSource, read_location};

// === Documents ===
pub use document::{LoadedDocument, alias_target, load_document, parse_document};
