//! # cwrkit - CSV catalogs to CWR-style transmissions
//!
//! cwrkit reads a spreadsheet export of musical works (one work per row) and
//! writes a fixed-width registration transmission: one header, a block of
//! lines per work, one trailer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│   Extract   │────▶│  .cwr text  │
//! │  (ISO/UTF8) │     │  (auto-enc) │     │  (aliases)  │     │ (fixed-wid) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cwrkit::{convert_file, Config, ConvertOptions, JobLog};
//!
//! let config = Config::from_env()?;
//! let options = ConvertOptions::from_config(&config);
//! let report = convert_file("catalog.csv", &options, &JobLog::untagged())?;
//! println!("Converted {} works", report.output.works);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (Work, InterestedParty, SocietyLookup)
//! - [`config`] - Environment configuration
//! - [`parser`] - CSV parsing with auto-detection
//! - [`extract`] - Row to work/party extraction
//! - [`cwr`] - Fixed-width record layout and emission
//! - [`pipeline`] - End-to-end conversion
//! - [`api`] - HTTP API server

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Conversion
pub mod cwr;
pub mod extract;
pub mod pipeline;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ConfigError,
    ConvertError,
    ConvertResult,
    CsvError,
    CsvResult,
    ServerError,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    ExtractedWork,
    InterestedParty,
    PartyRole,
    Row,
    SocietyLookup,
    Work,
};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::Config;

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    csv_to_rows,
    decode_content,
    detect_delimiter,
    detect_encoding,
    parse_bytes_auto,
    parse_file_auto,
    parse_string_with_metadata,
    ParseResult,
};

// =============================================================================
// Re-exports - Extraction
// =============================================================================

pub use extract::{
    extract,
    extract_parties,
    extract_societies,
    extract_work,
    format_duration,
    parse_interested_parties,
    parse_societies,
    Field,
};

// =============================================================================
// Re-exports - Emission
// =============================================================================

pub use cwr::{emit, Emitter, HeaderInfo, Record, RecordSequence};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use pipeline::{
    convert_bytes,
    convert_file,
    convert_rows,
    output_file_name,
    write_output,
    ConvertOptions,
    ConvertOutput,
    ConvertReport,
    CsvInfo,
};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::logs::JobLog;
pub use api::types::{error_response, ConvertMetadata, ConvertResponse, CsvMetadata};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server};
}
