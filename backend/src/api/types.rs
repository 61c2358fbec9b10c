//! REST API types.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::pipeline::{format_delimiter, ConvertReport};

/// Response sent after a successful upload and conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    /// Unique job identifier, also used to tag streamed logs
    pub job_id: String,

    /// "ready", or "empty" when the table had no data rows
    pub status: String,

    /// Name of the generated `.cwr` file
    pub file_name: String,

    /// Where the file can be downloaded
    pub download_url: String,

    pub metadata: ConvertMetadata,
}

/// Counts and input details for a conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertMetadata {
    pub works: usize,
    pub parties: usize,
    pub records: u64,
    pub csv_info: CsvMetadata,
}

/// CSV file metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvMetadata {
    pub encoding: String,
    pub delimiter: String,
    pub row_count: usize,
    pub columns: Vec<String>,
}

impl ConvertResponse {
    pub fn new(job_id: String, file_name: String, report: &ConvertReport) -> Self {
        let status = if report.output.works == 0 { "empty" } else { "ready" };

        Self {
            job_id,
            status: status.to_string(),
            download_url: format!("/converted/{}", file_name),
            file_name,
            metadata: ConvertMetadata {
                works: report.output.works,
                parties: report.output.parties,
                records: report.output.records,
                csv_info: CsvMetadata {
                    encoding: report.csv_info.encoding.clone(),
                    delimiter: format_delimiter(report.csv_info.delimiter),
                    row_count: report.csv_info.row_count,
                    columns: report.csv_info.headers.clone(),
                },
            },
        }
    }
}

/// Create an error response body
pub fn error_response(job_id: &str, error: &str) -> Value {
    json!({
        "jobId": job_id,
        "status": "error",
        "error": error,
    })
}
