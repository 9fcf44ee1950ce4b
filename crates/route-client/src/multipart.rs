//! `multipart/form-data` body encoding for file uploads.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::args::MultipartFile;

static BOUNDARY_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Fresh boundary for one request body.
///
/// The counter makes boundaries unique within the process; the clock only
/// salts them across processes.
pub(crate) fn boundary() -> String {
    let count = BOUNDARY_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.subsec_nanos());
    format!("route-client-{nanos:08x}{count:08x}")
}

/// Content type header value announcing `boundary`.
pub(crate) fn content_type(boundary: &str) -> String {
    format!("multipart/form-data; boundary={boundary}")
}

/// Encode `files` as `multipart/form-data` parts separated by `boundary`.
pub(crate) fn encode(files: &[MultipartFile], boundary: &str) -> Vec<u8> {
    let mut body = Vec::new();

    for file in files {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());

        let mut disposition = format!(
            "Content-Disposition: form-data; name=\"{}\"",
            escape_quotes(file.name())
        );
        if let Some(file_name) = file.file_name() {
            disposition.push_str(&format!("; filename=\"{}\"", escape_quotes(file_name)));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");

        let content_type = file.content_type().unwrap_or("application/octet-stream");
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(file.content());
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

fn escape_quotes(value: &str) -> String {
    value.replace('"', "%22")
}
