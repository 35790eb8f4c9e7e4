//! services/api/src/bin/openapi.rs
//!
//! Writes the OpenAPI 3.0 document for the REST API to disk.
//!
//! Usage: `openapi [OUTPUT]`; the output path defaults to `openapi.json`.

use api_lib::web::rest::ApiDoc;
use std::path::{Path, PathBuf};
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn write_spec(
    api_doc: &utoipa::openapi::OpenApi,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let spec_json = api_doc.to_pretty_json()?;
    std::fs::write(path, spec_json)?;
    println!("OpenAPI specification written to {}", path.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    write_spec(&ApiDoc::openapi(), &output)
}
