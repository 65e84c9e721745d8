//! Writes the room temperature API's OpenAPI document.
//!
//! Usage:
//!   cargo run --bin generate_openapi > openapi.json
//!   cargo run --bin generate_openapi -- --output openapi.json

use std::{
    env, fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use room_temperature_service::api::handlers::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .context("failed to serialise OpenAPI document")?;

    match output_path(env::args().skip(1))? {
        Some(path) => {
            fs::write(&path, &json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("OpenAPI document written to {}", path.display());
        }
        None => io::stdout()
            .write_all(json.as_bytes())
            .context("failed to write to stdout")?,
    }

    Ok(())
}

/// Returns the path following `--output`, or `None` to print to stdout.
fn output_path(mut args: impl Iterator<Item = String>) -> Result<Option<PathBuf>> {
    while let Some(arg) = args.next() {
        if arg == "--output" {
            let path = args.next().context("--output requires a path")?;
            return Ok(Some(PathBuf::from(path)));
        }
    }
    Ok(None)
}
