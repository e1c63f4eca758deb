//! Show command implementation.
use log::*;
use std::path::Path;
use tokio::fs;

use crate::{Result, command::common, config::HubConfig};

/// Print the parsed entries of every configured repository as JSON,
/// optionally writing them to `out_file` instead.
pub async fn execute(config: HubConfig, out_file: Option<String>) -> Result<()> {
    let orchestrator = common::build_orchestrator(config, None)?;
    let reports = orchestrator.collect_reports().await;
    let json = serde_json::json!(reports);
    print_json(json, out_file).await
}

async fn print_json(
    json: serde_json::Value,
    out_file: Option<String>,
) -> Result<()> {
    let content = serde_json::to_string_pretty(&json)?;

    if let Some(out_file) = out_file {
        let file_path = Path::new(&out_file);

        if let Some(parent) = file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        info!("writing json to: {}", file_path.display());
        fs::write(file_path, &content).await?;
    } else {
        println!("{content}");
    }

    Ok(())
}
