//! Publish command implementation.
use log::*;

use crate::{
    HubError, Result,
    command::common,
    config::HubConfig,
    orchestrator::{RunSummary, UploadStatus},
    publish::store::{ObjectStore, S3Store},
};

/// Run the full pipeline. A missing bucket is only accepted for dry runs.
pub async fn execute(config: HubConfig) -> Result<RunSummary> {
    if config.storage.is_none() && !config.dry_run {
        return Err(HubError::invalid_config(
            "no storage bucket configured: set --bucket or S3_BUCKET, or pass --dry-run",
        ));
    }

    let store: Option<Box<dyn ObjectStore>> = match config.storage.as_ref() {
        Some(storage) => Some(Box::new(S3Store::new(storage).await)),
        None => None,
    };

    let orchestrator = common::build_orchestrator(config, store)?;

    let summary = orchestrator.run().await?;

    info!(
        "rendered {} entries from {} repositories to {}",
        summary.entries,
        summary.repositories,
        summary.output_path.display()
    );

    match &summary.upload {
        UploadStatus::Uploaded(location) => println!("Synced to {location}"),
        UploadStatus::Skipped => {
            info!("dry run: skipped upload of {}", summary.output_path.display())
        }
        UploadStatus::Failed(_) => {
            warn!(
                "upload failed: local copy kept at {}",
                summary.output_path.display()
            )
        }
    }

    Ok(summary)
}
