//! Per-run control flow: fetch, parse, render and publish.
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use log::*;
use std::{path::PathBuf, rc::Rc};

use crate::{
    HubError, PublishError, Result,
    changelog::{self, RepositoryReport},
    config::HubConfig,
    forge::traits::ChangelogSource,
    publish::Publisher,
    render::{Document, Renderer},
};

/// What happened to the upload step of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    /// Uploaded to the contained location.
    Uploaded(String),
    /// No storage configured (dry run).
    Skipped,
    /// Upload rejected; the local copy was still written.
    Failed(String),
}

/// Outcome of a complete run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub repositories: usize,
    pub entries: usize,
    pub output_path: PathBuf,
    pub upload: UploadStatus,
}

#[derive(Builder)]
#[builder(pattern = "owned", build_fn(private, name = "_build"))]
pub struct OrchestratorParams {
    #[builder(setter(into))]
    pub config: Rc<HubConfig>,
    pub source: Box<dyn ChangelogSource>,
    pub renderer: Renderer,
    pub publisher: Publisher,
}

impl OrchestratorParamsBuilder {
    pub fn build(self) -> Result<Orchestrator> {
        let params = self._build().map_err(|e| {
            HubError::invalid_config(format!(
                "Failed to build orchestrator: {}",
                e
            ))
        })?;
        Ok(Orchestrator::new(params))
    }
}

pub struct Orchestrator {
    config: Rc<HubConfig>,
    source: Box<dyn ChangelogSource>,
    renderer: Renderer,
    publisher: Publisher,
}

impl Orchestrator {
    pub fn builder() -> OrchestratorParamsBuilder {
        OrchestratorParamsBuilder::default()
    }

    pub fn new(params: OrchestratorParams) -> Self {
        Self {
            config: params.config,
            source: params.source,
            renderer: params.renderer,
            publisher: params.publisher,
        }
    }

    /// Fetches and parses every configured repository one at a time, in
    /// configured order. A repository whose changelog is missing or cannot
    /// be fetched contributes an empty report.
    pub async fn collect_reports(&self) -> Vec<RepositoryReport> {
        let mut reports = Vec::with_capacity(self.config.repositories.len());

        if self.config.repositories.is_empty() {
            warn!("no repositories configured");
        }

        for repository in self.config.repositories.iter() {
            info!("processing repository: {repository}");

            let outcome = self.source.fetch(repository).await;
            let entries = changelog::parse(outcome.content());

            info!("found {} entries for {repository}", entries.len());

            reports.push(RepositoryReport::new(repository.clone(), entries));
        }

        reports
    }

    pub fn render(
        &self,
        generated_at: DateTime<Utc>,
        reports: &[RepositoryReport],
    ) -> Result<Document> {
        self.renderer.render(generated_at, reports)
    }

    /// Runs the whole pipeline. Upload failures are reported in the
    /// returned summary; failing to write the local file is an error.
    pub async fn run(&self) -> Result<RunSummary> {
        let reports = self.collect_reports().await;

        let without_entries = reports.iter().filter(|r| r.is_empty()).count();
        if without_entries > 0 {
            info!(
                "{without_entries} of {} repositories contributed no entries",
                reports.len()
            );
        }

        let document = self.render(Utc::now(), &reports)?;

        let upload = match self.publisher.publish(&document).await {
            Ok(()) => match self.publisher.location() {
                Some(location) => UploadStatus::Uploaded(location),
                None => UploadStatus::Skipped,
            },
            Err(PublishError::Upload { location, message }) => {
                error!("failed to upload report to {location}: {message}");
                UploadStatus::Failed(message)
            }
            Err(err) => return Err(err.into()),
        };

        Ok(RunSummary {
            repositories: reports.len(),
            entries: document.entry_count,
            output_path: self.publisher.output_path().to_path_buf(),
            upload,
        })
    }
}
