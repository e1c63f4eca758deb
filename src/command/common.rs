//! Common functionality shared between subcommands
use log::*;

use crate::{
    Result,
    config::HubConfig,
    forge::raw::RawContentSource,
    orchestrator::Orchestrator,
    publish::{Publisher, store::ObjectStore},
    render::Renderer,
};

/// Wire the raw content source, renderer and publisher into an
/// [`Orchestrator`]. Without a store the publisher only writes locally.
pub fn build_orchestrator(
    config: HubConfig,
    store: Option<Box<dyn ObjectStore>>,
) -> Result<Orchestrator> {
    debug!(
        "fetching changelogs from {} (branch: {}, path: {})",
        config.remote.base_url,
        config.remote.branch,
        config.remote.changelog_path
    );

    let source = RawContentSource::new(config.remote.clone())?;
    let renderer = Renderer::new(config.title.clone())?;
    let publisher =
        Publisher::new(&config.output_path, &config.object_key, store);

    Orchestrator::builder()
        .config(config)
        .source(Box::new(source))
        .renderer(renderer)
        .publisher(publisher)
        .build()
}
