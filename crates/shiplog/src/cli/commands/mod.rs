//! Command implementations

mod generate;
mod tags;

pub use generate::GenerateCommand;
pub use tags::TagsCommand;

use std::sync::Arc;

use tracing::debug;

use shiplog_changelog::ChangelogPipeline;
use shiplog_core::ShiplogConfig;
use shiplog_github::GithubSource;
use shiplog_llm::OpenAiClassifier;

/// Build the pipeline from environment configuration
pub(crate) fn build_pipeline() -> ChangelogPipeline {
    let config = ShiplogConfig::from_env();

    let source = GithubSource::new(config.github.clone())
        .with_pr_batch_size(config.pipeline.pr_batch_size);

    let mut pipeline =
        ChangelogPipeline::new(Arc::new(source)).with_config(config.pipeline.clone());

    if let Some(llm) = config.llm {
        debug!(model = %llm.model, "classification refinement enabled");
        pipeline = pipeline.with_classifier(Arc::new(OpenAiClassifier::new(llm)));
    }

    pipeline
}
