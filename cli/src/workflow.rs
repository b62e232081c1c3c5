//! The four-stage seeding workflow.
//!
//! Stages run strictly in order, one network call at a time: resolve the
//! index host, embed the article, upsert the vector, then run each
//! verification query. Progress and the final report go to stdout; `tracing`
//! carries the diagnostics.

use anyhow::Context;
use tracing::{error, info};

use kbseed_embeddings::{EmbeddingProvider, EmbeddingRequest, OpenAIProvider};
use kbseed_vector_index::{IndexClient, MetadataFilter};

use crate::article::{KbArticle, SOURCE_TAG};
use crate::verify::{QueryReport, Summary};

/// Everything the pipeline needs, assembled by the binary (or a test).
pub struct Workflow {
    /// Embedding API client.
    pub provider: OpenAIProvider,

    /// Vector-index service client.
    pub index: IndexClient,

    /// Name of the target index on the control plane.
    pub index_name: String,

    /// Matches to request per verification query.
    pub top_k: usize,

    /// Run the verification queries even if the upsert fails.
    pub keep_going: bool,
}

/// What a full run produced.
#[derive(Debug)]
pub struct RunReport {
    /// Whether the upsert was acknowledged by the index.
    pub upsert_ok: bool,

    /// One report per verification query, in order.
    pub reports: Vec<QueryReport>,
}

impl RunReport {
    /// Outcome counts across the verification queries.
    pub fn summary(&self) -> Summary {
        Summary::of(&self.reports)
    }

    /// True when the upsert succeeded and every query matched.
    pub fn succeeded(&self) -> bool {
        self.upsert_ok && self.summary().all_matched()
    }
}

impl Workflow {
    /// Run the pipeline end to end.
    ///
    /// Any stage error aborts the run, except an upsert failure under
    /// `keep_going`, which is reported and carried into the final status.
    pub async fn run(&self, article: &KbArticle, queries: &[&str]) -> anyhow::Result<RunReport> {
        println!("Creating KB article: {}", article.title);
        println!("Text length: {} characters", article.text.len());

        let host = self
            .index
            .resolve_host(&self.index_name)
            .await
            .with_context(|| format!("resolving host for index `{}`", self.index_name))?;

        println!("\nGenerating embedding...");
        let response = self
            .provider
            .embed(EmbeddingRequest::new(article.text))
            .await
            .context("generating article embedding")?;
        info!(
            "Article embedded: {} dimensions via {}",
            response.dimension, response.model
        );

        println!("\nUpserting vector {}...", article.id);
        let upsert_ok = match self
            .index
            .upsert(&host, article.to_record(response.embedding))
            .await
        {
            Ok(count) => {
                println!("Upsert acknowledged ({count} vector(s) written)");
                true
            }
            Err(e) if self.keep_going => {
                error!("Upsert failed, continuing as requested: {e}");
                println!("Upsert FAILED: {e}");
                println!("Continuing with verification; expect missing results.");
                false
            }
            Err(e) => {
                return Err(e).context("upserting KB vector");
            }
        };

        println!("\n{}", "=".repeat(70));
        println!("TESTING RETRIEVAL");
        println!("{}", "=".repeat(70));

        let filter = MetadataFilter::eq("source", SOURCE_TAG);
        let mut reports = Vec::with_capacity(queries.len());

        for query in queries {
            let embedded = self
                .provider
                .embed(EmbeddingRequest::new(*query))
                .await
                .with_context(|| format!("embedding verification query `{query}`"))?;

            let matches = self
                .index
                .query(&host, &embedded.embedding, self.top_k, Some(&filter))
                .await
                .with_context(|| format!("running verification query `{query}`"))?;

            let report = QueryReport::new(*query, &matches, article.id);
            println!("\n{report}");
            reports.push(report);
        }

        let run = RunReport { upsert_ok, reports };
        let summary = run.summary();

        println!("\n{}", "=".repeat(70));
        println!(
            "DONE: {} matched, {} mismatched, {} empty",
            summary.matched, summary.mismatched, summary.empty
        );
        println!("{}", "=".repeat(70));

        Ok(run)
    }
}
