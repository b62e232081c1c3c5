//! Seed the password-reset KB article into a hosted vector index and verify
//! that it is retrievable by semantic search.
//!
//! Secrets come from the environment (`OPENAI_API_KEY`, `PINECONE_API_KEY`,
//! optionally via `.env`); operational knobs are flags.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kbseed_cli::article;
use kbseed_cli::workflow::Workflow;
use kbseed_embeddings::OpenAIProvider;
use kbseed_vector_index::IndexClient;

#[derive(Debug, Parser)]
#[command(name = "kbseed", about = "Seed a KB article and verify retrieval")]
struct Cli {
    /// Name of the target index on the control plane.
    #[arg(long, default_value = "support-chatbot")]
    index_name: String,

    /// Embedding model to use.
    #[arg(long, default_value = "text-embedding-3-small")]
    model: String,

    /// Matches to request per verification query.
    #[arg(long, default_value_t = 3)]
    top_k: usize,

    /// Skip TLS certificate verification on index calls.
    #[arg(long)]
    insecure: bool,

    /// Run the verification queries even if the upsert fails.
    #[arg(long)]
    keep_going: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let openai_key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?;
    let index_key = std::env::var("PINECONE_API_KEY").context("PINECONE_API_KEY must be set")?;

    let provider = OpenAIProvider::new()
        .with_api_key(openai_key)
        .with_model(cli.model);

    let index = IndexClient::builder(index_key)
        .danger_accept_invalid_certs(cli.insecure)
        .build()
        .context("building index client")?;

    let workflow = Workflow {
        provider,
        index,
        index_name: cli.index_name,
        top_k: cli.top_k,
        keep_going: cli.keep_going,
    };

    let article = article::password_reset();
    let report = workflow.run(&article, &article::VERIFICATION_QUERIES).await?;

    if !report.succeeded() {
        anyhow::bail!("KB article is not cleanly retrievable; see report above");
    }

    Ok(())
}
