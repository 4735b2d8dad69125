use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use pubmed_fetch::{export, ClientConfig, PubMedClient, ResponseFormat, RetryConfig};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(
    name = "pubmed-fetch",
    about = "Search PubMed and export the results to CSV",
    long_about = "Searches PubMed via the NCBI E-utilities API and writes the matching \
                  articles to a CSV file. JSON format fetches title, publication date, \
                  and authors for each result; XML format exports the PMIDs only."
)]
struct Cli {
    /// Search query (free text)
    #[arg(value_name = "QUERY")]
    query: String,

    /// Output CSV file path
    #[arg(short, long, default_value = "pubmed_results.csv")]
    output: PathBuf,

    /// Retrieval format for the search
    #[arg(short, long, value_enum, default_value = "json")]
    format: FormatArg,

    /// Maximum number of results to return
    #[arg(short = 'n', long, default_value = "10")]
    limit: usize,

    /// HTTP request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Number of retries for transient API failures
    #[arg(long, default_value = "0")]
    retries: usize,

    /// Base URL of the E-utilities API (for testing against a mock server)
    #[arg(long)]
    base_url: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum FormatArg {
    Json,
    Xml,
}

impl From<FormatArg> for ResponseFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => ResponseFormat::Json,
            FormatArg::Xml => ResponseFormat::Xml,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time(),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    run(&cli).await
}

async fn run(cli: &Cli) -> Result<()> {
    let client = create_client(cli);
    let format = ResponseFormat::from(cli.format.clone());

    let rows = match format {
        ResponseFormat::Json => {
            let records = client.search_and_fetch(&cli.query, cli.limit).await?;
            export::write_records(&records, &cli.output)?;
            records.len()
        }
        ResponseFormat::Xml => {
            let pmids = client
                .search_pmids(&cli.query, cli.limit, format)
                .await?;
            export::write_pmids(&pmids, &cli.output)?;
            pmids.len()
        }
    };

    info!(path = %cli.output.display(), rows = rows, "Results saved to file");

    Ok(())
}

fn create_client(cli: &Cli) -> PubMedClient {
    let retry_config = RetryConfig::new().with_max_retries(cli.retries);

    let mut config = ClientConfig::new()
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_retry_config(retry_config);

    if let Some(ref base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }

    PubMedClient::with_config(config)
}
