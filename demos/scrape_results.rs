use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use hltv_scraper::HltvClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut client = HltvClient::new();

    let results = client.get_results(0, 100).await?;
    info!(count = results.len(), "fetched results");

    for result in &results {
        print!("{result}");
        match client.get_match(&result.match_url).await {
            Ok(m) => {
                println!("{}", serde_json::to_string_pretty(&m)?);
            }
            Err(e) => warn!(url = %result.match_url, error = %e, "skipping unparsable match"),
        }
    }

    client.close().await?;
    Ok(())
}
