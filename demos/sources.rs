use newsapi_http::{NewsApiClient, Outcome};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("newsapi_http=debug")),
        )
        .init();

    let news = NewsApiClient::from_env().map_err(anyhow::Error::msg)?;

    match news.get_news_sources().await {
        Outcome::Success(list) => {
            println!("{} sources ({})", list.sources.len(), list.status);
            for source in list.sources {
                println!("{:<24} {:<3} {:<3} {}", source.id, source.language, source.country, source.name);
            }
        }
        Outcome::Failure(err) => {
            eprintln!("could not load sources: {}", err.message());
            if let Some(code) = err.code() {
                eprintln!("api code: {code}");
            }
            return Err(err.into());
        }
    }

    Ok(())
}
