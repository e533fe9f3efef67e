use crate::{
    Result,
    articles::{CategoryArticleListing, ViewCounter, categories},
    cli::Command,
    config::Config,
    predictor::HttpPredictor,
    storage::{KeyValueStore, ResultHandoff},
    submission::{FlowOptions, SubmissionFlow},
    surface::TerminalSurface,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Runs one command. Returns false when a check ended without a prediction;
/// the reason has already been shown to the user.
pub async fn run(config: Config, command: Command) -> Result<bool> {
    match command {
        Command::Check(check) => {
            let text = match check.text() {
                Some(text) => text,
                None => read_stdin().await?,
            };
            let format = check.format();

            let store = open_store(&config).await?;
            let predictor = Arc::new(HttpPredictor::new(&config.predictor));
            info!("Using prediction endpoint {}", predictor.endpoint());

            let surface = Arc::new(TerminalSurface::stdout(text, format));
            let flow = SubmissionFlow::new(predictor, surface, FlowOptions::from_config(&config))
                .with_handoff(ResultHandoff::new(store));

            Ok(flow.submit().await.is_ok())
        }
        Command::Outcome => {
            let store = open_store(&config).await?;
            for line in ResultHandoff::new(store).outcome_lines().await? {
                println!("{}", line);
            }
            Ok(true)
        }
        Command::Articles { category } => {
            let store = open_store(&config).await?;
            let listing = CategoryArticleListing::new(ViewCounter::new(store));
            let cards = listing.show(&category).await?;
            if cards.is_empty() {
                println!(
                    "No articles in category {}. Known categories: {}",
                    category,
                    categories().join(", ")
                );
            }
            for card in cards {
                for line in card.lines() {
                    println!("{}", line);
                }
            }
            Ok(true)
        }
        Command::View { article_id } => {
            let store = open_store(&config).await?;
            let views = ViewCounter::new(store).increment(&article_id).await?;
            println!("{}: {}", article_id, views);
            Ok(true)
        }
    }
}

async fn open_store(config: &Config) -> Result<Arc<KeyValueStore>> {
    let db_path = std::env::var("DETECTOR_DB_PATH")
        .unwrap_or_else(|_| config.storage.database_path.clone());
    let store = KeyValueStore::new(&db_path).await?;
    if !store.is_durable() {
        warn!("Results and view counts will not outlive this run");
    }
    Ok(Arc::new(store))
}

async fn read_stdin() -> Result<String> {
    use tokio::io::AsyncReadExt;

    let mut text = String::new();
    tokio::io::stdin().read_to_string(&mut text).await?;
    Ok(text)
}
