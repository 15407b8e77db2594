use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payflow::application::checkout::CheckoutFlow;
use payflow::domain::card::CardId;
use payflow::domain::category::CategoryId;
use payflow::domain::ports::{CatalogProviderBox, RewardAnalyzerBox};
use payflow::infrastructure::http::HttpRewardAnalyzer;
use payflow::infrastructure::in_memory::{InMemoryCatalog, StaticRewardAnalyzer};
use payflow::interfaces::cli;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Merchant category to shop: airlines, grocery, bigticket or dining
    #[arg(default_value = "grocery")]
    category: String,

    /// Reward analyzer endpoint. Uses the built-in offline analyzer when omitted.
    #[arg(long)]
    analyzer_url: Option<String>,

    /// User identity attached to analyzer requests
    #[arg(long, default_value = "user123")]
    user_id: String,

    /// Pay with a specific card id instead of the best-ranked one
    #[arg(long)]
    card: Option<String>,

    /// Analyzer request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let category: CategoryId = args.category.parse().into_diagnostic()?;

    let catalog: CatalogProviderBox = Box::new(InMemoryCatalog::new());
    let analyzer: RewardAnalyzerBox = match &args.analyzer_url {
        Some(url) => Box::new(
            HttpRewardAnalyzer::with_timeout(
                url.clone(),
                args.user_id.clone(),
                Duration::from_secs(args.timeout),
            )
            .into_diagnostic()?,
        ),
        None => Box::new(StaticRewardAnalyzer::new()),
    };

    let mut flow = CheckoutFlow::new(catalog, analyzer);

    flow.select_category(category).await.into_diagnostic()?;
    println!("{}", cli::render(flow.session()));

    flow.proceed_to_payment().await.into_diagnostic()?;
    println!("{}", cli::render(flow.session()));

    if let Some(card) = args.card {
        flow.select_card(CardId::new(card)).into_diagnostic()?;
    }

    flow.confirm_pay().into_diagnostic()?;
    println!("{}", cli::render(flow.session()));

    Ok(())
}
