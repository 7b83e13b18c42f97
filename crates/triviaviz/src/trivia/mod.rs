use crate::prelude::{eprintln, *};
use triviaviz_core::error::{SourceError, SourceResult};
use triviaviz_core::opentdb::{build_api_url, parse_question_response, validate_amount, TriviaQuestion};

pub mod categories;
pub mod chart;
pub mod list;

// Re-export public data functions
pub use categories::categories_data;
pub use chart::chart_data;
pub use list::list_data;

#[derive(Debug, clap::Parser)]
#[command(name = "trivia")]
#[command(about = "Open Trivia DB (opentdb.com) operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Chart a batch of questions by difficulty or by category
    #[clap(name = "chart")]
    Chart(chart::ChartOptions),

    /// List the categories present in a batch of questions
    #[clap(name = "categories")]
    Categories(categories::CategoriesOptions),

    /// List the questions of a batch
    #[clap(name = "list")]
    List(list::ListOptions),
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Open Trivia DB API Base: {}", global.api_url);
        eprintln!();
    }

    match app.command {
        Commands::Chart(options) => chart::run(options, global).await,
        Commands::Categories(options) => categories::run(options, global).await,
        Commands::List(options) => list::run(options, global).await,
    }
}

/// Fetch one batch of questions from the question source
///
/// Every failure comes back as a `SourceError` value: bad amount, transport
/// failure, non-2xx status, a body that is not a question payload, or an API
/// response code other than success.
pub async fn fetch_questions(
    client: &reqwest::Client,
    api_url: &str,
    amount: u32,
) -> SourceResult<Vec<TriviaQuestion>> {
    let amount = validate_amount(amount)?;
    let url = build_api_url(api_url, amount);
    log::debug!("GET {url}");

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| SourceError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        log::warn!("{url} answered with HTTP {status}");
        return Err(SourceError::SourceUnavailable {
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| SourceError::Transport(e.to_string()))?;

    let questions = parse_question_response(&body).inspect_err(|e| log::error!("{e}"))?;

    let unrecognized = questions
        .iter()
        .filter(|q| !q.difficulty.is_canonical())
        .count();
    if unrecognized > 0 {
        log::warn!("{unrecognized} question(s) have an unrecognized difficulty and will not be counted");
    }
    log::info!("Fetched {} question(s)", questions.len());

    Ok(questions)
}

/// Fetch a batch for a CLI command or HTTP request, converting the error into a report
pub async fn fetch_batch(global: &crate::Global, amount: u32) -> Result<Vec<TriviaQuestion>> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("triviaviz/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build the HTTP client")?;

    if global.verbose {
        eprintln!("Fetching {amount} questions...");
    }

    let questions = fetch_questions(&client, &global.api_url, amount)
        .await
        .map_err(Error::from)?;

    Ok(questions)
}
