use crate::prelude::*;
use clap::Parser;

mod error;
mod prelude;
mod serve;
mod trivia;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Fetch Open Trivia DB questions and chart them by difficulty and category"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Open Trivia DB base URL
    #[clap(
        long,
        env = "OPENTDB_API_URL",
        global = true,
        default_value = triviaviz_core::opentdb::API_BASE
    )]
    api_url: String,

    /// Whether to display additional information.
    #[clap(long, env = "TRIVIAVIZ_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Open Trivia DB (opentdb.com) operations
    Trivia(crate::trivia::App),

    /// Serve chart, category and question data as JSON over HTTP
    Serve(crate::serve::ServeOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Trivia(sub_app) => crate::trivia::run(sub_app, app.global).await,
        SubCommands::Serve(options) => crate::serve::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
