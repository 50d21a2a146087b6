use anyhow::Result;
use clap::Parser;
use copycatch::config::Config;
use copycatch::detect::{self, similarity};
use copycatch::twitter::api::TwitterApi;
use copycatch::twitter::TimelineSource;
use tracing::{error, info};

/// Find accounts reposting a user's tweets and rank the likely thefts.
#[derive(Debug, Parser)]
#[command(name = "copycatch", version, about)]
struct Cli {
    /// Twitter handle to check, without the @
    username: String,

    /// How many recent posts to check
    #[arg(default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    count: u32,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        error!("{err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let api = TwitterApi::new(&config);

    let posts = api.recent_posts(&cli.username, cli.count as usize).await?;
    info!(count = posts.len(), user = %cli.username, "fetched recent posts");

    let metrics = similarity::default_metrics();
    let report = detect::run(&posts, &api, &metrics).await?;

    if report.is_empty() {
        println!("No suspicious copies of @{}'s posts found.", cli.username);
    } else {
        println!(
            "Found {} suspected theft(s) of @{}'s posts:\n",
            report.incidents().len(),
            cli.username
        );
        println!("{}", report.render());
    }

    Ok(())
}
