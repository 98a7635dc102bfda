use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use apify_client::{ApifyClient, EngagementKind};
use lead_harvest::jobs::{self, engagers::EngagersQuery, posts::PostsQuery};
use lead_harvest::{extract_company, Config};

#[derive(Parser)]
#[command(name = "lead-harvest")]
#[command(about = "Collect LinkedIn commenters, engagers, profiles and posts into CSV via Apify")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Harvest(HarvestCommand),

    /// Print the company parsed from a headline (reads stdin lines if omitted)
    Company {
        text: Option<String>,
    },
}

#[derive(Subcommand)]
enum HarvestCommand {
    /// Commenters of one or more posts, with company parsed from their headline
    Comments {
        /// Post URL (repeatable)
        #[arg(short, long = "post", value_name = "URL", required = true)]
        posts: Vec<String>,

        #[arg(short, long, default_value = "importedcomments.csv")]
        output: PathBuf,
    },

    /// Likers or commenters of a post
    Engagers {
        /// Post URL
        #[arg(short, long)]
        url: String,

        /// Index of the first engager to fetch
        #[arg(long, default_value_t = 0)]
        start: u32,

        /// Number of result pages the actor walks
        #[arg(long, default_value_t = 1)]
        iterations: u32,

        /// likers or commenters
        #[arg(short, long, default_value_t = EngagementKind::Likers)]
        kind: EngagementKind,

        #[arg(short, long, default_value = "importedlikers.csv")]
        output: PathBuf,
    },

    /// Profile details for every URL in a CSV column (appends to output)
    Profiles {
        #[arg(short, long, default_value = "importedcomments.csv")]
        input: PathBuf,

        /// Column holding the profile URL
        #[arg(long, default_value = "linkedinUrl")]
        column: String,

        #[arg(short, long, default_value = "importedcompany.csv")]
        output: PathBuf,
    },

    /// Keyword post search, keeping posts with enough comments
    Posts {
        #[arg(short, long)]
        keyword: String,

        /// relevance or date_posted
        #[arg(long, default_value = "relevance")]
        sort: String,

        #[arg(long, default_value_t = 50)]
        limit: u32,

        #[arg(long, default_value_t = 1)]
        page: u32,

        /// past-24h, past-week or past-month
        #[arg(long, default_value = "past-week")]
        date_filter: String,

        #[arg(long, default_value_t = 4)]
        min_comments: i64,

        #[arg(short, long, default_value = "importedposts.csv")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("lead_harvest=info".parse()?)
                .add_directive("apify_client=info".parse()?),
        )
        .init();

    let command = match Cli::parse().command {
        Commands::Harvest(command) => command,
        Commands::Company { text } => return print_companies(text.as_deref()),
    };

    let config = Config::from_env()?;
    config.log_redacted();
    let client = ApifyClient::new(config.apify_api_key.clone(), &config.apify_base_url);
    let page_size = config.page_size;

    let summary = match command {
        HarvestCommand::Comments { posts, output } => {
            info!(posts = posts.len(), "Harvesting post commenters");
            jobs::harvest_comments(&client, &posts, page_size, &output).await?
        }
        HarvestCommand::Engagers {
            url,
            start,
            iterations,
            kind,
            output,
        } => {
            let query = EngagersQuery {
                post_url: url,
                start,
                iterations,
                kind,
            };
            info!(post_url = %query.post_url, kind = %query.kind, "Harvesting post engagers");
            jobs::harvest_engagers(&client, &query, page_size, &output).await?
        }
        HarvestCommand::Profiles {
            input,
            column,
            output,
        } => {
            let urls = jobs::profiles::read_profile_urls(&input, &column)?;
            info!(profiles = urls.len(), input = %input.display(), "Harvesting profiles");
            jobs::harvest_profiles(&client, &urls, page_size, &output).await?
        }
        HarvestCommand::Posts {
            keyword,
            sort,
            limit,
            page,
            date_filter,
            min_comments,
            output,
        } => {
            let query = PostsQuery {
                keyword,
                sort_type: sort,
                limit,
                page_number: page,
                date_filter,
                min_comments,
            };
            info!(keyword = %query.keyword, "Searching posts");
            jobs::harvest_posts(&client, &query, page_size, &output).await?
        }
    };

    println!(
        "{} rows written ({} seen, {} skipped)",
        summary.written, summary.seen, summary.skipped
    );
    Ok(())
}

fn print_companies(text: Option<&str>) -> Result<()> {
    if let Some(text) = text {
        println!("{}", extract_company(Some(text)));
        return Ok(());
    }
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        println!("{}", extract_company(Some(&line)));
    }
    Ok(())
}
