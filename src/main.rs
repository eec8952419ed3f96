use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use portfolio_core::models::{
    ContactMessage, ProfileStats, Rating, RepositorySummary, StatsReport, StoredTestimonial,
    Testimonial,
};
use portfolio_core::screen::{Feedback, FormController, FormDraft, RepositoryPanel, StatsPanel};
use portfolio_core::{
    Config, FormSubmissionGateway, RemoteStatsAggregator, StoreConfig, SupabaseStore,
    TestimonialFeed,
};

const ANALYTICS_FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Parser, Debug)]
#[command(name = "portfolio")]
#[command(version)]
#[command(about = "Portfolio data: coding stats, repositories, contact and testimonials")]
struct Args {
    /// Output format (json, text)
    #[arg(short, long, default_value = "text", global = true)]
    format: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Coding-challenge profile stats
    Stats {
        /// Profile username (defaults to LEETCODE_USERNAME)
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Most recently updated repositories
    Repos {
        /// GitHub username (defaults to GITHUB_USERNAME)
        #[arg(short, long)]
        username: Option<String>,

        /// Maximum number of repositories
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Stats and repositories side by side
    Overview,
    /// Send a contact message
    Contact {
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
    /// Leave a testimonial
    Testimonial {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        role: String,
        #[arg(long, default_value = "")]
        company: String,
        #[arg(long)]
        message: String,
        /// Star rating from 1 to 5
        #[arg(long, default_value = "5")]
        rating: u8,
    },
    /// List submitted testimonials, newest first
    Testimonials {
        #[arg(short, long)]
        limit: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("portfolio_core=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;

    match &args.command {
        Command::Stats { username } => {
            let aggregator = RemoteStatsAggregator::from_config(&config)?;
            let username = username.as_deref().unwrap_or(&config.leetcode_username);

            let mut panel = StatsPanel::new();
            let pb = spinner("Fetching latest stats...");
            panel.activate(&aggregator, username).await;
            pb.finish_and_clear();

            if let Some(report) = panel.state().ready() {
                emit(&args, report, format_stats)?;
            }
        }
        Command::Repos { username, limit } => {
            let aggregator = RemoteStatsAggregator::from_config(&config)?;
            let username = username.as_deref().unwrap_or(&config.github_username);

            let mut panel = RepositoryPanel::new();
            let pb = spinner("Fetching repositories...");
            panel
                .activate(&aggregator, username, limit.unwrap_or(config.repo_limit))
                .await;
            pb.finish_and_clear();

            emit(&args, &panel.repositories().to_vec(), |r| format_repos(r))?;
            if panel.is_empty_after_load() {
                eprintln!("No repositories to show. Run the command again to retry.");
            }
        }
        Command::Overview => {
            let aggregator = RemoteStatsAggregator::from_config(&config)?;
            let pb = spinner("Fetching stats and repositories...");
            let overview = aggregator
                .fetch_overview(
                    &config.leetcode_username,
                    &config.github_username,
                    config.repo_limit,
                )
                .await;
            pb.finish_and_clear();

            emit(&args, &overview, |o| {
                format!("{}\n{}", format_stats(&o.stats), format_repos(&o.repositories))
            })?;
        }
        Command::Contact {
            email,
            subject,
            message,
        } => {
            let gateway = gateway(&config)?;
            let mut form = FormController::<ContactMessage>::new();
            *form.draft_mut() = ContactMessage {
                email: email.clone(),
                subject: subject.clone(),
                message: message.clone(),
            };
            submit_form(&mut form, &gateway).await?;
        }
        Command::Testimonial {
            name,
            role,
            company,
            message,
            rating,
        } => {
            let gateway = gateway(&config)?;
            let mut form = FormController::<Testimonial>::new();
            *form.draft_mut() = Testimonial {
                name: name.clone(),
                role: role.clone(),
                company: company.clone(),
                message: message.clone(),
                rating: Rating::new(*rating),
            };
            submit_form(&mut form, &gateway).await?;

            let wall = TestimonialFeed::new(gateway.store().clone())
                .with_limit(5)
                .load()
                .await;
            emit(&args, &wall, |t| format_testimonials(t))?;
        }
        Command::Testimonials { limit } => {
            let store = Arc::new(SupabaseStore::new(&StoreConfig::from_env()?)?);
            let mut feed = TestimonialFeed::new(store);
            if let Some(limit) = limit {
                feed = feed.with_limit(*limit);
            }

            let pb = spinner("Loading testimonials...");
            let wall = feed.load().await;
            pb.finish_and_clear();

            emit(&args, &wall, |t| format_testimonials(t))?;
        }
    }

    Ok(())
}

fn gateway(config: &Config) -> anyhow::Result<FormSubmissionGateway> {
    let store = SupabaseStore::new(&StoreConfig::from_env()?)?;
    Ok(FormSubmissionGateway::new(Arc::new(store)).with_analytics(config.analytics_enabled))
}

async fn submit_form<D: FormDraft>(
    form: &mut FormController<D>,
    gateway: &FormSubmissionGateway,
) -> anyhow::Result<()> {
    let pb = spinner("Submitting...");
    let stored = form.submit(gateway).await;
    gateway.flush_analytics(ANALYTICS_FLUSH_TIMEOUT).await;
    pb.finish_and_clear();

    for (field, message) in &form.field_errors().field_errors {
        eprintln!("  {}: {}", field, message);
    }

    match form.feedback() {
        Some(Feedback::Success(message)) => println!("{}", message),
        Some(Feedback::Error(message)) => anyhow::bail!("{}", message),
        None => {}
    }

    if !stored {
        anyhow::bail!("Submission failed");
    }
    Ok(())
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn emit<T: Serialize>(args: &Args, value: &T, text: impl Fn(&T) -> String) -> anyhow::Result<()> {
    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(value)?,
        _ => text(value),
    };
    println!("{}", output);
    Ok(())
}

fn format_stats(report: &StatsReport) -> String {
    let stats: &ProfileStats = &report.stats;
    let mut output = String::new();

    output.push_str("\n=== Coding Stats ===\n\n");
    output.push_str(&format!(
        "Solved: {}/{} ({:.1}%)\n",
        stats.total_solved,
        stats.total_questions,
        stats.completion_percent()
    ));
    for (difficulty, count) in stats.per_difficulty.iter() {
        output.push_str(&format!(
            "  {:<7} {}/{} ({:.1}%)\n",
            difficulty,
            count.solved,
            count.total,
            count.percent()
        ));
    }
    match stats.ranking {
        Some(ranking) => output.push_str(&format!("Ranking: {}\n", ranking)),
        None => output.push_str("Ranking: unknown\n"),
    }
    output.push_str(&format!("Acceptance: {:.1}%\n", stats.acceptance_rate));
    output.push_str(&format!("Contribution points: {}\n", stats.contribution_points));

    if let Some(notice) = report.notice() {
        output.push_str(&format!("\nNote: showing sample stats ({})\n", notice));
    }

    output
}

fn format_repos(repos: &[RepositorySummary]) -> String {
    let mut output = String::from("\n=== Recent Repositories ===\n\n");

    for repo in repos {
        output.push_str(&format!("{} ★{}", repo.name, repo.star_count));
        if let Some(ref language) = repo.primary_language {
            output.push_str(&format!(" [{}]", language));
        }
        output.push('\n');
        if !repo.description.is_empty() {
            output.push_str(&format!("  {}\n", repo.description));
        }
        if !repo.topics.is_empty() {
            output.push_str(&format!("  topics: {}\n", repo.topics.join(", ")));
        }
        output.push_str(&format!("  {}\n", repo.url));
        if let Some(ref homepage) = repo.homepage_url {
            output.push_str(&format!("  live: {}\n", homepage));
        }
        output.push_str(&format!(
            "  updated {}\n",
            repo.last_updated_at.format("%Y-%m-%d")
        ));
    }

    output
}

fn format_testimonials(wall: &[StoredTestimonial]) -> String {
    let mut output = String::from("\n=== Testimonials ===\n\n");

    for t in wall {
        let stars = "★".repeat(t.rating.value() as usize);
        output.push_str(&format!("{} {}\n", t.name, stars));
        let position: Vec<&str> = [t.role.as_deref(), t.company.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if !position.is_empty() {
            output.push_str(&format!("  {}\n", position.join(" @ ")));
        }
        output.push_str(&format!("  \"{}\"\n", t.message));
        output.push_str(&format!("  {}\n", t.created_at.format("%Y-%m-%d")));
    }

    output
}
