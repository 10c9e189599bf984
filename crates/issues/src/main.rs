use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use issuepost::{Destination, PostsDir, Site};

mod gitee;

/// Turn the issues of a Gitee repository into Jekyll posts.
///
/// Posts that already exist are never overwritten.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Owner of the repository whose issues are exported
    #[arg(long, env = "ISSUEPOST_OWNER", default_value = "aywlzj")]
    owner: String,

    /// Repository whose issues are exported
    #[arg(long, env = "ISSUEPOST_REPO", default_value = "aywlzj.gitee.io")]
    repo: String,

    #[arg(long, env = "ISSUEPOST_API_BASE", default_value = gitee::DEFAULT_API_BASE)]
    api_base: String,

    /// Host used for the link back to each issue
    #[arg(long, env = "ISSUEPOST_WEB_BASE", default_value = "https://gitee.com")]
    web_base: String,

    /// Directory the posts are written to
    #[arg(long, env = "ISSUEPOST_POSTS_DIR", default_value = "_posts")]
    posts_dir: PathBuf,

    #[arg(long, env = "ISSUEPOST_USER_AGENT", default_value = gitee::DEFAULT_USER_AGENT)]
    user_agent: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let site = Site {
        web_base: cli.web_base,
        owner: cli.owner.clone(),
        repo: cli.repo.clone(),
    };
    let source = gitee::Gitee::new(gitee::Config {
        api_base: cli.api_base,
        owner: cli.owner,
        repo: cli.repo,
        user_agent: cli.user_agent,
    })
    .context("failed to build HTTP client")?;
    let posts = PostsDir::create(&cli.posts_dir)
        .with_context(|| format!("failed to create {}", cli.posts_dir.display()))?;

    let report = issuepost::run(&source, &site, &posts)?;

    println!();
    println!(
        "Done: {} new posts ({} already present, {} failed)",
        report.written,
        report.skipped(),
        report.failed()
    );
    println!("Posts directory: {}", posts.root().display());

    let documents = posts
        .documents()
        .with_context(|| format!("failed to list {}", posts.root().display()))?;
    if !documents.is_empty() {
        println!("\nAll posts ({}):", documents.len());
        for name in documents {
            println!("  - {name}");
        }
    }
    Ok(())
}
