use crate::modules::codechef;
use anyhow::{Context, Result};
use clap::Args;

#[derive(Debug, Args)]
pub struct RecentArgs {
    /// User handle on CodeChef.
    handle: String,
    /// How many submissions to report.
    #[arg(long, default_value_t = 10)]
    count: usize,
}

pub async fn run(args: RecentArgs) -> Result<()> {
    let recent = codechef::recent_submissions(&args.handle, args.count)
        .await
        .with_context(|| format!("failed to list recent submissions of {}", args.handle))?;

    println!("{}", serde_json::to_string_pretty(&recent)?);
    Ok(())
}
