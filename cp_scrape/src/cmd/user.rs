use crate::{
    cmd::TargetSite,
    modules::{codechef, codeforces, spoj},
};
use anyhow::{Context, Result};
use clap::Args;

#[derive(Debug, Args)]
pub struct UserArgs {
    /// Judge hosting the profile.
    site: TargetSite,
    /// User handle on that judge.
    handle: String,
}

pub async fn run(args: UserArgs) -> Result<()> {
    let rendered = match args.site {
        TargetSite::Codechef => {
            let profile = codechef::user_data(&args.handle)
                .await
                .with_context(|| format!("failed to scrape codechef profile of {}", args.handle))?;
            serde_json::to_string_pretty(&profile)?
        }
        TargetSite::Codeforces => match codeforces::user_data(&args.handle)
            .await
            .with_context(|| format!("failed to query codeforces profile of {}", args.handle))?
        {
            Some(profile) => serde_json::to_string_pretty(&profile)?,
            None => String::from("{}"),
        },
        TargetSite::Spoj => {
            let profile = spoj::user_data(&args.handle)
                .await
                .with_context(|| format!("failed to scrape spoj profile of {}", args.handle))?;
            serde_json::to_string_pretty(&profile)?
        }
    };

    println!("{}", rendered);
    Ok(())
}
