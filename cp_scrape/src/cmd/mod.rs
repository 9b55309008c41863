pub mod recent;
pub mod user;

use clap::ValueEnum;

#[derive(Debug, ValueEnum, Clone)]
pub enum TargetSite {
    Codechef,
    Codeforces,
    Spoj,
}
