use super::{http_fetcher, load_config, Outcome, Overrides};
use crate::output::print_json;
use clap::Args;
use mirrorcheck_core::check::MirrorCheck;
use mirrorcheck_core::types::{Endpoint, ExtractorKind};
use std::path::Path;

#[derive(Args)]
pub struct CheckArgs {
    /// Project label used in the report (e.g. debian)
    pub project: String,

    /// Status page of one side (URL or file://path)
    pub first: String,

    /// Status page of the other side; which side is older is decided by the timestamps
    pub second: String,

    /// Status page format: debian, manjaro, unix_timestamp, datetime, recursive_ls
    #[arg(long, short = 'k', env = "MIRRORCHECK_KIND", default_value = "debian")]
    pub kind: String,

    /// Largest tolerated gap between the two mirrors, in hours
    #[arg(long)]
    pub threshold_hours: Option<u32>,
}

pub fn run(
    args: CheckArgs,
    config_path: Option<&Path>,
    timeout_seconds: Option<u64>,
    json: bool,
) -> anyhow::Result<Outcome> {
    // Everything that can be rejected without touching the network comes first.
    let kind: ExtractorKind = args.kind.parse()?;
    let check = MirrorCheck::new(
        args.project,
        Endpoint::new(args.first),
        Endpoint::new(args.second),
        kind,
    )?;
    let config = load_config(
        config_path,
        Overrides {
            threshold_hours: args.threshold_hours,
            timeout_seconds,
        },
    )?;

    let fetcher = http_fetcher(&config)?;
    let report = check.run(&fetcher, &config.policy())?;

    if json {
        print_json(&report)?;
    } else if report.is_stale() {
        println!("{report}");
    }

    if report.is_stale() {
        tracing::info!("{} is stale", check.project());
        Ok(Outcome::Stale)
    } else {
        Ok(Outcome::Ok)
    }
}
