use super::{http_fetcher, load_config, Overrides};
use crate::output::print_json;
use clap::Args;
use mirrorcheck_core::resolve::resolve;
use mirrorcheck_core::types::{Endpoint, ExtractorKind};
use std::path::Path;

#[derive(Args)]
pub struct InspectArgs {
    /// Status page to read (URL or file://path)
    pub endpoint: String,

    /// Status page format
    #[arg(long, short = 'k', env = "MIRRORCHECK_KIND", default_value = "debian")]
    pub kind: String,
}

pub fn run(
    args: InspectArgs,
    config_path: Option<&Path>,
    timeout_seconds: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    let kind: ExtractorKind = args.kind.parse()?;
    let config = load_config(
        config_path,
        Overrides {
            threshold_hours: None,
            timeout_seconds,
        },
    )?;
    let fetcher = http_fetcher(&config)?;
    let mirror = resolve(&fetcher, &Endpoint::new(args.endpoint), kind)?;

    if json {
        print_json(&serde_json::json!({
            "endpoint": mirror.endpoint,
            "kind": kind,
            "synced_at": mirror.synced_at.instant.to_rfc3339(),
            "zone": mirror.synced_at.zone,
        }))?;
    } else {
        println!("Endpoint:  {}", mirror.endpoint);
        println!("Kind:      {kind}");
        println!("Synced at: {}", mirror.synced_at);
        println!("Zone:      {}", mirror.synced_at.zone.as_str());
    }
    Ok(())
}
