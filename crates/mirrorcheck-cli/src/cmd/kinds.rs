use crate::output::{format_table, print_json};
use mirrorcheck_core::types::ExtractorKind;

pub fn run(json: bool) -> anyhow::Result<()> {
    if json {
        let kinds: Vec<_> = ExtractorKind::all()
            .iter()
            .map(|k| {
                serde_json::json!({
                    "kind": k.as_str(),
                    "description": k.description(),
                    "default": *k == ExtractorKind::default(),
                })
            })
            .collect();
        return print_json(&kinds);
    }

    let rows: Vec<Vec<String>> = ExtractorKind::all()
        .iter()
        .map(|k| {
            let name = if *k == ExtractorKind::default() {
                format!("{k} (default)")
            } else {
                k.to_string()
            };
            vec![name, k.description().to_string()]
        })
        .collect();
    println!("{}", format_table(&["KIND", "READS"], &rows));
    Ok(())
}
