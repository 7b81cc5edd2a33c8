// refcheck/src/commands/index.rs
//
// USE CASE: Build the reference index alone (no dataset) to check shard coverage.

use std::path::PathBuf;

use anyhow::Context;
use comfy_table::{Table, presets::UTF8_FULL};
use refcheck_core::Verifier;
use refcheck_core::infrastructure::config::{ConfigOverrides, load_verifier_config};
use refcheck_core::infrastructure::loader::load_table_model;

pub async fn execute(
    model_path: PathBuf,
    project_dir: PathBuf,
    reference_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let overrides = ConfigOverrides {
        reference_dir,
        mode: None,
    };
    let dir = &project_dir;
    let config = load_verifier_config(dir, &overrides)
        .with_context(|| format!("Failed to load verifier configuration from {:?}", dir))?;
    let model = load_table_model(&model_path)
        .with_context(|| format!("Failed to load table model {:?}", model_path))?;

    println!("🔍 Indexing {}", config.reference_dir.display());

    let built = Verifier::from_config(config)
        .build_index(&model)
        .await
        .context("Reference build failed")?;

    let summary = built.index.summary();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Table", "Field", "Distinct values", "Shards"]);

    for stats in &built.stats {
        let shards = format!("{}/{}", stats.shards_read, stats.shards_discovered);
        // No shard file at all for this table.
        if !built.index.contains_table(&stats.table) {
            table.add_row(vec![stats.table.clone(), "-".into(), "missing".into(), shards]);
            continue;
        }

        match summary.get(&stats.table) {
            Some(fields) if !fields.is_empty() => {
                for (field, count) in fields {
                    table.add_row(vec![
                        stats.table.clone(),
                        field.clone(),
                        count.to_string(),
                        shards.clone(),
                    ]);
                }
            }
            _ => {
                table.add_row(vec![stats.table.clone(), "-".into(), "0".into(), shards]);
            }
        }
    }

    println!("{}", table);
    Ok(())
}
