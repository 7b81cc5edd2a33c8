// refcheck/src/commands/verify.rs
//
// USE CASE: Verify a dataset's foreign keys against the reference shards.

use std::path::PathBuf;

use anyhow::Context;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use refcheck_core::Verifier;
use refcheck_core::domain::verification::{ValidationMode, VerificationReport};
use refcheck_core::infrastructure::config::{ConfigOverrides, load_verifier_config};
use refcheck_core::infrastructure::fs::atomic_write;
use refcheck_core::infrastructure::loader::{load_row_dataset, load_table_model};
use tracing::debug;

pub struct VerifyArgs {
    pub model: PathBuf,
    pub data: PathBuf,
    pub project_dir: PathBuf,
    pub reference_dir: Option<PathBuf>,
    pub mode: Option<ValidationMode>,
    pub output: Option<PathBuf>,
    pub json: bool,
}

pub async fn execute(args: VerifyArgs) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Config (file < ENV < flags)
    let overrides = ConfigOverrides {
        reference_dir: args.reference_dir,
        mode: args.mode,
    };
    let dir = &args.project_dir;
    let config = load_verifier_config(dir, &overrides)
        .with_context(|| format!("Failed to load verifier configuration from {:?}", dir))?;

    // B. Inputs
    let model = load_table_model(&args.model)
        .with_context(|| format!("Failed to load table model {:?}", args.model))?;
    let dataset = load_row_dataset(&args.data)
        .with_context(|| format!("Failed to load dataset {:?}", args.data))?;

    if !args.json {
        println!("⚙️  Reference dir: {}", config.reference_dir.display());
        println!(
            "   Mode: {} | {} rows (v{}) | {} variables",
            config.mode,
            dataset.len(),
            dataset.version,
            model.variables.len()
        );
    }

    debug!(?config, "Effective verifier configuration");

    // C. Verify
    let verifier = Verifier::from_config(config);
    let report = verifier
        .verify(&dataset, &model)
        .await
        .context("Reference build failed")?;

    // D. Outputs
    if let Some(out) = &args.output {
        atomic_write(out, report.to_json()?)
            .with_context(|| format!("Failed to write report to {:?}", out))?;
        debug!(path = ?out, "Report written");
        if !args.json {
            println!("📄 Report saved to {}", out.display());
        }
    }

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print_summary(&report);
    }

    if report.is_success() {
        if !args.json {
            println!(
                "\n✨ SUCCESS! {} foreign key(s) resolved in {:.2?}",
                report.constraints.len(),
                start.elapsed()
            );
        }
    } else {
        // stderr: still visible next to `--json`
        if report.has_skipped_shards() {
            eprintln!(
                "⚠️  Unreadable shards: a missing value may be a false negative"
            );
        }
        if report.violations().iter().any(|v| v.kind.is_structural()) {
            eprintln!(
                "⚠️  Reference table or field missing: check reference-dir and shard names"
            );
        }
        if !args.json {
            eprintln!(
                "\n❌ FAILURE. {} violation(s) found.",
                report.violations().len()
            );
            if let Some(first) = report.result.first_violation() {
                eprintln!("   First: {}", first);
            }
        }
        // Exit with error code for CI/CD
        std::process::exit(1);
    }

    Ok(())
}

fn print_summary(report: &VerificationReport) {
    for build in &report.builds {
        println!(
            "   🗂️  {}: {} shard(s), {} read, {} record(s)",
            build.table, build.shards_discovered, build.shards_read, build.records_seen
        );
        for skipped in &build.skipped_shards {
            eprintln!(
                "      ⚠️  Skipped {}: {}",
                skipped.path.display(),
                skipped.reason
            );
        }
    }

    if report.violations().is_empty() {
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Row", "Field", "Value", "Reference", "Failure"]);

    for v in report.violations() {
        table.add_row(vec![
            v.row_index.to_string(),
            v.source_field.clone(),
            v.value.clone(),
            format!("{}:{}", v.table, v.field),
            v.kind.to_string(),
        ]);
    }

    println!("\n{}", table);
}
