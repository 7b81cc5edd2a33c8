// refcheck/src/commands/constraints.rs
//
// USE CASE: Show which foreign keys a table model declares.

use std::path::PathBuf;

use anyhow::Context;
use refcheck_core::domain::ConstraintSet;
use refcheck_core::infrastructure::loader::load_table_model;

pub fn execute(model_path: PathBuf) -> anyhow::Result<()> {
    let model = load_table_model(&model_path)
        .with_context(|| format!("Failed to load table model {:?}", model_path))?;

    let constraints = ConstraintSet::extract(&model);
    let declared = model.variables.iter().filter(|v| v.fk().is_some()).count();

    println!(
        "📋 {} foreign key(s) over {} variable(s)",
        constraints.len(),
        model.variables.len()
    );
    for c in constraints.constraints() {
        println!("   🔗 {}", c);
    }

    if declared > constraints.len() {
        eprintln!(
            "   ⚠️  {} malformed fk value(s) ignored (expected '<Table>:<Field>')",
            declared - constraints.len()
        );
    }

    println!("\n🗂️  Build jobs:");
    for (table, fields) in constraints.targets() {
        let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
        println!("   {} [{}]", table, fields.join(", "));
    }

    Ok(())
}
