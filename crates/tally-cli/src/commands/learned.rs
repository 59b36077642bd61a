//! Learned-state dump

use anyhow::Result;

use super::App;

pub fn cmd_learned(app: &App, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&app.engine.snapshot())?);
        return Ok(());
    }

    let associations = app.engine.learned_associations();
    if associations.is_empty() {
        println!("Nothing learned yet. Add expenses with 'tally add'.");
        return Ok(());
    }

    println!();
    println!(
        "🧠 Learned Expense Data (match policy: {})",
        app.engine.policy().as_str()
    );
    println!("   ─────────────────────────────────────");
    for assoc in &associations {
        println!("   {} → {}", assoc.key, assoc.category);
    }

    Ok(())
}
