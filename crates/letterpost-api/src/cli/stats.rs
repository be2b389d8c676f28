//! Delivery statistics command.

use anyhow::Result;
use console::style;

use letterpost_core::storage::progress::ProgressTracker;
use letterpost_types::session::OwnerId;

use crate::state::AppState;

/// Display delivered-letter counts and the store in use.
///
/// With `owner`, also shows that owner's own count.
pub async fn stats(state: &AppState, owner: Option<OwnerId>, json: bool) -> Result<()> {
    let progress = state.composer.progress();
    let total = progress.completed_total().await?;
    let for_owner = match owner {
        Some(owner) => Some((owner, progress.completed_for(owner).await?)),
        None => None,
    };
    let active = state.composer.store().active_count().await?;

    if json {
        let mut out = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "store": state.config.store,
            "completed_letters": total,
            "active_compositions": active,
        });
        if let Some((owner, count)) = for_owner {
            out["owner"] = serde_json::json!({ "id": owner, "completed_letters": count });
        }
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Letterpost v{}",
        style("✉").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("  {}", style("── Letters ──").dim());
    println!("  Delivered:   {}", style(total).bold());
    println!("  In progress: {}", style(active).cyan());
    if let Some((owner, count)) = for_owner {
        println!("  Owner {owner}:  {}", style(count).green());
    }
    println!();
    println!("  {}", style("── Storage ──").dim());
    println!("  Store:    {:?}", state.config.store);
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!();

    Ok(())
}
