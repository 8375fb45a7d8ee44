use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use showcase_events::EventBus;
use showcase_placement::{Maintenance, PlacementConfig, PlacementState, RequestContext};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "showcase_placement=debug,showcase_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = PlacementConfig::from_env().context("invalid placement configuration")?;
    tracing::info!(
        store_dir = %config.local_store_dir.display(),
        classifieds = %config.store_names.classifieds,
        services = %config.store_names.services,
        "Loaded placement configuration"
    );

    // --- Store ---
    let db = showcase_db::open_local(config.local_store_dir.clone(), config.store_names.clone())
        .await
        .context("failed to open local store")?;

    let state = PlacementState::new(db, Arc::new(EventBus::new(config.event_bus_capacity)));
    let maintenance = Maintenance::new(state);

    // --- Ctrl-C abandons the run; boards already rebuilt stay rebuilt ---
    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling maintenance run");
            ctrl_c.cancel();
        }
    });

    let ctx = RequestContext::system().with_cancel(cancel);
    let report = maintenance.run_all(&ctx).await?;

    let problems = report.audits.iter().filter(|a| !a.is_clean()).count();
    for audit in &report.audits {
        tracing::info!(
            vertical = %audit.vertical,
            kind = %audit.kind,
            indexed = audit.indexed,
            dangling = audit.dangling_ids.len(),
            violations = audit.slot_violations.len(),
            "Audited index"
        );
    }
    tracing::info!(
        boards = report.rebuilds.len(),
        boards_with_problems = problems,
        "Maintenance run complete"
    );

    Ok(())
}
