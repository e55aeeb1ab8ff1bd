//! `render` command: drive the toggle controller headlessly and export the
//! resulting overlay.

use std::path::Path;

use anyhow::Context;
use clubmap_core::{AppConfig, ToggleEvent};
use clubmap_fff::FffClient;
use clubmap_overlay::{ErrorListHtml, GeoJsonMap, OverlayRegistry, ToggleController, ToggleOutcome};
use futures::future::join_all;

/// Enable every championship in `on` concurrently, then disable those in
/// `off` in order, then write the map as GeoJSON and list geocode failures.
///
/// # Errors
///
/// Returns an error only if the GeoJSON cannot be serialized or written.
/// Per-championship fetch failures degrade to fewer markers.
pub(crate) async fn run_render(
    client: FffClient,
    config: &AppConfig,
    on: &[String],
    off: &[String],
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let controller = ToggleController::new(
        client,
        OverlayRegistry::new(GeoJsonMap::new(), config.icon_base_url.clone()),
        ErrorListHtml::new(),
    );

    let outcomes = join_all(
        on.iter()
            .map(|id| controller.handle(ToggleEvent::enabled(id.clone()))),
    )
    .await;
    for (id, outcome) in on.iter().zip(outcomes) {
        eprintln!("  {id:<10} {}", describe_outcome(outcome));
    }

    for id in off {
        let outcome = controller.handle(ToggleEvent::disabled(id.clone())).await;
        eprintln!("  {id:<10} {}", describe_outcome(outcome));
    }

    let (registry, errors) = controller.into_parts();
    for line in errors.lines() {
        eprintln!("  \u{2717} {line}");
    }

    let collection = registry.map().to_feature_collection(Some(&config.map_view));
    let rendered = serde_json::to_string_pretty(&collection)?;
    match output {
        Some(path) => {
            tokio::fs::write(path, rendered)
                .await
                .with_context(|| format!("failed to write GeoJSON to {}", path.display()))?;
            eprintln!(
                "Wrote {} marker(s) to {}",
                registry.markers().len(),
                path.display()
            );
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

fn describe_outcome(outcome: ToggleOutcome) -> String {
    match outcome {
        ToggleOutcome::Activated { placed, failed } => {
            format!("\u{2713} {placed} placed, {failed} without coordinates")
        }
        ToggleOutcome::Deactivated { removed } => format!("\u{2713} {removed} removed"),
        ToggleOutcome::Ignored => "already shown, skipped".to_string(),
        ToggleOutcome::Discarded => "hidden while loading, discarded".to_string(),
    }
}
