//! Headless combat simulator entry point.
//!
//! Loads the content set, plays one encounter with the autopilot and logs
//! the event stream and the performance summary.
mod autopilot;
mod config;

use anyhow::{Context, Result};
use combat_content::ContentFactory;
use combat_core::CombatEvent;
use tracing_subscriber::EnvFilter;

use crate::autopilot::{Autopilot, RunOutcome};
use crate::config::SimConfig;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let config = SimConfig::from_env();
    tracing::info!(
        data_dir = %config.data_dir.display(),
        encounter = %config.encounter,
        seed = config.seed,
        "Starting simulation"
    );

    let factory = ContentFactory::new(&config.data_dir);
    let mut session = factory
        .build_session(&config.encounter, config.seed)
        .context("Failed to assemble combat")?;

    let outcome = Autopilot::new()
        .run(&mut session, config.max_turns, log_event)
        .context("Autopilot stopped on a rejected action")?;

    match (outcome, session.summary()) {
        (RunOutcome::Finished, Some(summary)) => tracing::info!(
            result = ?session.result(),
            turns = summary.turns_taken,
            speed = summary.speed_bonus,
            impact = summary.impact_bonus,
            risk = summary.risk_bonus,
            total = summary.total,
            "Simulation finished"
        ),
        _ => tracing::warn!(
            max_turns = config.max_turns,
            "Turn limit reached before the combat ended"
        ),
    }

    Ok(())
}

/// `RUST_LOG` replaces the default `info` filter entirely when it parses.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn log_event(event: &CombatEvent) {
    match event {
        CombatEvent::CombatEnded { .. }
        | CombatEvent::EnemyDefeated { .. }
        | CombatEvent::EnemyBroken { .. }
        | CombatEvent::CharacterIncapacitated { .. }
        | CombatEvent::TaggedIn { .. } => tracing::info!(?event),
        CombatEvent::PerformanceSummary(_) => {}
        _ => tracing::debug!(?event),
    }
}
