use super::models::{AppEvent, EventBus};
use std::sync::Arc;
use colored::Colorize;

impl EventBus {
    pub fn new(silent_mode: bool) -> Arc<Self> {
        Arc::new(Self { silent_mode })
    }

    pub fn emit(&self, event: AppEvent) {
        // Tests and embedders run silent; tracing output is kept
        if self.silent_mode {
            Self::trace(&event);
            return;
        }

        match event {
            // Application lifecycle
            AppEvent::Starting => {
                println!("\n{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());
                println!("  {}", "Gatehouse - UI Resource Server".white().bold());
                println!("  {} {}", "Version".dimmed(), env!("CARGO_PKG_VERSION").cyan());
                println!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());
            }
            AppEvent::Ready { addr, context_root } => {
                println!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".green());
                println!("  {} {}", "Server".white(), addr.cyan());
                println!("  {} {}", "Mount ".white(), context_root.blue());
                println!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".green());
            }
            AppEvent::Shutdown => {
                println!("\n{}", "Server shutting down".red());
            }

            // Configuration
            AppEvent::ConfigLoading { path } => {
                println!("  {} {}", "Loading config".dimmed(), path.cyan());
            }
            AppEvent::ConfigLoaded { roots_count } => {
                if roots_count == 0 {
                    println!("  {} No root directories configured", "⚠".yellow());
                } else {
                    println!("  {} {} root(s)", "✓".green(), roots_count.to_string().cyan());
                }
            }
            AppEvent::ConfigMigrated { added_fields } => {
                if !added_fields.is_empty() {
                    println!("  {} Config updated: added {}",
                        "↻".blue(),
                        added_fields.join(", ").dimmed()
                    );
                }
            }

            // UI mount lifecycle
            AppEvent::UiRegistered { context_root } => {
                println!("  {} UI mounted at {}", "✓".green(), context_root.cyan());
            }
            AppEvent::UiModified { context_root } => {
                println!("  {} UI remounted at {}", "↻".blue(), context_root.cyan());
            }
            AppEvent::UiUnregistered { context_root } => {
                println!("  {} UI unmounted from {}", "-".red(), context_root.cyan());
            }
            AppEvent::UiDisabled { reason } => {
                println!("  {} {}", "⚠".yellow(), reason);
            }

            AppEvent::RootMissing { path } => {
                println!("  {} Root directory not found: {}", "⚠".yellow(), path.dimmed());
            }

            event => Self::trace(&event),
        }
    }

    fn trace(event: &AppEvent) {
        match event {
            AppEvent::ConfigCreated { path } => {
                tracing::warn!("Configuration file not found");
                tracing::info!("Created default configuration at: {}", path);
            }
            AppEvent::ConfigReloaded => {
                tracing::info!("Configuration reloaded successfully");
            }
            AppEvent::ConfigError { error } => {
                tracing::error!("Configuration error: {}", error);
            }
            AppEvent::AllowListDefaulted { entries } => {
                tracing::warn!(
                    "ui.allowed_directories is empty, falling back to the {} configured root(s)",
                    entries
                );
            }
            AppEvent::Error { context, error } => {
                tracing::error!("{}: {}", context, error);
            }
            other => {
                tracing::debug!("event: {:?}", other);
            }
        }
    }
}
