use std::io::BufRead;
use std::path::PathBuf;

use anyhow::Context;
use htom_bridge::app::Launcher;
use htom_bridge::kernel::services::adapters::{
    load_config, resolve_config_path, ProcessCoreLoader, TerminalHost, WidgetRegistry,
};
use htom_bridge::models::{TextBuffer, TextEdit};

mod logging;

fn main() -> anyhow::Result<()> {
    let explicit = std::env::args_os().nth(1).map(PathBuf::from);
    let config_path = resolve_config_path(explicit.as_deref())?;
    let config = load_config(&config_path)?;

    let logging = logging::init();
    if let Some(guard) = logging.as_ref() {
        eprintln!("htom-bridge: logging to {}", guard.log_dir().display());
    }

    let mut registry = WidgetRegistry::new();
    registry.register(config.widget.as_str(), TextBuffer::factory());
    let host = TerminalHost::new([config.element_id.as_str()]);
    let loader = ProcessCoreLoader::new().with_runner(config.runner.clone());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building runtime")?;
    let mut launcher = Launcher::new(config);
    let mut bridge = runtime
        .block_on(launcher.launch(&host, &loader, &registry))
        .with_context(|| format!("launching bridge from {}", config_path.display()))?;

    for line in std::io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        bridge.edit(TextEdit::Append(format!("{line}\n")));
    }

    let stats = bridge.stats();
    tracing::info!(
        sent = stats.messages_sent,
        applied = stats.effects_applied,
        ignored = stats.effects_ignored,
        failed = stats.send_failures,
        "stdin closed"
    );
    Ok(())
}
