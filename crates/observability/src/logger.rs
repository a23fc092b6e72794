//! TracingLogger - `PluginLogger` backed by tracing events

use contracts::PluginLogger;

/// Forwards plugin messages to the active tracing subscriber
#[derive(Debug, Clone)]
pub struct TracingLogger {
    plugin: String,
}

impl TracingLogger {
    pub fn new(plugin: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
        }
    }

    pub fn plugin(&self) -> &str {
        &self.plugin
    }
}

impl PluginLogger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(plugin = %self.plugin, "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(plugin = %self.plugin, "{message}");
    }
}
