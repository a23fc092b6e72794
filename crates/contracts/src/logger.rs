//! PluginLogger trait - leveled, fire-and-forget messages to the host

/// Host-facing logger capability
///
/// Nothing is returned; a logger must never fail the caller.
pub trait PluginLogger {
    fn info(&self, message: &str);

    fn warn(&self, message: &str) {
        self.info(message);
    }
}

impl<L: PluginLogger + ?Sized> PluginLogger for &L {
    fn info(&self, message: &str) {
        (**self).info(message);
    }

    fn warn(&self, message: &str) {
        (**self).warn(message);
    }
}
