use tracing::info;

/// Handshake with the embedding host (the Telegram Mini App container).
///
/// Called once at startup, before anything is rendered.
pub trait HostBridge {
    /// Signal that the app is ready to be shown.
    fn ready(&mut self);

    /// Ask for the full viewport.
    fn expand(&mut self);
}

/// Host used outside of Telegram: the handshake is only logged.
#[derive(Debug, Default)]
pub struct StandaloneHost {
    ready: bool,
    expanded: bool,
}

impl StandaloneHost {
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }
}

impl HostBridge for StandaloneHost {
    fn ready(&mut self) {
        self.ready = true;
        info!("Host ready");
    }

    fn expand(&mut self) {
        self.expanded = true;
        info!("Host viewport expanded");
    }
}

/// Perform the startup handshake.
pub fn handshake<H: HostBridge + ?Sized>(host: &mut H) {
    host.ready();
    host.expand();
}
