//! Host UI notification hooks.
//!
//! A host passes a small struct of callbacks at construction time; the
//! defaults only log, mirroring a headless host.

use tracing::info;

/// Static copy for the missing-provider banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPrompt {
    pub title: &'static str,
    pub message: &'static str,
    pub download_url: &'static str,
}

/// The prompt surfaced when no wallet provider is injected.
pub const INSTALL_PROMPT: InstallPrompt = InstallPrompt {
    title: "MetaMask Required",
    message: "Please install MetaMask to use this DApp.",
    download_url: "https://metamask.io/download/",
};

type AccountChangedFn = dyn Fn(&str, Option<&str>) + Send + Sync;
type ChainChangedFn = dyn Fn(&str) + Send + Sync;
type PromptFn = dyn Fn(&InstallPrompt) + Send + Sync;
type NotifyFn = dyn Fn() + Send + Sync;

/// Overridable notification hooks for a host UI.
pub struct ConnectorHooks {
    on_account_changed: Box<AccountChangedFn>,
    on_chain_changed: Box<ChainChangedFn>,
    on_disconnect: Box<NotifyFn>,
    on_install_prompt: Box<PromptFn>,
    on_install_prompt_dismissed: Box<NotifyFn>,
    on_reload_requested: Box<NotifyFn>,
}

impl Default for ConnectorHooks {
    fn default() -> Self {
        Self {
            on_account_changed: Box::new(|account, chain_id| {
                info!("Account changed: {} (chain: {:?})", account, chain_id);
            }),
            on_chain_changed: Box::new(|chain_id| {
                info!("Chain changed: {}", chain_id);
            }),
            on_disconnect: Box::new(|| {
                info!("Wallet disconnected");
            }),
            on_install_prompt: Box::new(|prompt| {
                info!("{}: {} ({})", prompt.title, prompt.message, prompt.download_url);
            }),
            on_install_prompt_dismissed: Box::new(|| {}),
            on_reload_requested: Box::new(|| {
                info!("Host reload requested after chain change");
            }),
        }
    }
}

impl ConnectorHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the active account and, when known, the chain id.
    pub fn with_account_changed(
        mut self,
        f: impl Fn(&str, Option<&str>) + Send + Sync + 'static,
    ) -> Self {
        self.on_account_changed = Box::new(f);
        self
    }

    pub fn with_chain_changed(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_chain_changed = Box::new(f);
        self
    }

    pub fn with_disconnect(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_disconnect = Box::new(f);
        self
    }

    pub fn with_install_prompt(
        mut self,
        f: impl Fn(&InstallPrompt) + Send + Sync + 'static,
    ) -> Self {
        self.on_install_prompt = Box::new(f);
        self
    }

    /// Called once the prompt's display window elapses.
    pub fn with_install_prompt_dismissed(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_install_prompt_dismissed = Box::new(f);
        self
    }

    /// Called after a chain change when the connector is configured to
    /// ask the host for a reload.
    pub fn with_reload_requested(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_reload_requested = Box::new(f);
        self
    }

    pub(crate) fn account_changed(&self, account: &str, chain_id: Option<&str>) {
        (self.on_account_changed)(account, chain_id);
    }

    pub(crate) fn chain_changed(&self, chain_id: &str) {
        (self.on_chain_changed)(chain_id);
    }

    pub(crate) fn disconnect(&self) {
        (self.on_disconnect)();
    }

    pub(crate) fn install_prompt(&self, prompt: &InstallPrompt) {
        (self.on_install_prompt)(prompt);
    }

    pub(crate) fn install_prompt_dismissed(&self) {
        (self.on_install_prompt_dismissed)();
    }

    pub(crate) fn reload_requested(&self) {
        (self.on_reload_requested)();
    }
}
