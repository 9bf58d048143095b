/// Share Dispatcher: what each widget action does to the preference and the shell

use crate::action::{Action, WidgetData};
use crate::preference::PreferenceStore;
use crate::prompt::{PromptGate, ask_for_host};
use crate::share::share_url;
use crate::shell::Shell;
use crate::storage::KeyValueStore;

pub const NO_SAVED_NOTICE: &str = "No saved instance yet. Choose “Set / change saved instance…”.";
pub const CLEARED_NOTICE: &str = "Saved instance cleared.";

/// Whether the enclosing menu should close after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    CloseMenu,
    KeepOpen,
}

/// Owns the process-wide preference and prompt gate
#[derive(Debug)]
pub struct Dispatcher<S, H> {
    preference: PreferenceStore<S>,
    gate: PromptGate,
    shell: H,
}

impl<S: KeyValueStore, H: Shell> Dispatcher<S, H> {
    pub fn new(preference: PreferenceStore<S>, shell: H) -> Self {
        Dispatcher {
            preference,
            gate: PromptGate::new(),
            shell,
        }
    }

    pub fn preference(&self) -> &PreferenceStore<S> {
        &self.preference
    }

    pub fn shell(&self) -> &H {
        &self.shell
    }

    pub fn dispatch(&self, action: &Action, widget: &WidgetData) -> Completion {
        log::debug!("Dispatching {} for widget with fallback {}", action.token(), widget.fallback_host);

        match action {
            Action::HostSelect(host) => {
                self.open_share(host, &widget.query);
                Completion::CloseMenu
            }

            Action::PrimaryShare => {
                if let Some(current) = self.preference.get() {
                    self.open_share(&current, &widget.query);
                    return Completion::CloseMenu;
                }

                let Some(host) = ask_for_host(&self.gate, &self.shell, &widget.fallback_host) else {
                    return Completion::KeepOpen;
                };
                self.remember(&host);
                self.open_share(&host, &widget.query);
                Completion::CloseMenu
            }

            Action::UseSaved => match self.preference.get() {
                Some(host) => {
                    self.open_share(&host, &widget.query);
                    Completion::CloseMenu
                }
                None => {
                    self.shell.alert(NO_SAVED_NOTICE);
                    Completion::KeepOpen
                }
            },

            Action::SetSaved => {
                let seed = self
                    .preference
                    .get()
                    .unwrap_or_else(|| widget.fallback_host.clone());

                let Some(host) = ask_for_host(&self.gate, &self.shell, &seed) else {
                    return Completion::KeepOpen;
                };
                self.remember(&host);
                self.shell.alert(&format!("Saved: {}", host));
                Completion::CloseMenu
            }

            Action::ClearSaved => {
                if let Err(e) = self.preference.clear() {
                    log::warn!("Failed to clear saved instance: {}", e);
                }
                self.shell.alert(CLEARED_NOTICE);
                Completion::CloseMenu
            }
        }
    }

    fn remember(&self, host: &str) {
        if let Err(e) = self.preference.set(host) {
            log::warn!("Failed to save instance {}: {}", host, e);
        }
    }

    fn open_share(&self, host: &str, query: &str) {
        match share_url(host, query) {
            Some(url) => {
                log::debug!("Opening {}", url);
                self.shell.open(&url);
            }
            None => log::warn!("Not a usable instance host: {:?}", host),
        }
    }
}
