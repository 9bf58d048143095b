/// Host-entry prompt with a re-entrancy guard

use crate::host::{looks_like_host, normalize_host};
use crate::shell::Shell;
use std::cell::Cell;

pub const PROMPT_MESSAGE: &str = "Enter your Mastodon instance (e.g. infosec.exchange):";
pub const INVALID_HOST_NOTICE: &str = "That does not look like a valid instance host.";

/// Allows at most one host-entry prompt at a time
#[derive(Debug, Default)]
pub struct PromptGate {
    open: Cell<bool>,
}

/// Held while a prompt is on screen; dropping it reopens the gate
#[derive(Debug)]
pub struct PromptTicket<'a> {
    gate: &'a PromptGate,
}

impl PromptGate {
    pub fn new() -> Self {
        PromptGate::default()
    }

    /// `None` while another ticket is alive
    pub fn acquire(&self) -> Option<PromptTicket<'_>> {
        if self.open.replace(true) {
            return None;
        }
        Some(PromptTicket { gate: self })
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }
}

impl Drop for PromptTicket<'_> {
    fn drop(&mut self) {
        self.gate.open.set(false);
    }
}

/// Ask the visitor for a host, seeded with `default`
///
/// Returns `None` when a prompt is already active, when the visitor cancels,
/// or when the input is not a plausible host (after a notice).
pub fn ask_for_host<H: Shell + ?Sized>(gate: &PromptGate, shell: &H, default: &str) -> Option<String> {
    let input = {
        let Some(_ticket) = gate.acquire() else {
            log::warn!("Instance prompt already open, ignoring");
            return None;
        };
        shell.prompt(PROMPT_MESSAGE, default)?
    };

    let host = normalize_host(&input)?;
    if !looks_like_host(&host) {
        shell.alert(INVALID_HOST_NOTICE);
        return None;
    }

    Some(host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Scripted shell: answers prompts from a queue and records every notice
    #[derive(Default)]
    struct ScriptedShell {
        answers: RefCell<Vec<Option<String>>>,
        prompts: RefCell<Vec<(String, String)>>,
        alerts: RefCell<Vec<String>>,
        during_prompt: RefCell<Option<Box<dyn Fn()>>>,
    }

    impl ScriptedShell {
        fn answering(answer: Option<&str>) -> Self {
            let shell = ScriptedShell::default();
            shell.answers.borrow_mut().push(answer.map(str::to_string));
            shell
        }
    }

    impl Shell for ScriptedShell {
        fn prompt(&self, message: &str, default: &str) -> Option<String> {
            self.prompts.borrow_mut().push((message.to_string(), default.to_string()));
            if let Some(hook) = self.during_prompt.borrow().as_ref() {
                hook();
            }
            self.answers.borrow_mut().pop().flatten()
        }

        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }

        fn open(&self, _url: &str) {}
    }

    #[test]
    fn test_gate_single_ticket() {
        let gate = PromptGate::new();
        let ticket = gate.acquire();
        assert!(ticket.is_some());
        assert!(gate.is_open());
        assert!(gate.acquire().is_none());

        drop(ticket);
        assert!(!gate.is_open());
        assert!(gate.acquire().is_some());
    }

    #[test]
    fn test_ask_accepts_valid_host() {
        let gate = PromptGate::new();
        let shell = ScriptedShell::answering(Some("https://Hachyderm.io/@me"));

        assert_eq!(ask_for_host(&gate, &shell, "mastodon.social"), Some("hachyderm.io".to_string()));
        assert_eq!(
            *shell.prompts.borrow(),
            vec![(PROMPT_MESSAGE.to_string(), "mastodon.social".to_string())]
        );
        assert!(shell.alerts.borrow().is_empty());
        assert!(!gate.is_open());
    }

    #[test]
    fn test_ask_cancel() {
        let gate = PromptGate::new();
        let shell = ScriptedShell::answering(None);

        assert_eq!(ask_for_host(&gate, &shell, ""), None);
        assert!(shell.alerts.borrow().is_empty());
        assert!(!gate.is_open());
    }

    #[test]
    fn test_ask_empty_input_is_silent() {
        let gate = PromptGate::new();
        let shell = ScriptedShell::answering(Some(""));

        assert_eq!(ask_for_host(&gate, &shell, "mastodon.social"), None);
        assert!(shell.alerts.borrow().is_empty());
    }

    #[test]
    fn test_ask_rejects_bad_shape_with_notice() {
        let gate = PromptGate::new();
        let shell = ScriptedShell::answering(Some("localhost"));

        assert_eq!(ask_for_host(&gate, &shell, "mastodon.social"), None);
        assert_eq!(*shell.alerts.borrow(), vec![INVALID_HOST_NOTICE.to_string()]);
        assert!(!gate.is_open());
    }

    #[test]
    fn test_reentrant_ask_returns_none_without_prompting() {
        let gate = Rc::new(PromptGate::new());
        let shell = Rc::new(ScriptedShell::answering(Some("hachyderm.io")));
        let nested = Rc::new(RefCell::new(None));

        {
            let gate = gate.clone();
            let inner_shell = Rc::downgrade(&shell);
            let nested = nested.clone();
            *shell.during_prompt.borrow_mut() = Some(Box::new(move || {
                let shell = inner_shell.upgrade().unwrap();
                *nested.borrow_mut() = Some(ask_for_host(&gate, &*shell, "other.social"));
            }));
        }

        assert_eq!(ask_for_host(&gate, &*shell, "mastodon.social"), Some("hachyderm.io".to_string()));
        assert_eq!(*nested.borrow(), Some(None));
        assert_eq!(shell.prompts.borrow().len(), 1);
        assert!(!gate.is_open());
    }
}
