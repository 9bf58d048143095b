/// Data carried by widget markup: action tokens and per-widget attributes

/// Fallback host used when a widget does not declare one
pub const DEFAULT_FALLBACK_HOST: &str = "mastodon.social";

/// What a click on a tagged element asks the widget to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    PrimaryShare,
    UseSaved,
    SetSaved,
    ClearSaved,
    /// Share on an explicitly listed host, ignoring the saved preference
    HostSelect(String),
}

impl Action {
    /// Decode the `data-masto-host` / `data-masto-action` attribute pair
    ///
    /// An explicit host wins over any action token; unknown tokens decode to `None`.
    pub fn from_attributes(action: Option<&str>, host: Option<&str>) -> Option<Action> {
        if let Some(host) = host {
            return Some(Action::HostSelect(host.to_string()));
        }

        match action? {
            "primary-share" => Some(Action::PrimaryShare),
            "use-saved" => Some(Action::UseSaved),
            "set-saved" => Some(Action::SetSaved),
            "clear-saved" => Some(Action::ClearSaved),
            _ => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Action::PrimaryShare => "primary-share",
            Action::UseSaved => "use-saved",
            Action::SetSaved => "set-saved",
            Action::ClearSaved => "clear-saved",
            Action::HostSelect(_) => "host-select",
        }
    }
}

/// Attributes declared on a widget root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetData {
    /// Precomputed share query string, passed through verbatim
    pub query: String,
    pub fallback_host: String,
}

impl WidgetData {
    pub fn new(query: String, fallback_host: String) -> WidgetData {
        WidgetData {
            query,
            fallback_host,
        }
    }

    pub fn from_attributes(query: Option<String>, fallback_host: Option<String>) -> WidgetData {
        let fallback_host = fallback_host
            .filter(|host| !host.is_empty())
            .unwrap_or_else(|| DEFAULT_FALLBACK_HOST.to_string());

        WidgetData::new(query.unwrap_or_default(), fallback_host)
    }
}
