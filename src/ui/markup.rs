/// Markup generator: the HTML fragment the widget runtime binds to

use crate::action::DEFAULT_FALLBACK_HOST;
use crate::share::share_query;
use serde::{Deserialize, Serialize};

/// How the share icon is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IconMode {
    /// `<img>` pointing at a bundled SVG
    #[default]
    Svg,
    /// `<i class="...">` for a page that loads Font Awesome itself
    Fa,
}

impl From<String> for IconMode {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case("fa") {
            IconMode::Fa
        } else {
            IconMode::Svg
        }
    }
}

impl From<IconMode> for String {
    fn from(mode: IconMode) -> Self {
        match mode {
            IconMode::Svg => "svg".to_string(),
            IconMode::Fa => "fa".to_string(),
        }
    }
}

/// Per-widget options; every field falls back to the plugin default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    pub label: String,
    pub fallback_host: String,
    pub icon: IconMode,
    #[serde(alias = "svgUrlPath")]
    pub svg_url: String,
    pub fa_class: String,
    pub instances: Vec<String>,
    pub text: String,
    pub hashtags: Vec<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        WidgetConfig {
            label: "Share on Mastodon".to_string(),
            fallback_host: DEFAULT_FALLBACK_HOST.to_string(),
            icon: IconMode::Svg,
            svg_url: "/assets/mastodon.svg".to_string(),
            fa_class: "fa-brands fa-mastodon".to_string(),
            instances: vec![
                "infosec.exchange".to_string(),
                "hachyderm.io".to_string(),
                "fosstodon.org".to_string(),
                "mastodon.social".to_string(),
            ],
            text: String::new(),
            hashtags: Vec::new(),
        }
    }
}

impl WidgetConfig {
    pub fn query(&self) -> String {
        share_query(&self.text, &self.hashtags)
    }
}

/// Render one self-contained widget fragment
pub fn render_widget(config: &WidgetConfig) -> String {
    let query = escape_html(&config.query());
    let fallback = escape_html(&config.fallback_host);
    let label = escape_html(&config.label);

    let icon = match config.icon {
        IconMode::Fa => format!(r#"<i class="{}" aria-hidden="true"></i>"#, escape_html(&config.fa_class)),
        IconMode::Svg => format!(r#"<img src="{}" alt="" aria-hidden="true" />"#, escape_html(&config.svg_url)),
    };

    let hosts: String = config
        .instances
        .iter()
        .map(|host| {
            let host = escape_html(host);
            format!(r##"
          <a href="#" data-masto-host="{host}">{host}</a>"##)
        })
        .collect();

    format!(
        r##"<div class="masto-share"
     data-masto-query="{query}"
     data-masto-fallback="{fallback}">
  <a class="button no-indicator"
     data-button-variant="tertiary"
     data-masto-action="primary-share"
     href="https://{fallback}/share{query}"
     target="_blank"
     rel="noopener noreferrer"
     aria-label="{label}">
    {icon}
    <span>{label}</span>
  </a>

  <div class="masto-share__menu">
    <details>
      <summary class="button" data-ghost-button>
        {icon}
        <span>Choose instance <small>(current: <em data-masto-current>none</em>)</small></span>
      </summary>
      <div class="masto-share__dropdown" role="menu">
        <ul style="list-style:none; margin:0; padding:0">
          <li class="masto-share__section masto-share__section--saved">
            <a href="#" data-masto-action="use-saved">Use saved instance</a>
            <button type="button" data-masto-action="set-saved">Set / change saved instance…</button>
            <button type="button" data-masto-action="clear-saved">Clear saved instance</button>
          </li>

          <li><hr class="masto-share__divider" /></li>

          <li class="masto-share__section">{hosts}
          </li>
        </ul>
      </div>
    </details>
  </div>

  <noscript>
    <p>
      <a class="button" data-ghost-button
         href="https://{fallback}/share{query}"
         target="_blank" rel="noopener">
        Open on {fallback}
      </a>
    </p>
  </noscript>
</div>"##
    )
}

/// Escape text for use inside element content and double-quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
