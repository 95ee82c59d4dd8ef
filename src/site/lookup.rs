use crate::project_identity;
use crate::traits::DirectoryLookup;
use crate::ui;
use reqwest::Url;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct PluginInformation {
    #[serde(default)]
    download_link: Option<String>,
}

/// Asks the WordPress.org plugin directory for a plugin's current archive.
#[derive(Debug, Clone)]
pub struct WordPressOrgLookup {
    timeout: Duration,
}

impl WordPressOrgLookup {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl DirectoryLookup for WordPressOrgLookup {
    fn fetch_latest_download_link(&self, plugin_slug: &str) -> Option<String> {
        let url = info_url(plugin_slug)?;
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(project_identity::user_agent())
            .build()
            .ok()?;

        let response = match client.get(url).send() {
            Ok(response) => response,
            Err(e) => {
                ui::verbose(&format!("Plugin directory lookup failed: {}", e));
                return None;
            }
        };

        if !response.status().is_success() {
            ui::verbose(&format!(
                "Plugin directory lookup for '{}' returned {}",
                plugin_slug,
                response.status()
            ));
            return None;
        }

        let body = response.text().ok()?;
        parse_download_link_from_body(&body)
    }
}

pub(crate) fn info_url(plugin_slug: &str) -> Option<Url> {
    let mut url = Url::parse(project_identity::WORDPRESS_PLUGIN_INFO_API).ok()?;
    url.query_pairs_mut()
        .append_pair("action", "plugin_information")
        .append_pair("request[slug]", plugin_slug);
    Some(url)
}

/// `download_link` from a plugin information payload, when present and
/// non-empty. Error payloads (`{"error": "Plugin not found."}`) give `None`.
pub(crate) fn parse_download_link_from_body(body: &str) -> Option<String> {
    let info: PluginInformation = serde_json::from_str(body).ok()?;
    info.download_link
        .map(|link| link.trim().to_string())
        .filter(|link| !link.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_url_encodes_slug() {
        let url = info_url("query-monitor").expect("url");
        assert_eq!(url.host_str(), Some("api.wordpress.org"));
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("action".into(), "plugin_information".into())));
        assert!(pairs.contains(&("request[slug]".into(), "query-monitor".into())));
    }

    #[test]
    fn test_parse_download_link() {
        let body = r#"{"name":"Query Monitor","slug":"query-monitor","download_link":"https://downloads.wordpress.org/plugin/query-monitor.3.16.4.zip"}"#;
        assert_eq!(
            parse_download_link_from_body(body).as_deref(),
            Some("https://downloads.wordpress.org/plugin/query-monitor.3.16.4.zip")
        );
    }

    #[test]
    fn test_error_payload_is_none() {
        assert!(parse_download_link_from_body(r#"{"error":"Plugin not found."}"#).is_none());
        assert!(parse_download_link_from_body(r#"{"download_link":"  "}"#).is_none());
        assert!(parse_download_link_from_body("<html>").is_none());
    }
}
