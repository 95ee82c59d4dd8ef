use crate::core::types::{Dependency, Host};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Url;

const DEFAULT_SCHEME: &str = "https";
const GITHUB_WEB: &str = "github.com";
const GITHUB_API: &str = "api.github.com";
const BITBUCKET: &str = "bitbucket.org";
const GITLAB: &str = "gitlab.com";

/// Form-style encoding of a project path: alphanumerics and `-._` stay as is.
const PROJECT_PATH: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_');

/// The parts of a dependency `uri` that URL templating needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceUri {
    pub(crate) scheme: String,
    /// Host plus explicit port, if the URI had one
    pub(crate) authority: Option<String>,
    pub(crate) owner_repo: String,
}

pub(crate) fn parse_source_uri(uri: &str) -> SourceUri {
    match Url::parse(uri) {
        Ok(url) if url.host_str().is_some() => {
            let authority = url.host_str().map(|host| match url.port() {
                Some(port) => format!("{}:{}", host, port),
                None => host.to_string(),
            });
            SourceUri {
                scheme: url.scheme().to_string(),
                authority,
                owner_repo: owner_repo_from_path(url.path()),
            }
        }
        // No scheme/host: the whole string is treated as a path.
        _ => SourceUri {
            scheme: DEFAULT_SCHEME.to_string(),
            authority: None,
            owner_repo: owner_repo_from_path(uri),
        },
    }
}

/// `"/acme/widget.git/"` -> `"acme/widget"`
pub(crate) fn owner_repo_from_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    trimmed.strip_suffix(".git").unwrap_or(trimmed).to_string()
}

/// Deterministic link for every host except `wordpress`, which needs a lookup.
pub(crate) fn build_download_link(dependency: &Dependency) -> Option<String> {
    let source = parse_source_uri(&dependency.uri);
    let branch = dependency.branch.as_str();
    let token = dependency.token.as_deref();

    match dependency.host {
        Host::Github => github_url(&source, branch, token),
        Host::Bitbucket => bitbucket_url(&source, branch),
        Host::Gitlab => gitlab_url(&source, branch, token),
        Host::Gitea => gitea_url(&source, branch, token),
        Host::Direct => direct_url(&dependency.uri),
        Host::Wordpress => None,
    }
}

fn base_or<'a>(source: &'a SourceUri, public_host: &str, base: &'a str) -> &'a str {
    match source.authority.as_deref() {
        None => base,
        Some(host) if host == public_host => base,
        Some(host) => host,
    }
}

fn with_query(mut url: Url, pairs: &[(&str, Option<&str>)]) -> String {
    {
        let mut query = url.query_pairs_mut();
        for (key, value) in pairs {
            if let Some(value) = value {
                query.append_pair(key, value);
            }
        }
    }
    // query_pairs_mut leaves a bare '?' when nothing was appended
    if url.query() == Some("") {
        url.set_query(None);
    }
    url.to_string()
}

pub(crate) fn github_url(source: &SourceUri, branch: &str, token: Option<&str>) -> Option<String> {
    let base = base_or(source, GITHUB_WEB, GITHUB_API);
    let url = Url::parse(&format!(
        "{}://{}/repos/{}/zipball/{}",
        source.scheme, base, source.owner_repo, branch
    ))
    .ok()?;
    Some(with_query(url, &[("access_token", token)]))
}

pub(crate) fn bitbucket_url(source: &SourceUri, branch: &str) -> Option<String> {
    let base = base_or(source, BITBUCKET, BITBUCKET);
    let url = Url::parse(&format!(
        "{}://{}/{}/get/{}.zip",
        source.scheme, base, source.owner_repo, branch
    ))
    .ok()?;
    Some(url.to_string())
}

pub(crate) fn gitlab_url(source: &SourceUri, branch: &str, token: Option<&str>) -> Option<String> {
    let base = base_or(source, GITLAB, GITLAB);
    let project = utf8_percent_encode(&source.owner_repo, PROJECT_PATH).to_string();
    let url = Url::parse(&format!(
        "{}://{}/api/v4/projects/{}/repository/archive.zip",
        source.scheme, base, project
    ))
    .ok()?;
    Some(with_query(
        url,
        &[("sha", Some(branch)), ("private_token", token)],
    ))
}

pub(crate) fn gitea_url(source: &SourceUri, branch: &str, token: Option<&str>) -> Option<String> {
    // Gitea is always self-hosted; without a host there is nothing to build.
    let base = source.authority.as_deref()?;
    let url = Url::parse(&format!(
        "{}://{}/repos/{}/archive/{}.zip",
        source.scheme, base, source.owner_repo, branch
    ))
    .ok()?;
    Some(with_query(url, &[("access_token", token)]))
}

pub(crate) fn direct_url(uri: &str) -> Option<String> {
    let url = Url::parse(uri).ok()?;
    if url.host_str().is_some() || url.scheme() == "file" {
        Some(uri.to_string())
    } else {
        None
    }
}

/// Directory slug on the canonical plugin directory.
///
/// Last segment of the URI path (`wordpress.org/plugins/query-monitor`), or
/// the slug's own directory when the URI carries no path.
pub(crate) fn wordpress_plugin_slug(dependency: &Dependency) -> String {
    let source = parse_source_uri(&dependency.uri);
    match source.owner_repo.rsplit('/').next() {
        Some(last) if !last.is_empty() => last.to_string(),
        _ => dependency.dir_name().to_string(),
    }
}
