use super::url_builders::{owner_repo_from_path, parse_source_uri, wordpress_plugin_slug};
use super::*;
use crate::site::cache::MemoryCache;
use std::cell::Cell;

struct CountingLookup {
    answer: Option<String>,
    calls: Cell<usize>,
}

impl CountingLookup {
    fn new(answer: Option<&str>) -> Self {
        Self {
            answer: answer.map(str::to_string),
            calls: Cell::new(0),
        }
    }
}

impl DirectoryLookup for CountingLookup {
    fn fetch_latest_download_link(&self, _plugin_slug: &str) -> Option<String> {
        self.calls.set(self.calls.get() + 1);
        self.answer.clone()
    }
}

fn dep(host: Host, uri: &str, branch: &str, token: Option<&str>) -> Dependency {
    Dependency {
        slug: "widget/widget.php".to_string(),
        name: "Widget".to_string(),
        uri: uri.to_string(),
        host,
        branch: branch.to_string(),
        token: token.map(str::to_string),
        required: false,
        source: "caller".to_string(),
        download_link: None,
    }
}

fn resolve(dependency: &Dependency) -> Option<String> {
    let lookup = CountingLookup::new(None);
    let cache = MemoryCache::new();
    let filters = Filters::new();
    Resolver::new(&lookup, &cache, &filters).resolve_download_link(dependency)
}

#[test]
fn test_owner_repo_trims_and_strips_git_suffix() {
    assert_eq!(owner_repo_from_path("/acme/widget.git"), "acme/widget");
    assert_eq!(owner_repo_from_path("/acme/widget/"), "acme/widget");
    assert_eq!(owner_repo_from_path("acme/widget.github.io"), "acme/widget.github.io");
}

#[test]
fn test_parse_source_uri_keeps_port() {
    let source = parse_source_uri("http://git.local:3000/team/tool.git");
    assert_eq!(source.scheme, "http");
    assert_eq!(source.authority.as_deref(), Some("git.local:3000"));
    assert_eq!(source.owner_repo, "team/tool");
}

#[test]
fn test_github_public() {
    let d = dep(Host::Github, "https://github.com/acme/widget.git", "main", None);
    assert_eq!(
        resolve(&d).as_deref(),
        Some("https://api.github.com/repos/acme/widget/zipball/main")
    );
}

#[test]
fn test_github_with_token() {
    let d = dep(Host::Github, "https://github.com/acme/widget", "main", Some("abc123"));
    assert_eq!(
        resolve(&d).as_deref(),
        Some("https://api.github.com/repos/acme/widget/zipball/main?access_token=abc123")
    );
}

#[test]
fn test_github_enterprise_host() {
    let d = dep(Host::Github, "https://git.corp.example/acme/widget", "v1.2", None);
    assert_eq!(
        resolve(&d).as_deref(),
        Some("https://git.corp.example/repos/acme/widget/zipball/v1.2")
    );
}

#[test]
fn test_bitbucket() {
    let d = dep(Host::Bitbucket, "https://bitbucket.org/acme/widget", "develop", Some("ignored"));
    assert_eq!(
        resolve(&d).as_deref(),
        Some("https://bitbucket.org/acme/widget/get/develop.zip")
    );
}

#[test]
fn test_gitlab_api_v4_with_token() {
    let d = dep(Host::Gitlab, "https://gitlab.com/acme/widget", "v2", Some("T"));
    assert_eq!(
        resolve(&d).as_deref(),
        Some("https://gitlab.com/api/v4/projects/acme%2Fwidget/repository/archive.zip?sha=v2&private_token=T")
    );
}

#[test]
fn test_gitlab_self_hosted_without_token() {
    let d = dep(Host::Gitlab, "https://gitlab.example.org/group/widget.git", "main", None);
    assert_eq!(
        resolve(&d).as_deref(),
        Some("https://gitlab.example.org/api/v4/projects/group%2Fwidget/repository/archive.zip?sha=main")
    );
}

#[test]
fn test_gitlab_project_path_keeps_unreserved_punctuation() {
    let d = dep(Host::Gitlab, "https://gitlab.com/acme_co/my-widget.v2", "v2", None);
    assert_eq!(
        resolve(&d).as_deref(),
        Some("https://gitlab.com/api/v4/projects/acme_co%2Fmy-widget.v2/repository/archive.zip?sha=v2")
    );
}

#[test]
fn test_gitea() {
    let d = dep(Host::Gitea, "https://gitea.example.org/acme/widget", "main", Some("tok"));
    assert_eq!(
        resolve(&d).as_deref(),
        Some("https://gitea.example.org/repos/acme/widget/archive/main.zip?access_token=tok")
    );
}

#[test]
fn test_gitea_without_host_is_unresolved() {
    let d = dep(Host::Gitea, "acme/widget", "main", None);
    assert_eq!(resolve(&d), None);
}

#[test]
fn test_direct_valid_and_invalid() {
    let d = dep(Host::Direct, "https://example.com/files/widget.zip", "", None);
    assert_eq!(
        resolve(&d).as_deref(),
        Some("https://example.com/files/widget.zip")
    );

    let bad = dep(Host::Direct, "not a url", "", None);
    assert_eq!(resolve(&bad), None);
}

#[test]
fn test_non_wordpress_hosts_are_deterministic() {
    let deps = [
        dep(Host::Github, "https://github.com/acme/widget", "main", Some("t")),
        dep(Host::Bitbucket, "https://bitbucket.org/acme/widget", "main", None),
        dep(Host::Gitlab, "https://gitlab.com/acme/widget", "main", Some("t")),
        dep(Host::Gitea, "https://gitea.io/acme/widget", "main", None),
        dep(Host::Direct, "https://example.com/w.zip", "main", None),
    ];
    for d in &deps {
        let first = resolve(d);
        assert!(first.is_some(), "{} should resolve", d.host);
        assert_eq!(first, resolve(d));
        assert_eq!(first, resolve(d));
    }
}

#[test]
fn test_wordpress_uses_lookup_result() {
    let lookup = CountingLookup::new(Some("https://downloads.wordpress.org/plugin/widget.4.1.zip"));
    let cache = MemoryCache::new();
    let filters = Filters::new();
    let resolver = Resolver::new(&lookup, &cache, &filters);

    let d = dep(Host::Wordpress, "https://wordpress.org/plugins/widget/", "", None);
    assert_eq!(
        resolver.resolve_download_link(&d).as_deref(),
        Some("https://downloads.wordpress.org/plugin/widget.4.1.zip")
    );
}

#[test]
fn test_wordpress_fallback_is_cached() {
    let lookup = CountingLookup::new(None);
    let cache = MemoryCache::new();
    let filters = Filters::new();
    let resolver = Resolver::new(&lookup, &cache, &filters);

    let d = dep(Host::Wordpress, "https://wordpress.org/plugins/widget", "", None);
    let expected = Some("https://downloads.wordpress.org/plugin/widget.zip".to_string());

    assert_eq!(resolver.resolve_download_link(&d), expected);
    assert_eq!(resolver.resolve_download_link(&d), expected);
    assert_eq!(lookup.calls.get(), 1);
    assert_eq!(cache.get(&cache_key(&d.slug)), expected);
}

#[test]
fn test_wordpress_unusable_lookup_answer_falls_back() {
    let lookup = CountingLookup::new(Some("::not-a-url::"));
    let cache = MemoryCache::new();
    let filters = Filters::new();
    let resolver = Resolver::new(&lookup, &cache, &filters);

    let d = dep(Host::Wordpress, "https://wordpress.org/plugins/widget", "", None);
    assert_eq!(
        resolver.resolve_download_link(&d).as_deref(),
        Some("https://downloads.wordpress.org/plugin/widget.zip")
    );
}

#[test]
fn test_wordpress_slug_falls_back_to_dependency_dir() {
    let d = dep(Host::Wordpress, "https://wordpress.org", "", None);
    assert_eq!(wordpress_plugin_slug(&d), "widget");
}

#[test]
fn test_cache_keys_differ_per_slug() {
    let a = cache_key("a/a.php");
    let b = cache_key("b/b.php");
    assert_ne!(a, b);
    assert!(a.starts_with("wpdi_link_"));
    assert_eq!(a.len(), "wpdi_link_".len() + 16);
    assert_eq!(a, cache_key("a/a.php"));
}

#[test]
fn test_download_link_filter_applies() {
    let lookup = CountingLookup::new(None);
    let cache = MemoryCache::new();
    let filters = Filters::new().with_download_link(|link, _| {
        link.map(|l| l.replace("api.github.com", "mirror.example.com"))
    });
    let resolver = Resolver::new(&lookup, &cache, &filters);

    let d = dep(Host::Github, "https://github.com/acme/widget", "main", None);
    assert_eq!(
        resolver.resolve_download_link(&d).as_deref(),
        Some("https://mirror.example.com/repos/acme/widget/zipball/main")
    );
}
