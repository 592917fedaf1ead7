//! Classification of template source strings.

use url::Url;

/// How a template source should be acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A git-clonable URL.
    Remote,
    /// A path to a local git working tree.
    Local,
}

impl SourceKind {
    /// Classify a source string.
    ///
    /// The grammar is explicit and covers three remote forms:
    /// scheme-prefixed (`https://host/repo`), scp-style (`user@host:path`),
    /// and `.git`-suffixed. Everything else is a local path.
    pub fn classify(src: &str) -> Self {
        if src.ends_with(".git") || is_scheme_url(src) || is_scp_style(src) {
            SourceKind::Remote
        } else {
            SourceKind::Local
        }
    }

    pub fn is_remote(self) -> bool {
        matches!(self, SourceKind::Remote)
    }
}

fn is_scheme_url(src: &str) -> bool {
    src.contains("://") && Url::parse(src).is_ok()
}

/// `user@host:path` with a non-empty user, host, and path.
fn is_scp_style(src: &str) -> bool {
    let Some((user, rest)) = src.split_once('@') else {
        return false;
    };
    let Some((host, path)) = rest.split_once(':') else {
        return false;
    };
    !user.is_empty()
        && !user.contains('/')
        && !host.is_empty()
        && !host.contains('/')
        && !path.is_empty()
}

/// Host to probe for reachability before cloning a remote source.
///
/// Falls back to `None` for `.git`-suffixed local-looking paths, where
/// no host can be derived.
pub fn clone_host(src: &str) -> Option<String> {
    if let Ok(url) = Url::parse(src)
        && let Some(host) = url.host_str()
    {
        return Some(host.to_string());
    }
    let (_, rest) = src.split_once('@')?;
    let (host, _) = rest.split_once(':')?;
    if host.is_empty() { None } else { Some(host.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn scheme_prefixed_urls_are_remote() {
        assert_eq!(SourceKind::classify("https://github.com/acme/webapp-kit"), SourceKind::Remote);
        assert_eq!(SourceKind::classify("git://example.com/repo"), SourceKind::Remote);
        assert_eq!(SourceKind::classify("ssh://git@example.com/repo"), SourceKind::Remote);
    }

    #[test]
    fn scp_style_sources_are_remote() {
        assert_eq!(SourceKind::classify("git@github.com:foo/bar"), SourceKind::Remote);
        assert_eq!(SourceKind::classify("deploy@host.internal:templates/web"), SourceKind::Remote);
    }

    #[test]
    fn git_suffixed_sources_are_remote() {
        assert_eq!(SourceKind::classify("host/path/repo.git"), SourceKind::Remote);
    }

    #[test]
    fn plain_strings_and_paths_are_local() {
        assert_eq!(SourceKind::classify("asdfadsfasdf"), SourceKind::Local);
        assert_eq!(SourceKind::classify("/home/user/templates/web"), SourceKind::Local);
        assert_eq!(SourceKind::classify("relative/working/tree"), SourceKind::Local);
    }

    #[test]
    fn scp_style_requires_all_three_parts() {
        assert_eq!(SourceKind::classify("@host:path"), SourceKind::Local);
        assert_eq!(SourceKind::classify("user@:path"), SourceKind::Local);
        assert_eq!(SourceKind::classify("user@host:"), SourceKind::Local);
        assert_eq!(SourceKind::classify("dir/user@host:path"), SourceKind::Local);
    }

    #[test]
    fn clone_host_from_scheme_url() {
        assert_eq!(clone_host("https://github.com/acme/webapp-kit").as_deref(), Some("github.com"));
    }

    #[test]
    fn clone_host_from_scp_style() {
        assert_eq!(clone_host("git@gitlab.com:group/repo.git").as_deref(), Some("gitlab.com"));
    }

    #[test]
    fn clone_host_absent_for_local_paths() {
        assert_eq!(clone_host("vendor/repo.git"), None);
    }

    proptest! {
        // Strings with no scheme separator, no '@', and no .git suffix
        // must always classify as local.
        #[test]
        fn path_shaped_strings_are_local(src in "[a-z0-9_/.-]{1,40}") {
            prop_assume!(!src.ends_with(".git"));
            prop_assume!(!src.contains("://"));
            prop_assert_eq!(SourceKind::classify(&src), SourceKind::Local);
        }
    }
}
