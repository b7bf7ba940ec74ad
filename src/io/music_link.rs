//! Music link normalization and provider classification.

use crate::models::{MusicLink, MusicProvider};
use once_cell::sync::Lazy;
use regex::Regex;

/// `scheme://` prefix, the form that carries an authority.
static SCHEME_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").unwrap_or_else(|_| unreachable!())
});

/// Any RFC 3986 scheme, including authority-less URIs like `spotify:track:id`.
static URI_SCHEME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").unwrap_or_else(|_| unreachable!())
});

/// A bare dotted host followed by a port, e.g. `open.spotify.com:443/...`.
static HOST_PORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9\-]+(?:\.[A-Za-z0-9\-]+)+:[0-9]+(?:[/?#]|$)")
        .unwrap_or_else(|_| unreachable!())
});

/// Host fragments checked in order; the first hit wins.
const PROVIDER_HOSTS: &[(&str, MusicProvider)] = &[
    ("spotify", MusicProvider::Spotify),
    ("youtube", MusicProvider::YouTube),
    ("youtu.be", MusicProvider::YouTube),
    ("soundcloud", MusicProvider::SoundCloud),
    ("music.apple.com", MusicProvider::AppleMusic),
];

/// Returns whether `raw` starts with a URL scheme.
///
/// A leading `name:` counts as a scheme unless it reads as `host:port`.
#[must_use]
pub fn has_scheme(raw: &str) -> bool {
    SCHEME_PREFIX.is_match(raw) || (URI_SCHEME.is_match(raw) && !HOST_PORT.is_match(raw))
}

/// Prepends `https://` when `raw` carries no URL scheme.
#[must_use]
pub fn ensure_scheme(raw: &str) -> String {
    if has_scheme(raw) {
        raw.to_string()
    } else {
        format!("https://{raw}")
    }
}

/// Extracts the lowercased host portion of an absolute URL.
///
/// Returns `None` when there is no `scheme://` prefix.
#[must_use]
pub fn host_of(url: &str) -> Option<String> {
    let m = SCHEME_PREFIX.find(url)?;
    let rest = &url[m.end()..];
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority.rsplit('@').next().unwrap_or(authority);
    let host = host_port.split(':').next().unwrap_or(host_port);
    Some(host.to_ascii_lowercase())
}

/// Classifies a URL by its host.
///
/// Falls back to matching the whole URL when no host can be extracted.
#[must_use]
pub fn classify(url: &str) -> MusicProvider {
    let haystack = host_of(url).unwrap_or_else(|| url.to_ascii_lowercase());
    PROVIDER_HOSTS
        .iter()
        .find(|(fragment, _)| haystack.contains(fragment))
        .map_or(MusicProvider::LinkOnly, |(_, provider)| *provider)
}

/// Normalizes a raw music-link column value.
///
/// Empty input means no link. Otherwise the guard apostrophe is removed, a
/// missing scheme becomes `https://`, and the provider is derived from the
/// host. Unknown hosts keep the URL unchanged and are tagged `LinkOnly`.
#[must_use]
pub fn normalize(raw: &str) -> Option<MusicLink> {
    if raw.is_empty() {
        return None;
    }
    let url = ensure_scheme(super::grammar::strip_guard(raw));
    let provider = classify(&url);
    Some(MusicLink { url, provider })
}
