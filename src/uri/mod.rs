//! Container definition reference classification
//!
//! A `container_definition` is either a registry URI understood by the
//! container runtime or a path to a local definition file. Each URI scheme
//! has its own grammar; in particular `docker://` and `library://` require a
//! tag while `oras://` and `shub://` do not.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ModelboxError, Result};

/// Suffix recognized for local definition files
pub const DEFINITION_SUFFIX: &str = ".def";

/// `library://user/collection/container:tag`, tag required
static LIBRARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^library://[a-z0-9._-]+/[a-z0-9._-]+/[a-z0-9._-]+:[A-Za-z0-9._-]+$").unwrap()
});

/// `docker://[registry[:port]/]*repo:tag`, tag required
static DOCKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^docker://(?:[A-Za-z0-9._-]+(?::[0-9]+)?/)*[a-z0-9._-]+:[A-Za-z0-9._-]+$")
        .unwrap()
});

/// `oras://registry[:port]/repo[/path...][:tag]`, tag optional
static ORAS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^oras://[A-Za-z0-9._-]+(?::[0-9]+)?(?:/[A-Za-z0-9._-]+)+(?::[A-Za-z0-9._-]+)?$")
        .unwrap()
});

/// `shub://user/container`, no tag
static SHUB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^shub://[A-Za-z0-9._-]+/[A-Za-z0-9._-]+$").unwrap());

/// `http://` or `https://` with any non-empty remainder
static HTTP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://\S+$").unwrap());

const SCHEMES: [&str; 6] = [
    "library://",
    "docker://",
    "oras://",
    "shub://",
    "http://",
    "https://",
];

/// Check whether a string matches any of the recognized URI scheme grammars.
fn is_valid_uri(value: &str) -> bool {
    DOCKER_RE.is_match(value)
        || LIBRARY_RE.is_match(value)
        || ORAS_RE.is_match(value)
        || SHUB_RE.is_match(value)
        || HTTP_RE.is_match(value)
}

/// Classify a container definition reference and return its normalized form.
///
/// Recognized registry URIs are returned unchanged. Bare `name:tag` shorthand
/// is normalized to `docker://name:tag`. Anything that looks like a local
/// file reference (absolute path, contains a path separator, or ends in
/// `.def`) is returned unchanged; existence is checked later, at build time.
/// Everything else is rejected.
pub fn classify_and_normalize(definition: &str) -> Result<String> {
    if is_valid_uri(definition) {
        return Ok(definition.to_string());
    }

    // Bare "name:tag" defaults to Docker Hub
    let prefixed = format!("docker://{definition}");
    if is_valid_uri(&prefixed) {
        return Ok(prefixed);
    }

    // A scheme prefix that failed its grammar (e.g. a tag-less docker URI)
    // must not fall through to the local-path branch below.
    if SCHEMES.iter().any(|s| definition.starts_with(s)) {
        return Err(ModelboxError::InvalidReference(format!(
            "'{definition}' looks like a container URI but does not match the \
             scheme grammar (is a required :tag missing?)"
        )));
    }

    let path = std::path::Path::new(definition);
    if path.is_absolute() || definition.contains('/') || definition.ends_with(DEFINITION_SUFFIX) {
        return Ok(definition.to_string());
    }

    Err(ModelboxError::InvalidReference(format!(
        "'{definition}' is not a path to a definition file or a container URI \
         (docker://, library://, oras://, shub://, http(s)://; with a tag where required)"
    )))
}
