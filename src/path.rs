//! Path handling for asset lookups.
//!
//! Asset paths are plain `/`-separated strings. Keys in an
//! [`AssetTable`](../struct.AssetTable.html) are always *canonical*: no empty
//! components, no `.` components, `..` only at the start of a relative path,
//! no trailing `/` except on the root itself. Every path handed to a source is
//! passed through [`clean`] before use, so `/static//img/../a.txt` and
//! `/static/a.txt` denote the same asset.
//!
//! Nothing here *validates* a path. Any string is accepted and normalized;
//! rooted paths simply cannot climb above `/`.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches anything that [`clean`] would have to rewrite: doubled slashes,
/// `.`/`..` components, and trailing slashes (other than a lone `/`).
static NEEDS_CLEANING_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"//|(?:^|/)\.\.?(?:/|$)|./$"#)
        .unwrap()
});

/// True if [`clean`] would rewrite `path`. The leading `..` components of a
/// relative path are canonical, so they're skipped before the pattern sees
/// the rest.
fn needs_cleaning(path: &str) -> bool {
    let mut rest = path;
    if !path.starts_with('/') {
        while let Some(x) = rest.strip_prefix("../") {
            rest = x;
        }
        if rest == ".." {
            return false
        }
        if rest.is_empty() || rest.starts_with('/') {
            return true
        }
    }
    NEEDS_CLEANING_PATTERN.is_match(rest)
}

/// Returns the shortest path equivalent to `path`, by purely lexical
/// processing:
///
/// 1. Runs of `/` collapse into one `/`.
/// 2. `.` components are removed.
/// 3. Each `..` removes the non-`..` component before it.
/// 4. `..` at the beginning of a rooted path are dropped (`/..` is `/`).
///
/// An empty result is `.` for relative paths and `/` for rooted ones. If
/// `path` is already canonical it is returned as-is, without copying.
pub fn clean(path: &str) -> Cow<'_, str> {
    if !needs_cleaning(path) {
        return Cow::Borrowed(path)
    }
    let rooted = path.starts_with('/');
    let mut components: Vec<&str> = Vec::new();
    for component in path.split('/') {
        match component {
            "" | "." => continue,
            ".." => {
                if components.last().map_or(false, |&last| last != "..") {
                    components.pop();
                }
                else if !rooted {
                    components.push("..");
                }
            },
            _ => components.push(component),
        }
    }
    let joined = components.join("/");
    if rooted {
        Cow::Owned(format!("/{}", joined))
    }
    else if joined.is_empty() {
        Cow::Borrowed(".")
    }
    else {
        Cow::Owned(joined)
    }
}

/// Like [`clean`], but treats `path` as rooted even if it doesn't begin with
/// `/`. The result always begins with `/` and never climbs above it.
pub fn clean_rooted(path: &str) -> Cow<'_, str> {
    if path.starts_with('/') {
        clean(path)
    }
    else {
        Cow::Owned(clean(&format!("/{}", path)).into_owned())
    }
}

/// Returns the last component of `path`. Trailing slashes are ignored. An
/// empty path gives `.`, a path made only of slashes gives `/`.
pub fn base(path: &str) -> &str {
    if path.is_empty() {
        return "."
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/"
    }
    match trimmed.rfind('/') {
        Some(i) => &trimmed[i+1..],
        None => trimmed,
    }
}

/// Returns true if `path` is already in the form [`clean`] produces.
pub fn is_clean(path: &str) -> bool {
    matches!(clean(path), Cow::Borrowed(x) if x == path)
}
