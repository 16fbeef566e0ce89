//! Conditional `exports`/`imports` map matching.
//!
//! Two phases: [`match_subpath`] picks the node owning a requested
//! subpath (exact key, `/*` pattern, or whole-map condition fallback),
//! then [`select_condition`] walks nested condition keys down to a
//! terminal target string.

use crate::manifest::{is_subpath_key, ExportsNode};
use tracing::trace;

/// Condition keys honored regardless of caller constraints.
const ALWAYS_CONDITIONS: [&str; 2] = ["import", "module"];

/// Sentinel condition consulted only after every declared key fails.
const DEFAULT_CONDITION: &str = "default";

/// Outcome of matching a requested subpath against a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubpathMatch<'a> {
    /// The node the request resolved to.
    pub node: &'a ExportsNode,
    /// Remainder captured by a `/*` pattern key, if one matched.
    pub capture: Option<String>,
}

/// Find the node responsible for `requested` within an exports/imports
/// map.
///
/// Exact subpath keys outrank pattern keys no matter where they are
/// declared; among pattern keys the first declared match wins (never
/// longest-prefix). A mapping carrying condition keys at its own top
/// level acts as the whole-package entry when no subpath key claims the
/// request.
#[must_use]
pub fn match_subpath<'a>(node: &'a ExportsNode, requested: &str) -> Option<SubpathMatch<'a>> {
    let ExportsNode::Mapping(entries) = node else {
        // A bare terminal exports the whole package; no subpath
        // filtering applies.
        return Some(SubpathMatch {
            node,
            capture: None,
        });
    };

    for (key, child) in entries {
        if is_subpath_key(key) && key == requested {
            trace!(key, "exact subpath key matched");
            return Some(SubpathMatch {
                node: child,
                capture: None,
            });
        }
    }

    for (key, child) in entries {
        if !is_subpath_key(key) {
            continue;
        }
        let Some(prefix) = key.strip_suffix('*') else {
            continue;
        };
        if !prefix.ends_with('/') {
            continue;
        }
        if requested.len() <= prefix.len() || !requested.starts_with(prefix) {
            continue;
        }
        let remainder = &requested[prefix.len()..];
        if !is_normalized_remainder(remainder) {
            continue;
        }
        trace!(key, remainder, "pattern subpath key matched");
        return Some(SubpathMatch {
            node: child,
            capture: Some(remainder.to_string()),
        });
    }

    if entries.iter().any(|(key, _)| !is_subpath_key(key)) {
        return Some(SubpathMatch {
            node,
            capture: None,
        });
    }
    None
}

/// Walk condition keys down to a terminal target.
///
/// At each mapping, keys are scanned in declaration order; a key is
/// satisfied if it is always-on (`import`/`module`) or named in
/// `constraints`. `default` is consulted only when the scan finds
/// nothing. A recorded wildcard capture replaces every `*` in the
/// terminal.
#[must_use]
pub fn select_condition(
    node: &ExportsNode,
    constraints: &[String],
    capture: Option<&str>,
) -> Option<String> {
    let mut current = node;
    loop {
        match current {
            ExportsNode::Terminal(target) => {
                let resolved = match capture {
                    Some(remainder) => target.replace('*', remainder),
                    None => target.clone(),
                };
                return Some(resolved);
            }
            ExportsNode::Mapping(entries) => {
                let scanned = entries.iter().find(|(key, _)| {
                    ALWAYS_CONDITIONS.contains(&key.as_str())
                        || constraints.iter().any(|constraint| constraint == key)
                });
                let next = scanned.or_else(|| {
                    entries.iter().find(|(key, _)| key == DEFAULT_CONDITION)
                });
                match next {
                    Some((key, child)) => {
                        trace!(key, "condition satisfied");
                        current = child;
                    }
                    None => return None,
                }
            }
        }
    }
}

/// A captured remainder must survive path normalization unchanged.
/// Rejects `.`/`..` segments, empty segments, and backslashes, which
/// blocks directory-escape attempts through pattern keys.
fn is_normalized_remainder(remainder: &str) -> bool {
    if remainder.contains('\\') {
        return false;
    }
    remainder
        .split('/')
        .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}
