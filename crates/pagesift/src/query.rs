//! Namespace query parsing.
//!
//! A raw query mixes the bare name/title pattern with namespace filters:
//! `^ns` or `-ns:ns` excludes a namespace, `@ns` or `ns:ns` includes one,
//! everything else is the pattern itself.

use crate::host::Resolver;
use crate::options::Context;

/// A raw query split into its bare pattern and namespace filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    /// The bare name/title pattern, namespace tokens removed.
    pub query: String,
    /// Namespaces to include, in token order.
    pub include: Vec<String>,
    /// Namespaces to exclude, in token order.
    pub exclude: Vec<String>,
}

impl ParsedQuery {
    /// Wraps a query that needs no namespace parsing (full-regex mode).
    pub fn bare(query: &str) -> Self {
        ParsedQuery {
            query: query.trim().to_string(),
            ..Default::default()
        }
    }
}

/// Splits a raw query into pattern plus include/exclude namespace lists.
///
/// A query without whitespace passes through untouched unless the lone
/// token carries one of the unambiguous namespace markers (`ns:`, `@`,
/// `-ns:`); a lone `^...` token stays a pattern, since `^` doubles as the
/// regex start anchor. Namespace tokens are resolved to absolute paths
/// through the host resolver; resolution failures come back as empty
/// strings and simply match nothing.
pub fn parse_namespace_query<R>(raw: &str, resolver: &R, ctx: &Context) -> ParsedQuery
where
    R: Resolver + ?Sized,
{
    let raw = raw.trim();
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    let single = tokens.len() <= 1;
    if single && strip_prefixes(raw, &["-ns:", "@", "ns:"]).is_none() {
        return ParsedQuery::bare(raw);
    }

    let mut parsed = ParsedQuery::default();
    let mut words = Vec::new();
    for token in tokens {
        let exclude_markers: &[&str] = if single { &["-ns:"] } else { &["^", "-ns:"] };
        if let Some(ns) = strip_prefixes(token, exclude_markers) {
            parsed.exclude.push(resolver.resolve_namespace(ns, ctx));
        } else if let Some(ns) = strip_prefixes(token, &["@", "ns:"]) {
            parsed.include.push(resolver.resolve_namespace(ns, ctx));
        } else {
            words.push(token);
        }
    }
    parsed.query = words.join(" ");
    parsed
}

fn strip_prefixes<'a>(token: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    prefixes
        .iter()
        .find_map(|p| token.strip_prefix(p))
        .filter(|rest| !rest.is_empty())
}
