//! Collection picker helpers.

use relay_domain::Collection;

/// Collections whose name contains `term`, case-insensitively, in their
/// original order. A blank term matches everything.
#[must_use]
pub fn filter_collections<'a>(collections: &'a [Collection], term: &str) -> Vec<&'a Collection> {
    let term = term.trim();
    collections
        .iter()
        .filter(|collection| term.is_empty() || collection.name_matches(term))
        .collect()
}

/// Collection a new request should target.
///
/// An explicit, non-blank choice wins if it names a listed collection;
/// otherwise the first listed collection is used.
#[must_use]
pub fn default_collection<'a>(
    collections: &'a [Collection],
    explicit: Option<&str>,
) -> Option<&'a Collection> {
    explicit
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .and_then(|id| collections.iter().find(|collection| collection.id == id))
        .or_else(|| collections.first())
}
