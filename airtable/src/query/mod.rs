//! Query option encoding.
//!
//! Any option set that can be expressed as key/value pairs implements
//! [`QueryEncoder`]. Encoding is canonical: the same logical options always
//! produce the same bytes, so requests can be compared, cached and retried
//! safely.

mod options;
mod params;

pub use options::{CellFormat, ListOptions, Sort, SortDirection};
pub use params::QueryParams;

use url::form_urlencoded;

use crate::error::QueryEncodingError;

/// A set of query parameters that can be rendered into a query string.
pub trait QueryEncoder {
    /// The parameters as key/value pairs. Repeated keys are allowed.
    fn query_pairs(&self) -> Result<Vec<(String, String)>, QueryEncodingError>;

    /// Renders the canonical, form-urlencoded query string (without `?`).
    ///
    /// Pairs are ordered by key; values of a repeated key keep their order.
    fn encode(&self) -> Result<String, QueryEncodingError> {
        canonical_query(self.query_pairs()?)
    }
}

pub(crate) fn canonical_query(
    mut pairs: Vec<(String, String)>,
) -> Result<String, QueryEncodingError> {
    if pairs.iter().any(|(key, _)| key.is_empty()) {
        return Err(QueryEncodingError::EmptyKey);
    }

    // stable: repeated keys keep insertion order
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in &pairs {
        serializer.append_pair(key, value);
    }
    Ok(serializer.finish())
}

impl<T: QueryEncoder + ?Sized> QueryEncoder for &T {
    fn query_pairs(&self) -> Result<Vec<(String, String)>, QueryEncodingError> {
        (**self).query_pairs()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> QueryEncoder for [(K, V)] {
    fn query_pairs(&self) -> Result<Vec<(String, String)>, QueryEncodingError> {
        Ok(self
            .iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
            .collect())
    }
}

impl<K: AsRef<str>, V: AsRef<str>, const N: usize> QueryEncoder for [(K, V); N] {
    fn query_pairs(&self) -> Result<Vec<(String, String)>, QueryEncodingError> {
        self.as_slice().query_pairs()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> QueryEncoder for Vec<(K, V)> {
    fn query_pairs(&self) -> Result<Vec<(String, String)>, QueryEncodingError> {
        self.as_slice().query_pairs()
    }
}

/// Caller options with the pagination cursor swapped in.
///
/// Every caller parameter passes through untouched except `offset`, which is
/// replaced by the cursor (or dropped on the first page).
pub(crate) struct PagedQuery<'a, Q: ?Sized> {
    inner: &'a Q,
    offset: Option<&'a str>,
}

const OFFSET_KEY: &str = "offset";

impl<'a, Q: QueryEncoder + ?Sized> PagedQuery<'a, Q> {
    pub(crate) fn new(inner: &'a Q, offset: Option<&'a str>) -> Self {
        Self { inner, offset }
    }
}

impl<Q: QueryEncoder + ?Sized> QueryEncoder for PagedQuery<'_, Q> {
    fn query_pairs(&self) -> Result<Vec<(String, String)>, QueryEncodingError> {
        let mut pairs: Vec<_> = self
            .inner
            .query_pairs()?
            .into_iter()
            .filter(|(key, _)| key != OFFSET_KEY)
            .collect();
        if let Some(offset) = self.offset {
            pairs.push((OFFSET_KEY.to_string(), offset.to_string()));
        }
        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brackets_are_escaped() {
        let query = vec![("fields[]", "Name")];
        insta::assert_snapshot!(query.encode().unwrap(), @"fields%5B%5D=Name");
    }

    #[test]
    fn test_keys_sorted_values_kept_in_order() {
        let query = vec![
            ("view", "Grid view"),
            ("fields[]", "Notes"),
            ("fields[]", "Name"),
        ];
        insta::assert_snapshot!(
            query.encode().unwrap(),
            @"fields%5B%5D=Notes&fields%5B%5D=Name&view=Grid+view"
        );
    }

    #[test]
    fn test_empty_key_rejected() {
        let query = vec![("", "x")];
        assert_eq!(query.encode(), Err(QueryEncodingError::EmptyKey));
    }

    #[test]
    fn test_empty_set_encodes_to_nothing() {
        let query: Vec<(&str, &str)> = Vec::new();
        assert_eq!(query.encode().unwrap(), "");
    }

    #[test]
    fn test_paged_query_replaces_only_offset() {
        let caller = vec![("offset", "stale"), ("view", "Grid view")];

        let first = PagedQuery::new(&caller, None);
        assert_eq!(first.encode().unwrap(), "view=Grid+view");

        let next = PagedQuery::new(&caller, Some("itr123/rec456"));
        insta::assert_snapshot!(next.encode().unwrap(), @"offset=itr123%2Frec456&view=Grid+view");
    }
}
