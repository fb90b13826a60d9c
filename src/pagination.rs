//! Relay style cursor pagination over an ordered, in-memory collection.
//!
//! Forward pagination uses `first`/`after`, backward pagination uses
//! `last`/`before`. Cursors are item identifiers; a cursor matching no item
//! is ignored.

use crate::error::TodoError;

/// Item that can be placed on a page.
pub trait Node: Clone {
    /// Key defining the total order of a collection.
    type SortKey: Ord;

    /// Cursor of this item, equal to its identifier.
    fn cursor(&self) -> String;

    fn sort_key(&self) -> Self::SortKey;
}

/// Validated pagination arguments.
///
/// If both `first` and `last` are set, `first` takes precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Maximum amount of items after `after`.
    pub first: Option<usize>,
    /// Cursor of the item the page starts after.
    pub after: Option<String>,
    /// Maximum amount of items before `before`.
    pub last: Option<usize>,
    /// Cursor of the item the page ends before.
    pub before: Option<String>,
}

impl PageRequest {
    /// Builds a page request from raw GraphQL arguments.
    ///
    /// Negative page sizes are rejected with `TodoError::InvalidPageSize`.
    pub fn new(
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<Self, TodoError> {
        Ok(Self {
            first: page_size("first", first)?,
            after,
            last: page_size("last", last)?,
            before,
        })
    }
}

fn page_size(argument: &'static str, value: Option<i32>) -> Result<Option<usize>, TodoError> {
    value
        .map(|size| {
            usize::try_from(size).map_err(|_| TodoError::InvalidPageSize {
                argument,
                value: size,
            })
        })
        .transpose()
}

/// Item on a page together with its cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEdge<T> {
    pub cursor: String,
    pub node: T,
}

/// Metadata about a page relative to the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    /// Cursor of the first edge, `None` on an empty page.
    pub start_cursor: Option<String>,
    /// Cursor of the last edge, `None` on an empty page.
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

/// Result of paginating a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub edges: Vec<PageEdge<T>>,
    pub page_info: PageInfo,
}

/// Selects a page of `collection` described by `request`.
///
/// The collection is stably sorted by `Node::sort_key` first, so items with
/// equal keys keep the order they are passed in. Never fails: unknown cursors
/// fall back to the collection bounds.
///
/// A page cut short by its own `first`/`last` limit reports whether items
/// exist beyond that limit. A page size of zero yields an empty page whose
/// flags are derived from the cursor bounds alone.
///
/// * `collection` - Snapshot of all items.
/// * `request` - Validated pagination arguments.
pub fn paginate<T: Node>(collection: &[T], request: &PageRequest) -> Page<T> {
    let mut ordered: Vec<&T> = collection.iter().collect();
    ordered.sort_by_key(|node| node.sort_key());
    let total_count = ordered.len();

    let start_index = request
        .after
        .as_deref()
        .and_then(|cursor| position(&ordered, cursor))
        .map_or(0, |index| index + 1);
    let end_index = request
        .before
        .as_deref()
        .and_then(|cursor| position(&ordered, cursor))
        .unwrap_or(total_count);

    let (lower, upper) = match (request.first, request.last) {
        (Some(first), _) => (start_index, start_index.saturating_add(first).min(end_index)),
        (None, Some(last)) => (end_index.saturating_sub(last), end_index),
        (None, None) => (start_index, end_index),
    };
    let selected: &[&T] = if lower < upper {
        &ordered[lower..upper]
    } else {
        &[]
    };

    let edges: Vec<PageEdge<T>> = selected
        .iter()
        .map(|node| PageEdge {
            cursor: node.cursor(),
            node: (*node).clone(),
        })
        .collect();
    let page_len = edges.len();

    let has_previous_page = match (request.first, request.last) {
        (None, Some(last)) if last > 0 && page_len == last => end_index > last,
        _ => start_index > 0,
    };
    let has_next_page = match request.first {
        Some(first) if first > 0 && page_len == first => start_index + first < total_count,
        _ => end_index < total_count,
    };

    let page_info = PageInfo {
        start_cursor: edges.first().map(|edge| edge.cursor.clone()),
        end_cursor: edges.last().map(|edge| edge.cursor.clone()),
        has_next_page,
        has_previous_page,
    };
    Page { edges, page_info }
}

fn position<T: Node>(ordered: &[&T], cursor: &str) -> Option<usize> {
    ordered.iter().position(|node| node.cursor() == cursor)
}
