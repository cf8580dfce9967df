use crate::CommentRecord;
use std::cmp::Ordering;

/// Fixed page size for the results table.
pub const PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    /// Records whose follower flag is exactly `true`.
    FollowerOnly,
    /// The complement of `FollowerOnly`: false and unknown flags alike.
    NonFollowerOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Username,
    Timestamp,
    FollowerFlag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Table controls, owned by the caller. The caller resets `page` to 1
/// whenever the filter or search term changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    pub filter: Filter,
    pub search: String,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub page: usize,
}

impl Default for TableQuery {
    fn default() -> Self {
        // Newest comments first, matching the initial table presentation.
        Self {
            filter: Filter::All,
            search: String::new(),
            sort_key: SortKey::Timestamp,
            sort_order: SortOrder::Descending,
            page: 1,
        }
    }
}

impl TableQuery {
    /// Sort-header click: same key flips the order, a new key starts
    /// ascending. Page is left alone; the matched set is unchanged.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.sort_order = match self.sort_order {
                SortOrder::Ascending => SortOrder::Descending,
                SortOrder::Descending => SortOrder::Ascending,
            };
        } else {
            self.sort_key = key;
            self.sort_order = SortOrder::Ascending;
        }
    }
}

/// One page of the filtered, searched and sorted record collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub rows: Vec<CommentRecord>,
    /// The effective page, clamped into `1..=max(total_pages, 1)`.
    pub page: usize,
    pub total_matched: usize,
    /// Zero when nothing matched; the empty page is still returned.
    pub total_pages: usize,
}

/// Pure projection of the full record collection into one table page.
///
/// Filtering and searching are O(n), sorting O(n log n); the whole view is
/// recomputed per call, which is fine at the expected dataset sizes.
pub fn view(records: &[CommentRecord], query: &TableQuery) -> TableView {
    let mut matched: Vec<&CommentRecord> = records
        .iter()
        .filter(|record| match query.filter {
            Filter::All => true,
            Filter::FollowerOnly => record.follower == Some(true),
            Filter::NonFollowerOnly => record.follower != Some(true),
        })
        .filter(|record| matches_search(record, &query.search))
        .collect();

    // `sort_by` is stable; for descending order the comparator is flipped
    // instead of reversing the slice, so equal keys keep their relative
    // order in both directions.
    matched.sort_by(|a, b| match query.sort_order {
        SortOrder::Ascending => compare(a, b, query.sort_key),
        SortOrder::Descending => compare(b, a, query.sort_key),
    });

    let total_matched = matched.len();
    let total_pages = total_matched.div_ceil(PAGE_SIZE);
    let page = query.page.clamp(1, total_pages.max(1));
    let start = (page - 1) * PAGE_SIZE;
    let rows = matched
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE)
        .cloned()
        .collect();

    TableView {
        rows,
        page,
        total_matched,
        total_pages,
    }
}

fn matches_search(record: &CommentRecord, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let term = search.to_lowercase();
    record.username.to_lowercase().contains(&term)
        || record.content.to_lowercase().contains(&term)
}

fn compare(a: &CommentRecord, b: &CommentRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Username => a
            .username
            .to_lowercase()
            .cmp(&b.username.to_lowercase()),
        SortKey::Timestamp => a
            .timestamp
            .as_deref()
            .unwrap_or("")
            .cmp(b.timestamp.as_deref().unwrap_or("")),
        // False and unknown sort before true in ascending order.
        SortKey::FollowerFlag => {
            let rank = |record: &CommentRecord| u8::from(record.follower == Some(true));
            rank(a).cmp(&rank(b))
        }
    }
}
