use collector_core::{
    view, CommentRecord, Filter, SortKey, SortOrder, TableQuery, PAGE_SIZE,
};

fn record(username: &str, content: &str, timestamp: Option<&str>, follower: Option<bool>) -> CommentRecord {
    CommentRecord {
        username: username.to_string(),
        content: content.to_string(),
        timestamp: timestamp.map(str::to_string),
        is_reply: false,
        follower,
    }
}

fn query() -> TableQuery {
    TableQuery {
        sort_key: SortKey::Timestamp,
        sort_order: SortOrder::Ascending,
        ..TableQuery::default()
    }
}

#[test]
fn view_is_pure() {
    let records = vec![
        record("alice", "first", Some("2024-01-01"), Some(true)),
        record("bob", "second", Some("2024-01-02"), None),
    ];
    let q = TableQuery {
        search: "i".to_string(),
        ..query()
    };
    let first = view(&records, &q);
    let second = view(&records, &q);
    assert_eq!(first, second);
}

#[test]
fn follower_filters_partition_the_set_without_overlap_or_loss() {
    let records = vec![
        record("a", "", None, Some(true)),
        record("b", "", None, Some(false)),
        record("c", "", None, None),
        record("d", "", None, Some(true)),
        record("e", "", None, None),
    ];

    let followers = view(
        &records,
        &TableQuery {
            filter: Filter::FollowerOnly,
            ..query()
        },
    );
    let non_followers = view(
        &records,
        &TableQuery {
            filter: Filter::NonFollowerOnly,
            ..query()
        },
    );

    assert_eq!(followers.total_matched, 2);
    // Unknown flags land with the non-followers: the complement, not a
    // third bucket.
    assert_eq!(non_followers.total_matched, 3);
    assert_eq!(
        followers.total_matched + non_followers.total_matched,
        records.len()
    );
    for row in &followers.rows {
        assert!(non_followers.rows.iter().all(|r| r.username != row.username));
    }
}

#[test]
fn search_is_case_insensitive_across_username_and_content() {
    let records = vec![
        record("ABCxyz", "nothing here", None, None),
        record("someone", "contains abc here", None, None),
        record("neither", "nope", None, None),
    ];
    let result = view(
        &records,
        &TableQuery {
            search: "abc".to_string(),
            ..query()
        },
    );
    let names: Vec<_> = result.rows.iter().map(|r| r.username.as_str()).collect();
    assert_eq!(result.total_matched, 2);
    assert!(names.contains(&"ABCxyz"));
    assert!(names.contains(&"someone"));
}

#[test]
fn search_applies_after_filter() {
    let records = vec![
        record("match_follower", "abc", None, Some(true)),
        record("match_other", "abc", None, None),
    ];
    let result = view(
        &records,
        &TableQuery {
            filter: Filter::FollowerOnly,
            search: "abc".to_string(),
            ..query()
        },
    );
    assert_eq!(result.total_matched, 1);
    assert_eq!(result.rows[0].username, "match_follower");
}

#[test]
fn sort_is_stable_for_equal_keys_in_both_orders() {
    let records = vec![
        record("dup", "first", Some("2024-01-01"), None),
        record("dup", "second", Some("2024-01-01"), None),
        record("dup", "third", Some("2024-01-01"), None),
    ];
    for order in [SortOrder::Ascending, SortOrder::Descending] {
        for key in [SortKey::Username, SortKey::Timestamp, SortKey::FollowerFlag] {
            let result = view(
                &records,
                &TableQuery {
                    sort_key: key,
                    sort_order: order,
                    ..query()
                },
            );
            let contents: Vec<_> = result.rows.iter().map(|r| r.content.as_str()).collect();
            assert_eq!(contents, vec!["first", "second", "third"]);
        }
    }
}

#[test]
fn absent_timestamp_sorts_first_ascending() {
    let records = vec![
        record("later", "", Some("2024-06-01"), None),
        record("undated", "", None, None),
        record("earlier", "", Some("2024-01-01"), None),
    ];
    let result = view(&records, &query());
    let names: Vec<_> = result.rows.iter().map(|r| r.username.as_str()).collect();
    assert_eq!(names, vec!["undated", "earlier", "later"]);
}

#[test]
fn follower_flag_sorts_unknown_with_false_before_true() {
    let records = vec![
        record("yes", "", None, Some(true)),
        record("unknown", "", None, None),
        record("no", "", None, Some(false)),
    ];
    let result = view(
        &records,
        &TableQuery {
            sort_key: SortKey::FollowerFlag,
            ..query()
        },
    );
    let names: Vec<_> = result.rows.iter().map(|r| r.username.as_str()).collect();
    // Stable: unknown and false keep their input order ahead of true.
    assert_eq!(names, vec!["unknown", "no", "yes"]);
}

#[test]
fn username_sort_ignores_case() {
    let records = vec![
        record("Zed", "", None, None),
        record("alice", "", None, None),
        record("Bob", "", None, None),
    ];
    let result = view(
        &records,
        &TableQuery {
            sort_key: SortKey::Username,
            ..query()
        },
    );
    let names: Vec<_> = result.rows.iter().map(|r| r.username.as_str()).collect();
    assert_eq!(names, vec!["alice", "Bob", "Zed"]);
}

#[test]
fn pagination_boundaries_and_clamping() {
    // 45 records, 12 of which are followers.
    let records: Vec<_> = (0..45)
        .map(|i| record(&format!("user{i:02}"), "", None, Some(i < 12)))
        .collect();

    let all = view(&records, &query());
    assert_eq!(all.total_matched, 45);
    assert_eq!(all.total_pages, 3);
    assert_eq!(all.rows.len(), PAGE_SIZE);

    let last = view(
        &records,
        &TableQuery {
            page: 3,
            ..query()
        },
    );
    assert_eq!(last.rows.len(), 5);
    assert_eq!(last.page, 3);

    // Follower-only matches 12: one page; a stale page 2 request clamps
    // back instead of erroring.
    let clamped = view(
        &records,
        &TableQuery {
            filter: Filter::FollowerOnly,
            page: 2,
            ..query()
        },
    );
    assert_eq!(clamped.total_matched, 12);
    assert_eq!(clamped.total_pages, 1);
    assert_eq!(clamped.page, 1);
    assert_eq!(clamped.rows.len(), 12);
}

#[test]
fn empty_matched_set_yields_empty_page_without_error() {
    let records = vec![record("alice", "hello", None, None)];
    let result = view(
        &records,
        &TableQuery {
            search: "zzz".to_string(),
            ..query()
        },
    );
    assert_eq!(result.total_matched, 0);
    assert_eq!(result.total_pages, 0);
    assert_eq!(result.page, 1);
    assert!(result.rows.is_empty());

    let none_at_all = view(&[], &query());
    assert_eq!(none_at_all.total_pages, 0);
    assert!(none_at_all.rows.is_empty());
}

#[test]
fn sort_toggle_flips_same_key_and_resets_on_new_key() {
    let mut q = TableQuery::default();
    assert_eq!(q.sort_key, SortKey::Timestamp);
    assert_eq!(q.sort_order, SortOrder::Descending);

    q.toggle_sort(SortKey::Timestamp);
    assert_eq!(q.sort_order, SortOrder::Ascending);
    q.toggle_sort(SortKey::Timestamp);
    assert_eq!(q.sort_order, SortOrder::Descending);

    q.toggle_sort(SortKey::Username);
    assert_eq!(q.sort_key, SortKey::Username);
    assert_eq!(q.sort_order, SortOrder::Ascending);
}
