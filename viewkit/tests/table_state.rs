use viewkit::table::{CellValue, Column, Row, TableIntent, TableMode, TableState};

fn quiz_rows(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| {
            Row::new()
                .set("id", i as i64)
                .set("title", format!("Quiz {i}"))
        })
        .collect()
}

fn title_column() -> Vec<Column> {
    vec![Column::field("title", "Title")]
}

#[test]
fn client_side_pages_locally() {
    let table = TableState::client_side(title_column(), quiz_rows(23)).with_page_size(8);
    assert_eq!(table.mode(), TableMode::ClientSide);

    let page = table.page_view();
    assert_eq!(page.rows.len(), 8);
    assert_eq!(page.page_count, 3);
    assert_eq!(page.total_count, 23);
    assert!(page.is_first_page());
    assert!(!page.is_last_page());
}

#[test]
fn query_change_resets_page_index() {
    let mut table = TableState::client_side(title_column(), quiz_rows(40)).with_page_size(10);
    table.set_page(3);
    assert_eq!(table.page_index(), 3);

    table.set_query("quiz 1");
    assert_eq!(table.page_index(), 0, "new filter invalidates the old offset");
    assert_eq!(table.query(), "quiz 1");
}

#[test]
fn unchanged_query_keeps_page_index() {
    let mut table = TableState::client_side(title_column(), quiz_rows(40)).with_page_size(10);
    table.set_query("quiz");
    table.set_page(2);

    assert!(table.set_query("quiz").is_none());
    assert_eq!(table.page_index(), 2);
}

#[test]
fn client_side_filter_then_paginate() {
    // "Quiz 1", "Quiz 10" .. "Quiz 19" match "quiz 1": 11 rows.
    let mut table = TableState::client_side(title_column(), quiz_rows(23)).with_page_size(8);
    table.set_query("quiz 1");

    let page = table.page_view();
    assert_eq!(page.total_count, 11);
    assert_eq!(page.page_count, 2);
    assert_eq!(page.rows.len(), 8);
    assert_eq!(
        page.rows[0].get("title"),
        Some(&CellValue::from("Quiz 1"))
    );
}

#[test]
fn client_side_emits_no_intents() {
    let mut table = TableState::client_side(title_column(), quiz_rows(23));
    assert!(table.set_query("x").is_none());
    assert!(table.set_page(1).is_none());
    assert!(table.prev_page().is_none());
}

#[test]
fn out_of_range_page_renders_empty() {
    let mut table = TableState::client_side(title_column(), quiz_rows(5)).with_page_size(10);
    table.set_page(9);
    let page = table.page_view();
    assert!(page.rows.is_empty());
    assert_eq!(page.page_count, 1);
}

#[test]
fn set_rows_keeps_position() {
    let mut table = TableState::client_side(title_column(), quiz_rows(23)).with_page_size(8);
    table.set_page(1);

    // A background refresh replaces the collection in place.
    table.set_rows(quiz_rows(30));
    let page = table.page_view();
    assert_eq!(page.page_index, 1);
    assert_eq!(page.total_count, 30);
}

#[test]
fn server_mode_forwards_searches() {
    let mut table = TableState::server_delegated(title_column()).with_page_size(20);

    let intent = table.set_query("algebra");
    let Some(TableIntent::Search { query, page_size, .. }) = intent else {
        panic!("expected a search intent, got {intent:?}");
    };
    assert_eq!(query, "algebra");
    assert_eq!(page_size, 20);
    assert_eq!(table.page_index(), 0);
}

#[test]
fn server_mode_forwards_page_changes() {
    let mut table = TableState::server_delegated(title_column());

    let intent = table.set_page(2);
    let Some(TableIntent::FetchPage { page_index, query, .. }) = intent else {
        panic!("expected a fetch-page intent, got {intent:?}");
    };
    assert_eq!(page_index, 2);
    assert_eq!(query, "");
}

#[test]
fn server_mode_does_not_filter_locally() {
    let mut table = TableState::server_delegated(title_column()).with_page_size(10);
    let Some(TableIntent::Search { token, .. }) = table.set_query("zzz") else {
        panic!("expected a search intent");
    };

    // The server decides what matches; the engine displays what it got.
    assert!(table.apply_server_page(token, quiz_rows(3), 3));
    let page = table.page_view();
    assert_eq!(page.rows.len(), 3);
    assert_eq!(page.total_count, 3);
}

#[test]
fn stale_response_is_discarded() {
    let mut table = TableState::server_delegated(title_column());

    let Some(TableIntent::Search { token: old_token, .. }) = table.set_query("first") else {
        panic!("expected a search intent");
    };
    let Some(TableIntent::Search { token: new_token, .. }) = table.set_query("second") else {
        panic!("expected a search intent");
    };

    // The slow response to the earlier query loses.
    assert!(!table.apply_server_page(old_token, quiz_rows(9), 9));
    assert_eq!(table.page_view().total_count, 0);

    assert!(table.apply_server_page(new_token, quiz_rows(2), 2));
    assert_eq!(table.page_view().total_count, 2);
}

#[test]
fn begin_request_supersedes_older_tokens() {
    let mut table = TableState::server_delegated(title_column());

    let TableIntent::FetchPage { token: mount, .. } = table.begin_request() else {
        panic!("begin_request always fetches a page");
    };
    let TableIntent::FetchPage { token: refresh, .. } = table.begin_request() else {
        panic!("begin_request always fetches a page");
    };

    assert!(!table.apply_server_page(mount, quiz_rows(1), 1));
    assert!(table.apply_server_page(refresh, quiz_rows(4), 4));
}

#[test]
fn next_and_prev_respect_bounds() {
    let mut table = TableState::server_delegated(title_column()).with_page_size(10);
    let TableIntent::FetchPage { token, .. } = table.begin_request() else {
        panic!("begin_request always fetches a page");
    };
    table.apply_server_page(token, quiz_rows(10), 25);

    assert!(table.prev_page().is_none(), "already on the first page");

    assert!(table.next_page().is_some());
    assert!(table.next_page().is_some());
    assert_eq!(table.page_index(), 2);
    assert!(table.next_page().is_none(), "already on the last page");

    assert!(table.prev_page().is_some());
    assert_eq!(table.page_index(), 1);
}

#[test]
fn server_page_rejected_in_client_mode() {
    let mut table = TableState::server_delegated(title_column());
    let TableIntent::FetchPage { token, .. } = table.begin_request() else {
        panic!("begin_request always fetches a page");
    };

    let mut client = TableState::client_side(title_column(), quiz_rows(2));
    assert!(!client.apply_server_page(token, quiz_rows(5), 5));
    assert_eq!(client.page_view().total_count, 2);
}
