use quizdash_lib::api::{PageRequest, PageResponse};

#[derive(Debug, serde::Deserialize, PartialEq)]
struct Quiz {
    id: u32,
    title: String,
}

#[test]
fn page_request_params() {
    let request = PageRequest::new(2, 25);
    assert_eq!(
        request.query_params(),
        [("page", "2".to_string()), ("size", "25".to_string())]
    );
    assert_eq!(request.offset(), 50);
    assert_eq!(request.next(), PageRequest::new(3, 25));
    assert_eq!(PageRequest::first(25).page_index, 0);
}

#[test]
fn page_response_deserializes() {
    let page: PageResponse<Quiz> = serde_json::from_str(
        r#"{"rows": [{"id": 1, "title": "Algebra"}, {"id": 2, "title": "Geometry"}], "totalCount": 23}"#,
    )
    .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.total_count, 23);
    assert_eq!(page.rows[0].title, "Algebra");
}

#[test]
fn page_count_minimum_is_one() {
    let empty: PageResponse<Quiz> = serde_json::from_str(r#"{"rows": [], "totalCount": 0}"#).unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.page_count(10), 1);

    let page: PageResponse<Quiz> = serde_json::from_str(r#"{"rows": [], "totalCount": 25}"#).unwrap();
    assert_eq!(page.page_count(10), 3);
    assert_eq!(page.page_count(0), 1);
}

#[test]
fn last_page_detection() {
    let page: PageResponse<Quiz> = serde_json::from_str(r#"{"rows": [], "totalCount": 23}"#).unwrap();

    assert!(!page.is_last(&PageRequest::new(0, 8)));
    assert!(!page.is_last(&PageRequest::new(1, 8)));
    assert!(page.is_last(&PageRequest::new(2, 8)));
    // Past-the-end requests are allowed; they are simply "last".
    assert!(page.is_last(&PageRequest::new(9, 8)));
}
