use super::*;
use crate::error::StmtError;
use serde::Deserialize;

#[test]
fn pagination_defaults() {
    let mut p = Pagination::new(0, 0);
    p.apply_defaults();
    assert_eq!(p, Pagination::new(1, 10));

    let mut p = Pagination::new(-3, -1);
    p.apply_defaults();
    assert_eq!(p, Pagination::new(1, 10));

    let mut p = Pagination::new(4, 500);
    p.apply_defaults();
    assert_eq!(p, Pagination::new(4, 500));
}

#[test]
fn pagination_limits_cap_page_size() {
    let limits = SearchLimits::new().with_default_limit(20).with_max_limit(50);

    let mut p = Pagination::new(2, 500);
    p.apply_limits(&limits);
    assert_eq!(p, Pagination::new(2, 50));

    let mut p = Pagination::new(0, 0);
    p.apply_limits(&limits);
    assert_eq!(p, Pagination::new(1, 20));
}

#[test]
fn pagination_offset() {
    assert_eq!(Pagination::new(1, 10).offset(), 0);
    assert_eq!(Pagination::new(3, 25).offset(), 50);
}

#[test]
fn pagination_offset_saturates_on_huge_pages() {
    assert_eq!(Pagination::new(i64::MAX, 10).offset(), i64::MAX);
    assert_eq!(Pagination::new(2, i64::MAX).offset(), i64::MAX);
    assert_eq!(Pagination::new(i64::MIN, 10).offset(), 0);

    // Request-supplied values pass through `init` untouched when positive.
    let mut payload: SearchPayload<UserFilters> = serde_json::from_str(
        r#"{"filters":{},"pagination":{"page":9223372036854775807,"limit":10}}"#,
    )
    .unwrap();
    payload.init(&[]).unwrap();
    assert_eq!(payload.pagination.offset(), i64::MAX);

    let mut b = crate::StatementBuilder::new("SELECT * FROM users");
    b.apply_pagination(&payload.pagination);
    assert_eq!(
        b.build().sql(),
        "SELECT * FROM users LIMIT 10 OFFSET 9223372036854775807"
    );
}

#[test]
fn pagination_total_pages_handles_extreme_values() {
    assert_eq!(Pagination::new(1, i64::MAX).total_pages(5), 1);
    assert_eq!(Pagination::new(1, i64::MAX).total_pages(i64::MAX), 1);
    assert_eq!(Pagination::new(1, 1).total_pages(i64::MAX), i64::MAX);
    assert_eq!(Pagination::new(1, 2).total_pages(i64::MAX), i64::MAX / 2 + 1);
    assert_eq!(Pagination::new(1, i64::MAX).meta(5).total_pages, 1);
}

#[test]
fn pagination_total_pages_rounds_up() {
    let p = Pagination::new(1, 10);
    assert_eq!(p.total_pages(0), 0);
    assert_eq!(p.total_pages(1), 1);
    assert_eq!(p.total_pages(10), 1);
    assert_eq!(p.total_pages(11), 2);
    assert_eq!(Pagination::new(1, 0).total_pages(11), 0);
}

#[test]
fn pagination_meta_serializes_flat() {
    let meta = Pagination::new(2, 10).meta(35);
    assert_eq!(meta.total_pages, 4);

    let json = serde_json::to_value(meta).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"page": 2, "limit": 10, "total_items": 35, "total_pages": 4})
    );
}

#[test]
fn sorting_validates_against_allowed_fields() {
    let allowed = ["created_at", "name"];

    let mut s = Sorting::new("Name", "DESC");
    s.validate(&allowed).unwrap();
    assert_eq!(s, Sorting::new("name", "desc"));

    let mut s = Sorting::new("password", "asc");
    let err = s.validate(&allowed).unwrap_err();
    assert!(matches!(err, StmtError::Validation(ref m) if m == "invalid sort field: password"));

    let mut s = Sorting::new("name", "sideways");
    let err = s.validate(&allowed).unwrap_err();
    assert!(matches!(err, StmtError::Validation(ref m) if m == "invalid sort order: sideways"));
}

#[test]
fn sorting_without_field_is_valid() {
    let mut s = Sorting::new("", "whatever");
    assert!(s.validate(&[]).is_ok());

    let mut s = Sorting::new("name", "");
    assert!(s.validate(&["name"]).is_ok());
    assert_eq!(s.order, "");
}

#[test]
fn cursor_limit_is_settled() {
    let limits = SearchLimits::default();

    let mut c = Cursor::default();
    c.validate(&limits).unwrap();
    assert_eq!(c.limit, Some(10));

    let mut c = Cursor {
        limit: Some(-4),
        ..Cursor::default()
    };
    c.validate(&limits).unwrap();
    assert_eq!(c.limit(), 10);

    let mut c = Cursor {
        after: Some("abc".into()),
        limit: Some(1_000),
        ..Cursor::default()
    };
    c.validate(&limits).unwrap();
    assert_eq!(c.limit(), 100);
}

#[test]
fn cursor_rejects_both_directions() {
    let mut c = Cursor {
        after: Some("a".into()),
        before: Some("b".into()),
        limit: None,
    };
    let err = c.validate(&SearchLimits::default()).unwrap_err();
    assert!(matches!(err, StmtError::Validation(_)));
    assert_eq!(c.limit, Some(10));
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, serde::Serialize)]
struct UserFilters {
    name: Option<String>,
    min_age: Option<i32>,
}

#[test]
fn search_payload_init_applies_defaults_and_validates_sort() {
    let mut payload: SearchPayload<UserFilters> = serde_json::from_str(
        r#"{"filters":{"name":"al","min_age":null},"sort":{"field":"Name","order":"asc"}}"#,
    )
    .unwrap();

    payload.init(&["name"]).unwrap();
    assert_eq!(payload.pagination, Pagination::new(1, 10));
    assert_eq!(payload.sort, Sorting::new("name", "asc"));
    assert_eq!(payload.filters.name.as_deref(), Some("al"));

    let mut bad: SearchPayload<UserFilters> =
        serde_json::from_str(r#"{"filters":{},"sort":{"field":"secret"}}"#).unwrap();
    assert!(bad.init(&["name"]).is_err());
}

#[test]
fn search_payload_init_with_limits_caps_page_size() {
    let mut payload = SearchPayload {
        filters: UserFilters::default(),
        sort: Sorting::default(),
        pagination: Pagination::new(1, 1_000),
    };
    payload
        .init_with_limits(&[], &SearchLimits::new().with_max_limit(30))
        .unwrap();
    assert_eq!(payload.pagination.limit, 30);
}

#[test]
fn search_result_serializes_items_and_meta() {
    let result = SearchResult::new(vec!["a", "b"], Pagination::new(1, 2).meta(3));
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "items": ["a", "b"],
            "pagination": {"page": 1, "limit": 2, "total_items": 3, "total_pages": 2}
        })
    );
}
