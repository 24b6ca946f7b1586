use mcp_pachca::api::response::{anchor_page, cursor_page, decode, list, singleton};
use mcp_pachca::api::{Anchor, ResponseShape};
use mcp_pachca::error::PachcaError;
use serde_json::json;

#[test]
fn test_singleton_unwraps_data_envelope() {
    let record = singleton(Some(json!({"data": {"id": 1}}))).unwrap();
    assert_eq!(record, json!({"id": 1}));

    let bare = singleton(Some(json!({"id": 2}))).unwrap();
    assert_eq!(bare, json!({"id": 2}));
}

#[test]
fn test_singleton_rejects_array() {
    let err = singleton(Some(json!({"data": [1, 2]}))).unwrap_err();
    assert!(matches!(err, PachcaError::MalformedResponse { status: 200, .. }));
}

#[test]
fn test_missing_body_is_malformed_no_content() {
    let err = list(None).unwrap_err();
    assert!(matches!(err, PachcaError::MalformedResponse { status: 204, .. }));
}

#[test]
fn test_list_accepts_bare_and_wrapped_arrays() {
    assert_eq!(list(Some(json!([1, 2]))).unwrap().len(), 2);
    assert_eq!(list(Some(json!({"data": [1]}))).unwrap().len(), 1);
    assert_eq!(
        decode(ResponseShape::List, Some(json!([{"id": 5}]))).unwrap(),
        json!({"data": [{"id": 5}]})
    );
}

#[test]
fn test_cursor_page_reads_next_cursor() {
    let page = cursor_page(Some(json!({
        "data": [{"id": 1}],
        "meta": {"paginate": {"next_page": "eyJpZCI6MX0"}}
    })))
    .unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.next_cursor.as_deref(), Some("eyJpZCI6MX0"));
}

#[test]
fn test_cursor_page_last_page_has_no_cursor() {
    let page = cursor_page(Some(json!({"data": [], "meta": {"paginate": {"next_page": null}}}))).unwrap();
    assert!(page.next_cursor.is_none());

    let page = cursor_page(Some(json!({"data": []}))).unwrap();
    assert!(page.next_cursor.is_none());
}

#[test]
fn test_cursor_page_requires_data_array() {
    let err = cursor_page(Some(json!([{"id": 1}]))).unwrap_err();
    assert_eq!(err.kind(), "malformed_response");
}

#[test]
fn test_anchor_page_serializes_anchor_only_when_present() {
    let with_anchor = anchor_page(
        Some(json!({"data": []})),
        Some(Anchor {
            message_id: 9,
            direction: None,
        }),
    )
    .unwrap();
    assert_eq!(
        serde_json::to_value(with_anchor).unwrap(),
        json!({"data": [], "anchor": {"message_id": 9}})
    );

    let plain = anchor_page(Some(json!([])), None).unwrap();
    assert_eq!(serde_json::to_value(plain).unwrap(), json!({"data": []}));
}
