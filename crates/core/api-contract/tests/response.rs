use api_contract::{ApiResponse, Paged, SiteDto};

#[test]
fn success_envelope_serializes() {
    let response = ApiResponse::success(serde_json::json!({ "ok": true }));
    let value = serde_json::to_value(&response).expect("serialize");
    assert_eq!(value["success"], true);
    assert_eq!(value["data"]["ok"], true);
    assert!(value["error"].is_null());
}

#[test]
fn error_envelope_serializes() {
    let response = ApiResponse::<()>::error("BINDING.ALREADY_BOUND", "already bound");
    let value = serde_json::to_value(&response).expect("serialize");
    assert_eq!(value["success"], false);
    assert!(value["data"].is_null());
    assert_eq!(value["error"]["code"], "BINDING.ALREADY_BOUND");
    assert_eq!(value["error"]["message"], "already bound");
}

#[test]
fn dto_fields_are_camel_case() {
    let paged = Paged {
        items: vec![SiteDto {
            id: 1,
            site_id: "B-100".to_string(),
            name: "一号楼".to_string(),
            remark: "".to_string(),
        }],
        total: 1,
        page_num: 1,
        page_size: 20,
    };
    let value = serde_json::to_value(&paged).expect("serialize");
    assert_eq!(value["pageNum"], 1);
    assert_eq!(value["items"][0]["siteId"], "B-100");
}
