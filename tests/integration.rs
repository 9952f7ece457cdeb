//! End-to-end tests for the Tax Return Engine API.
//!
//! This suite drives the full submission flow through the router with stub
//! extraction and rendering collaborators:
//! - W-2 refund and 1099 amount-owed scenarios
//! - monetary normalization of extracted values
//! - document count and identity validation before extraction
//! - duplicate form rejection
//! - unsupported filing status handling
//! - one-time retrieval of the rendered document
//! - opaque upstream failure mapping

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use tax_return_engine::api::{AppState, create_router};
use tax_return_engine::error::{EngineError, EngineResult};
use tax_return_engine::extract::{DocumentBuffer, ExtractedForm, FormExtractor};
use tax_return_engine::models::{Form1040, FormType};
use tax_return_engine::pipeline::SubmissionPipeline;
use tax_return_engine::policy::PolicyLoader;
use tax_return_engine::render::FormRenderer;
use tax_return_engine::store::DocumentStore;

// =============================================================================
// Test Collaborators
// =============================================================================

/// Extraction stub: each uploaded "document" is a JSON description of the
/// form the extractor would have read from it, e.g.
/// `{"form_type": "W-2", "fields": {"wages": "50000"}}`.
struct JsonStubExtractor {
    calls: Arc<AtomicUsize>,
}

impl FormExtractor for JsonStubExtractor {
    fn extract(&self, documents: &[DocumentBuffer]) -> EngineResult<Vec<ExtractedForm>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut forms = Vec::new();
        for document in documents {
            let value: Value =
                serde_json::from_slice(&document.bytes).map_err(|e| {
                    EngineError::ExtractionFailed {
                        message: format!("unreadable document '{}': {}", document.filename, e),
                    }
                })?;

            let form_type = value["form_type"]
                .as_str()
                .and_then(FormType::parse)
                .ok_or_else(|| EngineError::ExtractionFailed {
                    message: format!("unrecognized form in '{}'", document.filename),
                })?;

            let fields: BTreeMap<String, String> = value["fields"]
                .as_object()
                .map(|map| {
                    map.iter()
                        .map(|(k, v)| (k.clone(), v.as_str().unwrap_or_default().to_string()))
                        .collect()
                })
                .unwrap_or_default();

            forms.push(ExtractedForm { form_type, fields });
        }
        Ok(forms)
    }
}

/// Extraction stub that always fails, simulating an upstream outage.
struct FailingExtractor;

impl FormExtractor for FailingExtractor {
    fn extract(&self, _documents: &[DocumentBuffer]) -> EngineResult<Vec<ExtractedForm>> {
        Err(EngineError::ExtractionFailed {
            message: "vendor returned HTTP 500".to_string(),
        })
    }
}

/// Renderer stub declaring the full Form 1040 field set.
struct StubRenderer;

impl FormRenderer for StubRenderer {
    fn template_fields(&self) -> EngineResult<BTreeSet<String>> {
        Ok(Form1040::required_template_fields()
            .into_iter()
            .map(String::from)
            .collect())
    }

    fn render(
        &self,
        text_fields: &BTreeMap<String, String>,
        checkboxes: &BTreeMap<String, bool>,
    ) -> EngineResult<Vec<u8>> {
        // Embed line 16 and the ticked checkbox so tests can see what was
        // handed over
        let checkbox = checkboxes.keys().next().cloned().unwrap_or_default();
        Ok(format!("%PDF-stub tax={} checkbox={}", text_fields["16"], checkbox).into_bytes())
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state(extractor_calls: Arc<AtomicUsize>) -> AppState {
    let policies = PolicyLoader::load("./config/federal").expect("Failed to load policy config");
    let pipeline = SubmissionPipeline::new(
        Arc::new(JsonStubExtractor {
            calls: extractor_calls,
        }),
        Arc::new(StubRenderer),
        policies,
        2024,
    )
    .expect("Failed to build pipeline");
    AppState::new(pipeline, DocumentStore::new())
}

fn create_router_for_test() -> Router {
    create_router(create_test_state(Arc::new(AtomicUsize::new(0))))
}

fn failing_extraction_router() -> Router {
    let policies = PolicyLoader::load("./config/federal").expect("Failed to load policy config");
    let pipeline =
        SubmissionPipeline::new(Arc::new(FailingExtractor), Arc::new(StubRenderer), policies, 2024)
            .expect("Failed to build pipeline");
    create_router(AppState::new(pipeline, DocumentStore::new()))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a decimal out of a summary JSON field (amounts serialize as strings).
fn amount(summary: &Value, field: &str) -> Decimal {
    decimal(summary[field].as_str().unwrap_or_else(|| {
        panic!("field {} missing or not a string: {}", field, summary)
    }))
}

fn w2_document(wages: &str, withheld: &str) -> Vec<u8> {
    serde_json::json!({
        "form_type": "W-2",
        "fields": {
            "wages": wages,
            "federal_income_tax_withheld": withheld,
        }
    })
    .to_string()
    .into_bytes()
}

fn nec_document(compensation: &str) -> Vec<u8> {
    serde_json::json!({
        "form_type": "1099-NEC",
        "fields": { "nonemployee_compensation": compensation }
    })
    .to_string()
    .into_bytes()
}

fn int_document(interest: &str) -> Vec<u8> {
    serde_json::json!({
        "form_type": "1099-INT",
        "fields": { "interest_income": interest }
    })
    .to_string()
    .into_bytes()
}

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

fn identity_fields(filing_status: &str) -> Vec<(&'static str, String)> {
    vec![
        ("first_name_middle_initial", "Jane Q".to_string()),
        ("last_name", "Filer".to_string()),
        ("ssn", "123-45-6789".to_string()),
        ("address", "123 Main St".to_string()),
        ("city", "Sacramento".to_string()),
        ("state", "CA".to_string()),
        ("zip_code", "95814".to_string()),
        ("filing_status", filing_status.to_string()),
    ]
}

/// Builds a multipart/form-data body from file parts and text parts.
fn multipart_body(files: &[Vec<u8>], fields: &[(&str, String)]) -> Vec<u8> {
    let mut body = Vec::new();

    for (i, file) in files.iter().enumerate() {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"files\"; filename=\"doc_{}.pdf\"\r\n",
                i
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
        body.extend_from_slice(file);
        body.extend_from_slice(b"\r\n");
    }

    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

async fn post_submission(
    router: Router,
    files: &[Vec<u8>],
    fields: &[(&str, String)],
) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/returns")
                .header(
                    "Content-Type",
                    format!("multipart/form-data; boundary={}", BOUNDARY),
                )
                .body(Body::from(multipart_body(files, fields)))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

async fn get_document(router: Router, document_id: &str) -> (StatusCode, Vec<u8>) {
    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/returns/{}/form", document_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

// =============================================================================
// Submission Scenarios
// =============================================================================

#[tokio::test]
async fn test_w2_refund_scenario() {
    let router = create_router_for_test();
    let files = vec![w2_document("50000", "5000")];

    let (status, json) = post_submission(router, &files, &identity_fields("Single")).await;

    assert_eq!(status, StatusCode::OK);
    let summary = &json["tax_return_summary"];
    assert_eq!(amount(summary, "total_income"), decimal("50000.00"));
    assert_eq!(amount(summary, "taxable_income"), decimal("35400.00"));
    assert_eq!(amount(summary, "estimated_tax_due"), decimal("4016.00"));
    assert_eq!(amount(summary, "estimated_refund"), decimal("984.00"));
    assert_eq!(amount(summary, "amount_owed"), decimal("0"));
    assert_eq!(summary["forms_submitted"], serde_json::json!(["W-2"]));
    assert!(json["document_id"].as_str().is_some());
}

#[tokio::test]
async fn test_1099_amount_owed_scenario() {
    let router = create_router_for_test();
    let files = vec![nec_document("20000"), int_document("500")];

    let (status, json) = post_submission(router, &files, &identity_fields("Single")).await;

    assert_eq!(status, StatusCode::OK);
    let summary = &json["tax_return_summary"];
    assert_eq!(amount(summary, "total_income"), decimal("20500.00"));
    assert_eq!(amount(summary, "taxable_income"), decimal("5900.00"));
    assert_eq!(amount(summary, "estimated_tax_due"), decimal("590.00"));
    assert_eq!(amount(summary, "amount_owed"), decimal("590.00"));
    assert_eq!(amount(summary, "estimated_refund"), decimal("0"));
    assert_eq!(
        summary["forms_submitted"],
        serde_json::json!(["1099-NEC", "1099-INT"])
    );
}

#[tokio::test]
async fn test_all_three_forms_combine() {
    let router = create_router_for_test();
    let files = vec![
        w2_document("50000", "5000"),
        nec_document("20000"),
        int_document("500"),
    ];

    let (status, json) = post_submission(router, &files, &identity_fields("Single")).await;

    assert_eq!(status, StatusCode::OK);
    let summary = &json["tax_return_summary"];
    assert_eq!(amount(summary, "total_income"), decimal("70500.00"));
    // taxable 55900: 1160 + 4266 + 8750 * 0.22 = 7351.00
    assert_eq!(amount(summary, "estimated_tax_due"), decimal("7351.00"));
    assert_eq!(
        summary["forms_submitted"],
        serde_json::json!(["W-2", "1099-NEC", "1099-INT"])
    );
}

#[tokio::test]
async fn test_extracted_values_with_separators_normalize() {
    let router = create_router_for_test();
    let files = vec![w2_document("$50,000.00", " 5,000 ")];

    let (status, json) = post_submission(router, &files, &identity_fields("Single")).await;

    assert_eq!(status, StatusCode::OK);
    let summary = &json["tax_return_summary"];
    assert_eq!(amount(summary, "estimated_refund"), decimal("984.00"));
}

#[tokio::test]
async fn test_taxable_income_at_top_bracket_boundary() {
    let router = create_router_for_test();
    // wages = 609350 + 14600 puts taxable income exactly on the top boundary
    let files = vec![w2_document("623950", "0")];

    let (status, json) = post_submission(router, &files, &identity_fields("Single")).await;

    assert_eq!(status, StatusCode::OK);
    let summary = &json["tax_return_summary"];
    assert_eq!(amount(summary, "taxable_income"), decimal("609350.00"));
    assert_eq!(amount(summary, "estimated_tax_due"), decimal("183647.25"));
}

// =============================================================================
// Validation Before Extraction
// =============================================================================

#[tokio::test]
async fn test_four_documents_rejected_without_extraction_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let router = create_router(create_test_state(Arc::clone(&calls)));
    let files = vec![
        w2_document("1", "0"),
        nec_document("2"),
        int_document("3"),
        int_document("4"),
    ];

    let (status, json) = post_submission(router, &files, &identity_fields("Single")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_zero_documents_rejected() {
    let router = create_router_for_test();

    let (status, json) = post_submission(router, &[], &identity_fields("Single")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["message"].as_str().unwrap().contains("got 0"));
}

#[tokio::test]
async fn test_bad_ssn_rejected_without_extraction_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let router = create_router(create_test_state(Arc::clone(&calls)));
    let files = vec![w2_document("50000", "5000")];

    let mut fields = identity_fields("Single");
    fields[2] = ("ssn", "12345".to_string());
    let (status, json) = post_submission(router, &files, &fields).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["message"].as_str().unwrap().contains("ssn"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_identity_field_rejected() {
    let router = create_router_for_test();
    let files = vec![w2_document("50000", "5000")];

    let fields: Vec<(&str, String)> = identity_fields("Single")
        .into_iter()
        .filter(|(name, _)| *name != "last_name")
        .collect();
    let (status, json) = post_submission(router, &files, &fields).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["message"].as_str().unwrap().contains("last_name"));
}

#[tokio::test]
async fn test_unknown_state_rejected() {
    let router = create_router_for_test();
    let files = vec![w2_document("50000", "5000")];

    let mut fields = identity_fields("Single");
    fields[5] = ("state", "XX".to_string());
    let (status, json) = post_submission(router, &files, &fields).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Filing Status Handling
// =============================================================================

#[tokio::test]
async fn test_unsupported_filing_status_is_distinct_error() {
    let router = create_router_for_test();
    let files = vec![w2_document("50000", "5000")];

    let (status, json) =
        post_submission(router, &files, &identity_fields("Married Filing Jointly")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "UNSUPPORTED_FILING_STATUS");
    assert!(
        json["message"]
            .as_str()
            .unwrap()
            .contains("Married Filing Jointly")
    );
}

#[tokio::test]
async fn test_unknown_filing_status_wording_is_validation_error() {
    let router = create_router_for_test();
    let files = vec![w2_document("50000", "5000")];

    let (status, json) = post_submission(router, &files, &identity_fields("Married")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Extracted Data Problems
// =============================================================================

#[tokio::test]
async fn test_duplicate_w2_rejected() {
    let router = create_router_for_test();
    let files = vec![w2_document("50000", "5000"), w2_document("60000", "6000")];

    let (status, json) = post_submission(router, &files, &identity_fields("Single")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_FORM_DATA");
    assert!(json["details"].as_str().unwrap().contains("duplicate W-2"));
}

#[tokio::test]
async fn test_unparseable_extracted_amount_reports_field() {
    let router = create_router_for_test();
    let files = vec![w2_document("fifty grand", "5000")];

    let (status, json) = post_submission(router, &files, &identity_fields("Single")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_FORM_DATA");
    assert!(json["details"].as_str().unwrap().contains("wages"));
}

#[tokio::test]
async fn test_extraction_outage_is_opaque_502() {
    let router = failing_extraction_router();
    let files = vec![w2_document("50000", "5000")];

    let (status, json) = post_submission(router, &files, &identity_fields("Single")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "EXTRACTION_FAILED");
    assert_eq!(json["message"], "Document processing failed");
    // Upstream detail must not leak to the caller
    assert!(json["details"].is_null());
}

// =============================================================================
// Document Retrieval
// =============================================================================

#[tokio::test]
async fn test_rendered_document_retrieved_exactly_once() {
    let state = create_test_state(Arc::new(AtomicUsize::new(0)));
    let files = vec![w2_document("50000", "5000")];

    let (status, json) = post_submission(
        create_router(state.clone()),
        &files,
        &identity_fields("Single"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let document_id = json["document_id"].as_str().unwrap().to_string();

    let (status, bytes) = get_document(create_router(state.clone()), &document_id).await;
    assert_eq!(status, StatusCode::OK);
    let rendered = String::from_utf8(bytes).unwrap();
    assert!(rendered.contains("tax=4016.00"));
    assert!(rendered.contains("checkbox=filing_status_single_checkbox"));

    // The handle is spent; a second retrieval is a 404
    let (status, bytes) = get_document(create_router(state), &document_id).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["code"], "DOCUMENT_NOT_FOUND");
}

#[tokio::test]
async fn test_unknown_document_id_is_404() {
    let router = create_router_for_test();

    let (status, bytes) =
        get_document(router, "00000000-0000-4000-8000-000000000000").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["code"], "DOCUMENT_NOT_FOUND");
}
