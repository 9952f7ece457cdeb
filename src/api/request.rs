//! Multipart request parsing for the submission endpoint.
//!
//! A submission arrives as `multipart/form-data`: between 1 and 3 `files`
//! parts carrying the documents, plus one text part per identity field.

use axum::{extract::multipart::Multipart, http::StatusCode};

use crate::extract::DocumentBuffer;
use crate::models::IdentityInput;

use super::response::{ApiError, ApiErrorResponse};

/// The multipart part name carrying document files.
pub const FILES_PART: &str = "files";

/// A parsed submission: uploaded documents plus unvalidated identity fields.
#[derive(Debug, Default)]
pub struct ParsedSubmission {
    /// The uploaded documents, in submission order.
    pub documents: Vec<DocumentBuffer>,
    /// The identity fields, still to be validated.
    pub identity: IdentityInput,
}

/// Reads the full multipart body into a [`ParsedSubmission`].
///
/// File parts must be named `files`; text parts are matched to identity
/// fields by part name and unknown parts are ignored. Transport-level
/// multipart problems map to a 400 `MALFORMED_MULTIPART` response. Identity
/// validation is not done here; that is [`IdentityInput::validate`]'s job.
pub async fn parse_submission(
    mut multipart: Multipart,
) -> Result<ParsedSubmission, ApiErrorResponse> {
    let mut submission = ParsedSubmission::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                return Err(ApiErrorResponse::new(
                    StatusCode::BAD_REQUEST,
                    ApiError::malformed_multipart(format!(
                        "Failed to read multipart body: {}",
                        err
                    )),
                ));
            }
        };

        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == FILES_PART {
            let filename = field
                .file_name()
                .unwrap_or("document.pdf")
                .to_string();
            let bytes = field.bytes().await.map_err(|err| {
                ApiErrorResponse::new(
                    StatusCode::BAD_REQUEST,
                    ApiError::malformed_multipart(format!(
                        "Failed to read file part '{}': {}",
                        filename, err
                    )),
                )
            })?;
            submission.documents.push(DocumentBuffer {
                filename,
                bytes: bytes.to_vec(),
            });
            continue;
        }

        let value = field.text().await.map_err(|err| {
            ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::malformed_multipart(format!(
                    "Failed to read text part '{}': {}",
                    name, err
                )),
            )
        })?;

        let identity = &mut submission.identity;
        match name.as_str() {
            "first_name_middle_initial" => identity.first_name_middle_initial = value,
            "last_name" => identity.last_name = value,
            "ssn" => identity.ssn = value,
            "address" => identity.address = value,
            "apt_no" => identity.apt_no = Some(value),
            "city" => identity.city = value,
            "state" => identity.state = value,
            "zip_code" => identity.zip_code = value,
            "filing_status" => identity.filing_status = value,
            // Unknown text parts are ignored
            _ => {}
        }
    }

    Ok(submission)
}
