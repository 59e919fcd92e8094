use lambda_http::{tracing, Body, Error, Request, Response};
use serde::Serialize;

use crate::error::FeedbackError;
use crate::feedback::{FeedbackRecord, FeedbackRequest};
use crate::store::FeedbackStore;

const ALLOW_HEADERS: &str =
    "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token,X-Amz-User-Agent";
const ALLOW_METHODS: &str = "OPTIONS,GET,PUT,POST,DELETE";

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
}

async fn enter_feedback<S: FeedbackStore + ?Sized>(
    store: &S,
    body: &[u8],
) -> Result<u16, FeedbackError> {
    let req = FeedbackRequest::from_body(body)?;
    tracing::info!(body = ?req, "Received body");

    let record = FeedbackRecord::new(req);
    let status = store.put_feedback(&record).await?;
    tracing::info!(
        id = %record.id,
        posted_time = %record.posted_time,
        status,
        "Stored feedback"
    );
    Ok(status)
}

fn error_response(err: &FeedbackError) -> Result<Response<Body>, Error> {
    let body = serde_json::to_string(&ErrorResponse {
        message: err.client_message(),
    })?;
    Ok(Response::builder()
        .status(err.status_code())
        .header("Access-Control-Allow-Origin", "*")
        .header("content-type", "application/json")
        .body(Body::Text(body))?)
}

/// Logs the raw event at info level, so submitter names and feedback text reach the logs.
pub(crate) async fn function_handler<S: FeedbackStore + ?Sized>(
    store: &S,
    event: Request,
) -> Result<Response<Body>, Error> {
    tracing::info!(?event, "Received event");
    let method = event.method().as_str();

    if method == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Headers", ALLOW_HEADERS)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Credentials", "false")
            .header("Access-Control-Allow-Methods", ALLOW_METHODS)
            .body(Body::Empty)?);
    }

    match enter_feedback(store, event.body().as_ref()).await {
        Ok(status) => Ok(Response::builder()
            .status(201)
            .header("Access-Control-Allow-Origin", "*")
            .body(Body::Text(serde_json::to_string(&status)?))?),
        Err(e) => {
            match &e {
                FeedbackError::MalformedInput(_) => tracing::warn!(error = %e, "Rejected request"),
                FeedbackError::StorageWriteFailure(_) => {
                    tracing::error!(error = %e, "Failed to store feedback")
                }
            }
            error_response(&e)
        }
    }
}
