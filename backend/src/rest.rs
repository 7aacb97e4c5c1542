//! # REST API for Bills
//!
//! Endpoints for listing, creating and updating bills. Create accepts a
//! multipart body (`bill` JSON part plus an optional `file` part) because
//! the client uploads the justification together with the draft.

use axum::{
    extract::{Multipart, Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use expense_tracker_core::storage::{BillsCollection, MemoryStore, RemoteStore, StoreError};
use shared::{AttachmentUpload, Bill, BillDraft};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: MemoryStore,
}

/// Build the application router over a store
pub fn create_router(store: MemoryStore) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/bills", get(list_bills).post(create_bill))
        .route("/bills/:id", put(update_bill));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(AppState { store })
}

/// List every stored bill
async fn list_bills(State(state): State<AppState>) -> Response {
    info!("GET /api/bills");

    match state.store.bills().list().await {
        Ok(bills) => (StatusCode::OK, Json(bills)).into_response(),
        Err(e) => {
            error!("Failed to list bills: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing bills").into_response()
        }
    }
}

/// Create a bill from a multipart body
async fn create_bill(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    info!("POST /api/bills");

    let mut draft: Option<BillDraft> = None;
    let mut upload: Option<AttachmentUpload> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                error!("Malformed multipart body: {}", e);
                return (StatusCode::BAD_REQUEST, "Malformed multipart body").into_response();
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "bill" => {
                let text = match field.text().await {
                    Ok(text) => text,
                    Err(e) => {
                        error!("Failed to read bill part: {}", e);
                        return (StatusCode::BAD_REQUEST, "Unreadable bill part").into_response();
                    }
                };
                match serde_json::from_str::<BillDraft>(&text) {
                    Ok(parsed) => draft = Some(parsed),
                    Err(e) => {
                        error!("Failed to parse bill part: {}", e);
                        return (StatusCode::BAD_REQUEST, "Invalid bill payload").into_response();
                    }
                }
            }
            "file" => {
                let file_name = field.file_name().unwrap_or("justificatif").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                match field.bytes().await {
                    Ok(bytes) => {
                        upload = Some(AttachmentUpload {
                            file_name,
                            content_type,
                            data: bytes.to_vec(),
                        });
                    }
                    Err(e) => {
                        error!("Failed to read file part: {}", e);
                        return (StatusCode::BAD_REQUEST, "Unreadable file part").into_response();
                    }
                }
            }
            other => {
                info!("Ignoring unknown multipart field: {}", other);
            }
        }
    }

    let Some(mut draft) = draft else {
        return (StatusCode::BAD_REQUEST, "Missing bill part").into_response();
    };
    draft.attachment = upload;

    match state.store.bills().create(draft).await {
        Ok(bill) => (StatusCode::CREATED, Json(bill)).into_response(),
        Err(e) => {
            error!("Failed to create bill: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error creating bill").into_response()
        }
    }
}

/// Replace an existing bill
async fn update_bill(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(bill): Json<Bill>,
) -> Response {
    info!("PUT /api/bills/{}", id);

    if bill.id != id {
        return (StatusCode::BAD_REQUEST, "Bill id does not match the path").into_response();
    }

    match state.store.bills().update(bill).await {
        Ok(bill) => (StatusCode::OK, Json(bill)).into_response(),
        Err(StoreError::Api(404)) => {
            (StatusCode::NOT_FOUND, "No bill with this id").into_response()
        }
        Err(e) => {
            error!("Failed to update bill: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error updating bill").into_response()
        }
    }
}
