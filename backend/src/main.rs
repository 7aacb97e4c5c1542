use std::net::SocketAddr;

use expense_tracker_core::storage::MemoryStore;
use shared::{Bill, BillStatus, ExpenseType};
use tracing::info;
use tracing_subscriber::EnvFilter;

use expense_tracker_backend::rest::create_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // In-memory store with a couple of demo bills for local development
    let store = MemoryStore::with_bills(demo_bills());

    let app = create_router(store);

    let port = std::env::var("EXPENSE_TRACKER_PORT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn demo_bills() -> Vec<Bill> {
    vec![
        Bill {
            id: "47qAXb6fIm2zOKkLzMro".to_string(),
            email: "employee@test.tld".to_string(),
            expense_type: ExpenseType::HotelAndLodging,
            name: "Séminaire Paris".to_string(),
            amount: 400.0,
            date: "2004-04-04".to_string(),
            vat: Some(80.0),
            pct: 20,
            commentary: "séminaire billed".to_string(),
            file_url: Some(
                "https://localhost:3000/storage/47qAXb6fIm2zOKkLzMro/preview.jpg".to_string(),
            ),
            file_name: Some("preview.jpg".to_string()),
            status: BillStatus::Pending,
            comment_admin: None,
        },
        Bill {
            id: "UIUZtnPQvnbFnB0ozvJh".to_string(),
            email: "employee@test.tld".to_string(),
            expense_type: ExpenseType::Transport,
            name: "Vol Paris Londres".to_string(),
            amount: 348.0,
            date: "2023-01-01".to_string(),
            vat: Some(70.0),
            pct: 20,
            commentary: String::new(),
            file_url: None,
            file_name: None,
            status: BillStatus::Accepted,
            comment_admin: Some("ok".to_string()),
        },
    ]
}
