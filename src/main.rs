//! Application entry point and server initialization
//!
//! This module contains the main function that:
//! - Loads environment configuration
//! - Initializes the record store from the JSON data directory
//! - Starts the HTTP server with graceful shutdown support

use std::env;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

// Module declarations
mod error;
mod handler;
mod model;
mod route;
mod storage;
mod store;

use route::create_app;
use storage::Storage;
use store::{AppState, Store};

/// Application entry point
///
/// This asynchronous main function:
/// 1. Loads environment variables from .env file
/// 2. Reads configuration (PORT and DATA_DIR)
/// 3. Loads the three record collections from disk
/// 4. Creates the application state and router
/// 5. Starts the HTTP server with graceful shutdown handling
///
/// A collection file that exists but fails to parse is fatal: the server
/// refuses to start on corrupt data rather than run with partial state.
///
/// # Environment Variables
///
/// - `PORT` - Server port number (default: 3000)
/// - `DATA_DIR` - Directory holding the JSON collection files (default: "data")
#[tokio::main]
async fn main() {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("linkstore=debug,tower_http=debug")
        .init();

    // Read and parse the server port from environment
    let port_str = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let port: u16 = port_str.parse().unwrap_or(3000);

    // Read the data directory from environment
    let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());

    // Open the data directory and load all collections into memory
    let storage = Storage::open(&data_dir).expect("Failed to open data directory");
    let store = Store::initialize(storage).expect("Failed to load record collections");

    // Create application state with the mutex-guarded store
    let state = AppState::new(store);

    // Create the Axum router with all routes configured
    let app = create_app(state).layer(TraceLayer::new_for_http());

    // Bind to all network interfaces on the specified port
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await.unwrap();

    // Print startup information
    println!("🚀 Server running at http://localhost:{}", port);
    println!("📂 Using data directory: {}", data_dir);

    // Start the server with graceful shutdown support
    // The server will continue running until it receives SIGTERM or SIGINT
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

/// Handles graceful shutdown signals
///
/// This function listens for shutdown signals and returns when one is
/// received:
/// - SIGINT (Ctrl+C) - Interrupt signal from terminal
/// - SIGTERM - Termination signal (common in Docker/Kubernetes)
///
/// When a signal is received the function returns, triggering server
/// shutdown. In-flight requests are allowed to complete, so no snapshot
/// write is cut off mid-file.
async fn shutdown_signal() {
    // Handle Ctrl+C (SIGINT)
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    // Handle SIGTERM on Unix systems (Linux, macOS)
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    // On non-Unix systems (Windows), only handle Ctrl+C
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    // Wait for either signal to be received
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    println!("\n🛑 Shutdown signal received, stopping server.");
}
