//! Web front-end for SOW drafting.
//!
//! [`router`] serves the intake form at `/` and the PDF export at `/export`. Both `POST`
//! routes are guarded by per-client daily [`quota`]s; the client is identified by the
//! `X-Real-IP` header or the TCP peer address.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::net::SocketAddr;
//! use sowkit_server::{AppState, router};
//!
//! let app = router(AppState::new(drafter, home_ip));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//! axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
//! ```

pub mod client;
pub mod quota;
mod routes;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use sowkit_core::{EmbeddingModel, LanguageModel};
use sowkit_sow::{Draft, SowDrafter, SowError, SowRequest};
use sowkit_websearch::SearchProvider;

pub use client::ClientAddr;
pub use quota::{DailyQuota, Quotas};

/// Produces drafts for the form endpoint.
pub trait SowService: Send + Sync + 'static {
    /// Drafts a SOW for `request`.
    fn draft(
        &self,
        request: &SowRequest,
    ) -> impl Future<Output = Result<Draft, SowError>> + Send;
}

impl<M, L, S> SowService for SowDrafter<M, L, S>
where
    M: EmbeddingModel + 'static,
    L: LanguageModel + 'static,
    S: SearchProvider + 'static,
{
    fn draft(
        &self,
        request: &SowRequest,
    ) -> impl Future<Output = Result<Draft, SowError>> + Send {
        Self::draft(self, request)
    }
}

/// Shared state of the web front-end, created once at startup.
#[derive(Debug)]
pub struct AppState<S> {
    service: Arc<S>,
    quotas: Arc<Quotas>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            quotas: Arc::clone(&self.quotas),
        }
    }
}

impl<S: SowService> AppState<S> {
    /// Wraps a drafting service with standard quotas; `home_ip` is never limited.
    pub fn new(service: S, home_ip: Option<String>) -> Self {
        Self::with_quotas(service, Quotas::new(home_ip))
    }

    /// Wraps a drafting service with custom quotas.
    pub fn with_quotas(service: S, quotas: Quotas) -> Self {
        Self {
            service: Arc::new(service),
            quotas: Arc::new(quotas),
        }
    }
}

/// Builds the application router.
pub fn router<S: SowService>(state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(routes::index).post(routes::submit::<S>))
        .route("/export", post(routes::export::<S>))
        .with_state(state)
}
