//! Request handlers.

use askama::Template;
use axum::{
    Form,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use chrono::Local;
use serde::Deserialize;
use sowkit_pdf_process::{Block, render_html};
use sowkit_sow::SowRequest;

use crate::{AppState, SowService, client::ClientAddr};

const RATE_LIMITED_PAGE: &str = include_str!("../templates/rate_limited.html");
const DRAFT_FAILED: &str = "Something went wrong while drafting your SOW. Please try again.";

#[derive(Template)]
#[template(path = "index.html")]
struct IndexPage<'a> {
    problem: &'a str,
    participants: &'a str,
    gtm_stack: &'a str,
    timeline: &'a str,
    answer: Option<&'a str>,
    error: Option<&'a str>,
}

impl IndexPage<'_> {
    const fn blank() -> Self {
        Self {
            problem: "",
            participants: "",
            gtm_stack: "",
            timeline: "",
            answer: None,
            error: None,
        }
    }
}

/// Fields of the drafting form.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DraftForm {
    #[serde(default)]
    problem: String,
    #[serde(default)]
    participants: String,
    #[serde(default)]
    gtm_stack: String,
    #[serde(default)]
    timeline: String,
    answer_html: Option<String>,
}

/// Fields of the export form.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExportForm {
    #[serde(default)]
    answer_html: String,
}

fn page(status: StatusCode, page: &IndexPage<'_>) -> Response {
    match page.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render page");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn rate_limited() -> Response {
    (StatusCode::TOO_MANY_REQUESTS, Html(RATE_LIMITED_PAGE)).into_response()
}

pub(crate) async fn index() -> Response {
    page(StatusCode::OK, &IndexPage::blank())
}

pub(crate) async fn submit<S: SowService>(
    State(state): State<AppState<S>>,
    ClientAddr(client): ClientAddr,
    Form(form): Form<DraftForm>,
) -> Response {
    if !state.quotas.draft.check(&client) {
        return rate_limited();
    }

    let mut view = IndexPage {
        problem: &form.problem,
        participants: &form.participants,
        gtm_stack: &form.gtm_stack,
        timeline: &form.timeline,
        answer: None,
        error: None,
    };

    // The export form posts back here; only re-render.
    if form.answer_html.is_some() {
        return page(StatusCode::OK, &view);
    }

    let request = SowRequest {
        problem: form.problem.clone(),
        participants: form.participants.clone(),
        gtm_stack: form.gtm_stack.clone(),
        timeline: form.timeline.clone(),
    };
    match state.service.draft(&request).await {
        Ok(draft) => {
            let html = draft.into_html();
            view.answer = Some(&html);
            page(StatusCode::OK, &view)
        }
        Err(e) => {
            tracing::error!(client = %client, error = %e, "Drafting failed");
            view.error = Some(DRAFT_FAILED);
            page(StatusCode::INTERNAL_SERVER_ERROR, &view)
        }
    }
}

/// Signature lines appended to every exported document.
fn signature_block() -> [Block; 2] {
    [
        Block::Paragraph("Authorized Signature: ____________________".into()),
        Block::Paragraph("Date: ____________________".into()),
    ]
}

pub(crate) async fn export<S: SowService>(
    State(state): State<AppState<S>>,
    ClientAddr(client): ClientAddr,
    Form(form): Form<ExportForm>,
) -> Response {
    if !state.quotas.export.check(&client) {
        return rate_limited();
    }

    match render_html(&form.answer_html, &signature_block()) {
        Ok(pdf) => {
            let filename = format!("SOW_{}.pdf", Local::now().format("%Y%m%d"));
            tracing::info!(client = %client, bytes = pdf.len(), "Exported {filename}");
            (
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment;filename={filename}"),
                    ),
                ],
                pdf,
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "PDF export failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error generating PDF").into_response()
        }
    }
}
