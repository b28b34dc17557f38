//! Routes and handlers.
//!
//! Every handler returns HTML: full pages for navigation, fragments for
//! HTMX swaps, and SSE events carrying re-rendered answer snapshots while
//! the backend streams.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Form, Router,
    extract::{DefaultBodyLimit, Path, Query, State},
    http::{StatusCode, header},
    response::sse::{Event, KeepAlive, Sse},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use futures::{Stream, StreamExt};
use serde::Deserialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::AppState;
use crate::backend::types::{AnswerContext, ChatAppResponse, FeedbackReport};
use crate::config::AppConfig;
use crate::events::AnswerEvent;
use crate::session::{Feedback, Rating, Session, SessionStore};
use crate::ui::chat::{
    AnalysisTab, AnswerRenderer, analysis_panel, chat_shell_for_session, clear_chat_button,
    loading_overlay, machine_select, pending_answer, user_message,
};
use crate::ui::page;

/// How often idle sessions are swept.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

/// Start the Axum server with the provided state.
pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let config = Arc::clone(&state.config);

    // Background sweep of idle conversations.
    let sessions = state.sessions.clone();
    let session_timeout = Duration::from_secs(config.session.timeout_secs);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = sessions.cleanup_expired_with_timeout(session_timeout);
            if removed > 0 {
                info!(name: "session.swept", removed, "Idle sessions removed");
            }
        }
    });

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/chat", post(post_chat))
        .route("/chat/stream/{session}/{turn}", get(chat_stream))
        .route("/chat/answers/{turn}/rating", post(post_rating))
        .route("/chat/answers/{turn}/feedback", post(post_feedback))
        .route("/chat/clear", post(post_clear))
        .route("/chat/machine", post(post_machine))
        .route("/analysis/{session}/{turn}", get(get_analysis))
        .route("/content/{id}", get(get_content))
        .nest_service("/static", ServeDir::new("static"))
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn renderer_for<'a>(state: &'a AppState, session_id: &'a str) -> AnswerRenderer<'a> {
    AnswerRenderer {
        session_id,
        resolver: state.resolver.as_ref(),
        sanitizer: state.sanitizer.as_ref(),
        show_followup_questions: state.config.ui.show_followup_questions,
    }
}

/// Machine the backend should answer about: the session's choice, falling
/// back to the first configured machine.
fn machine_for(state: &AppState, session: &Session) -> Option<String> {
    session
        .machine()
        .or_else(|| state.config.ui.machines.first().map(|m| m.id.clone()))
}

/// A failed answer still needs markup in the answer slot.
fn error_fragment(index: usize, message: &str) -> String {
    format!(
        r#"<div class="answer answer-error" id="answer-{index}"><div class="answer-text">{}</div></div>"#,
        crate::ui::escape::text(message),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Page Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET / - fresh conversation.
async fn index_handler(State(state): State<AppState>) -> Html<String> {
    let session = state.sessions.create();
    let renderer = renderer_for(&state, session.id());
    let shell = chat_shell_for_session(&renderer, &state.config.ui, &session);
    Html(page::html_shell(&state.config.ui, &shell))
}

// ─────────────────────────────────────────────────────────────────────────────
// Chat Handlers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChatForm {
    message: String,
    #[serde(default)]
    session_id: Option<String>,
}

/// POST /chat - record a question, return the user bubble plus the answer
/// slot (streaming subscription or the finished answer).
async fn post_chat(
    State(state): State<AppState>,
    Form(form): Form<ChatForm>,
) -> Result<Html<String>, (StatusCode, String)> {
    let message = form.message.trim().to_string();
    if message.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "message must not be empty".to_string()));
    }

    let session = match form.session_id.as_deref() {
        Some(id) if !id.is_empty() => state.sessions.get_or_create(id),
        _ => state.sessions.create(),
    };

    info!(
        name: "chat.question",
        session_id = %session.id(),
        message = %message,
        "Received question"
    );

    let index = session.push_question(&message);
    let mut html = user_message(&message);

    if state.config.backend.streaming {
        html.push_str(&pending_answer(session.id(), index));
    } else {
        let machine = machine_for(&state, &session);
        match state
            .backend
            .chat(&session.backend_messages(), machine.as_deref())
            .await
        {
            Ok(response) => {
                session.complete_answer(index, response.clone());
                let renderer = renderer_for(&state, session.id());
                html.push_str(&renderer.render(index, &response, &Feedback::default(), false));
            }
            Err(e) => {
                error!(name: "chat.backend_failed", error = %format!("{e:#}"), "Backend call failed");
                html.push_str(&error_fragment(
                    index,
                    "The assistant is unavailable right now. Please try again.",
                ));
            }
        }
    }

    // Out-of-band updates: the example list disappears with the first
    // question and the clear-chat control becomes active.
    html.push_str(r#"<div id="example-list" hx-swap-oob="true"></div>"#);
    html.push_str(&clear_chat_button_oob(false));

    Ok(Html(html))
}

/// Clear-chat control re-rendered as an out-of-band swap.
fn clear_chat_button_oob(disabled: bool) -> String {
    clear_chat_button(disabled).replacen(
        r#"id="clear-chat""#,
        r#"id="clear-chat" hx-swap-oob="true""#,
        1,
    )
}

/// GET /chat/stream/:session/:turn - stream re-rendered answer snapshots.
///
/// The citation parser runs on every delta with the streaming flag set, so
/// a half-typed marker never reaches the page; the final event re-renders
/// with the settled text and the full interactive controls.
async fn chat_stream(
    State(state): State<AppState>,
    Path((session_id, turn)): Path<(String, usize)>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = async_stream::stream! {
        let message = |html: String| Ok::<_, Infallible>(Event::default().event("message").data(html));
        let done = || Ok::<_, Infallible>(Event::default().event("done").data(""));

        let Some(session) = state.sessions.get(&session_id) else {
            yield message(error_fragment(turn, "This conversation has expired."));
            yield done();
            return;
        };
        let Some(turn_data) = session.turn(turn) else {
            yield message(error_fragment(turn, "Unknown answer."));
            yield done();
            return;
        };

        let renderer = renderer_for(&state, session.id());

        // Page reload on an already-answered turn: replay the final fragment.
        if let Some(response) = &turn_data.answer {
            yield message(renderer.render(turn, response, &turn_data.feedback, false));
            yield done();
            return;
        }

        let machine = machine_for(&state, &session);
        let events = state
            .backend
            .chat_stream(&session.backend_messages(), machine.as_deref())
            .await;

        let mut events = match events {
            Ok(events) => events,
            Err(e) => {
                error!(name: "chat.stream_failed", error = %format!("{e:#}"), "Backend stream failed");
                yield message(error_fragment(turn, "The assistant is unavailable right now. Please try again."));
                yield done();
                return;
            }
        };

        let mut content = String::new();
        let mut context = AnswerContext::default();
        let mut failed = false;

        while let Some(event) = events.next().await {
            match event {
                Ok(AnswerEvent::Delta { text }) => {
                    content.push_str(&text);
                    yield message(renderer.render_streaming(turn, &content));
                }
                Ok(AnswerEvent::Context(ctx)) => context = ctx,
                Ok(AnswerEvent::Done) => break,
                Ok(AnswerEvent::Error { message: msg }) => {
                    warn!(name: "chat.stream_error", error = %msg, "Backend reported an error");
                    yield message(error_fragment(turn, "The answer failed part-way. Please try again."));
                    failed = true;
                    break;
                }
                Err(e) => {
                    error!(name: "chat.stream_broken", error = %format!("{e:#}"), "Backend stream broke");
                    yield message(error_fragment(turn, "The answer failed part-way. Please try again."));
                    failed = true;
                    break;
                }
            }
        }

        if !failed {
            let response = ChatAppResponse { content, context };
            session.complete_answer(turn, response.clone());
            yield message(renderer.render(turn, &response, &Feedback::default(), false));
        }
        yield done();
    };

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Feedback Handlers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RatingForm {
    session_id: String,
    rating: Rating,
}

/// POST /chat/answers/:turn/rating - toggle a rating, re-render the
/// feedback subtree.
async fn post_rating(
    State(state): State<AppState>,
    Path(turn): Path<usize>,
    Form(form): Form<RatingForm>,
) -> Result<Html<String>, StatusCode> {
    let session = state
        .sessions
        .get(&form.session_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    let updated = session
        .toggle_rating(turn, form.rating)
        .ok_or(StatusCode::NOT_FOUND)?;
    let response = updated.answer.ok_or(StatusCode::NOT_FOUND)?;

    let renderer = renderer_for(&state, session.id());
    Ok(Html(renderer.feedback_fragment(turn, &response, &updated.feedback)))
}

#[derive(Debug, Deserialize)]
struct FeedbackForm {
    session_id: String,
    #[serde(default)]
    comment: String,
}

/// POST /chat/answers/:turn/feedback - submit the feedback comment.
///
/// Without a rating this silently re-renders the unchanged controls. The
/// transition to submitted is optimistic: a backend hand-off failure is
/// logged, not rolled back.
async fn post_feedback(
    State(state): State<AppState>,
    Path(turn): Path<usize>,
    Form(form): Form<FeedbackForm>,
) -> Result<Html<String>, StatusCode> {
    let session = state
        .sessions
        .get(&form.session_id)
        .ok_or(StatusCode::NOT_FOUND)?;

    session.set_comment(turn, &form.comment);
    if let Some((rating, comment)) = session.submit_feedback(turn) {
        let question = session
            .turn(turn)
            .map(|t| t.question)
            .unwrap_or_default();
        let report = FeedbackReport {
            session_id: session.id().to_string(),
            answer_index: turn,
            rating: rating.as_str().to_string(),
            comment,
            question,
        };
        if let Err(e) = state.backend.submit_feedback(&report).await {
            warn!(name: "feedback.forward_failed", error = %format!("{e:#}"), "Feedback hand-off failed");
        }
    }

    let turn_data = session.turn(turn).ok_or(StatusCode::NOT_FOUND)?;
    let response = turn_data.answer.ok_or(StatusCode::NOT_FOUND)?;
    let renderer = renderer_for(&state, session.id());
    Ok(Html(renderer.feedback_fragment(turn, &response, &turn_data.feedback)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Widget Handlers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SessionForm {
    session_id: String,
}

/// POST /chat/clear - drop the conversation, back to the empty shell.
async fn post_clear(
    State(state): State<AppState>,
    Form(form): Form<SessionForm>,
) -> Result<Html<String>, StatusCode> {
    let session = state
        .sessions
        .get(&form.session_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    session.clear();

    let renderer = renderer_for(&state, session.id());
    Ok(Html(chat_shell_for_session(&renderer, &state.config.ui, &session)))
}

#[derive(Debug, Deserialize)]
struct MachineForm {
    session_id: String,
    machine: String,
}

/// POST /chat/machine - remember which machine questions are about.
async fn post_machine(
    State(state): State<AppState>,
    Form(form): Form<MachineForm>,
) -> Result<Html<String>, StatusCode> {
    let known = state.config.ui.machines.iter().any(|m| m.id == form.machine);
    if !known {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let session = state
        .sessions
        .get(&form.session_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    session.set_machine(&form.machine);

    info!(
        name: "machine.selected",
        session_id = %session.id(),
        machine = %form.machine,
        "Machine selected"
    );

    // The overlay rides along in front of the re-rendered selector while
    // the manual context warms up.
    Ok(Html(format!(
        "{}{}",
        loading_overlay("Loading manual"),
        machine_select(&state.config.ui.machines, Some(&form.machine)),
    )))
}

#[derive(Debug, Deserialize)]
struct AnalysisQuery {
    #[serde(default)]
    tab: AnalysisTab,
}

/// GET /analysis/:session/:turn?tab= - analysis panel fragment.
async fn get_analysis(
    State(state): State<AppState>,
    Path((session_id, turn)): Path<(String, usize)>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Html<String>, StatusCode> {
    let session = state.sessions.get(&session_id).ok_or(StatusCode::NOT_FOUND)?;
    let turn_data = session.turn(turn).ok_or(StatusCode::NOT_FOUND)?;
    let response = turn_data.answer.ok_or(StatusCode::NOT_FOUND)?;

    Ok(Html(analysis_panel(
        session.id(),
        turn,
        &response.context,
        query.tab,
    )))
}

/// GET /content/:id - proxy a cited manual file from the backend.
async fn get_content(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.backend.fetch_content(&id).await {
        Ok(file) => {
            let content_type = file.content_type.unwrap_or_else(|| {
                mime_guess::from_path(&id).first_or_octet_stream().to_string()
            });
            ([(header::CONTENT_TYPE, content_type)], file.bytes).into_response()
        }
        Err(e) => {
            warn!(name: "content.fetch_failed", identifier = %id, error = %format!("{e:#}"), "Content fetch failed");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Assemble the application state from configuration.
#[must_use]
pub fn build_state(config: AppConfig) -> AppState {
    let backend = crate::backend::HttpChatBackend::new(&config.backend);
    AppState {
        backend: Arc::new(backend),
        sessions: SessionStore::new(),
        sanitizer: Arc::new(crate::answer::AmmoniaSanitizer::new()),
        resolver: Arc::new(crate::answer::ContentPathResolver::default()),
        config: Arc::new(config),
    }
}
