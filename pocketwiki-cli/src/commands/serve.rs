//! Wiki server command implementation.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use askama::Template;
use axum::{
    extract::{Form, Path as AxumPath, Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use rand::Rng;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::info;

use pocketwiki_core::{render, search_titles, Config, EntryStore, SearchOutcome, StoreError};
use pocketwiki_render::{
    EntryTemplate, ErrorTemplate, FormTemplate, IndexTemplate, NotFoundTemplate,
};

#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    store: Arc<EntryStore>,
}

/// Start the wiki server.
pub async fn serve(config_path: &Path, port: Option<u16>) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    let store = EntryStore::new(&config.entries_dir);
    store
        .ensure()
        .with_context(|| format!("Failed to create {:?}", store.root()))?;

    let addr = match port {
        Some(port) => {
            let host = config
                .server
                .listen_addr
                .rsplit_once(':')
                .map(|(host, _)| host)
                .unwrap_or("127.0.0.1");
            format!("{host}:{port}")
        }
        None => config.server.listen_addr.clone(),
    };

    let state = AppState {
        config: Arc::new(config),
        store: Arc::new(store),
    };
    let app = router(state);

    info!(%addr, "pocketwiki listening");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/search", get(search).post(search_post))
        .route("/wiki/{title}", get(view_entry))
        .route("/new", get(new_form).post(create_entry))
        .route("/edit/{title}", get(edit_form).post(update_entry))
        .route("/random", get(random_entry))
        .fallback(fallback_404)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Internal failure bubbled out of a handler; maps to a 500 error page.
struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self.0, "request failed");
        let body = ErrorTemplate {
            site_title: String::from("pocketwiki"),
        }
        .render()
        .unwrap_or_else(|_| String::from("internal server error"));
        (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

fn page<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render().map_err(anyhow::Error::from)?))
}

fn site_title(state: &AppState) -> String {
    state.config.site.title.clone()
}

fn not_found_page(state: &AppState, title: &str) -> Result<Response, AppError> {
    let body = page(&NotFoundTemplate {
        site_title: site_title(state),
        title: title.to_string(),
    })?;
    Ok((StatusCode::NOT_FOUND, body).into_response())
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let entries = state.store.list_entries()?;
    page(&IndexTemplate {
        site_title: site_title(&state),
        entries,
        query: None,
    })
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

/// Exact (case-insensitive) title match redirects to the entry;
/// otherwise the index page lists the substring matches.
async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, AppError> {
    search_response(&state, params.q)
}

/// The sidebar form submits via GET, but a posted form body works too.
async fn search_post(
    State(state): State<AppState>,
    Form(params): Form<SearchParams>,
) -> Result<Response, AppError> {
    search_response(&state, params.q)
}

fn search_response(state: &AppState, query: String) -> Result<Response, AppError> {
    let titles = state.store.list_entries()?;
    match search_titles(&titles, &query) {
        SearchOutcome::Exact(title) => Ok(Redirect::to(&format!("/wiki/{title}")).into_response()),
        SearchOutcome::Matches(entries) => Ok(page(&IndexTemplate {
            site_title: site_title(state),
            entries,
            query: Some(query),
        })?
        .into_response()),
    }
}

async fn view_entry(
    AxumPath(title): AxumPath<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    match state.store.get_entry(&title) {
        Ok(Some(content)) => {
            let body = render(&content);
            Ok(page(&EntryTemplate {
                site_title: site_title(&state),
                title,
                body,
            })?
            .into_response())
        }
        Ok(None) | Err(StoreError::InvalidTitle(_)) => not_found_page(&state, &title),
        Err(err) => Err(err.into()),
    }
}

#[derive(Deserialize)]
struct PageForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

async fn new_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    page(&FormTemplate {
        site_title: site_title(&state),
        title: String::new(),
        content: String::new(),
        editing: false,
        error: None,
    })
}

async fn create_entry(
    State(state): State<AppState>,
    Form(form): Form<PageForm>,
) -> Result<Response, AppError> {
    let title = form.title.trim().to_string();

    if title.is_empty() {
        return form_error(&state, form, "A title is required.");
    }
    if state.store.canonical_title(&title)?.is_some() {
        return form_error(&state, form, "Title already in use.");
    }
    match state.store.save_entry(&title, &form.content) {
        Ok(()) => Ok(Redirect::to(&format!("/wiki/{title}")).into_response()),
        Err(StoreError::InvalidTitle(_)) => {
            form_error(&state, form, "That title cannot be used.")
        }
        Err(err) => Err(err.into()),
    }
}

fn form_error(state: &AppState, form: PageForm, message: &str) -> Result<Response, AppError> {
    let body = page(&FormTemplate {
        site_title: site_title(state),
        title: form.title,
        content: form.content,
        editing: false,
        error: Some(message.to_string()),
    })?;
    Ok((StatusCode::UNPROCESSABLE_ENTITY, body).into_response())
}

async fn edit_form(
    AxumPath(title): AxumPath<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    match state.store.get_entry(&title) {
        Ok(Some(content)) => Ok(page(&FormTemplate {
            site_title: site_title(&state),
            title,
            content,
            editing: true,
            error: None,
        })?
        .into_response()),
        Ok(None) | Err(StoreError::InvalidTitle(_)) => not_found_page(&state, &title),
        Err(err) => Err(err.into()),
    }
}

/// The title comes from the path; the form's title field is readonly
/// chrome and is ignored here.
async fn update_entry(
    AxumPath(title): AxumPath<String>,
    State(state): State<AppState>,
    Form(form): Form<PageForm>,
) -> Result<Response, AppError> {
    match state.store.save_entry(&title, &form.content) {
        Ok(()) => Ok(Redirect::to(&format!("/wiki/{title}")).into_response()),
        Err(StoreError::InvalidTitle(_)) => not_found_page(&state, &title),
        Err(err) => Err(err.into()),
    }
}

async fn random_entry(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let entries = state.store.list_entries()?;
    if entries.is_empty() {
        return Ok(Redirect::to("/"));
    }
    let pick = rand::rng().random_range(0..entries.len());
    Ok(Redirect::to(&format!("/wiki/{}", entries[pick])))
}

/// Unknown routes get the not-found page for whatever path was asked.
async fn fallback_404(State(state): State<AppState>, uri: Uri) -> Result<Response, AppError> {
    let path = uri.path().trim_start_matches('/');
    not_found_page(&state, path)
}
