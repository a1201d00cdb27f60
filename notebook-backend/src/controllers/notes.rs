//! Notes REST API — CRUD, tag filtering, and per-note word statistics.

use actix_web::http::header;
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;

use crate::config::defaults;
use crate::error::NoteError;
use crate::models::{
    CreateNoteRequest, ErrorResponse, NoteSummary, PageRequest, Tag, UpdateNoteRequest,
};
use crate::AppState;

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    page: u32,
    #[serde(default = "default_size")]
    size: u32,
}

#[derive(Debug, Deserialize)]
struct TagPageQuery {
    tags: Option<String>,
    #[serde(default)]
    page: u32,
    #[serde(default = "default_size")]
    size: u32,
}

fn default_size() -> u32 {
    defaults::PAGE_SIZE
}

/// Map a service failure onto the API error body.
fn error_response(err: NoteError) -> HttpResponse {
    match err {
        NoteError::NotFound(_) => {
            HttpResponse::NotFound().json(ErrorResponse::new("Note Not Found", err.to_string(), 404))
        }
        NoteError::Validation { .. } => HttpResponse::BadRequest().json(ErrorResponse::new(
            "Validation Failed",
            err.to_string(),
            400,
        )),
        err => {
            log::error!("Note store failure: {}", err);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Internal Server Error",
                "An unexpected error occurred",
                500,
            ))
        }
    }
}

fn parse_page(page: u32, size: u32) -> Result<PageRequest, HttpResponse> {
    PageRequest::new(page, size).map_err(|e| {
        HttpResponse::BadRequest().json(ErrorResponse::new(
            "Invalid Request Parameters",
            e.to_string(),
            400,
        ))
    })
}

/// Parse a comma-separated tag list; unknown literals are a client error,
/// not a core concern.
fn parse_tags(raw: Option<&str>) -> Result<Vec<Tag>, HttpResponse> {
    let mut tags = Vec::new();
    for part in raw.unwrap_or("").split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match Tag::from_str(part) {
            Some(tag) => tags.push(tag),
            None => {
                return Err(HttpResponse::BadRequest().json(ErrorResponse::new(
                    "Invalid Parameter Type",
                    format!(
                        "unknown tag '{}'; expected BUSINESS, PERSONAL, or IMPORTANT",
                        part
                    ),
                    400,
                )));
            }
        }
    }
    Ok(tags)
}

async fn create_note(
    state: web::Data<AppState>,
    body: web::Json<CreateNoteRequest>,
) -> impl Responder {
    match state.service.create_note(body.into_inner()) {
        Ok(note) => {
            let location = format!("/api/notes/{}", note.id);
            HttpResponse::Created()
                .insert_header((header::LOCATION, location))
                .json(note)
        }
        Err(e) => error_response(e),
    }
}

async fn get_all_notes(state: web::Data<AppState>, query: web::Query<PageQuery>) -> impl Responder {
    let page = match parse_page(query.page, query.size) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match state.service.get_all_notes(&page) {
        Ok(notes) => {
            let summaries: Vec<NoteSummary> = notes.iter().map(NoteSummary::from).collect();
            HttpResponse::Ok().json(summaries)
        }
        Err(e) => error_response(e),
    }
}

async fn get_notes_by_tag(
    state: web::Data<AppState>,
    query: web::Query<TagPageQuery>,
) -> impl Responder {
    let tags = match parse_tags(query.tags.as_deref()) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    let page = match parse_page(query.page, query.size) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match state.service.get_notes_by_tag(&tags, &page) {
        Ok(notes) => {
            let summaries: Vec<NoteSummary> = notes.iter().map(NoteSummary::from).collect();
            HttpResponse::Ok().json(summaries)
        }
        Err(e) => error_response(e),
    }
}

async fn get_note_by_id(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.service.get_note_by_id(&path.into_inner()) {
        Ok(note) => HttpResponse::Ok().json(note),
        Err(e) => error_response(e),
    }
}

async fn get_note_stats(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.service.get_note_stats_by_id(&path.into_inner()) {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => error_response(e),
    }
}

async fn update_note(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateNoteRequest>,
) -> impl Responder {
    match state.service.update_note(&path.into_inner(), body.into_inner()) {
        Ok(note) => HttpResponse::Ok().json(note),
        Err(e) => error_response(e),
    }
}

async fn delete_note(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.service.delete_note(&path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/notes")
            .route("", web::post().to(create_note))
            .route("", web::get().to(get_all_notes))
            .route("/tag", web::get().to(get_notes_by_tag))
            .route("/{id}", web::get().to(get_note_by_id))
            .route("/{id}/stats", web::get().to(get_note_stats))
            .route("/{id}", web::put().to(update_note))
            .route("/{id}", web::delete().to(delete_note)),
    );
}
