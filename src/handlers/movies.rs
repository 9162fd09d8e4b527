// src/handlers/movies.rs
// DOCUMENTATION: HTTP handlers for movie operations
// PURPOSE: Parse requests, call the store, return responses

use crate::db::MovieStore;
use crate::errors::MoviesError;
use crate::models::MovieInput;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest, HttpResponse};
use std::future::{ready, Ready};

/// Positive integer id taken from the `/movies/{id}` path
/// DOCUMENTATION: Extracted before the body so a bad id always wins over a bad payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovieId(pub i64);

impl MovieId {
    pub fn parse(raw: &str) -> Result<Self, MoviesError> {
        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(MovieId(id)),
            _ => Err(MoviesError::InvalidId),
        }
    }
}

impl FromRequest for MovieId {
    type Error = MoviesError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(MovieId::parse(req.match_info().get("id").unwrap_or_default()))
    }
}

/// GET /movies
/// List every movie ordered by id
pub async fn list_movies<S: MovieStore>(
    store: web::Data<S>,
) -> Result<HttpResponse, MoviesError> {
    let movies = store.list().await?;
    Ok(HttpResponse::Ok().json(movies))
}

/// POST /movies
/// Create a movie from `{"title": "..."}`
pub async fn create_movie<S: MovieStore>(
    store: web::Data<S>,
    req: web::Json<MovieInput>,
) -> Result<HttpResponse, MoviesError> {
    let title = req.into_inner().into_title()?;
    let movie = store.create(&title).await?;
    Ok(HttpResponse::Created().json(movie))
}

/// GET /movies/{id}
pub async fn get_movie<S: MovieStore>(
    id: MovieId,
    store: web::Data<S>,
) -> Result<HttpResponse, MoviesError> {
    let movie = store.get(id.0).await?;
    Ok(HttpResponse::Ok().json(movie))
}

/// PUT /movies/{id}
/// Replace the title of an existing movie; never creates one
pub async fn update_movie<S: MovieStore>(
    id: MovieId,
    store: web::Data<S>,
    req: web::Json<MovieInput>,
) -> Result<HttpResponse, MoviesError> {
    let title = req.into_inner().into_title()?;
    let movie = store.update(id.0, &title).await?;
    Ok(HttpResponse::Ok().json(movie))
}

/// DELETE /movies/{id}
pub async fn delete_movie<S: MovieStore>(
    id: MovieId,
    store: web::Data<S>,
) -> Result<HttpResponse, MoviesError> {
    store.delete(id.0).await?;
    Ok(HttpResponse::NoContent().finish())
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().finish()
}

/// Unsupported method on `/movies/{id}`; the id is still checked first
async fn item_method_not_allowed(_id: MovieId) -> HttpResponse {
    HttpResponse::MethodNotAllowed().finish()
}

/// Body parsing failures of any kind answer `{"error": "invalid json"}`
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| {
            log::debug!("Rejected movie payload: {}", err);
            MoviesError::InvalidJson.into()
        })
}

/// Configuration for movie routes
pub fn config<S: MovieStore>(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::resource("/movies")
                .route(web::get().to(list_movies::<S>))
                .route(web::post().to(create_movie::<S>))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/movies/{id:.*}")
                .route(web::get().to(get_movie::<S>))
                .route(web::put().to(update_movie::<S>))
                .route(web::delete().to(delete_movie::<S>))
                .default_service(web::to(item_method_not_allowed)),
        );
}
