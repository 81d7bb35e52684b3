//! In-process mock of the Stratum delivery API.
//!
//! Serves canned fixtures over the same routes and wire shapes as the
//! real API; integration tests point a delivery client at a random local
//! port. Fixtures are deliberately small but exercise every field kind,
//! a rich text embed, an item link, and modular content reuse.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Router serving the mock delivery API.
///
/// The project segment is accepted but ignored; every project serves the
/// same fixtures.
pub fn app() -> Router {
    Router::new()
        .route("/{project}/items", get(list_items))
        .route("/{project}/items/{codename}", get(get_item))
        .route("/{project}/types", get(list_types))
        .route("/{project}/types/{codename}", get(get_type))
}

/// Serve the mock on the given listener until the task is dropped.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_items(Path(_project): Path<String>) -> Json<Value> {
    Json(json!({
        "items": [caldera_article(), printing_article()],
        "modular_content": modular_content(),
        "pagination": {"skip": 0, "limit": 2, "count": 2, "next_page": ""}
    }))
}

async fn get_item(
    Path((_project, codename)): Path<(String, String)>,
) -> Result<Json<Value>, StatusCode> {
    let item = match codename.as_str() {
        "exploring_the_caldera" => caldera_article(),
        "printing_in_the_field" => printing_article(),
        _ => return Err(StatusCode::NOT_FOUND),
    };
    Ok(Json(json!({
        "item": item,
        "modular_content": modular_content()
    })))
}

async fn list_types(Path(_project): Path<String>) -> Json<Value> {
    Json(json!({
        "types": [article_type(), author_type()],
        "pagination": {"skip": 0, "limit": 2, "count": 2, "next_page": ""}
    }))
}

async fn get_type(
    Path((_project, codename)): Path<(String, String)>,
) -> Result<Json<Value>, StatusCode> {
    match codename.as_str() {
        "article" => Ok(Json(article_type())),
        "author" => Ok(Json(author_type())),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn caldera_article() -> Value {
    json!({
        "system": {
            "id": "a2a7f5b0-6b1a-4aa5-8e3c-cbe752d1f60f",
            "name": "Exploring the Caldera",
            "codename": "exploring_the_caldera",
            "type": "article",
            "language": "en-US",
            "last_modified": "2024-03-12T09:15:00Z"
        },
        "elements": {
            "title": {"type": "text", "name": "Title", "value": "Exploring the Caldera"},
            "rating": {"type": "number", "name": "Rating", "value": 4.5},
            "published_on": {"type": "date_time", "name": "Published on", "value": "2024-03-10T00:00:00Z"},
            "slug": {"type": "url_slug", "name": "Slug", "value": "exploring-the-caldera"},
            "topics": {"type": "multiple_choice", "name": "Topics", "value": [
                {"name": "Geology", "codename": "geology"},
                {"name": "Travel", "codename": "travel"}
            ]},
            "hero": {"type": "asset", "name": "Hero", "value": [
                {"name": "caldera.jpg", "type": "image/jpeg", "size": 320000,
                 "description": "The caldera at dawn", "url": "https://assets.stratum.io/caldera.jpg"}
            ]},
            "body": {"type": "rich_text", "name": "Body", "value":
                "<p>Morning light over the rim.</p>\
                 <object data-type=\"item\" data-codename=\"ana_profile\"></object>\
                 <p>Read <a data-item-id=\"printing_in_the_field\">the field notes</a>.</p>"},
            "related": {"type": "modular_content", "name": "Related", "value": ["printing_in_the_field"]}
        }
    })
}

fn printing_article() -> Value {
    json!({
        "system": {
            "id": "4f6b8c3f-9f58-4d6a-bf0e-47d4f1f0e9a2",
            "name": "Printing in the Field",
            "codename": "printing_in_the_field",
            "type": "article",
            "language": "en-US",
            "last_modified": "2024-02-28T16:40:00Z"
        },
        "elements": {
            "title": {"type": "text", "name": "Title", "value": "Printing in the Field"},
            "rating": {"type": "number", "name": "Rating", "value": 3},
            "published_on": {"type": "date_time", "name": "Published on", "value": "2024-02-25T00:00:00Z"},
            "slug": {"type": "url_slug", "name": "Slug", "value": "printing-in-the-field"},
            "body": {"type": "rich_text", "name": "Body", "value": "<p>Notes from the road.</p>"}
        }
    })
}

fn modular_content() -> Value {
    json!({
        "ana_profile": {
            "system": {
                "id": "0d5bd0d1-8a4f-4a4e-9f2e-2b8f3a7e6c01",
                "name": "Ana Profile",
                "codename": "ana_profile",
                "type": "author",
                "language": "en-US",
                "last_modified": "2024-01-18T12:00:00Z"
            },
            "elements": {
                "full_name": {"type": "text", "name": "Full name", "value": "Ana Ortiz"}
            }
        },
        "printing_in_the_field": printing_article()
    })
}

fn article_type() -> Value {
    json!({
        "system": {
            "id": "11d3a8f0-2c1d-4b0e-a3cf-6cf1d3a6e885",
            "name": "Article",
            "codename": "article",
            "last_modified": "2024-01-05T10:00:00Z"
        },
        "elements": {
            "title": {"type": "text", "name": "Title"},
            "rating": {"type": "number", "name": "Rating"},
            "published_on": {"type": "date_time", "name": "Published on"},
            "slug": {"type": "url_slug", "name": "Slug"},
            "topics": {"type": "multiple_choice", "name": "Topics", "options": [
                {"name": "Geology", "codename": "geology"},
                {"name": "Travel", "codename": "travel"}
            ]},
            "hero": {"type": "asset", "name": "Hero"},
            "body": {"type": "rich_text", "name": "Body"},
            "related": {"type": "modular_content", "name": "Related"}
        }
    })
}

fn author_type() -> Value {
    json!({
        "system": {
            "id": "58c3f9e1-7f2b-44b1-9a57-0f8d2e1b4a77",
            "name": "Author",
            "codename": "author",
            "last_modified": "2024-01-05T10:05:00Z"
        },
        "elements": {
            "full_name": {"type": "text", "name": "Full name"}
        }
    })
}
