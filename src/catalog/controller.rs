use axum::{
    body::HttpBody,
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    BoxError, Router,
};
use serde_json::Value;
use crate::books::dto::BookDetailsDto;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest, AddBookCommandResponse};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest, GetBookCommandResponse};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest, ListBooksCommandResponse};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::messages::{BOOK_ADDED, BOOK_DELETED, BOOK_UPDATED};
use crate::catalog::factory;
use crate::core::command::Command;
use crate::core::controller::{ApiResponse, AppState, json_rejection_to_server_error, json_to_server_error, ServerError};

async fn build_service(state: AppState) -> Box<dyn CatalogService> {
    factory::create_catalog_service(&state.config, &state.store).await
}

// generic over the request body, hyper and lambda_http each bring their own body type
pub fn build_router<B>(state: AppState) -> Router<(), B>
    where B: HttpBody + Send + 'static, B::Data: Send, B::Error: Into<BoxError> {
    Router::new()
        .route("/books", get(list_books).post(add_book))
        .route("/books/:book_id",
               get(find_book_by_id).put(update_book).delete(remove_book))
        .with_state(state)
}

pub(crate) async fn add_book(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>) -> Result<(StatusCode, Json<ApiResponse<AddBookCommandResponse>>), ServerError> {
    let Json(json) = payload.map_err(json_rejection_to_server_error)?;
    let req: AddBookCommandRequest = serde_json::from_value(json).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = AddBookCommand::new(svc).execute(req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(Some(BOOK_ADDED), res))))
}

pub(crate) async fn list_books(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>) -> Result<Json<ApiResponse<ListBooksCommandResponse>>, ServerError> {
    let req: ListBooksCommandRequest = pairs.into_iter().collect();
    let svc = build_service(state).await;
    let res = ListBooksCommand::new(svc).execute(req).await?;
    Ok(Json(ApiResponse::success(None, res)))
}

pub(crate) async fn find_book_by_id(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<Json<ApiResponse<GetBookCommandResponse>>, ServerError> {
    let req = GetBookCommandRequest { book_id };
    let svc = build_service(state).await;
    let res = GetBookCommand::new(svc).execute(req).await?;
    Ok(Json(ApiResponse::success(None, res)))
}

pub(crate) async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>) -> Result<Json<ApiResponse<()>>, ServerError> {
    let Json(json) = payload.map_err(json_rejection_to_server_error)?;
    let details: BookDetailsDto = serde_json::from_value(json).map_err(json_to_server_error)?;
    let req = UpdateBookCommandRequest::new(book_id.as_str(), details);
    let svc = build_service(state).await;
    let _ = UpdateBookCommand::new(svc).execute(req).await?;
    Ok(Json(ApiResponse::message(BOOK_UPDATED)))
}

pub(crate) async fn remove_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<Json<ApiResponse<()>>, ServerError> {
    let req = RemoveBookCommandRequest { book_id };
    let svc = build_service(state).await;
    let _ = RemoveBookCommand::new(svc).execute(req).await?;
    Ok(Json(ApiResponse::message(BOOK_DELETED)))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use crate::catalog::controller::build_router;
    use crate::catalog::domain::messages::*;
    use crate::core::controller::AppState;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    fn new_app() -> Router {
        build_router(AppState::new(Configuration::new("test"), RepositoryStore::new()))
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }.expect("should build request");
        send(app, req).await
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.clone().oneshot(req).await.expect("should handle request");
        let status = res.status();
        let bytes = hyper::body::to_bytes(res.into_body()).await.expect("should read body");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    fn payload(name: &str, page_count: u32, read_page: u32, reading: bool) -> Value {
        json!({
            "name": name,
            "year": 2010,
            "author": "John Doe",
            "summary": "Lorem ipsum dolor sit amet",
            "publisher": "Dicoding Indonesia",
            "pageCount": page_count,
            "readPage": read_page,
            "reading": reading
        })
    }

    async fn add(app: &Router, body: Value) -> String {
        let (status, json) = call(app, Method::POST, "/books", Some(body)).await;
        assert_eq!(StatusCode::CREATED, status);
        json["data"]["bookId"].as_str().expect("should return book id").to_string()
    }

    #[tokio::test]
    async fn test_should_add_and_get_book() {
        let app = new_app();
        let (status, json) = call(&app, Method::POST, "/books", Some(payload("Buku A", 100, 25, true))).await;
        assert_eq!(StatusCode::CREATED, status);
        assert_eq!("success", json["status"]);
        assert_eq!(BOOK_ADDED, json["message"]);
        let book_id = json["data"]["bookId"].as_str().expect("should return book id");

        let (status, json) = call(&app, Method::GET, format!("/books/{}", book_id).as_str(), None).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!("success", json["status"]);
        assert!(json.get("message").is_none());
        let book = &json["data"]["book"];
        assert_eq!(book_id, book["id"]);
        assert_eq!("Buku A", book["name"]);
        assert_eq!(2010, book["year"]);
        assert_eq!(100, book["pageCount"]);
        assert_eq!(25, book["readPage"]);
        assert_eq!(false, book["finished"]);
        assert_eq!(true, book["reading"]);
        assert_eq!(book["insertedAt"], book["updatedAt"]);
    }

    #[tokio::test]
    async fn test_should_reject_invalid_books() {
        let app = new_app();
        let mut no_name = payload("x", 10, 5, false);
        no_name.as_object_mut().expect("object payload").remove("name");
        let (status, json) = call(&app, Method::POST, "/books", Some(no_name)).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!(json!({"status": "fail", "message": ADD_NAME_REQUIRED}), json);

        let (status, json) = call(&app, Method::POST, "/books", Some(payload("x", 10, 50, false))).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!(json!({"status": "fail", "message": ADD_READ_PAGE_EXCEEDED}), json);

        let (status, json) = call(&app, Method::POST, "/books", Some(json!({"name": "x", "pageCount": -3}))).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("fail", json["status"]);

        let (_, json) = call(&app, Method::GET, "/books", None).await;
        assert_eq!(json!({"status": "success", "data": {"books": []}}), json);
    }

    #[tokio::test]
    async fn test_should_wrap_unreadable_payloads() {
        let app = new_app();
        let req = Request::builder().method(Method::POST).uri("/books")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{name: 1"))
            .expect("should build request");
        let (status, json) = send(&app, req).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("fail", json["status"]);
        assert!(json["message"].as_str().expect("should carry message").starts_with("Invalid request payload: "));

        let req = Request::builder().method(Method::POST).uri("/books")
            .body(Body::from(payload("Buku A", 10, 1, false).to_string()))
            .expect("should build request");
        let (status, json) = send(&app, req).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("fail", json["status"]);

        let req = Request::builder().method(Method::PUT).uri("/books/unknown")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("[1, 2"))
            .expect("should build request");
        let (status, json) = send(&app, req).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("fail", json["status"]);

        let (_, json) = call(&app, Method::GET, "/books", None).await;
        assert_eq!(json!([]), json["data"]["books"]);
    }

    #[tokio::test]
    async fn test_should_reply_with_fixed_messages() {
        let app = new_app();
        let (_, json) = call(&app, Method::POST, "/books", Some(payload("Buku A", 10, 1, false))).await;
        assert_eq!("Buku berhasil ditambahkan", json["message"]);
        let (_, json) = call(&app, Method::POST, "/books", Some(json!({"pageCount": 1}))).await;
        assert_eq!("Gagal menambahkan buku. Mohon isi nama buku", json["message"]);
        let (_, json) = call(&app, Method::GET, "/books/unknown", None).await;
        assert_eq!("Buku tidak ditemukan", json["message"]);
        let (_, json) = call(&app, Method::DELETE, "/books/unknown", None).await;
        assert_eq!("Buku gagal dihapus. Id tidak ditemukan", json["message"]);
    }

    #[tokio::test]
    async fn test_should_list_with_repeated_query_keys() {
        let app = new_app();
        let sinking = add(&app, payload("Sinking", 10, 10, false)).await;
        let _ = add(&app, payload("Rowing", 10, 3, true)).await;

        let (status, json) = call(&app, Method::GET, "/books?name=sink&name=row&finished=1&finished=0", None).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(json!({"status": "success", "data": {"books": [
            {"id": sinking, "name": "Sinking", "publisher": "Dicoding Indonesia"}
        ]}}), json);

        let (status, json) = call(&app, Method::GET, "/books?page=2&limit=", None).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(2, json["data"]["books"].as_array().expect("books array").len());
    }

    #[tokio::test]
    async fn test_should_list_and_filter_books() {
        let app = new_app();
        let sinking = add(&app, payload("Sinking", 10, 10, false)).await;
        let rowing = add(&app, payload("Rowing", 10, 3, true)).await;

        let (status, json) = call(&app, Method::GET, "/books", None).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(json!([
            {"id": sinking, "name": "Sinking", "publisher": "Dicoding Indonesia"},
            {"id": rowing, "name": "Rowing", "publisher": "Dicoding Indonesia"}
        ]), json["data"]["books"]);

        let (_, json) = call(&app, Method::GET, "/books?name=INK", None).await;
        assert_eq!(json!([{"id": sinking, "name": "Sinking", "publisher": "Dicoding Indonesia"}]), json["data"]["books"]);

        let (_, json) = call(&app, Method::GET, "/books?reading=1", None).await;
        assert_eq!(rowing, json["data"]["books"][0]["id"]);
        assert_eq!(1, json["data"]["books"].as_array().expect("books array").len());

        let (_, json) = call(&app, Method::GET, "/books?reading=0", None).await;
        assert_eq!(sinking, json["data"]["books"][0]["id"]);

        let (_, json) = call(&app, Method::GET, "/books?finished=1", None).await;
        assert_eq!(sinking, json["data"]["books"][0]["id"]);
        assert_eq!(1, json["data"]["books"].as_array().expect("books array").len());

        let (_, json) = call(&app, Method::GET, "/books?reading=1&finished=1", None).await;
        assert_eq!(json!([]), json["data"]["books"]);
    }

    #[tokio::test]
    async fn test_should_update_book() {
        let app = new_app();
        let book_id = add(&app, payload("Buku B", 100, 50, true)).await;
        let uri = format!("/books/{}", book_id);

        let (_, before) = call(&app, Method::GET, uri.as_str(), None).await;

        let (status, json) = call(&app, Method::PUT, uri.as_str(), Some(payload("Buku B revisi", 100, 100, false))).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(json!({"status": "success", "message": BOOK_UPDATED}), json);

        let (_, after) = call(&app, Method::GET, uri.as_str(), None).await;
        let book = &after["data"]["book"];
        assert_eq!("Buku B revisi", book["name"]);
        assert_eq!(true, book["finished"]);
        assert_eq!(before["data"]["book"]["insertedAt"], book["insertedAt"]);

        let (_, json) = call(&app, Method::GET, "/books?finished=1", None).await;
        assert_eq!(book_id, json["data"]["books"][0]["id"]);
    }

    #[tokio::test]
    async fn test_should_fail_update_book() {
        let app = new_app();
        let (status, json) = call(&app, Method::PUT, "/books/unknown", Some(json!({"pageCount": 1}))).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!(json!({"status": "fail", "message": UPDATE_NAME_REQUIRED}), json);

        let (status, json) = call(&app, Method::PUT, "/books/unknown", Some(payload("x", 1, 2, false))).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!(json!({"status": "fail", "message": UPDATE_READ_PAGE_EXCEEDED}), json);

        let (status, json) = call(&app, Method::PUT, "/books/unknown", Some(payload("x", 2, 1, false))).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!(json!({"status": "fail", "message": UPDATE_NOT_FOUND}), json);
    }

    #[tokio::test]
    async fn test_should_remove_book() {
        let app = new_app();
        let book_id = add(&app, payload("Buku C", 10, 1, false)).await;
        let uri = format!("/books/{}", book_id);

        let (status, json) = call(&app, Method::DELETE, uri.as_str(), None).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(json!({"status": "success", "message": BOOK_DELETED}), json);

        let (status, json) = call(&app, Method::GET, uri.as_str(), None).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!(json!({"status": "fail", "message": BOOK_NOT_FOUND}), json);

        let (status, json) = call(&app, Method::DELETE, uri.as_str(), None).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!(json!({"status": "fail", "message": DELETE_NOT_FOUND}), json);
    }
}
