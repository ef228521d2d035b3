use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Articulo};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_articulos_empty() {
    let resp = app()
        .oneshot(empty_request("GET", "/articulos"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let items: Vec<Articulo> = body_json(resp).await;
    assert!(items.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_from_form_strings_returns_201() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/articulos",
            r#"{"idcategoria":"1","nombre":"Bolt","descripcion":"M8","stock":"5"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Articulo = body_json(resp).await;
    assert_eq!(created.idarticulo, 1);
    assert_eq!(created.idcategoria, Some(1));
    assert_eq!(created.stock, Some(5));
    assert_eq!(created.descripcion.as_deref(), Some("M8"));
}

#[tokio::test]
async fn create_with_blank_fields_stores_absent_values() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/articulos",
            r#"{"idcategoria":"","nombre":"","descripcion":"","stock":""}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Articulo = body_json(resp).await;
    assert!(created.nombre.is_none());
    assert!(created.stock.is_none());
}

#[tokio::test]
async fn create_with_non_numeric_stock_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/articulos", r#"{"stock":"plenty"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_articulo_not_found() {
    let resp = app()
        .oneshot(empty_request("GET", "/articulos/1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_articulo_bad_id_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/articulos/not-a-number"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update / delete ---

#[tokio::test]
async fn update_articulo_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/articulos/9", r#"{"nombre":"Nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_articulo_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/articulos/9"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create two, ids are assigned in order
    for nombre in ["Bolt", "Nut"] {
        let body = format!(r#"{{"nombre":"{nombre}","stock":"3"}}"#);
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request("POST", "/articulos", &body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    // list is ordered by id
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/articulos"))
        .await
        .unwrap();
    let items: Vec<Articulo> = body_json(resp).await;
    let ids: Vec<i64> = items.iter().map(|a| a.idarticulo).collect();
    assert_eq!(ids, vec![1, 2]);

    // update replaces every field
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            "/articulos/2",
            r#"{"nombre":"Wing nut","idcategoria":"4"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Articulo = body_json(resp).await;
    assert_eq!(updated.nombre.as_deref(), Some("Wing nut"));
    assert_eq!(updated.idcategoria, Some(4));
    assert!(updated.stock.is_none());

    // get reflects the update
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/articulos/2"))
        .await
        .unwrap();
    let fetched: Articulo = body_json(resp).await;
    assert_eq!(fetched, updated);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", "/articulos/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // list after delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/articulos"))
        .await
        .unwrap();
    let items: Vec<Articulo> = body_json(resp).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].idarticulo, 2);

    // ids are never reused
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/articulos", r#"{"nombre":"Washer"}"#))
        .await
        .unwrap();
    let created: Articulo = body_json(resp).await;
    assert_eq!(created.idarticulo, 3);
}
