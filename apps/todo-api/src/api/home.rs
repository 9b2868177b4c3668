use axum::{Router, response::Html, routing::get};

const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Todo API</title>
</head>
<body>
  <h1>Todo API</h1>
  <p>Task list REST API backed by MongoDB.</p>
  <h2>Endpoints</h2>
  <ul>
    <li><code>GET /api/tasks</code> list tasks (<code>?completed=true|false</code>)</li>
    <li><code>POST /api/tasks</code> create a task</li>
    <li><code>GET /api/tasks/{id}</code> get a task</li>
    <li><code>PUT /api/tasks/{id}</code> update a task</li>
    <li><code>DELETE /api/tasks/{id}</code> delete a task</li>
    <li><code>GET /health</code> liveness</li>
    <li><code>GET /ready</code> readiness</li>
    <li><code>GET /metrics</code> Prometheus metrics</li>
  </ul>
  <p>API docs: <a href="/swagger-ui">Swagger UI</a>, <a href="/redoc">ReDoc</a>,
     <a href="/rapidoc">RapiDoc</a>, <a href="/scalar">Scalar</a></p>
</body>
</html>
"#;

pub fn router() -> Router {
    Router::new().route("/", get(home))
}

async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_home_lists_task_endpoints() {
        let response = router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("/api/tasks"));
    }
}
