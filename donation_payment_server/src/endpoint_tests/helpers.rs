use actix_web::{http::StatusCode, test, web::ServiceConfig, App};
use serde::Serialize;

pub async fn post_request<B, F>(path: &str, body: &B, configure: F) -> (StatusCode, String)
where
    B: Serialize,
    F: FnOnce(&mut ServiceConfig),
{
    let _ = env_logger::try_init().ok();
    let app = test::init_service(App::new().configure(configure)).await;
    let req = test::TestRequest::post().uri(path).set_json(body).to_request();
    let res = test::call_service(&app, req).await;
    let status = res.status();
    let body = test::read_body(res).await;
    (status, String::from_utf8_lossy(&body).to_string())
}

pub async fn get_request<F>(path: &str, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let _ = env_logger::try_init().ok();
    let app = test::init_service(App::new().configure(configure)).await;
    let req = test::TestRequest::get().uri(path).to_request();
    let res = test::call_service(&app, req).await;
    let status = res.status();
    let body = test::read_body(res).await;
    (status, String::from_utf8_lossy(&body).to_string())
}
