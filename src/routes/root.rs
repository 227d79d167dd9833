use actix_web::{HttpResponse, Responder, http::header, web};

pub const LIVENESS_MESSAGE: &str = "Backend is live! Use /users or /upload endpoints.";

pub async fn liveness() -> impl Responder {
    HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/plain; charset=utf-8"))
        .body(LIVENESS_MESSAGE)
}

// 配置路由
pub fn configure_root_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(liveness));
}
