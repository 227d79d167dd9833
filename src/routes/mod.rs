pub mod files;

pub mod root;

pub mod users;

use actix_web::web;

pub use files::configure_file_routes;
pub use root::configure_root_routes;
pub use users::configure_user_routes;

/// 注册全部路由，main 与集成测试共用
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_root_routes) // 存活检查
        .configure(configure_file_routes) // 文件上传
        .configure(configure_user_routes); // 用户创建
}
