use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::errors::{DocVaultError, Result};
use crate::models::{
    ApiResponse,
    users::{requests::CreateUserRequest, responses::UserResponse},
};

pub async fn create_user(
    service: &UserService,
    user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    validate_required(&user_data)?;

    // 密码按原样保存（未做哈希）
    let storage = service.get_storage(request);
    let user = storage.create_user(user_data).await?;

    info!("Created user {} <{}>", user.id, user.email);

    Ok(HttpResponse::Created().json(ApiResponse::success(
        UserResponse { user },
        "User added successfully!",
    )))
}

// 三个字段均不能为空，不校验 email 格式
fn validate_required(user_data: &CreateUserRequest) -> Result<()> {
    let missing: Vec<&str> = [
        ("name", &user_data.name),
        ("email", &user_data.email),
        ("password", &user_data.password),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DocVaultError::validation(format!(
            "Missing required field(s): {}",
            missing.join(", ")
        )))
    }
}
