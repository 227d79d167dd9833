pub mod files;
pub mod users;

pub use files::FileService;
pub use users::UserService;
