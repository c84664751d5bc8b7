pub mod error;
pub mod image_repo;
pub mod promotion_repo;
pub mod role_repo;
