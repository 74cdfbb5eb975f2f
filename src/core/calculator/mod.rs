pub mod periods;
pub mod reports;
pub mod window;
