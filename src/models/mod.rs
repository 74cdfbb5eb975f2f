pub mod downtime;
pub mod machine;
pub mod period;
pub mod role;
pub mod user;
