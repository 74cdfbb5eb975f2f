pub mod initialize;
pub mod log;
pub mod machines;
pub mod migrate;
pub mod pool;
pub mod queries;
pub mod stats;
pub mod users;
