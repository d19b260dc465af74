pub mod postgres;
pub mod repository;

pub use postgres::create_pool;
pub use postgres::PgGameRepository;
pub use repository::GameRepository;

#[cfg(test)]
pub use repository::MockGameRepository;
