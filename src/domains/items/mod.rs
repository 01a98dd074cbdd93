pub mod repository;

pub use repository::ItemRepository;
