pub mod items;
pub mod quiz;

// Re-export domain services for easier access
pub use items::ItemRepository;
pub use quiz::QuizService;
