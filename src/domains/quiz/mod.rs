pub mod service;

pub use service::QuizService;
