pub mod engine;

pub use engine::AlertStore;
