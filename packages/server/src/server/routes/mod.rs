pub mod documents;
pub mod health;
pub mod ingest;
pub mod media;

pub use documents::list_documents_handler;
pub use health::health_handler;
pub use ingest::receive_data_handler;
pub use media::analyze_image_handler;
