pub mod context;
pub mod data_source;
pub mod retriever;

pub use context::{ build_context, ContextFields };
pub use data_source::DataSource;
pub use retriever::Retriever;
