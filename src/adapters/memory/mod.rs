//! In-memory adapters.
//!
//! Storage ports backed by process memory. Used by the binary when no external
//! store is configured, and by tests.

mod conversations;
mod entity_discovery;
mod inference;
mod knowledge_base;
mod saved_queries;

pub use conversations::InMemoryConversationsDataClient;
pub use entity_discovery::InMemoryEntityDiscovery;
pub use inference::InMemoryInferenceEndpoints;
pub use knowledge_base::StaticKnowledgeBase;
pub use saved_queries::InMemorySavedQueryRepository;
