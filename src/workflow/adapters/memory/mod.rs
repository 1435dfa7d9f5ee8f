//! In-memory adapters for workflow persistence.

mod work_item;

pub use work_item::InMemoryWorkItemRepository;
