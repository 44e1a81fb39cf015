pub mod models;
pub mod store;
pub mod memory;
pub mod admin;

pub use models::{ExcursionDetails, PersistReport};
pub use store::{passenger_meta_key, OrderMetadataStore, StoreError};
pub use memory::InMemoryMetaRepository;
pub use admin::{AdminLine, AdminOrderView, AdminPassengerBlock, AdminPresenter};
