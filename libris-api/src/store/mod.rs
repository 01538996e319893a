//! Persistence layer: explicit repositories over the SQLite pool
//!
//! Each store exposes only the operations the HTTP surface needs. Cascading
//! deletes (book -> reviews/progress/links, category -> books -> ...) are
//! explicit transactions here, not schema-level cascade rules.

pub mod authors;
pub mod books;
pub mod catalog;
pub mod categories;
pub mod progress;
pub mod review_gate;
pub mod reviews;

pub use authors::AuthorStore;
pub use books::BookStore;
pub use catalog::CatalogQuery;
pub use categories::CategoryStore;
pub use progress::ProgressStore;
pub use review_gate::ReviewGate;
pub use reviews::ReviewStore;
