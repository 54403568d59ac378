pub mod review_store;

pub use review_store::PgReviewStore;
