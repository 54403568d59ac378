pub mod duplicates;
pub mod rate_limit;
pub mod submit;

pub use duplicates::{check_duplicate, DuplicateCheck};
pub use rate_limit::{check_rate_limit, RateCheck};
pub use submit::submit_review;
