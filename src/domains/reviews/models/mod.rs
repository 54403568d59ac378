pub mod review;

pub use review::{
    ClassifierVerdict, NewStoredReview, RejectReason, ReviewSubmission, StoredReview,
    SubmissionResult,
};
