//! Job data model
//!
//! - `JobStub`: title and absolute URL discovered on the listing page
//! - `DetailFields`: optional fields extracted from a detail page
//! - `JobRecord`: the immutable, fully assembled result for one job

mod job;

pub use job::{assemble, DetailFields, JobRecord, JobStub, MAX_DESCRIPTION_LINES};
