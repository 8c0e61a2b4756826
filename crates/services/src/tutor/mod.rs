mod session;

pub use session::{SubmitOutcome, TutorSession};
