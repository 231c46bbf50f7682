pub mod legacy;
pub mod session;

pub use legacy::{convert_legacy_exam, is_legacy_exam};
pub use session::{load_exam, ExamSession, Submission};
