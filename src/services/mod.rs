pub mod choice;
pub mod diagram;
pub mod gap_fill;
pub mod matching;
pub mod normalizer;
pub mod placeholder;
pub(crate) mod raw;
pub mod table;
pub mod truth;
pub mod verify;

pub use normalizer::{answer_slots, expectations, normalize_group, normalize_type};
pub use placeholder::{extract_placeholder_ids, has_placeholder, split_by_placeholders, Token};
pub use verify::{check_answer, check_answers, AnswerDetail, VerifyReport};
