pub mod answer;
pub mod exam;
pub mod group;
pub mod loaders;
pub mod question;

pub use answer::{AnswerExpectation, AnswerMap, AnswerValue};
pub use exam::{Exam, Section};
pub use group::{
    AnswerSlot, ChoiceGroup, DiagramGroup, GapFillGroup, GroupType, MatchingGroup, QuestionGroup,
    TableGroup, TruthGroup, UnsupportedGroup, TRUE_FALSE_NOT_GIVEN, YES_NO_NOT_GIVEN,
};
pub use loaders::{load_all_exam_files, load_answers_file, load_exam_file, LoadError};
pub use question::{LabeledItem, OptionItem, Question};
