pub mod answer_state;
pub mod render;

pub use answer_state::AnswerState;
pub use render::{render_exam, render_group, render_section, SectionSurface, Segment, Surface};
