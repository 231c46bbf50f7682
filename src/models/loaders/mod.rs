pub mod exam_loader;

pub use exam_loader::{load_all_exam_files, load_answers_file, load_exam_file, LoadError};
