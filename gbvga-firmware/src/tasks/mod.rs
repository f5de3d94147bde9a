//! Embassy tasks, all running on core 1

mod matrix;
mod video;

pub use matrix::matrix_task;
pub use video::video_task;
