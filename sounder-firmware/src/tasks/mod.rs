//! Embassy tasks

mod keyer;

pub use keyer::keyer_task;
