pub mod record;
pub mod task;
pub mod workshop;

pub use record::{Record, RecordId};
pub use task::{NewTask, Task};
pub use workshop::{NewWorkshop, Workshop};
