mod service;
pub use service::{DesiredState, Placement, Service};

mod task;
pub use task::{Task, TaskState};
