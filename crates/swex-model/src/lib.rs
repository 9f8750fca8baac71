mod domain;
pub use domain::{LABEL_SERVICE_NAME, ServiceId, ServiceName};

mod error;
pub use error::ModelError;

mod kind;
pub use kind::{DesiredState, Placement, Service, Task, TaskState};
