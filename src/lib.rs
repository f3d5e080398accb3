pub mod calculations;
pub mod critical_path;
pub mod engine;
pub mod graph;
pub mod task;
pub mod task_validation;

pub use critical_path::{CriticalPathResult, ScheduleWarning};
pub use engine::{ScheduleEngine, ScheduleError, ScheduleOptions};
pub use graph::ScheduleDag;
pub use task::{DependencyEdge, DependencyType, Task, approximate_working_days};
pub use task_validation::{ValidationError, validate_tasks};
