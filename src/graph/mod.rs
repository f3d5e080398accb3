pub mod cycle;
pub mod schedule_dag;

pub use schedule_dag::ScheduleDag;
