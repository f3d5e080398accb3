pub mod backward_pass;
pub mod constraint;
pub mod forward_pass;

pub use backward_pass::BackwardPass;
pub use forward_pass::ForwardPass;
