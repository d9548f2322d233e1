pub mod forms;
pub mod outcome;
pub mod workflow;

pub use outcome::{Completion, Page, Reply, Route, Step, View};
pub use workflow::{Backends, Workflow};
