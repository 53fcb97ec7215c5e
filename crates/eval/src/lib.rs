pub mod reference;
pub mod report;
pub mod score;

pub use reference::ReferenceGraph;
pub use report::{evaluate, Category, EvalError, EvalReport, MetricRecord};
pub use score::{score, Scores};
