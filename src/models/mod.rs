mod dataset;
mod pipeline;

pub use self::dataset::*;
pub use self::pipeline::*;
