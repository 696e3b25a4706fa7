mod hemisphere;
mod lens;

pub use hemisphere::*;
pub use lens::*;
