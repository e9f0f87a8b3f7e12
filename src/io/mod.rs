pub mod paths;

pub use paths::{FunRunPaths, PathUtils};
