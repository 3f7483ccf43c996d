pub mod common;
pub mod decode;
pub mod list;
pub mod show;
pub mod tainted;
