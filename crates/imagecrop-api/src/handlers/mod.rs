pub mod preview;
pub mod process;
pub mod upload;
