pub mod extraction;
pub mod ranking;
