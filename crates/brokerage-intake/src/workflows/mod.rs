pub mod batch;
pub mod intake;
pub mod registry;
