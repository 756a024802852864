// Application layer: the two-stage pipeline implementation and the HTTP boundary around it.

pub mod handler;
pub mod pipelines;
pub mod server;
