//! Repositories over the two durable collections: the parameter catalog
//! (current values) and the update log (append-only audit timeline).

mod parameter;
mod update_log;

pub use parameter::ParameterRepository;
pub use update_log::UpdateLogRepository;
