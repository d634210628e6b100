// copyme state managers
// Managers own mutable state: the clip history and its copy confirmation.

pub mod history_store;
pub mod notification;
