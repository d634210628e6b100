// copyme services
// Services are the stateless collaborators of the history store: encoding,
// rehydration, clipboard access, time, settings and storage measurement.

pub mod clipboard;
pub mod clock;
pub mod codec;
pub mod rehydration;
pub mod settings_engine;
pub mod storage_usage;
