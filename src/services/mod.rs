// recent-history services
// Storage adapter, storage change events, and settings.

pub mod settings_engine;
pub mod storage_adapter;
pub mod storage_events;
