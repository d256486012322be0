// Linkding Sync state managers
// Managers handle stateful, long-lived operations such as the periodic sync trigger.

pub mod schedule_manager;
