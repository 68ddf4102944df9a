// recent-history state managers
// Managers own the bounded "recently viewed" lists.

pub mod history_manager;
