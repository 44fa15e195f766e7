/// Human-readable progress sink threaded through every crawl stage.
///
/// Frontends (GUI/CLI) implement this to surface status lines to users.
/// Stages also emit structured `tracing` events for the same milestones.
///
/// Sinks are `Send` so a whole crawl can run on a spawned task.
pub trait CrawlLog: Send {
    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}
}

/// A no-op log sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLog;
impl CrawlLog for NullLog {}

/// Forwards every line to `tracing` at INFO level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl CrawlLog for TracingLog {
    fn log(&mut self, msg: &str) {
        tracing::info!(target: "dupr_rs::crawl", "{msg}");
    }
}

impl<F> CrawlLog for F
where
    F: FnMut(&str) + Send,
{
    fn log(&mut self, msg: &str) {
        self(msg);
    }
}
