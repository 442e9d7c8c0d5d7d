/// Target of the events emitted by [`success!`].
pub const SUCCESS_TARGET: &str = "ouiup::success";

/// Logs a completed step. Rendered with the success marker by the CLI.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: $crate::macros::SUCCESS_TARGET, $($arg)*)
    };
}
