/// Logs through a [`Logger`](crate::Logger) at the given severity, recording
/// the call site.
///
/// ```no_run
/// # let logger = daylog::Logger::new("app");
/// daylog::emit!(logger, daylog::Severity::Info, "listening on {}", 8080);
/// ```
#[macro_export]
macro_rules! emit {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_at(
            $level,
            ::std::format_args!($($arg)+),
            ::std::option::Option::Some(::std::file!()),
            ::std::option::Option::Some(::std::line!()),
            ::std::option::Option::Some(::std::module_path!()),
        )
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::emit!($logger, $crate::Severity::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::emit!($logger, $crate::Severity::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::emit!($logger, $crate::Severity::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::emit!($logger, $crate::Severity::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::emit!($logger, $crate::Severity::Critical, $($arg)+)
    };
}
