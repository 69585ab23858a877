use daylog::{ConsoleTarget, LogConfigBuilder, LoggerRegistry, MemoryBuffer, Severity};

// Installing is process-wide, so this file holds a single test.
#[test]
fn test_install_routes_log_facade() {
    let root = tempfile::tempdir().unwrap();
    let console = MemoryBuffer::new();
    let registry = LoggerRegistry::new();

    let logger = LogConfigBuilder::new("web")
        .with_console_level(Severity::Info)
        .with_file_level(Severity::Warning)
        .with_log_directory(root.path())
        .with_console_target(ConsoleTarget::Memory(console.clone()))
        .configure(&registry)
        .unwrap();

    daylog::install(logger.clone()).unwrap();

    log::trace!("dropped");
    log::info!("request handled");
    log::warn!("slow request");

    log::info!(target: "hyper::client", "pool idle");

    // Facade lines carry the record's target, which defaults to the module path.
    let lines = console.lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains(" INFO install "));
    assert!(lines[0].ends_with("- request handled"));
    assert!(lines[1].contains(" WARNING install "));
    assert!(lines[2].contains(" INFO hyper::client "));

    let file = std::fs::read_to_string(logger.file_path().unwrap()).unwrap();
    assert_eq!(file.lines().count(), 1);
    assert!(file.contains("slow request"));

    // Reconfiguring after install is picked up without reinstalling.
    LogConfigBuilder::new("web")
        .with_console_level(Severity::Debug)
        .with_log_directory(root.path())
        .with_console_target(ConsoleTarget::Memory(console.clone()))
        .configure(&registry)
        .unwrap();
    log::debug!("now visible");
    let lines = console.lines();
    assert!(lines
        .iter()
        .any(|line| line.contains("DEBUG install") && line.ends_with("- now visible")));

    // daylog's own "configured logger" diagnostics stay out of the app's sinks.
    assert!(!lines.iter().any(|line| line.contains("configured logger")));
    let file = std::fs::read_to_string(logger.file_path().unwrap()).unwrap();
    assert!(!file.contains("configured logger"));

    let err = daylog::install(logger).unwrap_err();
    assert!(matches!(err, daylog::Error::AlreadyInstalled));
}
