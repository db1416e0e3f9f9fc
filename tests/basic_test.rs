use std::fs;
use std::path::{Path, PathBuf};

use multisink_logging::{log_info, log_warning, LogConfig, Logger, LoggerError, Severity, SinkConfig};

fn file_sink(dir: &Path, name: &str, threshold: Severity, rotate: bool) -> SinkConfig {
    SinkConfig::file(threshold, dir.join(name).to_string_lossy(), rotate, "")
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn entries(dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    paths.sort();
    paths
}

#[test]
fn test_threshold_table() {
    let dir = tempfile::tempdir().unwrap();
    let config = Severity::ALL.iter().fold(LogConfig::default(), |config, threshold| {
        config.with(file_sink(dir.path(), &format!("{}.log", threshold.code()), *threshold, false))
    });

    let logger = Logger::from_config(&config).unwrap();
    for severity in Severity::ALL {
        logger.emit(severity, &format!("msg-{}", severity.code()));
    }

    for threshold in Severity::ALL {
        let lines = read_lines(&dir.path().join(format!("{}.log", threshold.code())));
        for severity in Severity::ALL {
            let wanted = format!("{} msg-{}", severity.label(), severity.code());
            let written = lines.iter().any(|l| l.ends_with(&wanted));
            assert_eq!(
                written,
                severity <= threshold,
                "severity {:?} at threshold {:?}", severity, threshold
            );
        }
        let expected = Severity::ALL.iter().filter(|s| **s <= threshold).count();
        assert_eq!(lines.len(), expected);
    }
}

#[test]
fn test_empty_config_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();

    assert!(matches!(
        Logger::from_config(&LogConfig::default()),
        Err(LoggerError::NoSinksConfigured)
    ));

    let config = LogConfig::from_json("{}").unwrap();
    let err = Logger::from_config(&config).unwrap_err();
    assert_eq!(err.to_string(), "no sinks configured");

    assert!(entries(dir.path()).is_empty());
}

#[test]
fn test_unknown_kind_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = LogConfig::from_json(&format!(
        r#"{{ "loggers": [
            {{ "logType": "file", "severity": 60, "path": "{}" }},
            {{ "logType": "socket", "severity": 60, "path": "{}" }}
        ] }}"#,
        dir.path().join("logs/a.log").display(),
        dir.path().join("logs/b.log").display(),
    )).unwrap();

    let err = Logger::from_config(&config).unwrap_err();
    match &err {
        LoggerError::InvalidSinkKind { index, kind } => {
            assert_eq!(*index, 1);
            assert_eq!(kind, "socket");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(err.to_string().contains("socket"));
    assert!(entries(dir.path()).is_empty());
}

#[test]
fn test_rotate_keeps_one_backup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    fs::write(&path, "old contents\n").unwrap();

    let config = LogConfig::default().with(file_sink(dir.path(), "app.log", Severity::Verbose, true));
    let _logger = Logger::from_config(&config).unwrap();

    let backups: Vec<PathBuf> = entries(dir.path())
        .into_iter()
        .filter(|p| p != &path)
        .collect();
    assert_eq!(backups.len(), 1, "{backups:?}");

    let name = backups[0].file_name().unwrap().to_string_lossy().into_owned();
    let suffix = name.strip_prefix("app.log.").unwrap();
    assert_eq!(suffix.len(), 14);
    assert!(suffix.chars().all(|c| c.is_ascii_digit()));

    assert_eq!(fs::read_to_string(&backups[0]).unwrap(), "old contents\n");
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn test_no_rotate_truncates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    fs::write(&path, "old contents\n").unwrap();

    let config = LogConfig::default().with(file_sink(dir.path(), "app.log", Severity::Verbose, false));
    let _logger = Logger::from_config(&config).unwrap();

    assert_eq!(entries(dir.path()), vec![path.clone()]);
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn test_missing_directories_are_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a/b/c/app.log");

    let config = LogConfig::default()
        .with(SinkConfig::file(Severity::Verbose, path.to_string_lossy(), true, ""));
    let logger = Logger::from_config(&config).unwrap();
    logger.info("hello");

    assert_eq!(read_lines(&path).len(), 1);
}

#[test]
fn test_directory_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("blocker"), "").unwrap();

    let config = LogConfig::default()
        .with(file_sink(dir.path(), "blocker/sub/app.log", Severity::Verbose, false));

    let err = Logger::from_config(&config).unwrap_err();
    assert!(matches!(err, LoggerError::CreateLogDir { .. }), "{err:?}");
    assert!(err.to_string().starts_with("cannot create log directory"));
}

#[test]
fn test_file_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("taken")).unwrap();

    let config = LogConfig::default()
        .with(file_sink(dir.path(), "taken", Severity::Verbose, false));

    let err = Logger::from_config(&config).unwrap_err();
    assert!(matches!(err, LoggerError::CreateLogFile { .. }), "{err:?}");
}

#[test]
fn test_earlier_files_survive_later_failure() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("taken")).unwrap();

    let config = LogConfig::default()
        .with(file_sink(dir.path(), "first.log", Severity::Verbose, false))
        .with(file_sink(dir.path(), "taken", Severity::Verbose, false));

    assert!(Logger::from_config(&config).is_err());
    assert!(dir.path().join("first.log").is_file());
}

#[test]
fn test_line_layout() {
    let dir = tempfile::tempdir().unwrap();
    let config = LogConfig::default().with(SinkConfig::file(
        Severity::Verbose,
        dir.path().join("app.log").to_string_lossy(),
        false,
        "app:",
    ));

    let logger = Logger::from_config(&config).unwrap();
    logger.fatal("boom");

    let lines = read_lines(&dir.path().join("app.log"));
    assert_eq!(lines.len(), 1);
    let line = &lines[0];

    let rest = line.strip_prefix("app:").unwrap();
    // YYYY/MM/DD hh:mm:ss.uuuuuu
    let (stamp, tail) = rest.split_at(26);
    let digits: String = stamp.chars().filter(char::is_ascii_digit).collect();
    assert_eq!(digits.len(), 20, "{stamp:?}");
    assert_eq!(&stamp[4..5], "/");
    assert_eq!(&stamp[19..20], ".");
    assert_eq!(tail, " FATAL   boom");
}

#[test]
fn test_formatted_emit() {
    let dir = tempfile::tempdir().unwrap();
    let config = LogConfig::default()
        .with(file_sink(dir.path(), "app.log", Severity::Information, false));

    let logger = Logger::from_config(&config).unwrap();
    logger.infof(format_args!("count={}", 5));
    log_info!(logger, "{} of {}", 1, 2);
    logger.debugf(format_args!("hidden={}", 7));

    let lines = read_lines(&dir.path().join("app.log"));
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("INFO    count=5"));
    assert!(lines[1].ends_with("1 of 2"));
}

#[test]
fn test_format_arguments_do_not_touch_label() {
    let dir = tempfile::tempdir().unwrap();
    let config = LogConfig::default()
        .with(file_sink(dir.path(), "app.log", Severity::Verbose, false));

    let logger = Logger::from_config(&config).unwrap();
    log_warning!(logger, "{}", "%s {} WARNING");

    let lines = read_lines(&dir.path().join("app.log"));
    assert!(lines[0].ends_with(" WARNING %s {} WARNING"));
}

#[test]
fn test_each_sink_filters_on_its_own() {
    let dir = tempfile::tempdir().unwrap();
    let config = LogConfig::default()
        .with(file_sink(dir.path(), "errors.log", Severity::Error, false))
        .with(file_sink(dir.path(), "all.log", Severity::Verbose, false));

    let logger = Logger::from_config(&config).unwrap();
    logger.warning("careful");

    assert!(read_lines(&dir.path().join("errors.log")).is_empty());
    let all = read_lines(&dir.path().join("all.log"));
    assert_eq!(all.len(), 1);
    assert!(all[0].ends_with("WARNING careful"));
}

#[test]
fn test_concurrent_lines_do_not_interleave() {
    let dir = tempfile::tempdir().unwrap();
    let config = LogConfig::default()
        .with(file_sink(dir.path(), "app.log", Severity::Verbose, false));
    let logger = Logger::from_config(&config).unwrap();

    std::thread::scope(|scope| {
        for t in 0..8 {
            let logger = &logger;
            scope.spawn(move || {
                for i in 0..200 {
                    logger.debugf(format_args!("thread={} line={} {}", t, i, "x".repeat(64)));
                }
            });
        }
    });

    let lines = read_lines(&dir.path().join("app.log"));
    assert_eq!(lines.len(), 8 * 200);
    for line in &lines {
        assert!(line.contains(" DEBUG   thread="), "{line:?}");
        assert!(line.ends_with(&"x".repeat(64)), "{line:?}");
    }
}

#[test]
fn test_case_insensitive_kinds_from_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    let config = LogConfig::from_json(&format!(
        r#"{{ "loggers": [
            {{ "logType": "File", "severity": 20, "path": "{}", "prefix": "[svc] " }},
            {{ "logType": "SCREEN", "severity": 10 }}
        ] }}"#,
        path.display()
    )).unwrap();

    let logger = Logger::from_config(&config).unwrap();
    assert_eq!(logger.sinks().len(), 2);
    logger.error_from(&std::fmt::Error);

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("[svc] "));
    assert!(lines[0].contains(" ERROR   "));
}

#[test]
fn test_threshold_between_levels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("between.log");
    let config = LogConfig::from_json(&format!(
        r#"{{ "loggers": [
            {{ "logType": "file", "severity": 45, "path": "{}" }},
            {{ "logType": "screen", "severity": 0 }},
            {{ "logType": "screen", "severity": 100 }}
        ] }}"#,
        path.display()
    )).unwrap();

    let logger = Logger::from_config(&config).unwrap();
    let thresholds: Vec<u16> = logger.sinks().iter().map(|s| s.threshold()).collect();
    assert_eq!(thresholds, vec![45, 0, 100]);

    logger.info("kept");
    logger.debug("dropped");

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("INFO    kept"));
}

#[test]
fn test_screen_sink_emits() {
    let config = LogConfig::default()
        .with(SinkConfig::screen(Severity::Verbose, "app:"))
        .with(SinkConfig::screen(Severity::Warning, "warn-only:"));

    let logger = Logger::from_config(&config).unwrap();
    assert!(logger.enabled(Severity::Verbose));

    logger.fatal("boom");
    logger.infof(format_args!("count={}", 5));
    log_info!(logger, "screen {}", "macro");
    logger.flush();
}
