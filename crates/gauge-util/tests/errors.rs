use gauge_util::errors::GaugeError;

#[test]
fn test_not_found_displays_message_verbatim() {
    let err = GaugeError::not_found("Failed to find project directory");
    assert_eq!(err.to_string(), "Failed to find project directory");
    assert!(err.is_not_found());
}

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = GaugeError::from(io_err);
    assert!(err.to_string().contains("I/O error"), "got: {err}");
    assert!(!err.is_not_found());
}

#[test]
fn test_config_error_display() {
    let err = GaugeError::Config {
        message: "bad key".to_string(),
    };
    assert_eq!(err.to_string(), "Configuration error: bad key");
}

#[test]
fn test_io_error_from_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let gauge_err: GaugeError = io_err.into();
    assert!(matches!(gauge_err, GaugeError::Io(_)));
}

#[test]
fn test_lifts_into_miette_report() {
    fn lookup() -> miette::Result<()> {
        Err::<(), _>(GaugeError::not_found("nope"))?;
        Ok(())
    }
    let report = lookup().unwrap_err();
    assert_eq!(report.to_string(), "nope");
    assert!(report.downcast_ref::<GaugeError>().is_some());
}
