//! Error display and conversion tests.

use std::path::PathBuf;

use scenesift::SceneSiftError;

#[test]
fn display_messages_carry_context() {
    let error = SceneSiftError::FileOpen {
        path: PathBuf::from("/videos/clip.mp4"),
        reason: "permission denied".to_string(),
    };
    let message = error.to_string();
    assert!(message.contains("/videos/clip.mp4"));
    assert!(message.contains("permission denied"));

    let error = SceneSiftError::DecodeInterrupted {
        frame_index: 4242,
        reason: "truncated packet".to_string(),
    };
    let message = error.to_string();
    assert!(message.contains("4242"));
    assert!(message.contains("truncated packet"));

    assert!(
        SceneSiftError::InvalidStepRatio(-0.5)
            .to_string()
            .contains("-0.5")
    );
    assert!(
        SceneSiftError::InvalidFrameRate(0.0)
            .to_string()
            .contains("0")
    );
    assert!(
        SceneSiftError::NoVideosFound {
            path: PathBuf::from("/empty")
        }
        .to_string()
        .contains("/empty")
    );
}

#[test]
fn io_errors_convert() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let error: SceneSiftError = io.into();
    assert!(matches!(error, SceneSiftError::IoError(_)));
    assert!(error.to_string().contains("gone"));
}

#[test]
fn serde_errors_convert() {
    let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: SceneSiftError = parse.into();
    assert!(matches!(error, SceneSiftError::SerializationError(_)));
}

#[test]
fn errors_are_std_error() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    assert_error(&SceneSiftError::Cancelled);
}

#[test]
fn debug_formatting_works() {
    let debug = format!("{:?}", SceneSiftError::NoVideoStream);
    assert!(debug.contains("NoVideoStream"));
}
