use super::*;

use crate::error::GENERIC_FAILURE_MESSAGE;

#[derive(Default)]
struct RecordingClipboard {
    written: Vec<String>,
    reject: bool,
}

impl ClipboardSink for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        if self.reject {
            return Err("clipboard access denied".to_string());
        }
        self.written.push(text.to_string());
        Ok(())
    }
}

fn controller_with_url(url: &str) -> RequestController {
    let mut controller = RequestController::new();
    controller.url = url.to_string();
    controller
}

fn example_result() -> ShortenResult {
    ShortenResult::new(
        "https://example.com/very/long/path",
        "http://localhost:5001/ab3F9k",
    )
}

fn succeeded(url: &str) -> RequestController {
    let mut controller = controller_with_url(url);
    let ticket = controller.submit().expect("ticket");
    assert!(controller.complete(ticket.id, Ok(example_result())));
    controller
}

#[test]
fn blank_url_never_issues_a_request() {
    let mut controller = RequestController::new();
    assert!(controller.submit().is_none());

    controller.url = "   ".to_string();
    assert!(!controller.can_submit());
    assert!(controller.submit().is_none());
    assert_eq!(controller.phase(), &Phase::Idle);
    assert_eq!(controller.error_message(), None);
}

#[test]
fn second_submit_while_in_flight_is_ignored() {
    let mut controller = controller_with_url("https://example.com");
    let first = controller.submit().expect("first ticket");

    assert!(controller.submit().is_none());
    assert!(controller.confirm_key(Some(FormField::Url)).is_none());
    assert_eq!(controller.phase(), &Phase::Submitting { request: first.id });
}

#[test]
fn success_shows_both_urls_exactly_as_returned() {
    let controller = succeeded("https://example.com/very/long/path");

    let result = controller.result().expect("result");
    assert_eq!(result.shortened_url, "http://localhost:5001/ab3F9k");
    assert_eq!(result.original_url, "https://example.com/very/long/path");
    assert_eq!(controller.open_target(), Some("http://localhost:5001/ab3F9k"));
    assert_eq!(controller.error_message(), None);
}

#[test]
fn success_replaces_prior_error_and_result() {
    let mut controller = controller_with_url("https://example.com");
    let ticket = controller.submit().expect("ticket");
    controller.complete(
        ticket.id,
        Err(ShortenError::Service {
            status: 400,
            message: Some("Invalid URL format".into()),
        }),
    );
    assert_eq!(controller.error_message(), Some("Invalid URL format"));

    let ticket = controller.submit().expect("retry ticket");
    assert_eq!(controller.error_message(), None);
    assert!(controller.result().is_none());
    controller.complete(ticket.id, Ok(ShortenResult::new("https://example.com", "http://short.ly/1")));

    let ticket = controller.submit().expect("third ticket");
    assert!(controller.result().is_none(), "stale result cleared on submit");
    controller.complete(ticket.id, Ok(ShortenResult::new("https://example.com", "http://short.ly/2")));

    assert_eq!(controller.result().map(|r| r.shortened_url.as_str()), Some("http://short.ly/2"));
    assert_eq!(controller.error_message(), None);
}

#[test]
fn service_error_message_is_surfaced_verbatim() {
    let mut controller = controller_with_url("https://example.com");
    controller.custom_code = "promo".into();
    let ticket = controller.submit().expect("ticket");
    controller.complete(
        ticket.id,
        Err(ShortenError::Service {
            status: 409,
            message: Some("custom_code already taken".into()),
        }),
    );

    assert_eq!(
        controller.phase(),
        &Phase::Error {
            message: "custom_code already taken".into()
        }
    );
}

#[test]
fn failures_without_service_message_use_generic_fallback() {
    for err in [
        ShortenError::Service {
            status: 502,
            message: None,
        },
        ShortenError::MalformedResponse("missing original_url".into()),
        ShortenError::Interrupted("backend worker stopped".into()),
    ] {
        let mut controller = controller_with_url("https://example.com");
        let ticket = controller.submit().expect("ticket");
        controller.complete(ticket.id, Err(err));
        assert_eq!(controller.error_message(), Some(GENERIC_FAILURE_MESSAGE));
    }
}

#[test]
fn response_after_reset_is_discarded() {
    let mut controller = controller_with_url("https://example.com");
    let ticket = controller.submit().expect("ticket");

    controller.reset();
    assert!(!controller.complete(ticket.id, Ok(example_result())));
    assert_eq!(controller.phase(), &Phase::Idle);
    assert!(controller.url.is_empty());
}

#[test]
fn response_from_superseded_request_is_discarded() {
    let mut controller = controller_with_url("https://example.com/a");
    let first = controller.submit().expect("first");
    controller.reset();

    controller.url = "https://example.com/b".into();
    let second = controller.submit().expect("second");
    assert_ne!(first.id, second.id);

    assert!(!controller.complete(
        first.id,
        Err(ShortenError::Service {
            status: 500,
            message: Some("Internal server error".into()),
        })
    ));
    assert_eq!(controller.phase(), &Phase::Submitting { request: second.id });

    assert!(controller.complete(
        second.id,
        Ok(ShortenResult::new("https://example.com/b", "http://short.ly/b"))
    ));
    assert!(!controller.complete(second.id, Ok(example_result())), "completes once");
    assert_eq!(controller.open_target(), Some("http://short.ly/b"));
}

#[test]
fn blank_custom_code_is_left_out_of_the_request() {
    let mut controller = controller_with_url("https://example.com");
    controller.custom_code = "  ".into();
    let ticket = controller.submit().expect("ticket");
    assert_eq!(ticket.request.custom_code, None);

    controller.reset();
    controller.url = "https://example.com".into();
    controller.custom_code = "promo".into();
    let ticket = controller.submit().expect("ticket");
    assert_eq!(ticket.request.url, "https://example.com");
    assert_eq!(ticket.request.custom_code.as_deref(), Some("promo"));
}

#[test]
fn copy_acknowledgment_reverts_after_two_seconds() {
    let mut controller = succeeded("https://example.com/very/long/path");
    let mut clipboard = RecordingClipboard::default();
    let now = Instant::now();

    assert!(controller.copy_result_at(&mut clipboard, now));
    assert_eq!(clipboard.written, vec!["http://localhost:5001/ab3F9k".to_string()]);
    assert!(controller.is_copied_at(now));
    assert_eq!(controller.copy_label(now), "Copied!");
    assert!(controller.is_copied_at(now + Duration::from_millis(1999)));

    let later = now + COPY_FEEDBACK_WINDOW;
    assert!(!controller.is_copied_at(later));
    controller.tick(later);
    assert!(matches!(
        controller.phase(),
        Phase::Success {
            copy: CopyFeedback::None,
            ..
        }
    ));
    assert_eq!(controller.copy_label(later), "Copy");
}

#[test]
fn tick_before_deadline_keeps_acknowledgment() {
    let mut controller = succeeded("https://example.com");
    let now = Instant::now();
    controller.copy_result_at(&mut RecordingClipboard::default(), now);

    controller.tick(now + Duration::from_millis(500));
    assert_eq!(
        controller.copy_feedback_remaining(now + Duration::from_millis(500)),
        Some(Duration::from_millis(1500))
    );
}

#[test]
fn rejected_clipboard_write_keeps_success_phase() {
    let mut controller = succeeded("https://example.com");
    let mut clipboard = RecordingClipboard {
        reject: true,
        ..Default::default()
    };

    assert!(!controller.copy_result_at(&mut clipboard, Instant::now()));
    assert!(controller.result().is_some());
    assert_eq!(controller.error_message(), Some(CLIPBOARD_FAILURE_MESSAGE));
    assert!(!controller.is_copied_at(Instant::now()));
}

#[test]
fn copy_without_result_does_nothing() {
    let mut controller = controller_with_url("https://example.com");
    let mut clipboard = RecordingClipboard::default();
    assert!(!controller.copy_result(&mut clipboard));
    assert!(clipboard.written.is_empty());
}

#[test]
fn new_submit_clears_copy_acknowledgment() {
    let mut controller = succeeded("https://example.com");
    let now = Instant::now();
    controller.copy_result_at(&mut RecordingClipboard::default(), now);

    controller.submit().expect("ticket");
    assert!(!controller.is_copied_at(now));
}

#[test]
fn reset_returns_every_field_to_initial_values() {
    let mut controller = succeeded("https://example.com");
    controller.custom_code = "promo".into();
    let now = Instant::now();
    controller.copy_result_at(&mut RecordingClipboard::default(), now);

    controller.reset();

    assert!(controller.url.is_empty());
    assert!(controller.custom_code.is_empty());
    assert_eq!(controller.phase(), &Phase::Idle);
    assert!(controller.result().is_none());
    assert_eq!(controller.error_message(), None);
    assert!(!controller.is_copied_at(now));
}

#[test]
fn confirm_key_requires_a_focused_field() {
    let mut controller = controller_with_url("https://example.com");
    assert!(controller.confirm_key(None).is_none());
    assert_eq!(controller.phase(), &Phase::Idle);

    let ticket = controller
        .confirm_key(Some(FormField::CustomCode))
        .expect("enter from the alias field submits too");
    assert_eq!(controller.phase(), &Phase::Submitting { request: ticket.id });
}
