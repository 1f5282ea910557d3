//! Event form behaviour through the public API

mod helpers;

use std::time::Duration;
use proptest::prelude::*;

use geohod::state::form::{EventForm, Field, MAX_PARTICIPANTS_ERROR, PARTICIPANTS_LIMIT_TOAST, PAST_DATE_ERROR};
use geohod::utils::helpers::offset_from_minutes;
use helpers::*;

fn form_at(now: &str, offset_minutes: i32) -> EventForm {
    EventForm::new(clock_at(now), offset_from_minutes(offset_minutes), Duration::from_millis(3000))
}

proptest! {
    #[test]
    fn capacity_error_matches_bounds(n in -50i64..250) {
        let mut form = form_at("2025-06-01T09:00:00Z", 0);
        form.set_max_participants(n.to_string());

        let in_range = (1..=100).contains(&n);
        prop_assert_eq!(form.errors().max_participants.is_none(), in_range);
        if !in_range {
            prop_assert_eq!(form.visible_error(Field::MaxParticipants), Some(MAX_PARTICIPANTS_ERROR));
        }

        // Only the upper bound raises the toast
        let notices = form.drain_notices();
        prop_assert_eq!(!notices.is_empty(), n > 100);
    }
}

#[tokio::test(start_paused = true)]
async fn test_limit_toast_disappears_after_three_seconds() {
    let mut form = form_at("2025-06-01T09:00:00Z", 0);
    form.set_max_participants("101");
    assert_eq!(form.toaster().visible_message(), Some(PARTICIPANTS_LIMIT_TOAST));

    tokio::time::advance(Duration::from_millis(2999)).await;
    assert!(form.toaster().visible().is_some());

    tokio::time::advance(Duration::from_millis(1)).await;
    assert!(form.toaster().visible().is_none());

    // Field error outlives the toast
    assert_eq!(form.visible_error(Field::MaxParticipants), Some(MAX_PARTICIPANTS_ERROR));
}

#[test]
fn test_today_uses_configured_offset() {
    // 23:30 UTC on May 31 is already June 1 at UTC+3
    let mut form = form_at("2025-05-31T23:30:00Z", 180);
    form.set_date("2025-05-31");
    assert_eq!(form.visible_error(Field::Date), Some(PAST_DATE_ERROR));

    form.set_date("2025-06-01");
    assert_eq!(form.visible_error(Field::Date), None);
}

#[test]
fn test_submission_converts_local_time_to_utc() {
    let mut form = form_at("2025-06-01T09:00:00Z", 180);
    form.set_title("Board games");
    form.set_max_participants("8");
    form.set_date("2025-06-02");
    form.set_time("19:00");

    let submission = form.prepare_submission().unwrap();
    assert_eq!(submission.date_iso(), "2025-06-02T16:00:00.000Z");
    assert_eq!(submission.max_participants, 8);
}

#[test]
fn test_empty_form_blocks_submission_and_touches_fields() {
    let mut form = form_at("2025-06-01T09:00:00Z", 0);
    assert!(form.prepare_submission().is_err());
    let touched = form.touched();
    assert!(touched.title && touched.max_participants && touched.date && touched.time);
}
