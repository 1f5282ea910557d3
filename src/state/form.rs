//! Create/edit event form
//!
//! Holds the raw field text, per-field touched flags and the derived error
//! map. Field errors and toast notices are separate outputs: errors are
//! recomputed on every change, notices are emitted only for the
//! over-capacity case and also shown through the form's [`Toaster`].
//!
//! Dates are checked at day granularity in the user's offset: any time on
//! today's date is accepted.

use std::future::Future;
use std::time::Duration;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use tracing::debug;
use crate::models::event::{Event, EventPayload, MAX_PARTICIPANTS, MIN_PARTICIPANTS};
use crate::state::toast::Toaster;
use crate::utils::clock::SharedClock;
use crate::utils::errors::{GeoHodError, Result};
use crate::utils::helpers::{local_day, to_iso_millis};

pub const MAX_PARTICIPANTS_ERROR: &str = "Max participants is 100.";
pub const PARTICIPANTS_LIMIT_TOAST: &str = "Participants limit exceeded";
pub const PAST_DATE_ERROR: &str = "Date cannot be in the past.";
pub const INVALID_DATE_ERROR: &str = "Enter a valid date.";
pub const INVALID_TIME_ERROR: &str = "Enter a valid time.";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    MaxParticipants,
    Date,
    Time,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub title: String,
    pub max_participants: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Touched {
    pub title: bool,
    pub max_participants: bool,
    pub date: bool,
    pub time: bool,
}

impl Touched {
    fn set(&mut self, field: Field) {
        match field {
            Field::Title => self.title = true,
            Field::MaxParticipants => self.max_participants = true,
            Field::Date => self.date = true,
            Field::Time => self.time = true,
        }
    }

    pub fn get(&self, field: Field) -> bool {
        match field {
            Field::Title => self.title,
            Field::MaxParticipants => self.max_participants,
            Field::Date => self.date,
            Field::Time => self.time,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub max_participants: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.max_participants.is_none() && self.date.is_none() && self.time.is_none()
    }

    fn is_empty_schedule(&self) -> bool {
        self.date.is_none() && self.time.is_none()
    }

    fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => None,
            Field::MaxParticipants => self.max_participants.as_deref(),
            Field::Date => self.date.as_deref(),
            Field::Time => self.time.as_deref(),
        }
    }
}

/// Side-channel message produced while the user types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub field: Field,
    pub message: String,
}

/// What a valid form hands to its submit callback
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub title: String,
    pub max_participants: u32,
    #[serde(serialize_with = "serialize_date")]
    pub date: DateTime<Utc>,
}

fn serialize_date<S: serde::Serializer>(date: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_iso_millis(*date))
}

impl FormSubmission {
    pub fn date_iso(&self) -> String {
        to_iso_millis(self.date)
    }

    pub fn into_payload(self, description: Option<String>) -> EventPayload {
        EventPayload {
            name: self.title,
            date: self.date,
            max_participants: self.max_participants,
            description,
        }
    }
}

#[derive(Debug)]
pub struct EventForm {
    fields: FormFields,
    touched: Touched,
    errors: FieldErrors,
    notices: Vec<Notice>,
    toaster: Toaster,
    clock: SharedClock,
    offset: FixedOffset,
}

impl EventForm {
    /// Blank form for a new event
    pub fn new(clock: SharedClock, offset: FixedOffset, toast_duration: Duration) -> Self {
        Self {
            fields: FormFields::default(),
            touched: Touched::default(),
            errors: FieldErrors::default(),
            notices: Vec::new(),
            toaster: Toaster::new(toast_duration),
            clock,
            offset,
        }
    }

    /// Form pre-populated from an existing event, shown in the user's offset
    pub fn for_event(event: &Event, clock: SharedClock, offset: FixedOffset, toast_duration: Duration) -> Self {
        let mut form = Self::new(clock, offset, toast_duration);
        let local = event.date.with_timezone(&offset);
        form.fields = FormFields {
            title: event.name.clone(),
            max_participants: event.max_participants.to_string(),
            date: local.format(DATE_FORMAT).to_string(),
            time: local.format(TIME_FORMAT).to_string(),
        };
        form.revalidate();
        form
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn touched(&self) -> Touched {
        self.touched
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Error to render under a field; hidden until the field is touched
    pub fn visible_error(&self, field: Field) -> Option<&str> {
        if self.touched.get(field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    pub fn toaster_mut(&mut self) -> &mut Toaster {
        &mut self.toaster
    }

    /// Take the notices emitted since the last call
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn is_valid(&self) -> bool {
        !self.fields.title.trim().is_empty()
            && !self.fields.max_participants.trim().is_empty()
            && !self.fields.date.trim().is_empty()
            && !self.fields.time.trim().is_empty()
            && self.errors.is_empty()
    }

    pub fn set_title(&mut self, value: impl Into<String>) {
        self.fields.title = value.into();
        self.touched.set(Field::Title);
    }

    pub fn set_max_participants(&mut self, value: impl Into<String>) {
        self.fields.max_participants = value.into();
        self.touched.set(Field::MaxParticipants);
        self.validate_max_participants();

        if self.touched.max_participants && self.parsed_max_participants().map_or(false, |n| n > MAX_PARTICIPANTS as i64) {
            self.emit(Field::MaxParticipants, PARTICIPANTS_LIMIT_TOAST);
        }
    }

    /// Date picker change: day-granularity check of the date alone
    pub fn set_date(&mut self, value: impl Into<String>) {
        self.fields.date = value.into();
        self.touched.set(Field::Date);
        self.validate_date_only();
    }

    pub fn set_time(&mut self, value: impl Into<String>) {
        self.fields.time = value.into();
        self.touched.set(Field::Time);
        self.validate_schedule();
    }

    /// Field lost focus
    pub fn blur(&mut self, field: Field) {
        self.touched.set(field);
        match field {
            Field::Date | Field::Time => self.validate_schedule(),
            Field::MaxParticipants => self.validate_max_participants(),
            Field::Title => {}
        }
    }

    /// Touch every field and build the submission if the form is valid
    pub fn prepare_submission(&mut self) -> Result<FormSubmission> {
        for field in [Field::Title, Field::MaxParticipants, Field::Date, Field::Time] {
            self.touched.set(field);
        }
        self.revalidate();

        if !self.is_valid() {
            let reason = self
                .errors
                .max_participants
                .clone()
                .or_else(|| self.errors.date.clone())
                .or_else(|| self.errors.time.clone())
                .unwrap_or_else(|| "All fields are required".to_string());
            debug!(reason = %reason, "Form submission blocked");
            return Err(GeoHodError::Validation(reason));
        }

        let max_participants = self
            .parsed_max_participants()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| GeoHodError::Validation(MAX_PARTICIPANTS_ERROR.to_string()))?;

        let date = self
            .combined_instant()
            .ok_or_else(|| GeoHodError::Validation(INVALID_DATE_ERROR.to_string()))?;

        Ok(FormSubmission {
            title: self.fields.title.trim().to_string(),
            max_participants,
            date,
        })
    }

    /// Validate, hand the submission to `on_submit`, and clear the form on success
    pub async fn submit<F, Fut, T>(&mut self, on_submit: F) -> Result<T>
    where
        F: FnOnce(FormSubmission) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let submission = self.prepare_submission()?;
        let result = on_submit(submission).await?;
        self.reset();
        Ok(result)
    }

    pub fn reset(&mut self) {
        self.fields = FormFields::default();
        self.touched = Touched::default();
        self.errors = FieldErrors::default();
        self.notices.clear();
    }

    fn emit(&mut self, field: Field, message: &str) {
        self.notices.push(Notice { field, message: message.to_string() });
        self.toaster.show(message);
    }

    fn revalidate(&mut self) {
        self.validate_max_participants();
        self.validate_schedule();
    }

    fn parsed_max_participants(&self) -> Option<i64> {
        self.fields.max_participants.trim().parse::<i64>().ok()
    }

    fn validate_max_participants(&mut self) {
        let raw = self.fields.max_participants.trim();
        self.errors.max_participants = if raw.is_empty() {
            None
        } else {
            match self.parsed_max_participants() {
                Some(n) if (MIN_PARTICIPANTS as i64..=MAX_PARTICIPANTS as i64).contains(&n) => None,
                _ => Some(MAX_PARTICIPANTS_ERROR.to_string()),
            }
        };
    }

    fn today(&self) -> NaiveDate {
        local_day(self.clock.now(), self.offset)
    }

    fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.fields.date.trim(), DATE_FORMAT).ok()
    }

    fn parsed_time(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(self.fields.time.trim(), TIME_FORMAT).ok()
    }

    fn date_error(&self) -> Option<String> {
        if self.fields.date.trim().is_empty() {
            return None;
        }
        match self.parsed_date() {
            None => Some(INVALID_DATE_ERROR.to_string()),
            Some(day) if day < self.today() => Some(PAST_DATE_ERROR.to_string()),
            Some(_) => None,
        }
    }

    fn validate_date_only(&mut self) {
        self.errors.date = self.date_error();
    }

    /// Combined date + time check used on blur and submit
    fn validate_schedule(&mut self) {
        self.errors.date = self.date_error();
        self.errors.time = if self.fields.time.trim().is_empty() || self.parsed_time().is_some() {
            None
        } else {
            Some(INVALID_TIME_ERROR.to_string())
        };

        // Both parse but the local time does not exist in the offset
        let both_filled = !self.fields.date.trim().is_empty() && !self.fields.time.trim().is_empty();
        if both_filled && self.errors.is_empty_schedule() && self.combined_instant().is_none() {
            self.errors.time = Some(INVALID_TIME_ERROR.to_string());
        }
    }

    fn combined_instant(&self) -> Option<DateTime<Utc>> {
        let naive = self.parsed_date()?.and_time(self.parsed_time()?);
        self.offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
    }
}
