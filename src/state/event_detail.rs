//! Event detail view-model
//!
//! Owns one event, its roster and the acting user's relation to it, and
//! sequences every lifecycle intent against [`EventService`]. The
//! participant count is never adjusted locally: after register,
//! unregister or a roster change the event and its participants are
//! fetched again. The only local mutation is the status flip after a
//! confirmed cancel or finish.
//!
//! Methods take `&mut self`, so intents on one detail screen are serial.
//! Dropping the view-model (or an in-flight intent future) discards any
//! response that has not arrived yet.

use std::time::Duration;
use chrono::FixedOffset;
use tracing::{debug, info, warn};
use crate::models::event::{Event, EventStatus, FinishOptions};
use crate::models::user::User;
use crate::services::EventService;
use crate::state::form::EventForm;
use crate::utils::clock::SharedClock;
use crate::utils::errors::{GeoHodError, Result};
use crate::utils::helpers::{is_past_day, is_same_day, registration_link};
use crate::utils::logging::{log_event_action, log_rejected_intent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Register,
    Unregister,
    Cancel,
    Finish,
    Edit,
    RemoveParticipant,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Register => "register",
            Intent::Unregister => "unregister",
            Intent::Cancel => "cancel",
            Intent::Finish => "finish",
            Intent::Edit => "edit",
            Intent::RemoveParticipant => "remove_participant",
        }
    }
}

/// Which buttons the detail screen offers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionVisibility {
    pub finish: bool,
    pub edit: bool,
    pub cancel: bool,
    /// Cancel stays on screen for a canceled event, but disabled
    pub cancel_enabled: bool,
    pub register: bool,
    pub unregister: bool,
    pub manage_participants: bool,
}

/// Dialog currently open over the detail screen
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    /// Shown after a successful registration
    Registered { registration_link: String },
    UnregisterPrompt,
    /// Organizer sees who will be affected before confirming
    CancelPrompt { participants: Vec<User> },
    FinishPrompt,
}

#[derive(Debug)]
pub struct EventDetail {
    service: EventService,
    clock: SharedClock,
    offset: FixedOffset,
    current_user: User,
    bot_url: String,
    toast_duration: Duration,
    event: Event,
    participants: Vec<User>,
    iam_participant: bool,
    dialog: Option<Dialog>,
    last_error: Option<String>,
}

impl EventDetail {
    /// Fetch the event, then its participants, and derive membership
    pub async fn load(
        service: EventService,
        event_id: &str,
        current_user: User,
        clock: SharedClock,
        offset: FixedOffset,
        bot_url: &str,
        toast_duration: Duration,
    ) -> Result<Self> {
        let event = service.get_event(event_id).await?;
        let participants = service.get_event_participants(event_id).await?;
        let iam_participant = participants.iter().any(|p| p.is(&current_user.id));

        debug!(event_id = %event.id, status = %event.status, iam_participant = iam_participant, "Event detail loaded");

        Ok(Self {
            service,
            clock,
            offset,
            current_user,
            bot_url: bot_url.to_string(),
            toast_duration,
            event,
            participants,
            iam_participant,
            dialog: None,
            last_error: None,
        })
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn participants(&self) -> &[User] {
        &self.participants
    }

    pub fn iam_participant(&self) -> bool {
        self.iam_participant
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    /// Message for the shared error display, set by the last failed intent
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn is_organizer(&self) -> bool {
        self.event.is_organized_by(&self.current_user.id)
    }

    pub fn is_past(&self) -> bool {
        is_past_day(self.event.date, self.clock.now(), self.offset)
    }

    pub fn is_today(&self) -> bool {
        is_same_day(self.event.date, self.clock.now(), self.offset)
    }

    pub fn registration_link(&self) -> Result<String> {
        registration_link(&self.bot_url, &self.event.id)
    }

    pub fn actions(&self) -> ActionVisibility {
        let organizer = self.is_organizer();
        let status = self.event.status;
        let past = self.is_past();

        ActionVisibility {
            finish: organizer && self.is_today() && !status.is_closed(),
            edit: organizer && !status.is_closed(),
            cancel: organizer && status != EventStatus::Finished,
            cancel_enabled: organizer && status == EventStatus::Active,
            register: !organizer
                && !self.iam_participant
                && !past
                && status == EventStatus::Active
                && !self.event.is_full(),
            unregister: !organizer && self.iam_participant && !past,
            manage_participants: organizer && !status.is_closed(),
        }
    }

    fn allowed(&self, intent: Intent) -> bool {
        let actions = self.actions();
        match intent {
            Intent::Register => actions.register,
            Intent::Unregister => actions.unregister,
            Intent::Cancel => actions.cancel_enabled,
            Intent::Finish => actions.finish,
            Intent::Edit => actions.edit,
            Intent::RemoveParticipant => actions.manage_participants,
        }
    }

    fn ensure_allowed(&self, intent: Intent) -> Result<()> {
        if self.allowed(intent) {
            return Ok(());
        }
        let reason = format!("{} is not available for this event", intent.as_str());
        log_rejected_intent(&self.event.id, intent.as_str(), &reason);
        Err(GeoHodError::PermissionDenied(reason))
    }

    /// Record a failed call for display and hand the error back
    fn fail(&mut self, intent: Intent, error: GeoHodError) -> GeoHodError {
        log_event_action(&self.event.id, intent.as_str(), Some(&self.current_user.id), Some(&error.to_string()));
        self.last_error = Some(error.user_message());
        error
    }

    /// Fetch event and roster again and recompute membership
    pub async fn refresh(&mut self) -> Result<()> {
        let event = self.service.get_event(&self.event.id).await?;
        let participants = self.service.get_event_participants(&self.event.id).await?;
        self.iam_participant = participants.iter().any(|p| p.is(&self.current_user.id));
        self.event = event;
        self.participants = participants;
        Ok(())
    }

    /// Re-fetch after a membership change the server already accepted. A
    /// failed re-fetch does not undo the change: membership is set from the
    /// confirmed outcome and the failure goes to the error display.
    async fn refresh_after(&mut self, intent: Intent, member: bool) {
        if let Err(e) = self.refresh().await {
            warn!(event_id = %self.event.id, intent = intent.as_str(), error = %e, "Refresh after membership change failed");
            self.iam_participant = member;
            self.last_error = Some(e.user_message());
        }
    }

    pub async fn register(&mut self) -> Result<()> {
        self.ensure_allowed(Intent::Register)?;
        self.last_error = None;

        if let Err(e) = self.service.register_for_event(&self.event.id).await {
            return Err(self.fail(Intent::Register, e));
        }
        log_event_action(&self.event.id, "register", Some(&self.current_user.id), None);
        self.refresh_after(Intent::Register, true).await;

        self.dialog = Some(Dialog::Registered {
            registration_link: self.registration_link()?,
        });
        Ok(())
    }

    /// Open the "leave this event?" confirmation
    pub fn request_unregister(&mut self) -> Result<()> {
        self.ensure_allowed(Intent::Unregister)?;
        self.dialog = Some(Dialog::UnregisterPrompt);
        Ok(())
    }

    /// Leave the event. On failure the confirmation stays open.
    pub async fn unregister(&mut self) -> Result<()> {
        self.ensure_allowed(Intent::Unregister)?;
        self.last_error = None;

        if let Err(e) = self.service.unregister_from_event(&self.event.id).await {
            return Err(self.fail(Intent::Unregister, e));
        }
        log_event_action(&self.event.id, "unregister", Some(&self.current_user.id), None);
        self.refresh_after(Intent::Unregister, false).await;

        self.dialog = None;
        Ok(())
    }

    /// Load the current roster and show it in the cancel confirmation
    pub async fn begin_cancel(&mut self) -> Result<()> {
        self.ensure_allowed(Intent::Cancel)?;

        match self.service.get_event_participants(&self.event.id).await {
            Ok(participants) => {
                self.participants = participants.clone();
                self.dialog = Some(Dialog::CancelPrompt { participants });
                Ok(())
            }
            Err(e) => Err(self.fail(Intent::Cancel, e)),
        }
    }

    /// Cancel the event; the status flips only after the server confirms
    pub async fn confirm_cancel(&mut self) -> Result<()> {
        self.ensure_allowed(Intent::Cancel)?;
        self.last_error = None;

        if let Err(e) = self.service.cancel_event(&self.event.id).await {
            return Err(self.fail(Intent::Cancel, e));
        }

        self.event.transition(EventStatus::Canceled)?;
        self.dialog = None;
        info!(event_id = %self.event.id, "Event canceled by organizer");
        Ok(())
    }

    pub fn request_finish(&mut self) -> Result<()> {
        self.ensure_allowed(Intent::Finish)?;
        self.dialog = Some(Dialog::FinishPrompt);
        Ok(())
    }

    /// Finish the event. The caller leaves the detail screen on `Ok`.
    pub async fn finish(&mut self, options: FinishOptions) -> Result<()> {
        self.ensure_allowed(Intent::Finish)?;
        options.validate()?;
        self.last_error = None;

        let options = options.normalized();
        if let Err(e) = self.service.finish_event(&self.event.id, &options).await {
            return Err(self.fail(Intent::Finish, e));
        }

        self.event.transition(EventStatus::Finished)?;
        self.dialog = None;
        info!(
            event_id = %self.event.id,
            send_vote = options.send_vote,
            send_donation = options.send_donation,
            "Event finished by organizer"
        );
        Ok(())
    }

    /// Form pre-filled with the current values
    pub fn edit_form(&self) -> Result<EventForm> {
        self.ensure_allowed(Intent::Edit)?;
        Ok(EventForm::for_event(&self.event, self.clock.clone(), self.offset, self.toast_duration))
    }

    /// Submit an edit form; the server's copy of the event replaces ours
    pub async fn save_edit(&mut self, form: &mut EventForm) -> Result<()> {
        self.ensure_allowed(Intent::Edit)?;
        self.last_error = None;

        let service = self.service.clone();
        let id = self.event.id.clone();
        let description = self.event.description.clone();

        let outcome = form
            .submit(|submission| async move {
                service.update_event(&id, &submission.into_payload(description)).await
            })
            .await;

        match outcome {
            Ok(updated) => {
                self.event = updated;
                Ok(())
            }
            Err(e @ GeoHodError::Validation(_)) => Err(e),
            Err(e) => Err(self.fail(Intent::Edit, e)),
        }
    }

    /// Organizer removes someone from the roster
    pub async fn remove_participant(&mut self, participant_id: &str) -> Result<()> {
        self.ensure_allowed(Intent::RemoveParticipant)?;
        self.last_error = None;

        if let Err(e) = self.service.remove_event_participant(&self.event.id, participant_id).await {
            return Err(self.fail(Intent::RemoveParticipant, e));
        }
        if let Err(e) = self.refresh().await {
            return Err(self.fail(Intent::RemoveParticipant, e));
        }
        Ok(())
    }
}
