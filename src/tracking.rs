/// Form analytics events, emitted as structured tracing events under the
/// `lead_events` target so they can be routed to a separate sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackedEvent {
    SubmitSuccess { university: String, course: String },
    SubmitError { university: String, error: String },
}

impl TrackedEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TrackedEvent::SubmitSuccess { .. } => "form_submit_success",
            TrackedEvent::SubmitError { .. } => "form_submit_error",
        }
    }
}

pub fn track(event: &TrackedEvent) {
    match event {
        TrackedEvent::SubmitSuccess { university, course } => tracing::info!(
            target: "lead_events",
            event = event.name(),
            university = %university,
            course = %course,
            "Event: {}",
            event.name()
        ),
        TrackedEvent::SubmitError { university, error } => tracing::warn!(
            target: "lead_events",
            event = event.name(),
            university = %university,
            error = %error,
            "Event: {}",
            event.name()
        ),
    }
}
