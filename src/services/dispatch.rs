use crate::models::{Donor, RequestSummary};
use crate::services::email::EmailTransport;
use crate::services::messaging::MessagingTransport;
use std::sync::Arc;

/// Outcome of one channel attempt for one donor.
///
/// These replace silently-swallowed notification errors: every outcome is
/// inspectable and logged, but none of them is ever raised as a hard error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelOutcome {
    /// Delivery confirmed by the transport.
    Sent,
    /// One attempt was made; the channel gives no delivery confirmation
    /// (fire-and-forget).
    Attempted,
    /// The channel is not configured; no attempt was made.
    Skipped(String),
    /// The attempt was made and failed (timeout, bad credentials, ...).
    Failed(String),
}

impl ChannelOutcome {
    pub fn confirmed(&self) -> bool {
        matches!(self, ChannelOutcome::Sent)
    }

    pub fn attempted(&self) -> bool {
        matches!(
            self,
            ChannelOutcome::Sent | ChannelOutcome::Attempted | ChannelOutcome::Failed(_)
        )
    }
}

/// Per-donor result of a dispatch round across both channels.
#[derive(Debug, Clone)]
pub struct DispatchReport {
    pub email: ChannelOutcome,
    pub secondary: ChannelOutcome,
}

impl DispatchReport {
    /// True when the email channel confirmed delivery; matches are recorded
    /// only on this.
    pub fn email_confirmed(&self) -> bool {
        self.email.confirmed()
    }
}

/// Drives best-effort notification of a single donor across the email and
/// secondary messaging channels.
///
/// Each channel makes at most one attempt per donor per request, channels
/// are independent of each other, and one donor's failure never affects the
/// next donor. All transport configuration is injected at construction.
pub struct NotificationDispatcher {
    email: Option<Arc<dyn EmailTransport>>,
    messaging: Option<Arc<dyn MessagingTransport>>,
}

impl NotificationDispatcher {
    pub fn new(
        email: Option<Arc<dyn EmailTransport>>,
        messaging: Option<Arc<dyn MessagingTransport>>,
    ) -> Self {
        Self { email, messaging }
    }

    pub async fn notify(&self, donor: &Donor, summary: &RequestSummary) -> DispatchReport {
        let email = match &self.email {
            None => ChannelOutcome::Skipped("email not configured".to_string()),
            Some(transport) => {
                let (subject, body) = compose_email(donor, summary);
                match transport.send(&donor.email, &subject, &body).await {
                    Ok(()) => ChannelOutcome::Sent,
                    Err(e) => {
                        tracing::warn!(donor_id = donor.id, error = %e, "Email channel degraded");
                        ChannelOutcome::Failed(e.to_string())
                    }
                }
            }
        };

        let secondary = match &self.messaging {
            None => ChannelOutcome::Skipped("messaging disabled".to_string()),
            Some(transport) => {
                transport
                    .attempt(&donor.phone, &compose_message(donor, summary))
                    .await;
                ChannelOutcome::Attempted
            }
        };

        tracing::debug!(
            donor_id = donor.id,
            email = ?email,
            secondary = ?secondary,
            "Dispatched donor notification"
        );

        DispatchReport { email, secondary }
    }
}

/// Email subject and body for a donation request notification.
pub fn compose_email(donor: &Donor, summary: &RequestSummary) -> (String, String) {
    let subject = "Urgent Blood Donation Request".to_string();

    let patient_paragraph = match &summary.patient_details {
        Some(details) if !details.trim().is_empty() => format!("\nPatient Details: {details}\n"),
        _ => String::new(),
    };

    let body = format!(
        "Dear {name},\n\
         \n\
         We have an urgent blood donation request that matches your blood group ({blood_type}).\n\
         \n\
         Hospital Details:\n\
         - Hospital Name: {hospital}\n\
         - Location: {location}\n\
         - Contact Email: {email}\n\
         - Contact Phone: {phone}\n\
         {patient_paragraph}\n\
         If you are available and willing to help, please contact the hospital directly using the information above.\n\
         \n\
         Thank you for being a part of our life-saving network.\n\
         \n\
         Best regards,\n\
         Bloodlink Alerts",
        name = donor.name,
        blood_type = summary.blood_type,
        hospital = summary.hospital_name,
        location = summary.hospital_location,
        email = summary.hospital_email,
        phone = summary.hospital_phone,
        patient_paragraph = patient_paragraph,
    );

    (subject, body)
}

/// Short plain-text body for the secondary messaging channel.
pub fn compose_message(donor: &Donor, summary: &RequestSummary) -> String {
    format!(
        "Urgent blood donation request for {blood_type}. {hospital}, {location}. \
         Contact {email} / {phone}. - Bloodlink ({name})",
        blood_type = summary.blood_type,
        hospital = summary.hospital_name,
        location = summary.hospital_location,
        email = summary.hospital_email,
        phone = summary.hospital_phone,
        name = donor.name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compatibility::BloodType;
    use crate::services::email::{EmailError, EmailTransport};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn donor(id: i64) -> Donor {
        Donor {
            id,
            name: format!("Donor {id}"),
            blood_type: BloodType::ONeg,
            email: format!("donor{id}@example.com"),
            phone: format!("+91000000000{id}"),
            location: "Mumbai".to_string(),
            created_at: chrono::Utc::now(),
        }
    }

    fn summary() -> RequestSummary {
        RequestSummary {
            hospital_name: "City Hospital".to_string(),
            hospital_email: "er@cityhospital.example".to_string(),
            hospital_phone: "+911234567890".to_string(),
            hospital_location: "Mumbai".to_string(),
            blood_type: BloodType::ONeg,
            patient_details: Some("accident victim".to_string()),
        }
    }

    struct FixedEmail {
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EmailTransport for FixedEmail {
        async fn send(&self, _to: &str, _subject: &str, _body: &str) -> Result<(), EmailError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(EmailError::Timeout(10))
            } else {
                Ok(())
            }
        }
    }

    struct CountingMessenger {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MessagingTransport for CountingMessenger {
        async fn attempt(&self, _to: &str, _body: &str) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_unconfigured_channels_are_skipped() {
        let dispatcher = NotificationDispatcher::new(None, None);
        let report = dispatcher.notify(&donor(1), &summary()).await;

        assert!(matches!(report.email, ChannelOutcome::Skipped(_)));
        assert!(matches!(report.secondary, ChannelOutcome::Skipped(_)));
        assert!(!report.email_confirmed());
        assert!(!report.email.attempted());
    }

    #[tokio::test]
    async fn test_successful_email_is_confirmed() {
        let email = Arc::new(FixedEmail {
            fail: false,
            calls: AtomicUsize::new(0),
        });
        let dispatcher = NotificationDispatcher::new(Some(email.clone()), None);

        let report = dispatcher.notify(&donor(1), &summary()).await;
        assert_eq!(report.email, ChannelOutcome::Sent);
        assert!(report.email_confirmed());
        assert_eq!(email.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_email_failure_is_degraded_not_fatal() {
        let email = Arc::new(FixedEmail {
            fail: true,
            calls: AtomicUsize::new(0),
        });
        let messaging = Arc::new(CountingMessenger {
            calls: AtomicUsize::new(0),
        });
        let dispatcher = NotificationDispatcher::new(Some(email.clone()), Some(messaging.clone()));

        let report = dispatcher.notify(&donor(1), &summary()).await;

        // Failed email is an outcome, not an error, and the secondary
        // channel still ran.
        assert!(matches!(report.email, ChannelOutcome::Failed(_)));
        assert!(report.email.attempted());
        assert!(!report.email_confirmed());
        assert_eq!(report.secondary, ChannelOutcome::Attempted);
        assert_eq!(messaging.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_email_body_contains_request_details() {
        let (subject, body) = compose_email(&donor(7), &summary());
        assert_eq!(subject, "Urgent Blood Donation Request");
        assert!(body.contains("Dear Donor 7"));
        assert!(body.contains("(O-)"));
        assert!(body.contains("City Hospital"));
        assert!(body.contains("er@cityhospital.example"));
        assert!(body.contains("Patient Details: accident victim"));
    }

    #[test]
    fn test_email_body_omits_missing_patient_details() {
        let mut s = summary();
        s.patient_details = None;
        let (_, body) = compose_email(&donor(1), &s);
        assert!(!body.contains("Patient Details:"));
    }
}
