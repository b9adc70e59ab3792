//! Site-side lead submission

use serde::Serialize;
use std::time::Duration;
use tokio::sync::Mutex;

use super::{LeadNotifier, LeadPayload};
use crate::i18n::{Catalog, Lang};
use crate::store::ContentStore;

/// Result shown to the visitor after submitting the contact form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<String>,
    pub message: String,
}

/// Record a lead locally, then notify the workshop
///
/// The lead is stored before any network call, so a failed or slow
/// notification never loses it. The store lock is released before the
/// notification is awaited.
pub async fn submit_lead(
    store: &Mutex<ContentStore>,
    notifier: Option<&dyn LeadNotifier>,
    catalog: &Catalog,
    lang: Lang,
    payload: &LeadPayload,
    timeout: Duration,
) -> SubmitOutcome {
    if payload.is_spam() {
        tracing::info!("Honeypot filled, dropping lead");
        return SubmitOutcome {
            ok: true,
            lead_id: None,
            message: catalog.t(lang, "lead.sent"),
        };
    }

    if !payload.has_required_fields() {
        return SubmitOutcome {
            ok: false,
            lead_id: None,
            message: catalog.t(lang, "lead.invalid"),
        };
    }

    let lead = {
        let mut store = store.lock().await;
        store.upsert_lead(payload.to_lead())
    };
    tracing::debug!("Stored lead {}", lead.id);

    let failed = |key: &str| SubmitOutcome {
        ok: false,
        lead_id: Some(lead.id.clone()),
        message: catalog.t(lang, key),
    };

    let Some(notifier) = notifier else {
        tracing::warn!("No lead notifier configured, lead {} kept locally", lead.id);
        return failed("lead.network");
    };

    match tokio::time::timeout(timeout, notifier.notify(payload)).await {
        Ok(Ok(())) => SubmitOutcome {
            ok: true,
            lead_id: Some(lead.id.clone()),
            message: catalog.t(lang, "lead.sent"),
        },
        Ok(Err(e)) => {
            tracing::warn!("Lead {} notification failed: {}", lead.id, e);
            failed("lead.network")
        }
        Err(_) => {
            tracing::warn!(
                "Lead {} notification timed out after {:?}",
                lead.id,
                timeout
            );
            failed("lead.timeout")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leads::NotifyError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct MockNotifier {
        calls: AtomicUsize,
        delay: Option<Duration>,
        fail: bool,
    }

    #[async_trait]
    impl LeadNotifier for MockNotifier {
        async fn notify(&self, _lead: &LeadPayload) -> Result<(), NotifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                return Err(NotifyError::Rejected {
                    status: 502,
                    body: String::new(),
                });
            }
            Ok(())
        }
    }

    fn payload() -> LeadPayload {
        LeadPayload {
            name: "Maria".to_string(),
            email: "maria@example.com".to_string(),
            message: "Bucătărie pe colț".to_string(),
            ..Default::default()
        }
    }

    fn store() -> Mutex<ContentStore> {
        Mutex::new(ContentStore::in_memory())
    }

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[tokio::test]
    async fn test_submit_persists_and_notifies() {
        let store = store();
        let notifier = MockNotifier::default();
        let catalog = Catalog::new();

        let outcome =
            submit_lead(&store, Some(&notifier), &catalog, Lang::En, &payload(), TIMEOUT).await;

        assert!(outcome.ok);
        assert_eq!(outcome.message, catalog.t(Lang::En, "lead.sent"));
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);

        let mut store = store.lock().await;
        let id = outcome.lead_id.unwrap();
        assert_eq!(store.get_lead_by_id(&id).unwrap().name, "Maria");
    }

    #[tokio::test]
    async fn test_failed_notification_keeps_lead() {
        let store = store();
        let notifier = MockNotifier {
            fail: true,
            ..Default::default()
        };
        let catalog = Catalog::new();

        let outcome =
            submit_lead(&store, Some(&notifier), &catalog, Lang::Ro, &payload(), TIMEOUT).await;

        assert!(!outcome.ok);
        assert_eq!(outcome.message, catalog.t(Lang::Ro, "lead.network"));
        assert_eq!(store.lock().await.get_leads().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_notification_times_out() {
        let store = store();
        let notifier = MockNotifier {
            delay: Some(Duration::from_secs(30)),
            ..Default::default()
        };
        let catalog = Catalog::new();

        let outcome =
            submit_lead(&store, Some(&notifier), &catalog, Lang::En, &payload(), TIMEOUT).await;

        assert!(!outcome.ok);
        assert_eq!(outcome.message, catalog.t(Lang::En, "lead.timeout"));
        assert!(outcome.lead_id.is_some());
        assert_eq!(store.lock().await.get_leads().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_and_spam_are_not_stored() {
        let store = store();
        let notifier = MockNotifier::default();
        let catalog = Catalog::new();

        let mut invalid = payload();
        invalid.email.clear();
        let outcome =
            submit_lead(&store, Some(&notifier), &catalog, Lang::Ro, &invalid, TIMEOUT).await;
        assert!(!outcome.ok);
        assert_eq!(outcome.message, catalog.t(Lang::Ro, "lead.invalid"));

        let mut spam = payload();
        spam.company = "Bots Inc".to_string();
        let outcome =
            submit_lead(&store, Some(&notifier), &catalog, Lang::Ro, &spam, TIMEOUT).await;
        assert!(outcome.ok);

        assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);
        assert!(store.lock().await.get_leads().is_empty());
    }

    #[tokio::test]
    async fn test_missing_notifier_reports_network_error() {
        let store = store();
        let catalog = Catalog::new();

        let outcome = submit_lead(&store, None, &catalog, Lang::En, &payload(), TIMEOUT).await;
        assert!(!outcome.ok);
        assert_eq!(outcome.message, catalog.t(Lang::En, "lead.network"));
        assert_eq!(store.lock().await.get_leads().len(), 1);
    }
}
