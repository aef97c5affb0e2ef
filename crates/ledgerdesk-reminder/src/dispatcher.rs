//! Reminder dispatcher: matches overdue invoices against the enabled
//! reminder tiers and performs the per-pair side effects.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{error, info, warn};

use ledgerdesk_core::result::AppResult;
use ledgerdesk_entity::notification::NewNotification;
use ledgerdesk_entity::reminder::ReminderRule;

use crate::notifier::{Notifier, ReminderMessage};
use crate::scanner::OverdueInvoice;
use crate::stores::{NotificationSink, ReminderLedger, ReminderPolicyStore};
use crate::summary::RunSummary;

/// Notification kind attached to every dispatched reminder.
pub const NOTIFICATION_KIND: &str = "invoice_overdue";

/// Outcome of evaluating one (invoice, rule) pair.
enum PairOutcome {
    /// A reminder was dispatched.
    Dispatched,
    /// The ledger already had this pair.
    AlreadyRecorded,
}

/// Dispatches tiered reminders for overdue invoices.
///
/// For each satisfied, unrecorded (invoice, threshold) pair the dispatcher
/// writes the admin notification, asks the [`Notifier`] to deliver the
/// outbound message, then claims the pair on the ledger. Notification
/// before ledger: a crash between the two causes a harmless duplicate
/// notification next run, never a silently lost reminder.
pub struct ReminderDispatcher {
    policy: Arc<dyn ReminderPolicyStore>,
    ledger: Arc<dyn ReminderLedger>,
    notifications: Arc<dyn NotificationSink>,
    notifier: Arc<dyn Notifier>,
}

impl ReminderDispatcher {
    /// Create a new dispatcher over the given collaborators.
    pub fn new(
        policy: Arc<dyn ReminderPolicyStore>,
        ledger: Arc<dyn ReminderLedger>,
        notifications: Arc<dyn NotificationSink>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            policy,
            ledger,
            notifications,
            notifier,
        }
    }

    /// Evaluate every (invoice, rule) pair and dispatch the unrecorded
    /// satisfied ones.
    ///
    /// Fetches the enabled rules once. A pair-level failure is logged and
    /// counted, and the run continues; only a policy-store failure is
    /// fatal here.
    pub async fn dispatch(
        &self,
        run_date: NaiveDate,
        overdue: &[OverdueInvoice],
    ) -> AppResult<RunSummary> {
        let rules = self.policy.enabled_rules().await?;
        let mut summary = RunSummary::new(run_date);

        for item in overdue {
            for rule in &rules {
                if !rule.is_satisfied_by(item.days_overdue) {
                    continue;
                }

                match self.dispatch_pair(item, rule).await {
                    Ok(PairOutcome::Dispatched) => {
                        summary.record_sent(&item.invoice.invoice_number, item.days_overdue);
                    }
                    Ok(PairOutcome::AlreadyRecorded) => {
                        summary.record_skipped(&item.invoice.invoice_number, item.days_overdue);
                    }
                    Err(e) => {
                        error!(
                            invoice = %item.invoice.invoice_number,
                            threshold_days = rule.threshold_days,
                            error = %e,
                            "Failed to dispatch reminder pair"
                        );
                        summary.record_failed(&item.invoice.invoice_number, item.days_overdue);
                    }
                }
            }
        }

        Ok(summary)
    }

    async fn dispatch_pair(
        &self,
        item: &OverdueInvoice,
        rule: &ReminderRule,
    ) -> AppResult<PairOutcome> {
        if self
            .ledger
            .exists(item.invoice.id, rule.threshold_days)
            .await?
        {
            return Ok(PairOutcome::AlreadyRecorded);
        }

        self.notifications
            .publish(build_notification(item, rule))
            .await?;

        let message = build_message(item, rule);
        let message_sent = match self.notifier.deliver(&message).await {
            Ok(sent) => sent,
            Err(e) => {
                warn!(
                    invoice = %item.invoice.invoice_number,
                    threshold_days = rule.threshold_days,
                    error = %e,
                    "Outbound reminder delivery failed; will be reconciled later"
                );
                false
            }
        };

        let claimed = self
            .ledger
            .record(item.invoice.id, rule.threshold_days, message_sent)
            .await?;
        if !claimed {
            warn!(
                invoice = %item.invoice.invoice_number,
                threshold_days = rule.threshold_days,
                "Reminder pair was recorded concurrently; duplicate notification written"
            );
        }

        info!(
            invoice = %item.invoice.invoice_number,
            customer = %item.customer.name,
            days_overdue = item.days_overdue,
            threshold_days = rule.threshold_days,
            message_sent,
            "Dispatched overdue-invoice reminder"
        );

        Ok(PairOutcome::Dispatched)
    }
}

fn build_notification(item: &OverdueInvoice, rule: &ReminderRule) -> NewNotification {
    NewNotification::admin_broadcast(
        format!(
            "Invoice {} is {} days overdue",
            item.invoice.invoice_number, item.days_overdue
        ),
        format!(
            "Invoice {} for {} is {} days overdue (reminder tier: {} days). Amount due: {}.",
            item.invoice.invoice_number,
            item.customer.name,
            item.days_overdue,
            rule.threshold_days,
            item.invoice.total_amount
        ),
        NOTIFICATION_KIND,
    )
    .with_invoice(item.invoice.id)
}

fn build_message(item: &OverdueInvoice, rule: &ReminderRule) -> ReminderMessage {
    ReminderMessage {
        invoice_number: item.invoice.invoice_number.clone(),
        customer_name: item.customer.name.clone(),
        customer_email: item.customer.email.clone(),
        days_overdue: item.days_overdue,
        threshold_days: rule.threshold_days,
        amount: item.invoice.total_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::OverdueScanner;
    use crate::test_support::{
        customer, invoice, rule, InMemoryInvoices, InMemoryLedger, InMemoryPolicy, InMemorySink,
        StubNotifier,
    };
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Scan `invoices` as of `today` and dispatch with the given stores.
    async fn run_dispatch(
        today: NaiveDate,
        invoices: InMemoryInvoices,
        policy: InMemoryPolicy,
        ledger: Arc<InMemoryLedger>,
        sink: Arc<InMemorySink>,
        notifier: Arc<StubNotifier>,
    ) -> RunSummary {
        let scanner = OverdueScanner::new(Arc::new(invoices));
        let overdue = scanner.scan(today).await.unwrap();
        let dispatcher =
            ReminderDispatcher::new(Arc::new(policy), ledger, sink, notifier);
        dispatcher.dispatch(today, &overdue).await.unwrap()
    }

    #[tokio::test]
    async fn ten_days_overdue_with_threshold_seven_dispatches_once() {
        let today = date(2026, 4, 11);
        let inv = invoice("INV-0007", date(2026, 4, 1));
        let invoice_id = inv.id;
        let ledger = Arc::new(InMemoryLedger::default());
        let sink = Arc::new(InMemorySink::default());

        let summary = run_dispatch(
            today,
            InMemoryInvoices::new(vec![(inv, customer("Acme"))]),
            InMemoryPolicy::new(vec![rule(7)]),
            Arc::clone(&ledger),
            Arc::clone(&sink),
            Arc::new(StubNotifier::default()),
        )
        .await;

        assert_eq!(summary.sent_count, 1);
        assert_eq!(summary.entries.len(), 1);
        assert_eq!(summary.entries[0].invoice_number, "INV-0007");
        assert_eq!(summary.entries[0].days_overdue, 10);
        assert!(summary.entries[0].sent);

        assert!(ledger.contains(invoice_id, 7).await);
        let published = sink.published().await;
        assert_eq!(published.len(), 1);
        assert!(published[0].message.contains("INV-0007"));
        assert!(published[0].message.contains("Acme"));
        assert_eq!(published[0].kind, NOTIFICATION_KIND);
        assert_eq!(published[0].related_invoice_id, Some(invoice_id));
    }

    #[tokio::test]
    async fn unsatisfied_threshold_produces_nothing() {
        let today = date(2026, 4, 11);
        let ledger = Arc::new(InMemoryLedger::default());
        let sink = Arc::new(InMemorySink::default());

        let summary = run_dispatch(
            today,
            InMemoryInvoices::new(vec![(invoice("INV-0007", date(2026, 4, 1)), customer("Acme"))]),
            InMemoryPolicy::new(vec![rule(15)]),
            Arc::clone(&ledger),
            Arc::clone(&sink),
            Arc::new(StubNotifier::default()),
        )
        .await;

        assert_eq!(summary.sent_count, 0);
        assert!(summary.entries.is_empty());
        assert!(sink.published().await.is_empty());
        assert!(ledger.is_empty().await);
    }

    #[tokio::test]
    async fn catch_up_fires_every_unrecorded_threshold_in_one_run() {
        let today = date(2026, 4, 21);
        let inv = invoice("INV-0020", date(2026, 4, 1));
        let invoice_id = inv.id;
        let ledger = Arc::new(InMemoryLedger::default());
        let sink = Arc::new(InMemorySink::default());

        let summary = run_dispatch(
            today,
            InMemoryInvoices::new(vec![(inv, customer("Acme"))]),
            InMemoryPolicy::new(vec![rule(3), rule(7), rule(15)]),
            Arc::clone(&ledger),
            Arc::clone(&sink),
            Arc::new(StubNotifier::default()),
        )
        .await;

        assert_eq!(summary.sent_count, 3);
        assert_eq!(sink.published().await.len(), 3);
        for threshold in [3, 7, 15] {
            assert!(ledger.contains(invoice_id, threshold).await);
        }
    }

    #[tokio::test]
    async fn rules_are_applied_in_ascending_threshold_order() {
        let today = date(2026, 4, 21);
        let sink = Arc::new(InMemorySink::default());

        run_dispatch(
            today,
            InMemoryInvoices::new(vec![(invoice("INV-0020", date(2026, 4, 1)), customer("Acme"))]),
            InMemoryPolicy::new(vec![rule(15), rule(3), rule(7)]),
            Arc::new(InMemoryLedger::default()),
            Arc::clone(&sink),
            Arc::new(StubNotifier::default()),
        )
        .await;

        let tiers: Vec<String> = sink
            .published()
            .await
            .iter()
            .map(|n| n.message.clone())
            .collect();
        assert!(tiers[0].contains("tier: 3 days"));
        assert!(tiers[1].contains("tier: 7 days"));
        assert!(tiers[2].contains("tier: 15 days"));
    }

    #[tokio::test]
    async fn recorded_pairs_are_skipped_without_side_effects() {
        let today = date(2026, 4, 11);
        let inv = invoice("INV-0007", date(2026, 4, 1));
        let invoice_id = inv.id;
        let ledger = Arc::new(InMemoryLedger::default());
        ledger.seed(invoice_id, 7, false).await;
        let sink = Arc::new(InMemorySink::default());

        let summary = run_dispatch(
            today,
            InMemoryInvoices::new(vec![(inv, customer("Acme"))]),
            InMemoryPolicy::new(vec![rule(7)]),
            Arc::clone(&ledger),
            Arc::clone(&sink),
            Arc::new(StubNotifier::default()),
        )
        .await;

        assert_eq!(summary.sent_count, 0);
        assert_eq!(summary.skipped_count, 1);
        assert_eq!(summary.entries.len(), 1);
        assert!(!summary.entries[0].sent);
        assert!(sink.published().await.is_empty());
        assert_eq!(ledger.len().await, 1);
    }

    #[tokio::test]
    async fn an_immediate_second_run_sends_nothing_new() {
        let today = date(2026, 4, 21);
        let inv = invoice("INV-0020", date(2026, 4, 1));
        let ledger = Arc::new(InMemoryLedger::default());
        let sink = Arc::new(InMemorySink::default());
        let rows = vec![(inv, customer("Acme"))];

        let first = run_dispatch(
            today,
            InMemoryInvoices::new(rows.clone()),
            InMemoryPolicy::new(vec![rule(3), rule(7), rule(15)]),
            Arc::clone(&ledger),
            Arc::clone(&sink),
            Arc::new(StubNotifier::default()),
        )
        .await;
        let second = run_dispatch(
            today,
            InMemoryInvoices::new(rows),
            InMemoryPolicy::new(vec![rule(3), rule(7), rule(15)]),
            Arc::clone(&ledger),
            Arc::clone(&sink),
            Arc::new(StubNotifier::default()),
        )
        .await;

        assert_eq!(first.sent_count, 3);
        assert_eq!(second.sent_count, 0);
        assert_eq!(second.skipped_count, 3);
        assert_eq!(sink.published().await.len(), 3);
        assert_eq!(ledger.len().await, 3);
    }

    #[tokio::test]
    async fn disabled_rules_never_fire() {
        let today = date(2026, 4, 21);
        let sink = Arc::new(InMemorySink::default());
        let mut disabled = rule(3);
        disabled.enabled = false;

        let summary = run_dispatch(
            today,
            InMemoryInvoices::new(vec![(invoice("INV-0020", date(2026, 4, 1)), customer("Acme"))]),
            InMemoryPolicy::new(vec![disabled, rule(7)]),
            Arc::new(InMemoryLedger::default()),
            Arc::clone(&sink),
            Arc::new(StubNotifier::default()),
        )
        .await;

        assert_eq!(summary.sent_count, 1);
        assert!(sink.published().await[0].message.contains("tier: 7 days"));
    }

    #[tokio::test]
    async fn ledger_failure_for_one_invoice_does_not_block_others() {
        let today = date(2026, 4, 11);
        let failing = invoice("INV-0001", date(2026, 4, 1));
        let healthy = invoice("INV-0002", date(2026, 4, 1));
        let healthy_id = healthy.id;
        let ledger = Arc::new(InMemoryLedger::failing_for(failing.id));
        let sink = Arc::new(InMemorySink::default());

        let summary = run_dispatch(
            today,
            InMemoryInvoices::new(vec![
                (failing, customer("Acme")),
                (healthy, customer("Globex")),
            ]),
            InMemoryPolicy::new(vec![rule(7)]),
            Arc::clone(&ledger),
            Arc::clone(&sink),
            Arc::new(StubNotifier::default()),
        )
        .await;

        assert_eq!(summary.sent_count, 1);
        assert_eq!(summary.failed_count, 1);
        assert!(ledger.contains(healthy_id, 7).await);
        // Notification-before-ledger: the failing pair still wrote its
        // notification, so the next run produces a harmless duplicate
        // rather than losing the reminder.
        assert_eq!(sink.published().await.len(), 2);
    }

    #[tokio::test]
    async fn delivery_failure_still_records_the_pair_as_unsent_message() {
        let today = date(2026, 4, 11);
        let inv = invoice("INV-0007", date(2026, 4, 1));
        let invoice_id = inv.id;
        let ledger = Arc::new(InMemoryLedger::default());

        let summary = run_dispatch(
            today,
            InMemoryInvoices::new(vec![(inv, customer("Acme"))]),
            InMemoryPolicy::new(vec![rule(7)]),
            Arc::clone(&ledger),
            Arc::new(InMemorySink::default()),
            Arc::new(StubNotifier::failing()),
        )
        .await;

        assert_eq!(summary.sent_count, 1);
        assert!(ledger.contains(invoice_id, 7).await);
        assert_eq!(ledger.message_sent(invoice_id, 7).await, Some(false));
    }

    #[tokio::test]
    async fn successful_delivery_marks_the_message_as_sent() {
        let today = date(2026, 4, 11);
        let inv = invoice("INV-0007", date(2026, 4, 1));
        let invoice_id = inv.id;
        let ledger = Arc::new(InMemoryLedger::default());
        let notifier = Arc::new(StubNotifier::delivering());

        run_dispatch(
            today,
            InMemoryInvoices::new(vec![(inv, customer("Acme"))]),
            InMemoryPolicy::new(vec![rule(7)]),
            Arc::clone(&ledger),
            Arc::new(InMemorySink::default()),
            Arc::clone(&notifier),
        )
        .await;

        assert_eq!(ledger.message_sent(invoice_id, 7).await, Some(true));
        assert_eq!(notifier.deliveries(), 1);
    }

    #[tokio::test]
    async fn notification_sink_failure_leaves_no_ledger_row() {
        let today = date(2026, 4, 11);
        let inv = invoice("INV-0007", date(2026, 4, 1));
        let ledger = Arc::new(InMemoryLedger::default());

        let summary = run_dispatch(
            today,
            InMemoryInvoices::new(vec![(inv, customer("Acme"))]),
            InMemoryPolicy::new(vec![rule(7)]),
            Arc::clone(&ledger),
            Arc::new(InMemorySink::failing()),
            Arc::new(StubNotifier::default()),
        )
        .await;

        assert_eq!(summary.sent_count, 0);
        assert_eq!(summary.failed_count, 1);
        // The pair stays unrecorded, so the next run retries it.
        assert!(ledger.is_empty().await);
    }
}
