//! Integration tests for domain_billing
//!
//! Each scenario runs the accounting engine against a seeded in-memory
//! record store, the same way an application would.

use std::sync::Arc;

use core_kernel::{ContactId, Currency, DomainPort, Money, PolicyId, PortError};
use proptest::prelude::*;
use rust_decimal_macros::dec;

use domain_billing::{
    BillingError, BillingSchedule, CancellationDecision, Contact, InMemoryRecordStore, Invoice,
    InvoiceQuery, Payment, PaymentQuery, PaymentRequest, Policy, PolicyAccounting, RecordStore,
    RecordStoreExt,
};
use test_utils::{
    assert_invoice_dates_derived, assert_invoices_sum_to, assert_money_eq, assert_money_positive,
    assert_money_zero,
    assert_ordered_by_bill_date, effective_date_strategy, schedule_strategy,
    usd_premium_strategy, usd, ymd, DateFixtures, MoneyFixtures, TestPolicyBuilder,
};

fn seed_policy(schedule: BillingSchedule) -> (test_utils::SeededPolicy, PolicyAccounting) {
    let seeded = TestPolicyBuilder::new().with_schedule(schedule).seed();
    let accounting = seeded.accounting().unwrap();
    (seeded, accounting)
}

/// Store that accepts a policy's first invoice batch and rejects every
/// later one
struct RejectingBatchStore(Arc<InMemoryRecordStore>);

impl DomainPort for RejectingBatchStore {}

impl RecordStore for RejectingBatchStore {
    fn get_policy(&self, id: PolicyId) -> Result<Policy, PortError> {
        self.0.get_policy(id)
    }

    fn save_policy(&self, policy: &Policy) -> Result<(), PortError> {
        self.0.save_policy(policy)
    }

    fn get_contact(&self, id: ContactId) -> Result<Contact, PortError> {
        self.0.get_contact(id)
    }

    fn save_contact(&self, contact: &Contact) -> Result<(), PortError> {
        self.0.save_contact(contact)
    }

    fn find_invoices(&self, policy_id: PolicyId, query: &InvoiceQuery) -> Result<Vec<Invoice>, PortError> {
        self.0.find_invoices(policy_id, query)
    }

    fn replace_invoices(&self, policy: &Policy, invoices: Vec<Invoice>) -> Result<usize, PortError> {
        if self.0.has_invoices(policy.id)? {
            return Err(PortError::internal("disk full"));
        }
        self.0.replace_invoices(policy, invoices)
    }

    fn update_invoice(&self, invoice: &Invoice) -> Result<(), PortError> {
        self.0.update_invoice(invoice)
    }

    fn find_payments(&self, policy_id: PolicyId, query: &PaymentQuery) -> Result<Vec<Payment>, PortError> {
        self.0.find_payments(policy_id, query)
    }

    fn insert_payment(&self, payment: &Payment) -> Result<(), PortError> {
        self.0.insert_payment(payment)
    }
}

// ============================================================================
// Invoice generation
// ============================================================================

mod invoice_generation {
    use super::*;

    #[test]
    fn test_annual_policy_gets_one_invoice_for_full_premium() {
        let (_, accounting) = seed_policy(BillingSchedule::Annual);

        let invoices = accounting.invoices().unwrap();
        assert_eq!(invoices.len(), 1);
        assert_money_eq(&invoices[0].amount_due(), dec!(1200));
        assert_eq!(invoices[0].bill_date(), ymd(2015, 1, 1));
        assert_eq!(invoices[0].due_date(), DateFixtures::first_due_date());
        assert_eq!(invoices[0].cancel_date(), DateFixtures::first_cancel_date());
    }

    #[test]
    fn test_every_schedule_bills_the_full_premium() {
        for schedule in BillingSchedule::ALL {
            let (seeded, accounting) = seed_policy(schedule);
            let invoices = accounting.invoices().unwrap();

            assert_eq!(invoices.len(), schedule.installment_count() as usize, "{}", schedule);
            assert_invoices_sum_to(&invoices, &seeded.policy.annual_premium);
            assert_ordered_by_bill_date(&invoices);
            invoices.iter().for_each(assert_invoice_dates_derived);
        }
    }

    #[test]
    fn test_semi_annual_bills_three_installments_four_months_apart() {
        let seeded = TestPolicyBuilder::new()
            .with_schedule(BillingSchedule::SemiAnnual)
            .with_premium(MoneyFixtures::usd_100())
            .seed();
        let invoices = seeded.accounting().unwrap().invoices().unwrap();

        let dates: Vec<_> = invoices.iter().map(|i| i.bill_date()).collect();
        assert_eq!(dates, vec![ymd(2015, 1, 1), ymd(2015, 5, 1), ymd(2015, 9, 1)]);

        let amounts: Vec<_> = invoices.iter().map(|i| i.amount_due().amount()).collect();
        assert_eq!(amounts, vec![dec!(33.33), dec!(33.33), dec!(33.34)]);
    }

    #[test]
    fn test_month_end_effective_date_clamps_without_drifting() {
        let seeded = TestPolicyBuilder::new()
            .with_schedule(BillingSchedule::Monthly)
            .with_effective_date(DateFixtures::month_end())
            .seed();
        let invoices = seeded.accounting().unwrap().invoices().unwrap();

        assert_eq!(invoices[1].bill_date(), ymd(2015, 2, 28));
        assert_eq!(invoices[2].bill_date(), ymd(2015, 3, 31));
        assert_eq!(invoices[0].due_date(), ymd(2015, 2, 28));
    }

    #[test]
    fn test_binding_twice_does_not_regenerate() {
        let (seeded, first) = seed_policy(BillingSchedule::Quarterly);
        let ids: Vec<_> = first.invoices().unwrap().iter().map(|i| i.id()).collect();

        let second = seeded.accounting().unwrap();
        let again: Vec<_> = second.invoices().unwrap().iter().map(|i| i.id()).collect();

        assert_eq!(ids, again);
        assert!(second.invoice_history().unwrap().iter().all(|i| !i.is_deleted()));
    }

    #[test]
    fn test_make_invoices_retires_previous_batch() {
        let (_, accounting) = seed_policy(BillingSchedule::Quarterly);

        accounting.make_invoices().unwrap();

        let history = accounting.invoice_history().unwrap();
        assert_eq!(history.len(), 8);
        assert_eq!(history.iter().filter(|i| i.is_deleted()).count(), 4);
        assert_eq!(accounting.invoices().unwrap().len(), 4);
    }

    #[test]
    fn test_regenerated_batch_matches_previous_batch() {
        let (_, accounting) = seed_policy(BillingSchedule::Quarterly);
        let terms = |invoices: Vec<Invoice>| -> Vec<_> {
            invoices.iter().map(|i| (i.bill_date(), i.amount_due())).collect()
        };
        let before = terms(accounting.invoices().unwrap());

        let regenerated = accounting.make_invoices().unwrap();

        assert_eq!(terms(regenerated), before);
        assert_eq!(terms(accounting.invoices().unwrap()), before);
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let store: Arc<dyn RecordStore> = Arc::new(InMemoryRecordStore::new());

        let result = PolicyAccounting::new(store, PolicyId::new());
        assert!(matches!(result, Err(BillingError::PolicyNotFound(_))));
    }
}

// ============================================================================
// Balances
// ============================================================================

mod balances {
    use super::*;

    #[test]
    fn test_quarterly_balance_on_effective_date() {
        let (_, accounting) = seed_policy(BillingSchedule::Quarterly);
        assert_money_eq(&accounting.account_balance(ymd(2015, 1, 1)).unwrap(), dec!(300));
    }

    #[test]
    fn test_quarterly_balance_on_last_bill_date() {
        let (_, accounting) = seed_policy(BillingSchedule::Quarterly);
        let last = accounting.invoices().unwrap()[3].bill_date();

        assert_money_eq(&accounting.account_balance(last).unwrap(), dec!(1200));
    }

    #[test]
    fn test_balance_before_effective_date_is_zero() {
        let (_, accounting) = seed_policy(BillingSchedule::Quarterly);
        assert_money_zero(&accounting.account_balance(ymd(2014, 12, 31)).unwrap());
    }

    #[test]
    fn test_quarterly_payment_clears_balance() {
        let (_, accounting) = seed_policy(BillingSchedule::Quarterly);
        let second = accounting.invoices().unwrap()[1].bill_date();

        accounting.make_payment(PaymentRequest::new(usd(600)).on(second)).unwrap();

        assert_money_zero(&accounting.account_balance(second).unwrap());
    }

    #[test]
    fn test_monthly_half_paid() {
        let (_, accounting) = seed_policy(BillingSchedule::Monthly);
        let invoices = accounting.invoices().unwrap();

        for invoice in &invoices[..6] {
            accounting
                .make_payment(PaymentRequest::new(usd(100)).on(invoice.bill_date()))
                .unwrap();
        }

        assert_money_eq(&accounting.account_balance(invoices[11].bill_date()).unwrap(), dec!(600));
    }

    #[test]
    fn test_two_pay_one_installment_paid() {
        let (_, accounting) = seed_policy(BillingSchedule::TwoPay);
        let invoices = accounting.invoices().unwrap();

        accounting
            .make_payment(PaymentRequest::new(usd(600)).on(invoices[0].bill_date()))
            .unwrap();

        assert_money_eq(&accounting.account_balance(invoices[1].bill_date()).unwrap(), dec!(600));
    }

    #[test]
    fn test_two_pay_paid_in_advance() {
        let (_, accounting) = seed_policy(BillingSchedule::TwoPay);
        let invoices = accounting.invoices().unwrap();
        let first = invoices[0].bill_date();

        accounting.make_payment(PaymentRequest::new(usd(600)).on(first)).unwrap();
        accounting.make_payment(PaymentRequest::new(usd(600)).on(first)).unwrap();

        assert_money_eq(&accounting.account_balance(first).unwrap(), dec!(-600));
        assert_money_zero(&accounting.account_balance(invoices[1].bill_date()).unwrap());
    }

    #[test]
    fn test_payment_after_as_of_is_ignored() {
        let (_, accounting) = seed_policy(BillingSchedule::Annual);

        accounting
            .make_payment(PaymentRequest::new(usd(1200)).on(ymd(2015, 3, 1)))
            .unwrap();

        assert_money_eq(&accounting.account_balance(ymd(2015, 2, 28)).unwrap(), dec!(1200));
        assert_money_zero(&accounting.account_balance(ymd(2015, 3, 1)).unwrap());
    }
}

// ============================================================================
// Payments
// ============================================================================

mod payments {
    use super::*;

    #[test]
    fn test_payment_defaults_to_named_insured() {
        let (seeded, accounting) = seed_policy(BillingSchedule::Annual);

        let payment = accounting
            .make_payment(PaymentRequest::new(usd(100)).on(ymd(2015, 1, 10)))
            .unwrap();

        assert_eq!(payment.contact_id(), seeded.policy.named_insured);
        assert_eq!(accounting.payments().unwrap(), vec![payment]);
    }

    #[test]
    fn test_payment_without_named_insured_has_no_contact() {
        let seeded = TestPolicyBuilder::new().without_named_insured().seed();
        let accounting = seeded.accounting().unwrap();

        let payment = accounting
            .make_payment(PaymentRequest::new(usd(100)).on(ymd(2015, 1, 10)))
            .unwrap();

        assert_eq!(payment.contact_id(), None);
    }

    #[test]
    fn test_payment_from_explicit_contact() {
        let (seeded, accounting) = seed_policy(BillingSchedule::Annual);
        let agent = seeded.policy.agent.unwrap();

        let payment = accounting
            .make_payment(PaymentRequest::new(usd(100)).from_contact(agent).on(ymd(2015, 1, 10)))
            .unwrap();

        assert_eq!(payment.contact_id(), Some(agent));
        assert_eq!(payment.policy_id(), seeded.policy_id());
    }

    #[test]
    fn test_payment_in_other_currency_is_rejected() {
        let (_, accounting) = seed_policy(BillingSchedule::Annual);

        let result = accounting.make_payment(PaymentRequest::new(MoneyFixtures::eur_100()));

        assert!(matches!(result, Err(BillingError::Money(_))));
        assert!(accounting.payments().unwrap().is_empty());
    }

    #[test]
    fn test_payment_without_date_is_recorded_today() {
        let (_, accounting) = seed_policy(BillingSchedule::Annual);

        let payment = accounting.make_payment(PaymentRequest::new(usd(1))).unwrap();

        assert_eq!(payment.transaction_date(), core_kernel::calendar::today());
    }
}

// ============================================================================
// Cancellation
// ============================================================================

mod cancellation {
    use super::*;

    #[test]
    fn test_not_pending_before_due_date() {
        let (_, accounting) = seed_policy(BillingSchedule::Annual);

        assert!(!accounting.pending_cancellation_for_non_pay(ymd(2015, 1, 14)).unwrap());
        assert!(!accounting.pending_cancellation_for_non_pay(ymd(2015, 1, 15)).unwrap());
        assert!(!accounting.pending_cancellation_for_non_pay(ymd(2015, 1, 17)).unwrap());
        assert!(!accounting.pending_cancellation_for_non_pay(ymd(2015, 2, 1)).unwrap());
    }

    #[test]
    fn test_pending_inside_grace_period() {
        let (_, accounting) = seed_policy(BillingSchedule::Annual);

        assert!(accounting.pending_cancellation_for_non_pay(ymd(2015, 2, 2)).unwrap());
        assert!(accounting.pending_cancellation_for_non_pay(ymd(2015, 2, 15)).unwrap());
        assert_money_positive(&accounting.account_balance(DateFixtures::first_due_date()).unwrap());
    }

    #[test]
    fn test_not_pending_after_cancel_date() {
        let (_, accounting) = seed_policy(BillingSchedule::Annual);
        assert!(!accounting.pending_cancellation_for_non_pay(ymd(2015, 2, 16)).unwrap());
    }

    #[test]
    fn test_not_pending_when_paid_by_due_date() {
        let (_, accounting) = seed_policy(BillingSchedule::Annual);

        accounting
            .make_payment(PaymentRequest::new(usd(1200)).on(ymd(2015, 2, 1)))
            .unwrap();

        assert!(!accounting.pending_cancellation_for_non_pay(ymd(2015, 2, 10)).unwrap());
    }

    #[test]
    fn test_unpaid_policy_should_cancel_after_cancel_date() {
        let (_, accounting) = seed_policy(BillingSchedule::Annual);
        let invoice = accounting.invoices().unwrap().remove(0);

        let decision = accounting.evaluate_cancel(ymd(2015, 3, 1)).unwrap();

        assert_eq!(
            decision,
            CancellationDecision::ShouldCancel {
                invoice_id: invoice.id(),
                cancel_date: DateFixtures::first_cancel_date(),
                balance: usd(1200),
            }
        );
    }

    #[test]
    fn test_first_unpaid_installment_decides_cancellation() {
        let (_, accounting) = seed_policy(BillingSchedule::Quarterly);
        let invoices = accounting.invoices().unwrap();
        accounting
            .make_payment(PaymentRequest::new(usd(300)).on(invoices[0].bill_date()))
            .unwrap();

        let decision = accounting.evaluate_cancel(ymd(2016, 1, 1)).unwrap();

        assert_eq!(
            decision,
            CancellationDecision::ShouldCancel {
                invoice_id: invoices[1].id(),
                cancel_date: ymd(2015, 5, 15),
                balance: usd(300),
            }
        );
    }

    #[test]
    fn test_pending_today_for_unpaid_recent_policy() {
        let effective = core_kernel::calendar::today()
            .checked_sub_days(chrono::Days::new(40))
            .unwrap();
        let seeded = TestPolicyBuilder::new().with_effective_date(effective).seed();
        let accounting = seeded.accounting().unwrap();

        assert!(accounting.pending_cancellation_today().unwrap());

        accounting.make_payment(PaymentRequest::new(usd(1200)).on(effective)).unwrap();
        assert!(!accounting.pending_cancellation_today().unwrap());
    }

    #[test]
    fn test_cancel_date_itself_triggers_cancellation() {
        let (_, accounting) = seed_policy(BillingSchedule::Annual);
        assert!(accounting.evaluate_cancel(ymd(2015, 2, 15)).unwrap().should_cancel());
    }

    #[test]
    fn test_good_standing_before_any_cancel_date() {
        let (_, accounting) = seed_policy(BillingSchedule::Annual);

        assert_eq!(
            accounting.evaluate_cancel(ymd(2015, 2, 14)).unwrap(),
            CancellationDecision::InGoodStanding
        );
    }

    #[test]
    fn test_paid_policy_stays_in_good_standing() {
        let (_, accounting) = seed_policy(BillingSchedule::Quarterly);

        for invoice in accounting.invoices().unwrap() {
            accounting
                .make_payment(PaymentRequest::new(usd(300)).on(invoice.bill_date()))
                .unwrap();
        }

        assert!(!accounting.evaluate_cancel(ymd(2016, 1, 1)).unwrap().should_cancel());
    }

    #[test]
    fn test_evaluate_cancel_does_not_change_records() {
        let (seeded, accounting) = seed_policy(BillingSchedule::Annual);

        accounting.evaluate_cancel(ymd(2015, 3, 1)).unwrap();

        assert_eq!(seeded.store.get_policy(seeded.policy_id()).unwrap(), seeded.policy);
        assert_eq!(seeded.store.active_invoices(seeded.policy_id()).unwrap().len(), 1);
    }
}

// ============================================================================
// Schedule changes
// ============================================================================

mod schedule_changes {
    use super::*;

    fn retired_count(accounting: &PolicyAccounting) -> usize {
        accounting.invoice_history().unwrap().iter().filter(|i| i.is_deleted()).count()
    }

    #[test]
    fn test_quarterly_to_monthly_and_back() {
        let (seeded, mut accounting) = seed_policy(BillingSchedule::Quarterly);

        let monthly = accounting.change_billing_schedule(BillingSchedule::Monthly).unwrap();
        assert_eq!(monthly.len(), 12);
        assert_eq!(retired_count(&accounting), 4);
        assert_eq!(accounting.invoices().unwrap().len(), 12);

        let quarterly = accounting.change_billing_schedule(BillingSchedule::Quarterly).unwrap();
        assert_eq!(quarterly.len(), 4);
        assert_eq!(retired_count(&accounting), 16);

        let stored = seeded.store.get_policy(seeded.policy_id()).unwrap();
        assert_eq!(stored.billing_schedule(), BillingSchedule::Quarterly);
        assert_eq!(accounting.policy().billing_schedule(), BillingSchedule::Quarterly);
    }

    #[test]
    fn test_quarterly_to_two_pay() {
        let (_, mut accounting) = seed_policy(BillingSchedule::Quarterly);

        let invoices = accounting.change_billing_schedule_named("Two-Pay").unwrap();

        assert_eq!(invoices.len(), 2);
        assert_eq!(retired_count(&accounting), 4);
        assert_invoices_sum_to(&invoices, &usd(1200));
    }

    #[test]
    fn test_payments_survive_schedule_change() {
        let (_, mut accounting) = seed_policy(BillingSchedule::Quarterly);
        accounting
            .make_payment(PaymentRequest::new(usd(300)).on(ymd(2015, 1, 1)))
            .unwrap();

        accounting.change_billing_schedule(BillingSchedule::Annual).unwrap();

        assert_eq!(accounting.payments().unwrap().len(), 1);
        assert_money_eq(&accounting.account_balance(ymd(2015, 1, 1)).unwrap(), dec!(900));
    }

    #[test]
    fn test_unknown_schedule_leaves_everything_untouched() {
        let (seeded, mut accounting) = seed_policy(BillingSchedule::Quarterly);
        let before = accounting.invoices().unwrap();

        let result = accounting.change_billing_schedule_named("Weekly");

        assert!(matches!(result, Err(BillingError::InvalidSchedule(name)) if name == "Weekly"));
        assert_eq!(accounting.invoices().unwrap(), before);
        assert_eq!(retired_count(&accounting), 0);
        assert_eq!(
            seeded.store.get_policy(seeded.policy_id()).unwrap().billing_schedule(),
            BillingSchedule::Quarterly
        );
    }

    #[test]
    fn test_failed_regeneration_leaves_schedule_unchanged() {
        let seeded = TestPolicyBuilder::new().with_schedule(BillingSchedule::Quarterly).seed();
        let store = Arc::new(RejectingBatchStore(seeded.store.clone()));
        let mut accounting = PolicyAccounting::new(store.clone(), seeded.policy_id()).unwrap();

        let result = accounting.change_billing_schedule(BillingSchedule::Monthly);

        assert!(matches!(result, Err(BillingError::Store(_))));
        assert_eq!(accounting.policy().billing_schedule(), BillingSchedule::Quarterly);
        assert_eq!(
            store.get_policy(seeded.policy_id()).unwrap().billing_schedule(),
            BillingSchedule::Quarterly
        );
        assert_eq!(store.active_invoices(seeded.policy_id()).unwrap().len(), 4);
    }

    #[test]
    fn test_retired_invoices_are_queryable() {
        let (seeded, mut accounting) = seed_policy(BillingSchedule::TwoPay);
        accounting.change_billing_schedule(BillingSchedule::Monthly).unwrap();

        let retired = seeded
            .store
            .find_invoices(seeded.policy_id(), &InvoiceQuery::retired())
            .unwrap();

        assert_eq!(retired.len(), 2);
        assert!(retired.iter().all(|i| i.amount_due() == usd(600)));
    }
}

// ============================================================================
// Serialization
// ============================================================================

mod serialization {
    use super::*;
    use domain_billing::ContactRole;

    #[test]
    fn test_schedules_serialize_by_display_name() {
        let names: Vec<String> = BillingSchedule::ALL
            .iter()
            .map(|s| serde_json::to_string(s).unwrap())
            .collect();

        assert_eq!(
            names,
            vec!["\"Annual\"", "\"Two-Pay\"", "\"Semi-Annual\"", "\"Quarterly\"", "\"Monthly\""]
        );
    }

    #[test]
    fn test_contact_role_serializes_with_space() {
        let json = serde_json::to_string(&ContactRole::NamedInsured).unwrap();
        assert_eq!(json, "\"Named Insured\"");
    }

    #[test]
    fn test_decision_serializes_externally_tagged() {
        let json = serde_json::to_value(CancellationDecision::InGoodStanding).unwrap();
        assert_eq!(json, serde_json::json!("InGoodStanding"));
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn generated_invoices_sum_to_premium(
        schedule in schedule_strategy(),
        premium in usd_premium_strategy(),
        effective in effective_date_strategy(),
    ) {
        let seeded = TestPolicyBuilder::new()
            .with_schedule(schedule)
            .with_premium(premium)
            .with_effective_date(effective)
            .seed();
        let invoices = seeded.accounting().unwrap().invoices().unwrap();

        let amounts: Vec<Money> = invoices.iter().map(|i| i.amount_due()).collect();
        let total = Money::checked_sum(Currency::USD, &amounts).unwrap();
        prop_assert_eq!(total, premium);
        prop_assert_eq!(invoices.len(), schedule.installment_count() as usize);
        prop_assert_eq!(invoices[0].bill_date(), effective);
    }

    #[test]
    fn balance_never_decreases_without_payments(
        schedule in schedule_strategy(),
        effective in effective_date_strategy(),
        offsets in proptest::collection::vec(0u64..400u64, 2..8),
    ) {
        let seeded = TestPolicyBuilder::new()
            .with_schedule(schedule)
            .with_effective_date(effective)
            .seed();
        let accounting = seeded.accounting().unwrap();

        let mut offsets = offsets;
        offsets.sort_unstable();

        let mut previous = Money::zero(Currency::USD);
        for offset in offsets {
            let as_of = core_kernel::calendar::add_days(effective, offset).unwrap();
            let balance = accounting.account_balance(as_of).unwrap();
            prop_assert!(balance.amount() >= previous.amount());
            previous = balance;
        }
    }
}
