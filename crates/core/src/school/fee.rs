//! Fee balance and payment rules.

use crate::error::CoreError;
use crate::lifecycle::StateMachine;
use crate::types::Date;

define_states! {
    FeeState("fee") {
        Draft = "draft",
        Due = "due",
        Partial = "partial",
        Paid = "paid",
        Overdue = "overdue",
    }
    transitions {
        Draft => [Due],
        Due => [Partial, Paid, Overdue],
        Partial => [Paid, Overdue],
        Overdue => [Partial, Paid],
        Paid => [],
    }
}

define_choice! {
    PaymentMethod("payment method") {
        Cash = "cash",
        BankTransfer = "bank_transfer",
        Cheque = "cheque",
        Online = "online",
    }
}

define_choice! {
    Recurrence("recurrence") {
        Monthly = "monthly",
        Quarterly = "quarterly",
        Yearly = "yearly",
    }
}

/// Outstanding amount, rounded to cents.
pub fn balance(amount: f64, paid_amount: f64) -> f64 {
    from_cents(to_cents(amount) - to_cents(paid_amount))
}

fn to_cents(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Result of recording a payment against a fee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentOutcome {
    pub paid_amount: f64,
    pub state: FeeState,
}

/// Add `payment` to the paid amount and decide the next state: `paid` once the
/// amount is covered, otherwise `partial`. Overpayment is rejected.
///
/// Amounts are compared in whole cents; a settled fee records exactly `amount`.
pub fn apply_payment(
    state: FeeState,
    amount: f64,
    paid_amount: f64,
    payment: f64,
) -> Result<PaymentOutcome, CoreError> {
    if !(payment > 0.0) || !payment.is_finite() {
        return Err(CoreError::Validation(format!(
            "Payment must be greater than 0 (got {payment})"
        )));
    }
    let amount_cents = to_cents(amount);
    let new_paid_cents = to_cents(paid_amount) + to_cents(payment);
    if new_paid_cents > amount_cents {
        return Err(CoreError::Validation(format!(
            "Payment of {payment} exceeds the outstanding balance of {}",
            balance(amount, paid_amount)
        )));
    }
    let (target, new_paid) = if new_paid_cents == amount_cents {
        (FeeState::Paid, amount)
    } else {
        (FeeState::Partial, from_cents(new_paid_cents))
    };
    // A second partial payment keeps the fee in `partial`.
    let state = if state == FeeState::Partial && target == FeeState::Partial {
        FeeState::Partial
    } else {
        state.transition(target)?
    };
    Ok(PaymentOutcome {
        paid_amount: new_paid,
        state,
    })
}

/// Whether a fee should be flagged overdue on `today`.
pub fn is_overdue(state: FeeState, due_date: Date, today: Date) -> bool {
    matches!(state, FeeState::Due | FeeState::Partial) && due_date < today
}

pub fn validate_fee_amount(amount: f64) -> Result<(), CoreError> {
    if !(amount > 0.0) || !amount.is_finite() {
        return Err(CoreError::Validation(format!(
            "Fee amount must be greater than 0 (got {amount})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn balance_is_amount_minus_paid() {
        assert_eq!(balance(500.0, 120.0), 380.0);
        assert_eq!(balance(500.0, 0.0), 500.0);
    }

    #[test]
    fn partial_then_full_payment() {
        let first = apply_payment(FeeState::Due, 500.0, 0.0, 200.0).unwrap();
        assert_eq!(first.state, FeeState::Partial);
        assert_eq!(first.paid_amount, 200.0);

        let second = apply_payment(first.state, 500.0, first.paid_amount, 100.0).unwrap();
        assert_eq!(second.state, FeeState::Partial);

        let last = apply_payment(second.state, 500.0, second.paid_amount, 200.0).unwrap();
        assert_eq!(last.state, FeeState::Paid);
        assert_eq!(last.paid_amount, 500.0);
    }

    #[test]
    fn overdue_fee_accepts_payment() {
        let out = apply_payment(FeeState::Overdue, 300.0, 0.0, 300.0).unwrap();
        assert_eq!(out.state, FeeState::Paid);
    }

    #[test]
    fn draft_fee_cannot_be_paid() {
        assert_matches!(
            apply_payment(FeeState::Draft, 300.0, 0.0, 300.0),
            Err(CoreError::InvalidTransition { from: "draft", to: "paid", .. })
        );
    }

    #[test]
    fn overpayment_and_zero_payment_are_rejected() {
        assert!(apply_payment(FeeState::Due, 100.0, 50.0, 60.0).is_err());
        assert!(apply_payment(FeeState::Due, 100.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn settling_the_exact_balance_ignores_float_noise() {
        let out = apply_payment(FeeState::Partial, 100.7, 50.4, 50.3).unwrap();
        assert_eq!(out.state, FeeState::Paid);
        assert_eq!(out.paid_amount, 100.7);

        let out = apply_payment(FeeState::Partial, 1000.3, 1000.1, 0.2).unwrap();
        assert_eq!(out.state, FeeState::Paid);
        assert_eq!(out.paid_amount, 1000.3);
    }

    #[test]
    fn partial_amounts_are_kept_to_the_cent() {
        let out = apply_payment(FeeState::Due, 100.0, 0.1, 0.2).unwrap();
        assert_eq!(out.state, FeeState::Partial);
        assert_eq!(out.paid_amount, 0.3);
        assert_eq!(balance(1000.3, 1000.1), 0.2);
    }

    #[test]
    fn overdue_only_for_unpaid_fees_past_due() {
        let today = d(2026, 6, 10);
        assert!(is_overdue(FeeState::Due, d(2026, 6, 9), today));
        assert!(is_overdue(FeeState::Partial, d(2026, 6, 1), today));
        assert!(!is_overdue(FeeState::Due, d(2026, 6, 10), today));
        assert!(!is_overdue(FeeState::Paid, d(2026, 6, 1), today));
        assert!(!is_overdue(FeeState::Overdue, d(2026, 6, 1), today));
        assert!(!is_overdue(FeeState::Draft, d(2026, 6, 1), today));
    }
}
