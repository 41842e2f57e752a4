//! Reimbursement calculator
//!
//! Splits an invoice into the insurer share and the self-paid rest. The
//! category's remaining budget is a hard ceiling on the insurer share.

use crate::error::{BenefitError, BenefitResult};
use crate::models::{Category, Money};

/// How an invoice is split between insurer and patient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reimbursement {
    pub reimbursed: Money,
    pub self_pay: Money,
}

/// Compute the capped reimbursement for an invoice
///
/// `current_remaining` must be the category's remaining budget for the period
/// the invoice is booked into; the calculator trusts the caller on this.
pub fn compute_reimbursement(
    category: &Category,
    invoice_amount: Money,
    current_remaining: Money,
) -> BenefitResult<Reimbursement> {
    if invoice_amount.is_negative() {
        return Err(BenefitError::InvalidAmount(format!(
            "invoice amount cannot be negative ({})",
            invoice_amount.to_decimal_string()
        )));
    }

    let raw = invoice_amount.scale(category.coverage).min(invoice_amount);
    let reimbursed = raw.min(current_remaining).non_negative();
    let self_pay = (invoice_amount - reimbursed).non_negative();

    Ok(Reimbursement {
        reimbursed,
        self_pay,
    })
}
