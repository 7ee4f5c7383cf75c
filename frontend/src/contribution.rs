//! Contribution workflow: one tagged state machine from browsing the
//! registry through funding a gift.
//!
//! The machine is pure: it validates, transitions, and hands back the
//! values its driver needs (the request to send, the payment config to
//! launch, the patch to apply). All IO lives in the `use_contribution`
//! hook. Events arriving in the wrong state are guarded no-ops, which is
//! what protects late network callbacks from acting on cleared state.

use serde::Serialize;
use shared::{
    format_minor, to_major_units, to_minor_units, ContributeRequest, GiftItem, Representing,
};
use thiserror::Error;

/// Pre-filled contribution amount, major units, when a gift carries no
/// per-guest floor.
pub const DEFAULT_MIN_MAJOR: i64 = 5_000;

/// Quick-pick contribution amounts offered in the form, major units.
pub const SUGGESTED_AMOUNTS_MAJOR: [i64; 4] = [5_000, 10_000, 25_000, 50_000];

/// Transient form state while a gift is selected. Amount is what the guest
/// typed: whole major units.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContributeForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub representing: Option<Representing>,
    pub amount: i64,
}

/// Ephemeral checkout configuration handed to the payment boundary.
///
/// Created once a transaction reference exists; dropped when the payment
/// resolves either way. Serializes to the field names the inline checkout
/// script expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentConfig {
    #[serde(rename = "ref")]
    pub reference: String,
    pub email: String,
    /// Minor currency units.
    pub amount: i64,
    #[serde(rename = "key")]
    pub public_key: String,
}

/// A confirmed contribution, ready to be folded into the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmedContribution {
    pub gift_id: String,
    pub gift_title: String,
    /// Minor currency units.
    pub amount_minor: i64,
    pub transaction_no: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState {
    /// No gift selected; the carousel is interactive.
    Browsing,
    /// Form open for one gift.
    Selecting { gift_id: String, form: ContributeForm },
    /// Contribution-creation request in flight.
    Submitting { gift_id: String, form: ContributeForm },
    /// Checkout widget active; we only observe its callbacks.
    AwaitingPayment {
        gift_id: String,
        gift_title: String,
        amount_minor: i64,
        config: PaymentConfig,
    },
    /// Confirmation call in flight. The money has already moved.
    Confirming {
        gift_id: String,
        gift_title: String,
        amount_minor: i64,
        reference: String,
    },
    /// Contribution confirmed; success modal shows the transaction number.
    Settled { transaction_no: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("This gift has been fully funded. Please choose another one.")]
    AlreadyFunded,
    #[error("Another contribution is already in progress")]
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields and select an amount")]
    MissingFields,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Minimum contribution is {0}")]
    BelowMinimum(String),
    #[error("Maximum contribution is {0}")]
    AboveMaximum(String),
    #[error("Maximum contribution for this gift is {0}")]
    ExceedsRemaining(String),
}

/// Edits applied to the open form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEdit {
    Name(String),
    Phone(String),
    Email(String),
    Representing(Option<Representing>),
    Amount(i64),
}

/// The contribution workflow. `Default` starts in `Browsing`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionWorkflow {
    state: WorkflowState,
}

impl Default for ContributionWorkflow {
    fn default() -> Self {
        Self {
            state: WorkflowState::Browsing,
        }
    }
}

impl ContributionWorkflow {
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// Gift the workflow is currently working on, in any non-browsing state.
    pub fn gift_id(&self) -> Option<&str> {
        match &self.state {
            WorkflowState::Browsing | WorkflowState::Settled { .. } => None,
            WorkflowState::Selecting { gift_id, .. }
            | WorkflowState::Submitting { gift_id, .. }
            | WorkflowState::AwaitingPayment { gift_id, .. }
            | WorkflowState::Confirming { gift_id, .. } => Some(gift_id),
        }
    }

    pub fn form(&self) -> Option<&ContributeForm> {
        match &self.state {
            WorkflowState::Selecting { form, .. } | WorkflowState::Submitting { form, .. } => {
                Some(form)
            }
            _ => None,
        }
    }

    /// The create-contribution call is in flight.
    pub fn is_submitting(&self) -> bool {
        matches!(self.state, WorkflowState::Submitting { .. })
    }

    /// The checkout widget or the confirmation call is active.
    pub fn is_processing_payment(&self) -> bool {
        matches!(
            self.state,
            WorkflowState::AwaitingPayment { .. } | WorkflowState::Confirming { .. }
        )
    }

    /// Open the form for `gift`. Fails closed on fully-funded gifts and
    /// while any earlier contribution is still in flight.
    pub fn select(&mut self, gift: &GiftItem) -> Result<(), SelectError> {
        if !matches!(self.state, WorkflowState::Browsing) {
            return Err(SelectError::Busy);
        }
        if gift.is_completed {
            return Err(SelectError::AlreadyFunded);
        }
        let form = ContributeForm {
            amount: gift
                .min_per_guest
                .map(to_major_units)
                .unwrap_or(DEFAULT_MIN_MAJOR),
            ..ContributeForm::default()
        };
        self.state = WorkflowState::Selecting {
            gift_id: gift.id.clone(),
            form,
        };
        Ok(())
    }

    /// Close the form without submitting. Only meaningful while selecting.
    pub fn cancel(&mut self) {
        if matches!(self.state, WorkflowState::Selecting { .. }) {
            self.state = WorkflowState::Browsing;
        }
    }

    /// Apply a field edit to the open form. Ignored in any other state.
    pub fn edit_form(&mut self, edit: FormEdit) {
        if let WorkflowState::Selecting { form, .. } = &mut self.state {
            match edit {
                FormEdit::Name(v) => form.name = v,
                FormEdit::Phone(v) => form.phone = v,
                FormEdit::Email(v) => form.email = v,
                FormEdit::Representing(v) => form.representing = v,
                FormEdit::Amount(v) => form.amount = v,
            }
        }
    }

    /// Run the validation gate and, if it passes, move to `Submitting`,
    /// returning the request the driver should send. On a validation
    /// failure the workflow stays in `Selecting` and no network call may
    /// be made.
    pub fn begin_submit(&mut self, gift: &GiftItem) -> Result<ContributeRequest, ValidationError> {
        let form = match &self.state {
            WorkflowState::Selecting { gift_id, form } if *gift_id == gift.id => form,
            _ => return Err(ValidationError::MissingFields),
        };
        let amount_minor = validate_contribution(form, gift)?;
        let request = ContributeRequest {
            name: form.name.trim().to_string(),
            phone: form.phone.trim().to_string(),
            email: form.email.trim().to_string(),
            representing: form
                .representing
                .map(|r| r.label().to_string())
                .unwrap_or_default(),
            amount: amount_minor,
        };
        self.state = WorkflowState::Submitting {
            gift_id: gift.id.clone(),
            form: form.clone(),
        };
        Ok(request)
    }

    /// The create call failed: back to the form, input intact, so the
    /// guest can retry by hand.
    pub fn submit_failed(&mut self) {
        if let WorkflowState::Submitting { gift_id, form } = &self.state {
            self.state = WorkflowState::Selecting {
                gift_id: gift_id.clone(),
                form: form.clone(),
            };
        }
    }

    /// The server issued a transaction reference: build the checkout
    /// config, close the form, and wait on the payment boundary.
    pub fn submit_succeeded(
        &mut self,
        gift_title: &str,
        transaction_no: &str,
        public_key: &str,
    ) -> Option<PaymentConfig> {
        let WorkflowState::Submitting { gift_id, form } = &self.state else {
            return None;
        };
        let amount_minor = to_minor_units(form.amount);
        let config = PaymentConfig {
            reference: transaction_no.to_string(),
            email: form.email.trim().to_string(),
            amount: amount_minor,
            public_key: public_key.to_string(),
        };
        self.state = WorkflowState::AwaitingPayment {
            gift_id: gift_id.clone(),
            gift_title: gift_title.to_string(),
            amount_minor,
            config: config.clone(),
        };
        Some(config)
    }

    /// The guest closed the checkout widget: a normal exit, nothing moved
    /// on the server.
    pub fn payment_cancelled(&mut self) {
        if matches!(self.state, WorkflowState::AwaitingPayment { .. }) {
            self.state = WorkflowState::Browsing;
        }
    }

    /// The checkout widget reported success: confirm with the server
    /// before touching any local totals.
    pub fn payment_succeeded(&mut self, reference: &str) -> bool {
        let WorkflowState::AwaitingPayment {
            gift_id,
            gift_title,
            amount_minor,
            ..
        } = &self.state
        else {
            return false;
        };
        self.state = WorkflowState::Confirming {
            gift_id: gift_id.clone(),
            gift_title: gift_title.clone(),
            amount_minor: *amount_minor,
            reference: reference.to_string(),
        };
        true
    }

    /// Confirmation accepted: settle and hand back the patch for the
    /// catalog's optimistic update.
    pub fn confirm_succeeded(&mut self) -> Option<ConfirmedContribution> {
        let WorkflowState::Confirming {
            gift_id,
            gift_title,
            amount_minor,
            reference,
        } = &self.state
        else {
            return None;
        };
        let confirmed = ConfirmedContribution {
            gift_id: gift_id.clone(),
            gift_title: gift_title.clone(),
            amount_minor: *amount_minor,
            transaction_no: reference.clone(),
        };
        self.state = WorkflowState::Settled {
            transaction_no: reference.clone(),
        };
        Some(confirmed)
    }

    /// Confirmation rejected. Payment state is torn down anyway; the
    /// money has already moved, recovery is a manual follow-up.
    pub fn confirm_failed(&mut self) {
        if matches!(self.state, WorkflowState::Confirming { .. }) {
            self.state = WorkflowState::Browsing;
        }
    }

    /// Close the success modal.
    pub fn dismiss(&mut self) {
        if matches!(self.state, WorkflowState::Settled { .. }) {
            self.state = WorkflowState::Browsing;
        }
    }
}

/// The client-side validation gate. Returns the contribution amount in
/// minor units; every bound comparison happens after the ×100 conversion.
pub fn validate_contribution(
    form: &ContributeForm,
    gift: &GiftItem,
) -> Result<i64, ValidationError> {
    if form.name.trim().is_empty()
        || form.phone.trim().is_empty()
        || form.email.trim().is_empty()
        || form.representing.is_none()
        || form.amount <= 0
    {
        return Err(ValidationError::MissingFields);
    }
    if !is_valid_email(form.email.trim()) {
        return Err(ValidationError::InvalidEmail);
    }

    let amount_minor = to_minor_units(form.amount);
    if let Some(min) = gift.min_per_guest {
        if amount_minor < min {
            return Err(ValidationError::BelowMinimum(format_minor(min)));
        }
    }
    if let Some(max) = gift.max_per_guest {
        if amount_minor > max {
            return Err(ValidationError::AboveMaximum(format_minor(max)));
        }
    }
    let remaining = gift.remaining_amount();
    if amount_minor > remaining {
        return Err(ValidationError::ExceedsRemaining(format_minor(remaining)));
    }
    Ok(amount_minor)
}

/// `local@domain` with a dotted domain and no whitespace, the same shape
/// the registry's other clients accept.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.split('.').count() >= 2
                && domain.split('.').all(|seg| !seg.is_empty())
        }
        _ => false,
    }
}

/// Quick-pick amounts for `gift`, filtered to its per-guest floor.
pub fn suggested_amounts(gift: &GiftItem) -> Vec<i64> {
    match gift.min_per_guest {
        Some(min) => SUGGESTED_AMOUNTS_MAJOR
            .into_iter()
            .filter(|major| to_minor_units(*major) >= min)
            .collect(),
        None => SUGGESTED_AMOUNTS_MAJOR.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::GiftType;

    fn gift(amount: i64, raised: i64, min: Option<i64>, max: Option<i64>) -> GiftItem {
        GiftItem {
            id: "gift-1".to_string(),
            title: "Honeymoon Fund".to_string(),
            description: "Help us get away".to_string(),
            amount,
            image_url: "/images/honeymoon.jpg".to_string(),
            gift_type: GiftType::Contributory,
            raised_amount: raised,
            max_per_guest: max,
            min_per_guest: min,
            is_taken: false,
            is_completed: raised >= amount,
            created_at: "2026-01-01T00:00:00Z".to_string(),
            progress: 0.0,
            selections: Vec::new(),
            contributors: Vec::new(),
        }
    }

    fn filled_form(amount: i64) -> ContributeForm {
        ContributeForm {
            name: "Ada Lovelace".to_string(),
            phone: "08123456789".to_string(),
            email: "ada@example.com".to_string(),
            representing: Some(Representing::Both),
            amount,
        }
    }

    fn select_and_fill(workflow: &mut ContributionWorkflow, gift: &GiftItem, amount: i64) {
        workflow.select(gift).unwrap();
        workflow.edit_form(FormEdit::Name("Ada Lovelace".to_string()));
        workflow.edit_form(FormEdit::Phone("08123456789".to_string()));
        workflow.edit_form(FormEdit::Email("ada@example.com".to_string()));
        workflow.edit_form(FormEdit::Representing(Some(Representing::Both)));
        workflow.edit_form(FormEdit::Amount(amount));
    }

    #[test]
    fn test_selecting_completed_gift_fails_closed() {
        let mut workflow = ContributionWorkflow::default();
        let done = gift(1_000_000, 1_000_000, None, None);
        assert_eq!(workflow.select(&done), Err(SelectError::AlreadyFunded));
        assert_eq!(workflow.state(), &WorkflowState::Browsing);
    }

    #[test]
    fn test_select_prefills_minimum_bound_in_major_units() {
        let mut workflow = ContributionWorkflow::default();
        workflow.select(&gift(1_000_000, 0, Some(500_000), None)).unwrap();
        assert_eq!(workflow.form().unwrap().amount, 5_000);

        let mut workflow = ContributionWorkflow::default();
        workflow.select(&gift(1_000_000, 0, None, None)).unwrap();
        assert_eq!(workflow.form().unwrap().amount, DEFAULT_MIN_MAJOR);
    }

    #[test]
    fn test_validation_requires_all_fields() {
        let g = gift(1_000_000, 0, None, None);
        let mut form = filled_form(5_000);
        form.name = "   ".to_string();
        assert_eq!(
            validate_contribution(&form, &g),
            Err(ValidationError::MissingFields)
        );

        let mut form = filled_form(5_000);
        form.representing = None;
        assert_eq!(
            validate_contribution(&form, &g),
            Err(ValidationError::MissingFields)
        );

        let form = filled_form(0);
        assert_eq!(
            validate_contribution(&form, &g),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn test_validation_rejects_malformed_email() {
        let g = gift(1_000_000, 0, None, None);
        for bad in ["ada", "ada@", "@example.com", "ada@example", "a da@example.com", "ada@.com", "ada@example."] {
            let mut form = filled_form(5_000);
            form.email = bad.to_string();
            assert_eq!(
                validate_contribution(&form, &g),
                Err(ValidationError::InvalidEmail),
                "{bad} should be rejected"
            );
        }
        assert!(is_valid_email("ada@mail.example.co"));
    }

    #[test]
    fn test_validation_enforces_bounds_in_minor_units() {
        // floor 10_000 minor = 100 major; ceiling 50_000 minor = 500 major
        let g = gift(10_000_000, 0, Some(10_000), Some(50_000));

        let below = filled_form(99);
        assert_eq!(
            validate_contribution(&below, &g),
            Err(ValidationError::BelowMinimum("₦100".to_string()))
        );

        let above = filled_form(501);
        assert_eq!(
            validate_contribution(&above, &g),
            Err(ValidationError::AboveMaximum("₦500".to_string()))
        );

        assert_eq!(validate_contribution(&filled_form(100), &g), Ok(10_000));
        assert_eq!(validate_contribution(&filled_form(500), &g), Ok(50_000));
    }

    #[test]
    fn test_validation_enforces_remaining_capacity() {
        // 5_000 major remaining
        let g = gift(1_000_000, 500_000, None, None);
        assert_eq!(
            validate_contribution(&filled_form(5_001), &g),
            Err(ValidationError::ExceedsRemaining("₦5,000".to_string()))
        );
        assert_eq!(validate_contribution(&filled_form(5_000), &g), Ok(500_000));

        // the check also stops a goal-exceeding single contribution
        let fresh = gift(1_000_000, 0, Some(500_000), None);
        assert_eq!(
            validate_contribution(&filled_form(50_000), &fresh),
            Err(ValidationError::ExceedsRemaining("₦10,000".to_string()))
        );
    }

    #[test]
    fn test_happy_path_through_settlement() {
        let g = gift(1_000_000, 0, Some(500_000), None);
        let mut workflow = ContributionWorkflow::default();
        select_and_fill(&mut workflow, &g, 5_000);

        let request = workflow.begin_submit(&g).unwrap();
        assert_eq!(request.amount, 500_000);
        assert_eq!(request.representing, "Both");
        assert!(workflow.is_submitting());

        let config = workflow
            .submit_succeeded(&g.title, "TX-42", "pk_test_key")
            .unwrap();
        assert_eq!(config.reference, "TX-42");
        assert_eq!(config.amount, 500_000);
        assert_eq!(config.email, "ada@example.com");
        assert!(workflow.is_processing_payment());

        assert!(workflow.payment_succeeded("TX-42"));
        let confirmed = workflow.confirm_succeeded().unwrap();
        assert_eq!(confirmed.gift_id, "gift-1");
        assert_eq!(confirmed.amount_minor, 500_000);
        assert_eq!(confirmed.transaction_no, "TX-42");
        assert_eq!(
            workflow.state(),
            &WorkflowState::Settled {
                transaction_no: "TX-42".to_string()
            }
        );

        workflow.dismiss();
        assert_eq!(workflow.state(), &WorkflowState::Browsing);
    }

    #[test]
    fn test_validation_failure_blocks_submission() {
        let g = gift(1_000_000, 0, Some(500_000), None);
        let mut workflow = ContributionWorkflow::default();
        select_and_fill(&mut workflow, &g, 100);
        assert!(workflow.begin_submit(&g).is_err());
        assert!(matches!(workflow.state(), WorkflowState::Selecting { .. }));
    }

    #[test]
    fn test_submit_failure_returns_to_form_with_input_intact() {
        let g = gift(1_000_000, 0, None, None);
        let mut workflow = ContributionWorkflow::default();
        select_and_fill(&mut workflow, &g, 5_000);
        workflow.begin_submit(&g).unwrap();

        workflow.submit_failed();
        let form = workflow.form().unwrap();
        assert_eq!(form.name, "Ada Lovelace");
        assert_eq!(form.amount, 5_000);
        assert!(matches!(workflow.state(), WorkflowState::Selecting { .. }));
    }

    #[test]
    fn test_payment_cancel_returns_to_browsing() {
        let g = gift(1_000_000, 0, None, None);
        let mut workflow = ContributionWorkflow::default();
        select_and_fill(&mut workflow, &g, 5_000);
        workflow.begin_submit(&g).unwrap();
        workflow.submit_succeeded(&g.title, "TX-7", "pk_test_key").unwrap();

        workflow.payment_cancelled();
        assert_eq!(workflow.state(), &WorkflowState::Browsing);
    }

    #[test]
    fn test_confirm_failure_tears_down_payment_state() {
        let g = gift(1_000_000, 0, None, None);
        let mut workflow = ContributionWorkflow::default();
        select_and_fill(&mut workflow, &g, 5_000);
        workflow.begin_submit(&g).unwrap();
        workflow.submit_succeeded(&g.title, "TX-7", "pk_test_key").unwrap();
        workflow.payment_succeeded("TX-7");

        workflow.confirm_failed();
        assert_eq!(workflow.state(), &WorkflowState::Browsing);
        assert!(!workflow.is_processing_payment());
    }

    #[test]
    fn test_stale_events_are_ignored() {
        let mut workflow = ContributionWorkflow::default();
        assert!(!workflow.payment_succeeded("TX-ghost"));
        assert!(workflow.confirm_succeeded().is_none());
        assert!(workflow.submit_succeeded("gift", "TX", "pk").is_none());
        workflow.payment_cancelled();
        workflow.confirm_failed();
        workflow.dismiss();
        assert_eq!(workflow.state(), &WorkflowState::Browsing);
    }

    #[test]
    fn test_select_rejected_while_busy() {
        let g = gift(1_000_000, 0, None, None);
        let mut workflow = ContributionWorkflow::default();
        select_and_fill(&mut workflow, &g, 5_000);
        workflow.begin_submit(&g).unwrap();

        let other = gift(2_000_000, 0, None, None);
        assert_eq!(workflow.select(&other), Err(SelectError::Busy));
    }

    #[test]
    fn test_suggested_amounts_respect_floor() {
        let open = gift(100_000_000, 0, None, None);
        assert_eq!(suggested_amounts(&open), vec![5_000, 10_000, 25_000, 50_000]);

        let floored = gift(100_000_000, 0, Some(1_000_000), None);
        assert_eq!(suggested_amounts(&floored), vec![10_000, 25_000, 50_000]);
    }
}
