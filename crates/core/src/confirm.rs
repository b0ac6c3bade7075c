//! Two-step confirmation for destructive actions.
//!
//! The first activation of a target arms it; activating the same target again
//! confirms. Anything else disarms, so a stray click never deletes.

/// Confirmation phase carried between interactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteConfirmation<T> {
    /// Nothing is armed.
    Idle,
    /// `T` will be deleted by its next activation.
    Armed(T),
}

impl<T> Default for DeleteConfirmation<T> {
    fn default() -> Self {
        DeleteConfirmation::Idle
    }
}

impl<T> DeleteConfirmation<T> {
    /// Returns true if some target is armed.
    pub fn is_armed(&self) -> bool {
        matches!(self, DeleteConfirmation::Armed(_))
    }

    /// Armed target, if any.
    pub fn armed(&self) -> Option<&T> {
        match self {
            DeleteConfirmation::Armed(target) => Some(target),
            DeleteConfirmation::Idle => None,
        }
    }
}

/// User interaction fed to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction<T> {
    /// Delete control of `T` was activated.
    Activate(T),
    /// Any interaction not aimed at a delete control.
    Elsewhere,
}

/// Result of one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmOutcome<T> {
    /// State to carry into the next interaction.
    pub next_state: DeleteConfirmation<T>,
    /// Target whose deletion was confirmed by this interaction.
    pub confirmed: Option<T>,
}

/// Advances the confirmation state by one interaction.
///
/// # Examples
///
/// ```
/// use sheetmail_core::confirm::{advance_confirmation, DeleteConfirmation, Interaction};
///
/// let armed = advance_confirmation(DeleteConfirmation::Idle, Interaction::Activate("title"));
/// assert_eq!(armed.confirmed, None);
///
/// let done = advance_confirmation(armed.next_state, Interaction::Activate("title"));
/// assert_eq!(done.confirmed, Some("title"));
/// assert_eq!(done.next_state, DeleteConfirmation::Idle);
/// ```
pub fn advance_confirmation<T: PartialEq>(
    state: DeleteConfirmation<T>,
    interaction: Interaction<T>,
) -> ConfirmOutcome<T> {
    match (state, interaction) {
        (DeleteConfirmation::Armed(armed), Interaction::Activate(target)) if armed == target => {
            ConfirmOutcome {
                next_state: DeleteConfirmation::Idle,
                confirmed: Some(target),
            }
        }
        // Activating another target moves the arm instead of confirming.
        (_, Interaction::Activate(target)) => ConfirmOutcome {
            next_state: DeleteConfirmation::Armed(target),
            confirmed: None,
        },
        (_, Interaction::Elsewhere) => ConfirmOutcome {
            next_state: DeleteConfirmation::Idle,
            confirmed: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_activation_arms() {
        let outcome = advance_confirmation(DeleteConfirmation::Idle, Interaction::Activate(1));
        assert_eq!(outcome.next_state, DeleteConfirmation::Armed(1));
        assert_eq!(outcome.confirmed, None);
    }

    #[test]
    fn second_activation_confirms() {
        let armed = advance_confirmation(DeleteConfirmation::Idle, Interaction::Activate("a"));
        let done = advance_confirmation(armed.next_state, Interaction::Activate("a"));
        assert_eq!(done.confirmed, Some("a"));
        assert!(!done.next_state.is_armed());
    }

    #[test]
    fn unrelated_interaction_disarms() {
        let armed = advance_confirmation(DeleteConfirmation::Idle, Interaction::Activate("a"));
        let disarmed = advance_confirmation(armed.next_state, Interaction::Elsewhere);
        assert_eq!(disarmed.next_state, DeleteConfirmation::Idle);

        // After disarming, the next activation only arms again.
        let again = advance_confirmation(disarmed.next_state, Interaction::Activate("a"));
        assert_eq!(again.confirmed, None);
        assert_eq!(again.next_state.armed(), Some(&"a"));
    }

    #[test]
    fn other_target_moves_the_arm() {
        let armed = advance_confirmation(DeleteConfirmation::Idle, Interaction::Activate("a"));
        let moved = advance_confirmation(armed.next_state, Interaction::Activate("b"));
        assert_eq!(moved.confirmed, None);
        assert_eq!(moved.next_state, DeleteConfirmation::Armed("b"));
    }

    #[test]
    fn elsewhere_while_idle_stays_idle() {
        let outcome = advance_confirmation(DeleteConfirmation::<u8>::Idle, Interaction::Elsewhere);
        assert_eq!(outcome.next_state, DeleteConfirmation::Idle);
        assert_eq!(outcome.confirmed, None);
    }
}
