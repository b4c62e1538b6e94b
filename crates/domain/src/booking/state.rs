//! Booking lifecycle state machine.

use serde::{Deserialize, Serialize};

/// The status of a booking in its lifecycle.
///
/// Transitions:
/// ```text
/// Reserved ──┬──► Confirmed ──┬──► Completed
///            │                │
///            ├──► Rejected    └──► Cancelled
///            └──► Cancelled
/// ```
///
/// `Rejected`, `Cancelled`, and `Completed` are terminal. A booking only
/// ever enters `Reserved` through the reservation factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BookingStatus {
    /// Reserved, awaiting confirmation or rejection.
    #[default]
    Reserved,

    /// Confirmed; the stay will happen unless cancelled before it starts.
    Confirmed,

    /// Rejected in place of confirmation (terminal).
    Rejected,

    /// Cancelled before the stay started (terminal).
    Cancelled,

    /// The stay happened and ended (terminal).
    Completed,
}

impl BookingStatus {
    /// Returns true if the booking can be confirmed from this status.
    pub fn can_confirm(&self) -> bool {
        matches!(self, BookingStatus::Reserved)
    }

    /// Returns true if the booking can be rejected from this status.
    pub fn can_reject(&self) -> bool {
        matches!(self, BookingStatus::Reserved)
    }

    /// Returns true if the booking can be cancelled from this status.
    pub fn can_cancel(&self) -> bool {
        matches!(self, BookingStatus::Reserved | BookingStatus::Confirmed)
    }

    /// Returns true if the booking can be completed from this status.
    pub fn can_complete(&self) -> bool {
        matches!(self, BookingStatus::Confirmed)
    }

    /// Returns true if this status blocks the apartment's date range.
    ///
    /// Only active bookings participate in the overlap invariant; a
    /// rejected or cancelled booking's range is immediately reusable.
    pub fn blocks_apartment(&self) -> bool {
        matches!(self, BookingStatus::Reserved | BookingStatus::Confirmed)
    }

    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Rejected | BookingStatus::Cancelled | BookingStatus::Completed
        )
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Reserved => "Reserved",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Rejected => "Rejected",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [BookingStatus; 5] = [
        BookingStatus::Reserved,
        BookingStatus::Confirmed,
        BookingStatus::Rejected,
        BookingStatus::Cancelled,
        BookingStatus::Completed,
    ];

    #[test]
    fn default_status_is_reserved() {
        assert_eq!(BookingStatus::default(), BookingStatus::Reserved);
    }

    #[test]
    fn only_reserved_can_confirm_or_reject() {
        for status in ALL {
            assert_eq!(status.can_confirm(), status == BookingStatus::Reserved);
            assert_eq!(status.can_reject(), status == BookingStatus::Reserved);
        }
    }

    #[test]
    fn reserved_and_confirmed_can_cancel() {
        assert!(BookingStatus::Reserved.can_cancel());
        assert!(BookingStatus::Confirmed.can_cancel());
        assert!(!BookingStatus::Rejected.can_cancel());
        assert!(!BookingStatus::Cancelled.can_cancel());
        assert!(!BookingStatus::Completed.can_cancel());
    }

    #[test]
    fn only_confirmed_can_complete() {
        for status in ALL {
            assert_eq!(status.can_complete(), status == BookingStatus::Confirmed);
        }
    }

    #[test]
    fn terminal_states_allow_nothing() {
        for status in ALL.into_iter().filter(|s| s.is_terminal()) {
            assert!(!status.can_confirm());
            assert!(!status.can_reject());
            assert!(!status.can_cancel());
            assert!(!status.can_complete());
        }
    }

    #[test]
    fn active_statuses_block_the_apartment() {
        assert!(BookingStatus::Reserved.blocks_apartment());
        assert!(BookingStatus::Confirmed.blocks_apartment());
        assert!(!BookingStatus::Rejected.blocks_apartment());
        assert!(!BookingStatus::Cancelled.blocks_apartment());
        assert!(!BookingStatus::Completed.blocks_apartment());
    }

    #[test]
    fn display() {
        assert_eq!(BookingStatus::Reserved.to_string(), "Reserved");
        assert_eq!(BookingStatus::Completed.to_string(), "Completed");
    }
}
