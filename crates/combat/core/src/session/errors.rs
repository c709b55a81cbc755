//! Errors surfaced at the session boundary.

use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;
use crate::turn::Phase;

// ============================================================================
// Action Errors
// ============================================================================

/// Rejections of player-facing actions. A rejected action mutates nothing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    /// Action attempted outside the phase that accepts it.
    #[error("action not accepted during {phase}")]
    InvalidPhase { phase: Phase },

    #[error("insufficient energy: need {required}, have {available}")]
    InsufficientEnergy { required: u32, available: u32 },

    #[error("insufficient focus: need {required}, have {available}")]
    InsufficientFocus { required: u8, available: u8 },

    #[error("no card at hand index {index}")]
    CardNotInHand { index: usize },

    #[error("no party member can act")]
    NoActiveMember,

    /// Target is Active, incapacitated, or unknown to the roster.
    #[error("member {member} cannot be tagged in")]
    TagInUnavailable { member: EntityId },

    #[error("member {member} not found")]
    MemberNotFound { member: EntityId },

    #[error("member {member} is not incapacitated")]
    NotIncapacitated { member: EntityId },
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            InvalidPhase { .. } | InsufficientEnergy { .. } | InsufficientFocus { .. } => {
                ErrorSeverity::Recoverable
            }
            NoActiveMember | TagInUnavailable { .. } => ErrorSeverity::Recoverable,
            CardNotInHand { .. } | MemberNotFound { .. } | NotIncapacitated { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            InvalidPhase { .. } => "ACTION_INVALID_PHASE",
            InsufficientEnergy { .. } => "ACTION_INSUFFICIENT_ENERGY",
            InsufficientFocus { .. } => "ACTION_INSUFFICIENT_FOCUS",
            CardNotInHand { .. } => "ACTION_CARD_NOT_IN_HAND",
            NoActiveMember => "ACTION_NO_ACTIVE_MEMBER",
            TagInUnavailable { .. } => "ACTION_TAG_IN_UNAVAILABLE",
            MemberNotFound { .. } => "ACTION_MEMBER_NOT_FOUND",
            NotIncapacitated { .. } => "ACTION_NOT_INCAPACITATED",
        }
    }
}

// ============================================================================
// Setup Errors
// ============================================================================

/// Invalid combat setup, detected when a session is created.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupError {
    #[error("encounter has no enemies")]
    NoEnemies,

    #[error("party has no members")]
    EmptyParty,

    #[error("expected exactly one active member, found {found}")]
    ActiveCount { found: usize },

    #[error("entity id {id} is used more than once")]
    DuplicateId { id: EntityId },
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoEnemies => "SETUP_NO_ENEMIES",
            Self::EmptyParty => "SETUP_EMPTY_PARTY",
            Self::ActiveCount { .. } => "SETUP_ACTIVE_COUNT",
            Self::DuplicateId { .. } => "SETUP_DUPLICATE_ID",
        }
    }
}
