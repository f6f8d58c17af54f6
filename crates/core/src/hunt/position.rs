//! Boundary to the device position stream.
//!
//! The embedding app owns the subscription (watch, poll, or push) and its
//! retry policy; the core only consumes one fix at a time. A failed poll
//! leaves the session untouched, so callers may simply try again.

use crate::geo::Coordinate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("no position fix available")]
    Unavailable,

    #[error("timed out waiting for a position fix")]
    Timeout,
}

/// A source of instantaneous device fixes.
pub trait PositionSource {
    /// The most recent fix, or why there is none.
    fn current_position(&mut self) -> Result<Coordinate, PositionError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hunt::{HuntConfig, HuntPhase, HuntSession};

    /// Scripted source standing in for the platform geolocation API.
    struct ScriptedSource {
        fixes: Vec<Result<Coordinate, PositionError>>,
    }

    impl PositionSource for ScriptedSource {
        fn current_position(&mut self) -> Result<Coordinate, PositionError> {
            self.fixes.remove(0)
        }
    }

    #[test]
    fn test_session_survives_transient_source_errors() {
        let good = Coordinate::new(52.52, 13.405).unwrap();
        let mut source = ScriptedSource {
            fixes: vec![Err(PositionError::Timeout), Ok(good), Ok(good)],
        };
        let mut session = HuntSession::new(HuntConfig::default()).unwrap();

        assert_eq!(
            source.current_position().unwrap_err(),
            PositionError::Timeout
        );
        assert_eq!(session.phase(), HuntPhase::AwaitingFix);

        // Retry after the timeout proceeds as if nothing happened.
        let fix = source.current_position().unwrap();
        session.record_fix(fix).unwrap();
        assert_eq!(session.phase(), HuntPhase::Searching);
    }
}
