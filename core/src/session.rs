//! The reveal sequence of a single spin.
//!
//!   Idle -> Spinning -> Revealing -> ShowingWinner -> Idle
//!
//! Each arrow is gated by a duration: the spin animation, the fixed
//! reveal delay, then the fixed auto-hide delay. Time only moves when
//! the owner calls `advance()`, so the sequence is fully deterministic.
//!
//! RULE: at most one spin is in flight. The session is busy while
//! Spinning or Revealing; it frees up as soon as the winner is shown.

use crate::{
    config::TimingConfig,
    error::{WheelError, WheelResult},
    resolver::SpinOutcome,
    types::Item,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A spin that has been resolved but not necessarily revealed yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpinTicket {
    pub outcome: SpinOutcome,
    /// Winner captured when the spin started.
    pub winner:  Item,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpinPhase {
    Idle,
    Spinning      { ticket: SpinTicket, remaining: Duration },
    Revealing     { ticket: SpinTicket, remaining: Duration },
    ShowingWinner { ticket: SpinTicket, remaining: Duration },
}

impl SpinPhase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle                 => "idle",
            Self::Spinning { .. }      => "spinning",
            Self::Revealing { .. }     => "revealing",
            Self::ShowingWinner { .. } => "showing_winner",
        }
    }
}

/// A phase boundary crossed during `advance()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Animation finished; the wheel rests on the winner.
    Settled(SpinTicket),
    /// Reveal delay elapsed; the winner is displayed.
    Shown(SpinTicket),
    /// Auto-hide elapsed, or a new spin replaced the display.
    Hidden(SpinTicket),
}

#[derive(Debug, Clone)]
pub struct SpinSession {
    phase:  SpinPhase,
    timing: TimingConfig,
}

impl SpinSession {
    pub fn new(timing: TimingConfig) -> Self {
        Self { phase: SpinPhase::Idle, timing }
    }

    pub fn phase(&self) -> &SpinPhase {
        &self.phase
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, SpinPhase::Spinning { .. } | SpinPhase::Revealing { .. })
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, SpinPhase::Idle)
    }

    /// Begin a spin. Fails if one is already in flight. If a previous
    /// winner is still on display it is hidden first and returned.
    pub fn start(&mut self, ticket: SpinTicket, duration: Duration) -> WheelResult<Option<Transition>> {
        if self.is_busy() {
            return Err(WheelError::SpinInProgress);
        }
        let previous = std::mem::replace(
            &mut self.phase,
            SpinPhase::Spinning { ticket, remaining: duration },
        );
        Ok(match previous {
            SpinPhase::ShowingWinner { ticket, .. } => Some(Transition::Hidden(ticket)),
            _ => None,
        })
    }

    /// Let `elapsed` pass. Returns every boundary crossed, in order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Transition> {
        let mut budget = elapsed;
        let mut crossed = Vec::new();

        loop {
            let phase = std::mem::replace(&mut self.phase, SpinPhase::Idle);
            self.phase = match phase {
                SpinPhase::Idle => break,
                SpinPhase::Spinning { ticket, remaining } if budget >= remaining => {
                    budget -= remaining;
                    crossed.push(Transition::Settled(ticket.clone()));
                    SpinPhase::Revealing { ticket, remaining: self.timing.reveal_delay() }
                }
                SpinPhase::Revealing { ticket, remaining } if budget >= remaining => {
                    budget -= remaining;
                    crossed.push(Transition::Shown(ticket.clone()));
                    SpinPhase::ShowingWinner { ticket, remaining: self.timing.auto_hide() }
                }
                SpinPhase::ShowingWinner { ticket, remaining } if budget >= remaining => {
                    budget -= remaining;
                    crossed.push(Transition::Hidden(ticket));
                    SpinPhase::Idle
                }
                SpinPhase::Spinning { ticket, remaining } => {
                    self.phase = SpinPhase::Spinning { ticket, remaining: remaining - budget };
                    break;
                }
                SpinPhase::Revealing { ticket, remaining } => {
                    self.phase = SpinPhase::Revealing { ticket, remaining: remaining - budget };
                    break;
                }
                SpinPhase::ShowingWinner { ticket, remaining } => {
                    self.phase = SpinPhase::ShowingWinner { ticket, remaining: remaining - budget };
                    break;
                }
            };
        }

        crossed
    }

    /// Time left until the session is idle again.
    pub fn time_to_idle(&self) -> Duration {
        match &self.phase {
            SpinPhase::Idle => Duration::ZERO,
            SpinPhase::Spinning { remaining, .. } => {
                *remaining + self.timing.reveal_delay() + self.timing.auto_hide()
            }
            SpinPhase::Revealing { remaining, .. } => *remaining + self.timing.auto_hide(),
            SpinPhase::ShowingWinner { remaining, .. } => *remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(winner: &str) -> SpinTicket {
        SpinTicket {
            outcome: SpinOutcome { final_angle: 1080.0, winning_index: 0 },
            winner:  winner.to_string(),
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn phases_follow_cumulative_delays() {
        let mut session = SpinSession::new(TimingConfig::default());
        session.start(ticket("A"), ms(800)).unwrap();
        assert!(session.is_busy());
        assert_eq!(session.time_to_idle(), ms(800 + 500 + 3000));

        assert!(session.advance(ms(799)).is_empty());
        assert_eq!(session.advance(ms(1)), vec![Transition::Settled(ticket("A"))]);
        assert_eq!(session.phase().name(), "revealing");
        assert!(session.is_busy());

        assert_eq!(session.advance(ms(500)), vec![Transition::Shown(ticket("A"))]);
        assert!(!session.is_busy(), "busy flag clears once the winner is shown");

        assert_eq!(session.advance(ms(3000)), vec![Transition::Hidden(ticket("A"))]);
        assert!(session.is_idle());
    }

    #[test]
    fn one_large_step_crosses_every_boundary_in_order() {
        let mut session = SpinSession::new(TimingConfig::default());
        session.start(ticket("B"), ms(600)).unwrap();
        let crossed = session.advance(ms(60_000));
        assert_eq!(
            crossed,
            vec![
                Transition::Settled(ticket("B")),
                Transition::Shown(ticket("B")),
                Transition::Hidden(ticket("B")),
            ]
        );
        assert!(session.is_idle());
    }

    #[test]
    fn start_while_busy_is_rejected() {
        let mut session = SpinSession::new(TimingConfig::default());
        session.start(ticket("A"), ms(600)).unwrap();
        assert!(matches!(
            session.start(ticket("B"), ms(600)),
            Err(WheelError::SpinInProgress)
        ));
    }

    #[test]
    fn start_while_showing_hides_previous_winner() {
        let mut session = SpinSession::new(TimingConfig::default());
        session.start(ticket("A"), ms(600)).unwrap();
        session.advance(ms(1100));
        let hidden = session.start(ticket("B"), ms(600)).unwrap();
        assert_eq!(hidden, Some(Transition::Hidden(ticket("A"))));
        assert!(session.is_busy());
    }
}
