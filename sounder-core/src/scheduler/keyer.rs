//! Keyer driver loop
//!
//! Bundles the sequencer with its three collaborators so the host only has
//! to call [`Keyer::poll`] from its main loop.

use super::sequencer::{Sequencer, SequencerStats, SlotPhase, StepReport};
use crate::config::TimingConfig;
use crate::queue::INPUT_QUEUE_CAPACITY;
use crate::traits::{ByteSource, Clock, Level, SignalOutput};

/// Cooperative keyer
///
/// Owns the byte source, the keying output and the clock. Every call to
/// [`Keyer::poll`] samples the clock once and runs one sequencer step.
pub struct Keyer<S, O, C, const INPUT: usize = INPUT_QUEUE_CAPACITY> {
    source: S,
    output: O,
    clock: C,
    sequencer: Sequencer<INPUT>,
}

impl<S, O, C, const INPUT: usize> Keyer<S, O, C, INPUT>
where
    S: ByteSource,
    O: SignalOutput,
    C: Clock,
{
    /// Create a keyer with the line released
    pub fn new(timing: TimingConfig, source: S, mut output: O, clock: C) -> Self {
        output.set_level(Level::Low);

        Self {
            source,
            output,
            clock,
            sequencer: Sequencer::new(timing),
        }
    }

    /// Run one step at the current time
    pub fn poll(&mut self) -> StepReport {
        let now_ms = self.clock.now_ms();
        let report = self
            .sequencer
            .step(now_ms, &mut self.source, &mut self.output);

        #[cfg(feature = "defmt")]
        {
            if let Some(outcome) = report.encoded {
                defmt::debug!("t={=u64}ms encode {}", now_ms, outcome);
            }
            if let Some(event) = report.emitted {
                defmt::trace!("t={=u64}ms key {} (due {=u64})", now_ms, event.level, event.at_ms);
            }
            if report.intake == super::Intake::Deferred {
                defmt::trace!("input queue full, intake deferred");
            }
        }

        report
    }

    /// Drop everything queued and release the key
    pub fn reset(&mut self) {
        self.sequencer.reset();
        self.output.set_level(Level::Low);

        #[cfg(feature = "defmt")]
        defmt::info!("keyer reset");
    }

    /// Current slot phase
    pub fn phase(&self) -> SlotPhase {
        self.sequencer.phase()
    }

    /// True when nothing is queued or pending
    pub fn is_idle(&self) -> bool {
        self.sequencer.is_idle()
    }

    /// Level currently applied to the output
    pub fn level(&self) -> Level {
        self.output.level()
    }

    /// Counters since creation
    pub fn stats(&self) -> SequencerStats {
        self.sequencer.stats()
    }

    /// Borrow the sequencer
    pub fn sequencer(&self) -> &Sequencer<INPUT> {
        &self.sequencer
    }

    /// Borrow the output
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Borrow the source mutably (e.g. to check transport health)
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Take the collaborators back
    pub fn into_parts(self) -> (S, O, C) {
        (self.source, self.output, self.clock)
    }
}
