//! Cooperative keying sequencer
//!
//! Holds the input queue and the pending-event queue and advances them one
//! step at a time. Each [`Sequencer::step`] performs, in this order:
//!
//! 1. Intake: move one byte from the source into the input queue, unless
//!    the queue is full (the byte then stays with the source).
//! 2. Encode: if no events are pending and input is queued, encode the
//!    next character starting at `now`.
//! 3. Emit: if the oldest pending event is due, apply it and drop it.
//!
//! Only one character is ever in flight. The pending queue is sized for
//! the worst case of a single character and is refilled only once it has
//! fully drained, so it can never overflow.

use crate::code::{encode, SignalEvent};
use crate::config::TimingConfig;
use crate::queue::{BoundedQueue, PendingQueue, INPUT_QUEUE_CAPACITY};
use crate::traits::{ByteSource, SignalOutput, TimeMs};

/// What the intake phase did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Intake {
    /// Source had nothing to offer
    Idle,
    /// One byte moved into the input queue
    Accepted(u8),
    /// Source had data but the input queue was full; nothing was read
    Deferred,
}

/// What the encode phase did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeOutcome {
    /// Character encoded into `events` pending events
    Queued { symbol: u8, events: u8 },
    /// Character had no code and was dropped
    Skipped(u8),
}

/// Summary of one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepReport {
    /// Intake phase result
    pub intake: Intake,
    /// Encode phase result, if the gate was open
    pub encoded: Option<EncodeOutcome>,
    /// Event applied to the output, if one was due
    pub emitted: Option<SignalEvent>,
}

impl StepReport {
    const fn idle() -> Self {
        Self {
            intake: Intake::Idle,
            encoded: None,
            emitted: None,
        }
    }

    /// True if the step changed nothing
    pub fn is_idle(&self) -> bool {
        self.intake == Intake::Idle && self.encoded.is_none() && self.emitted.is_none()
    }
}

/// State of the single character slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotPhase {
    /// No events pending; the next step may encode
    Idle,
    /// Events of the current character still waiting to fire
    Draining,
}

/// Running counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequencerStats {
    /// Bytes moved from the source into the input queue
    pub bytes_accepted: u32,
    /// Steps where intake was held back by a full input queue
    pub intakes_deferred: u32,
    /// Characters turned into events (including word gaps)
    pub chars_encoded: u32,
    /// Characters with no code
    pub chars_skipped: u32,
    /// Events applied to the output
    pub events_emitted: u32,
}

/// Keying sequencer
///
/// `INPUT` is the input queue capacity; the reference sizing is
/// [`INPUT_QUEUE_CAPACITY`].
#[derive(Debug)]
pub struct Sequencer<const INPUT: usize = INPUT_QUEUE_CAPACITY> {
    /// Duration of one dot
    unit_ms: u32,
    /// Characters waiting to be encoded
    input: BoundedQueue<u8, INPUT>,
    /// Events of the character in flight
    pending: PendingQueue,
    stats: SequencerStats,
}

impl<const INPUT: usize> Sequencer<INPUT> {
    /// Create an idle sequencer
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            unit_ms: timing.unit_ms,
            input: BoundedQueue::new(),
            pending: PendingQueue::new(),
            stats: SequencerStats::default(),
        }
    }

    /// Base time unit in milliseconds
    pub fn unit_ms(&self) -> u32 {
        self.unit_ms
    }

    /// Run one intake/encode/emit step at time `now_ms`
    pub fn step<S, O>(&mut self, now_ms: TimeMs, source: &mut S, output: &mut O) -> StepReport
    where
        S: ByteSource + ?Sized,
        O: SignalOutput + ?Sized,
    {
        let mut report = StepReport::idle();

        report.intake = self.intake(source);

        if self.pending.is_empty() {
            report.encoded = self.encode_next(now_ms);
        }

        report.emitted = self.emit_due(now_ms, output);

        report
    }

    /// Take at most one byte from the source
    fn intake<S: ByteSource + ?Sized>(&mut self, source: &mut S) -> Intake {
        if source.bytes_available() == 0 {
            return Intake::Idle;
        }

        if self.input.is_full() {
            self.stats.intakes_deferred = self.stats.intakes_deferred.wrapping_add(1);
            return Intake::Deferred;
        }

        match source.read_one() {
            Some(byte) => {
                // Not full, checked above.
                let pushed = self.input.push(byte);
                debug_assert!(pushed.is_ok());
                self.stats.bytes_accepted = self.stats.bytes_accepted.wrapping_add(1);
                Intake::Accepted(byte)
            }
            None => Intake::Idle,
        }
    }

    /// Encode the next queued character into the empty pending queue
    fn encode_next(&mut self, now_ms: TimeMs) -> Option<EncodeOutcome> {
        let symbol = self.input.pop_front()?;
        let encoded = encode(symbol, now_ms, self.unit_ms);

        if encoded.is_empty() {
            self.stats.chars_skipped = self.stats.chars_skipped.wrapping_add(1);
            return Some(EncodeOutcome::Skipped(symbol));
        }

        let count = encoded.events.len() as u8;
        for event in encoded.events {
            // The queue is empty and holds a worst-case character.
            let pushed = self.pending.push(event);
            debug_assert!(pushed.is_ok());
        }
        self.stats.chars_encoded = self.stats.chars_encoded.wrapping_add(1);

        Some(EncodeOutcome::Queued {
            symbol,
            events: count,
        })
    }

    /// Apply the head event if its time has come
    fn emit_due<O: SignalOutput + ?Sized>(
        &mut self,
        now_ms: TimeMs,
        output: &mut O,
    ) -> Option<SignalEvent> {
        let head = *self.pending.peek_front()?;
        if !head.is_due(now_ms) {
            return None;
        }

        output.set_level(head.level);
        self.pending.pop_front();
        self.stats.events_emitted = self.stats.events_emitted.wrapping_add(1);

        Some(head)
    }

    /// Drop all queued input and pending events
    ///
    /// Counters are kept. The output line is not touched; see
    /// [`super::Keyer::reset`] for a reset that also releases the key.
    pub fn reset(&mut self) {
        self.input.clear();
        self.pending.clear();
    }

    /// Current slot phase
    pub fn phase(&self) -> SlotPhase {
        if self.pending.is_empty() {
            SlotPhase::Idle
        } else {
            SlotPhase::Draining
        }
    }

    /// True when nothing is queued or pending
    pub fn is_idle(&self) -> bool {
        self.input.is_empty() && self.pending.is_empty()
    }

    /// Characters waiting to be encoded
    pub fn input_len(&self) -> usize {
        self.input.len()
    }

    /// Events waiting to fire
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Fire time of the next pending event
    pub fn next_due(&self) -> Option<TimeMs> {
        self.pending.peek_front().map(|e| e.at_ms)
    }

    /// Input queue capacity
    pub const fn input_capacity(&self) -> usize {
        INPUT
    }

    /// Counters since creation
    pub fn stats(&self) -> SequencerStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::PENDING_QUEUE_CAPACITY;
    use crate::traits::Level;
    use proptest::prelude::*;
    use std::collections::VecDeque;
    use std::vec::Vec;

    /// Scripted byte source
    struct MockSource {
        bytes: VecDeque<u8>,
        reads: usize,
    }

    impl MockSource {
        fn new(text: &[u8]) -> Self {
            Self {
                bytes: text.iter().copied().collect(),
                reads: 0,
            }
        }
    }

    impl ByteSource for MockSource {
        fn bytes_available(&mut self) -> usize {
            self.bytes.len()
        }

        fn read_one(&mut self) -> Option<u8> {
            self.reads += 1;
            self.bytes.pop_front()
        }
    }

    /// Output that records every level applied with its time
    struct RecordingOutput {
        level: Level,
        log: Vec<(TimeMs, Level)>,
        now: TimeMs,
    }

    impl RecordingOutput {
        fn new() -> Self {
            Self {
                level: Level::Low,
                log: Vec::new(),
                now: 0,
            }
        }
    }

    impl SignalOutput for RecordingOutput {
        fn set_level(&mut self, level: Level) {
            self.level = level;
            self.log.push((self.now, level));
        }

        fn level(&self) -> Level {
            self.level
        }
    }

    fn timing(unit_ms: u32) -> TimingConfig {
        TimingConfig::from_unit_ms(unit_ms)
    }

    /// Step every millisecond from `from` to `to` inclusive
    fn run<const N: usize>(
        seq: &mut Sequencer<N>,
        src: &mut MockSource,
        out: &mut RecordingOutput,
        from: TimeMs,
        to: TimeMs,
    ) {
        for now in from..=to {
            out.now = now;
            seq.step(now, src, out);
        }
    }

    #[test]
    fn test_new_is_idle() {
        let seq: Sequencer = Sequencer::new(timing(150));

        assert!(seq.is_idle());
        assert_eq!(seq.phase(), SlotPhase::Idle);
        assert_eq!(seq.input_capacity(), 1536);
        assert_eq!(seq.unit_ms(), 150);
        assert_eq!(seq.next_due(), None);
    }

    #[test]
    fn test_first_step_takes_encodes_and_keys() {
        let mut seq: Sequencer = Sequencer::new(timing(100));
        let mut src = MockSource::new(b"S");
        let mut out = RecordingOutput::new();

        let report = seq.step(0, &mut src, &mut out);

        assert_eq!(report.intake, Intake::Accepted(b'S'));
        assert_eq!(
            report.encoded,
            Some(EncodeOutcome::Queued {
                symbol: b'S',
                events: 7
            })
        );
        assert_eq!(report.emitted, Some(SignalEvent::new(0, Level::High)));
        assert_eq!(out.level, Level::High);
        assert_eq!(seq.pending_len(), 6);
        assert_eq!(seq.phase(), SlotPhase::Draining);
    }

    #[test]
    fn test_sos_timeline() {
        let mut seq: Sequencer = Sequencer::new(timing(100));
        let mut src = MockSource::new(b"SO");
        let mut out = RecordingOutput::new();

        run(&mut seq, &mut src, &mut out, 0, 3000);

        // 'O' is encoded one step after the letter-gap marker at 700 drains
        assert_eq!(
            out.log,
            [
                (0, Level::High),
                (100, Level::Low),
                (200, Level::High),
                (300, Level::Low),
                (400, Level::High),
                (500, Level::Low),
                (700, Level::Low),
                (701, Level::High),
                (1001, Level::Low),
                (1101, Level::High),
                (1401, Level::Low),
                (1501, Level::High),
                (1801, Level::Low),
                (2001, Level::Low),
            ]
        );
        assert!(seq.is_idle());
    }

    #[test]
    fn test_encode_waits_for_drain() {
        let mut seq: Sequencer = Sequencer::new(timing(100));
        let mut src = MockSource::new(b"EE");
        let mut out = RecordingOutput::new();

        // t=0: take 'E', encode, key down
        seq.step(0, &mut src, &mut out);
        // t=1: take second 'E', but the first is still in flight
        let report = seq.step(1, &mut src, &mut out);
        assert_eq!(report.intake, Intake::Accepted(b'E'));
        assert_eq!(report.encoded, None);
        assert_eq!(seq.input_len(), 1);

        // Nothing new is encoded until the gap marker at 300 has fired
        run(&mut seq, &mut src, &mut out, 2, 300);
        assert_eq!(seq.input_len(), 1);
        assert_eq!(seq.phase(), SlotPhase::Idle);

        let report = seq.step(301, &mut src, &mut out);
        assert!(matches!(report.encoded, Some(EncodeOutcome::Queued { symbol: b'E', .. })));
    }

    #[test]
    fn test_event_not_emitted_early() {
        let mut seq: Sequencer = Sequencer::new(timing(100));
        let mut src = MockSource::new(b"T");
        let mut out = RecordingOutput::new();

        seq.step(0, &mut src, &mut out);
        assert_eq!(seq.next_due(), Some(300));

        let report = seq.step(299, &mut src, &mut out);
        assert_eq!(report.emitted, None);
        assert_eq!(out.level, Level::High);

        let report = seq.step(300, &mut src, &mut out);
        assert_eq!(report.emitted, Some(SignalEvent::new(300, Level::Low)));
    }

    #[test]
    fn test_late_step_emits_one_event_per_step() {
        let mut seq: Sequencer = Sequencer::new(timing(10));
        let mut src = MockSource::new(b"I");
        let mut out = RecordingOutput::new();

        seq.step(0, &mut src, &mut out);

        // Host stalls; all remaining events are overdue at t=1000
        out.now = 1000;
        for _ in 0..4 {
            seq.step(1000, &mut src, &mut out);
        }

        let levels: Vec<Level> = out.log.iter().map(|(_, l)| *l).collect();
        assert_eq!(
            levels,
            [Level::High, Level::Low, Level::High, Level::Low, Level::Low]
        );
        assert!(seq.is_idle());
    }

    #[test]
    fn test_word_gap_is_silent() {
        let mut seq: Sequencer = Sequencer::new(timing(150));
        let mut src = MockSource::new(b" ");
        let mut out = RecordingOutput::new();

        seq.step(1000, &mut src, &mut out);
        assert_eq!(seq.next_due(), Some(1600));

        out.now = 1600;
        let report = seq.step(1600, &mut src, &mut out);
        assert_eq!(report.emitted, Some(SignalEvent::new(1600, Level::Low)));
        assert!(out.log.iter().all(|(_, l)| *l == Level::Low));
    }

    #[test]
    fn test_unrecognized_character_is_skipped() {
        let mut seq: Sequencer = Sequencer::new(timing(100));
        let mut src = MockSource::new(b"#");
        let mut out = RecordingOutput::new();

        let report = seq.step(0, &mut src, &mut out);

        assert_eq!(report.encoded, Some(EncodeOutcome::Skipped(b'#')));
        assert_eq!(report.emitted, None);
        assert!(seq.is_idle());
        assert!(out.log.is_empty());
        assert_eq!(seq.stats().chars_skipped, 1);
    }

    #[test]
    fn test_skip_does_not_delay_next_character() {
        let mut seq: Sequencer = Sequencer::new(timing(100));
        let mut src = MockSource::new(b"#E");
        let mut out = RecordingOutput::new();

        seq.step(0, &mut src, &mut out);
        let report = seq.step(1, &mut src, &mut out);

        assert!(matches!(report.encoded, Some(EncodeOutcome::Queued { symbol: b'E', .. })));
        assert_eq!(report.emitted, Some(SignalEvent::new(1, Level::High)));
    }

    #[test]
    fn test_full_input_defers_without_reading() {
        let mut seq: Sequencer<4> = Sequencer::new(timing(100));
        let mut src = MockSource::new(b"ABCDEFGH");
        let mut out = RecordingOutput::new();

        // t=0: 'A' in and straight into encoding
        seq.step(0, &mut src, &mut out);
        // Fill the queue while 'A' drains
        for now in 1..=4 {
            seq.step(now, &mut src, &mut out);
        }
        assert_eq!(seq.input_len(), 4);
        assert_eq!(src.bytes.len(), 3);
        let reads_when_full = src.reads;

        for now in 5..=50 {
            let report = seq.step(now, &mut src, &mut out);
            assert_eq!(report.intake, Intake::Deferred);
        }

        assert_eq!(src.reads, reads_when_full);
        assert_eq!(src.bytes.len(), 3);
        assert_eq!(seq.input_len(), 4);
        assert_eq!(seq.stats().intakes_deferred, 46);
    }

    #[test]
    fn test_no_byte_queued_twice() {
        let mut seq: Sequencer<2> = Sequencer::new(timing(1));
        let mut src = MockSource::new(b"ETETETET");
        let mut out = RecordingOutput::new();

        run(&mut seq, &mut src, &mut out, 0, 500);

        let stats = seq.stats();
        assert_eq!(stats.bytes_accepted, 8);
        assert_eq!(stats.chars_encoded, 8);
        // E: 3 events, T: 3 events
        assert_eq!(stats.events_emitted, 24);
        assert!(seq.is_idle());
    }

    #[test]
    fn test_reset_drains_both_queues() {
        let mut seq: Sequencer = Sequencer::new(timing(100));
        let mut src = MockSource::new(b"HELLO");
        let mut out = RecordingOutput::new();

        run(&mut seq, &mut src, &mut out, 0, 10);
        assert!(!seq.is_idle());

        seq.reset();

        assert!(seq.is_idle());
        assert_eq!(seq.phase(), SlotPhase::Idle);
        assert_eq!(seq.stats().bytes_accepted, 5);
    }

    proptest! {
        #[test]
        fn prop_pending_never_exceeds_capacity(
            text in proptest::collection::vec(any::<u8>(), 0..64),
            gaps in proptest::collection::vec(0u64..40, 1..400),
            unit in 1u32..20,
        ) {
            let mut seq: Sequencer<8> = Sequencer::new(timing(unit));
            let mut src = MockSource::new(&text);
            let mut out = RecordingOutput::new();
            let mut now = 0;

            for gap in gaps {
                now += gap;
                out.now = now;
                seq.step(now, &mut src, &mut out);
                prop_assert!(seq.pending_len() <= PENDING_QUEUE_CAPACITY);
                prop_assert!(seq.input_len() <= 8);
            }
        }

        #[test]
        fn prop_emitted_in_time_order_and_never_early(
            text in "[a-zA-Z0-9 #.]{0,24}",
            gaps in proptest::collection::vec(0u64..25, 1..600),
        ) {
            let mut seq: Sequencer<16> = Sequencer::new(timing(7));
            let mut src = MockSource::new(text.as_bytes());
            let mut out = RecordingOutput::new();
            let mut now = 0;
            let mut emitted = Vec::new();

            for gap in gaps {
                now += gap;
                out.now = now;
                if let Some(event) = seq.step(now, &mut src, &mut out).emitted {
                    prop_assert!(event.at_ms <= now);
                    emitted.push(event.at_ms);
                }
            }

            for pair in emitted.windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
        }
    }
}
