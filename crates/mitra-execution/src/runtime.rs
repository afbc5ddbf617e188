//! The companion runtime: single owner of all session state.
//!
//! Commands from the presentation layer and events from timers are handled
//! one at a time on the runtime task, each to completion. Timer tasks only
//! post `Event`s back here; they never touch state themselves.

use std::collections::BTreeMap;

use anyhow::{Result, anyhow};
use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use mitra_core::{MitraConfig, MitraError};
use mitra_core::breathing::{BreathingSession, TickOutcome};
use mitra_core::companion::{Transcript, classify_and_reply};
use mitra_core::games::{ColorCanvas, FlipOutcome, MemoryBoard, SettleOutcome, TriviaQuiz};

use crate::command::{
    BreathingCommand, ColorCommand, Command, MemoryCommand, TriviaCommand, Update,
};
use crate::timer::{Scheduled, Ticker};

const COMMAND_BUFFER: usize = 64;

/// Timer callbacks posted back to the runtime.
///
/// Generation numbers let the runtime drop events from timers that were
/// cancelled after the event had already been queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    Tick { generation: u64 },
    ReplyDue { reply_id: u64 },
    MemorySettle { generation: u64 },
}

struct PendingReply {
    input: String,
    _timer: Scheduled,
}

pub(crate) struct CompanionRuntime {
    config: MitraConfig,
    rng: StdRng,
    transcript: Transcript,

    breathing: BreathingSession,
    ticker: Option<Ticker>,
    tick_generation: u64,

    pending_replies: BTreeMap<u64, PendingReply>,
    next_reply_id: u64,

    memory: MemoryBoard,
    memory_settle: Option<Scheduled>,
    memory_generation: u64,

    trivia: TriviaQuiz,
    canvas: ColorCanvas,

    shutdown: CancellationToken,
    events: mpsc::UnboundedSender<Event>,
    updates: mpsc::UnboundedSender<Update>,
}

impl CompanionRuntime {
    pub(crate) fn new(
        config: MitraConfig,
        mut rng: StdRng,
        shutdown: CancellationToken,
        events: mpsc::UnboundedSender<Event>,
        updates: mpsc::UnboundedSender<Update>,
    ) -> Self {
        let transcript = Transcript::with_greeting(&config.companion_name);
        let breathing = BreathingSession::new(config.default_pattern);
        let memory = MemoryBoard::new(&mut rng);

        Self {
            config,
            rng,
            transcript,
            breathing,
            ticker: None,
            tick_generation: 0,
            pending_replies: BTreeMap::new(),
            next_reply_id: 0,
            memory,
            memory_settle: None,
            memory_generation: 0,
            trivia: TriviaQuiz::new(),
            canvas: ColorCanvas::new(),
            shutdown,
            events,
            updates,
        }
    }

    /// Processes commands and timer events until shutdown is requested or
    /// the command channel closes, then returns the transcript.
    pub(crate) async fn run(
        mut self,
        mut events: mpsc::UnboundedReceiver<Event>,
        mut commands: mpsc::Receiver<Command>,
    ) -> Transcript {
        tracing::info!(target: "runtime", "Companion runtime started");
        if let Some(greeting) = self.transcript.last().cloned() {
            self.emit(Update::Message(greeting));
        }

        let shutdown = self.shutdown.clone();
        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(event) = events.recv() => self.handle_event(event),
            }
        }

        self.teardown();
        self.transcript
    }

    pub(crate) fn handle_command(&mut self, command: Command) {
        tracing::debug!(target: "runtime", ?command, "handling command");
        match command {
            Command::Say(text) => self.say(text),
            Command::Breathing(command) => self.breathing_command(command),
            Command::Memory(command) => self.memory_command(command),
            Command::Trivia(command) => self.trivia_command(command),
            Command::Color(command) => self.color_command(command),
        }
    }

    pub(crate) fn handle_event(&mut self, event: Event) {
        match event {
            Event::Tick { generation } => self.on_tick(generation),
            Event::ReplyDue { reply_id } => self.on_reply_due(reply_id),
            Event::MemorySettle { generation } => self.on_memory_settle(generation),
        }
    }

    fn emit(&self, update: Update) {
        // The presentation layer may already be gone during shutdown
        let _ = self.updates.send(update);
    }

    // ============================================================================
    // Chat
    // ============================================================================

    fn say(&mut self, text: String) {
        let Some(message) = self.transcript.submit(&text).cloned() else {
            tracing::debug!(target: "companion", "Ignoring blank input");
            return;
        };
        self.emit(Update::Message(message));

        let reply_id = self.next_reply_id;
        self.next_reply_id += 1;
        let timer = Scheduled::spawn(
            self.config.reply_delay(),
            &self.shutdown,
            self.events.clone(),
            Event::ReplyDue { reply_id },
        );

        let was_idle = self.pending_replies.is_empty();
        self.pending_replies.insert(
            reply_id,
            PendingReply {
                input: text,
                _timer: timer,
            },
        );
        if was_idle {
            self.emit(Update::Typing(true));
        }
    }

    fn on_reply_due(&mut self, reply_id: u64) {
        let Some(pending) = self.pending_replies.remove(&reply_id) else {
            tracing::debug!(target: "companion", reply_id, "Dropping reply that is no longer pending");
            return;
        };

        let reply = classify_and_reply(&pending.input, &mut self.rng);
        let message = self.transcript.push_reply(reply).clone();
        self.emit(Update::Message(message));
        if self.pending_replies.is_empty() {
            self.emit(Update::Typing(false));
        }
    }

    // ============================================================================
    // Breathing
    // ============================================================================

    fn breathing_command(&mut self, command: BreathingCommand) {
        match command {
            BreathingCommand::Start => {
                if !self.breathing.is_running() {
                    self.breathing.start();
                    self.start_ticker();
                    tracing::info!(
                        target: "breathing",
                        pattern = %self.breathing.pattern().key,
                        "Breathing exercise started"
                    );
                }
            }
            BreathingCommand::Pause => {
                self.stop_ticker();
                self.breathing.pause();
            }
            BreathingCommand::Reset => {
                self.stop_ticker();
                self.breathing.reset();
            }
            BreathingCommand::SelectPattern(key) => {
                self.stop_ticker();
                self.breathing.select_pattern(key);
                tracing::info!(target: "breathing", pattern = %key, "Breathing pattern selected");
            }
            BreathingCommand::Show => {}
        }
        self.emit(Update::Breathing(self.breathing.snapshot()));
    }

    fn start_ticker(&mut self) {
        self.stop_ticker();
        let generation = self.tick_generation;
        self.ticker = Some(Ticker::spawn(
            self.config.tick_interval(),
            &self.shutdown,
            self.events.clone(),
            Event::Tick { generation },
        ));
    }

    /// Cancels the ticker and invalidates any tick it already queued.
    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        self.tick_generation += 1;
    }

    fn on_tick(&mut self, generation: u64) {
        if self.ticker.is_none() || generation != self.tick_generation {
            tracing::trace!(target: "breathing", generation, "Dropping stale tick");
            return;
        }

        match self.breathing.tick() {
            TickOutcome::CycleCompleted { completed_cycles } => {
                tracing::info!(target: "breathing", completed_cycles, "Breathing cycle completed");
            }
            TickOutcome::PhaseChanged { phase } => {
                tracing::debug!(target: "breathing", %phase, "Phase changed");
            }
            TickOutcome::Counted | TickOutcome::Idle => {}
        }
        self.emit(Update::Breathing(self.breathing.snapshot()));
    }

    // ============================================================================
    // Games
    // ============================================================================

    fn memory_command(&mut self, command: MemoryCommand) {
        match command {
            MemoryCommand::NewGame => {
                self.memory_settle = None;
                self.memory_generation += 1;
                self.memory.new_game(&mut self.rng);
            }
            MemoryCommand::Flip(id) => match self.memory.flip(id) {
                FlipOutcome::Ignored => {
                    self.emit(Update::Rejected(format!(
                        "card {} can't be flipped right now",
                        id.saturating_add(1)
                    )));
                    return;
                }
                FlipOutcome::Revealed => {}
                FlipOutcome::PairPending { matched } => {
                    tracing::debug!(target: "games", matched, "Memory pair revealed");
                    self.memory_generation += 1;
                    self.memory_settle = Some(Scheduled::spawn(
                        self.config.memory_settle_delay(),
                        &self.shutdown,
                        self.events.clone(),
                        Event::MemorySettle {
                            generation: self.memory_generation,
                        },
                    ));
                }
            },
            MemoryCommand::Show => {}
        }
        self.emit_memory();
    }

    fn on_memory_settle(&mut self, generation: u64) {
        if generation != self.memory_generation {
            return;
        }
        self.memory_settle = None;

        if self.memory.settle() == SettleOutcome::Matched && self.memory.is_complete() {
            tracing::info!(target: "games", moves = self.memory.moves(), "Memory board completed");
        }
        self.emit_memory();
    }

    fn emit_memory(&self) {
        self.emit(Update::Memory {
            cards: self.memory.cards().to_vec(),
            moves: self.memory.moves(),
            complete: self.memory.is_complete(),
        });
    }

    fn trivia_command(&mut self, command: TriviaCommand) {
        match command {
            TriviaCommand::Answer(index) => match self.trivia.answer(index) {
                Ok(feedback) => self.emit(Update::TriviaAnswered(feedback)),
                Err(err) => self.emit(Update::Rejected(err.to_string())),
            },
            TriviaCommand::Next => {
                self.trivia.next();
                self.emit(Update::Trivia(self.trivia.view()));
            }
            TriviaCommand::Reset => {
                self.trivia.reset();
                self.emit(Update::Trivia(self.trivia.view()));
            }
            TriviaCommand::Show => self.emit(Update::Trivia(self.trivia.view())),
        }
    }

    fn color_command(&mut self, command: ColorCommand) {
        match command {
            ColorCommand::Pick(swatch) => {
                let text = self.canvas.pick(swatch, &mut self.rng);
                self.emit(Update::Affirmation {
                    swatch,
                    text,
                    picked: self.canvas.picked().len(),
                });
            }
            ColorCommand::Clear => {
                self.canvas.clear();
                self.emit(Update::CanvasCleared);
            }
        }
    }

    /// Releases every timer. Nothing is delivered to the state afterwards.
    fn teardown(&mut self) {
        self.stop_ticker();
        self.pending_replies.clear();
        self.memory_settle = None;
        tracing::info!(
            target: "runtime",
            messages = self.transcript.len(),
            "Companion runtime stopped"
        );
    }
}

/// Handle to a spawned runtime.
pub struct RuntimeHandle {
    commands: mpsc::Sender<Command>,
    shutdown: CancellationToken,
    task: JoinHandle<Transcript>,
}

impl RuntimeHandle {
    pub async fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| anyhow!("companion runtime has stopped"))
    }

    /// Stops the runtime, cancelling all timers, and returns the transcript.
    pub async fn shutdown(self) -> Result<Transcript> {
        self.shutdown.cancel();
        let transcript = self
            .task
            .await
            .map_err(|e| MitraError::internal(format!("companion runtime failed: {}", e)))?;
        Ok(transcript)
    }
}

/// Spawns the runtime on the current tokio runtime.
///
/// Returns the handle for sending commands and the stream of updates to
/// render. The config is validated first, so a zero tick interval never
/// reaches the timers.
pub fn spawn(
    config: MitraConfig,
    rng: StdRng,
) -> mitra_core::Result<(RuntimeHandle, mpsc::UnboundedReceiver<Update>)> {
    config.validate()?;
    let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    let shutdown = CancellationToken::new();

    let runtime = CompanionRuntime::new(config, rng, shutdown.clone(), event_tx, update_tx);
    let task = tokio::spawn(runtime.run(event_rx, command_rx));

    Ok((
        RuntimeHandle {
            commands: command_tx,
            shutdown,
            task,
        },
        update_rx,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mitra_core::breathing::{PatternKey, Phase};
    use mitra_core::companion::ReplyCategory;
    use rand::SeedableRng;
    use std::time::Duration;

    struct Harness {
        runtime: CompanionRuntime,
        events: mpsc::UnboundedReceiver<Event>,
        updates: mpsc::UnboundedReceiver<Update>,
        shutdown: CancellationToken,
    }

    impl Harness {
        fn new() -> Self {
            let (event_tx, events) = mpsc::unbounded_channel();
            let (update_tx, updates) = mpsc::unbounded_channel();
            let shutdown = CancellationToken::new();
            let runtime = CompanionRuntime::new(
                MitraConfig::default(),
                StdRng::seed_from_u64(1),
                shutdown.clone(),
                event_tx,
                update_tx,
            );
            Self {
                runtime,
                events,
                updates,
                shutdown,
            }
        }

        /// Waits for the next timer event and feeds it to the runtime.
        async fn pump(&mut self) -> Event {
            let event = self.events.recv().await.expect("event channel open");
            self.runtime.handle_event(event);
            event
        }

        fn drain_updates(&mut self) -> Vec<Update> {
            let mut updates = Vec::new();
            while let Ok(update) = self.updates.try_recv() {
                updates.push(update);
            }
            updates
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_arrives_after_delay_with_typing_indicator() {
        let mut h = Harness::new();
        let start = tokio::time::Instant::now();
        h.runtime.handle_command(Command::Say("I feel so sad".to_string()));

        let updates = h.drain_updates();
        assert!(matches!(&updates[0], Update::Message(m) if m.is_from_user));
        assert_eq!(updates[1], Update::Typing(true));

        h.pump().await;
        assert!(start.elapsed() >= Duration::from_millis(1500));

        let updates = h.drain_updates();
        match &updates[..] {
            [Update::Message(reply), Update::Typing(false)] => {
                assert!(!reply.is_from_user);
                assert!(ReplyCategory::Sad.pool().contains(&reply.text.as_str()));
            }
            other => panic!("unexpected updates: {:?}", other),
        }
        // greeting + user + reply
        assert_eq!(h.runtime.transcript.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_input_schedules_nothing() {
        let mut h = Harness::new();
        h.runtime.handle_command(Command::Say("   ".to_string()));
        assert!(h.drain_updates().is_empty());
        assert!(h.runtime.pending_replies.is_empty());
        assert_eq!(h.runtime.transcript.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_replies_keep_typing_until_last() {
        let mut h = Harness::new();
        h.runtime.handle_command(Command::Say("good day".to_string()));
        tokio::time::sleep(Duration::from_millis(500)).await;
        h.runtime.handle_command(Command::Say("so tired".to_string()));

        let typing: Vec<Update> = h
            .drain_updates()
            .into_iter()
            .filter(|u| matches!(u, Update::Typing(_)))
            .collect();
        assert_eq!(typing, vec![Update::Typing(true)]);

        h.pump().await;
        assert!(!h.drain_updates().contains(&Update::Typing(false)));
        h.pump().await;
        assert!(h.drain_updates().contains(&Update::Typing(false)));

        let replies: Vec<&str> = h.runtime.transcript.messages()[3..]
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert!(ReplyCategory::Happy.pool().contains(&replies[0]));
        assert!(ReplyCategory::Tired.pool().contains(&replies[1]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_due_is_idempotent() {
        let mut h = Harness::new();
        h.runtime.handle_command(Command::Say("hello".to_string()));
        let event = h.pump().await;
        let len = h.runtime.transcript.len();
        h.runtime.handle_event(event);
        assert_eq!(h.runtime.transcript.len(), len);
    }

    #[tokio::test(start_paused = true)]
    async fn test_breathing_ticks_drive_the_session() {
        let mut h = Harness::new();
        h.runtime
            .handle_command(Command::Breathing(BreathingCommand::Start));
        for _ in 0..12 {
            h.pump().await;
        }
        let session = &h.runtime.breathing;
        assert_eq!(session.completed_cycles(), 1);
        assert_eq!(session.phase(), Phase::Inhale);
        assert_eq!(session.seconds_remaining(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_tick_after_pause_is_dropped() {
        let mut h = Harness::new();
        h.runtime
            .handle_command(Command::Breathing(BreathingCommand::Start));
        h.pump().await;

        // Let the ticker queue one more tick, then pause before handling it
        let queued = h.events.recv().await.unwrap();
        h.runtime
            .handle_command(Command::Breathing(BreathingCommand::Pause));
        let before = h.runtime.breathing.snapshot();
        h.runtime.handle_event(queued);
        assert_eq!(h.runtime.breathing.snapshot(), before);

        h.runtime
            .handle_command(Command::Breathing(BreathingCommand::Start));
        h.pump().await;
        assert_eq!(h.runtime.breathing.seconds_remaining(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pattern_change_while_running_stops_and_resets() {
        let mut h = Harness::new();
        h.runtime
            .handle_command(Command::Breathing(BreathingCommand::Start));
        h.pump().await;
        h.runtime.handle_command(Command::Breathing(
            BreathingCommand::SelectPattern(PatternKey::Relaxing),
        ));

        let session = &h.runtime.breathing;
        assert!(!session.is_running());
        assert_eq!(session.pattern().key, PatternKey::Relaxing);
        assert_eq!(session.seconds_remaining(), 4);
        assert!(h.runtime.ticker.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_memory_pair_settles_after_delay() {
        let mut h = Harness::new();
        let cards = h.runtime.memory.cards().to_vec();
        let first = &cards[0];
        let partner = cards
            .iter()
            .find(|c| c.id != first.id && c.symbol == first.symbol)
            .unwrap();

        h.runtime
            .handle_command(Command::Memory(MemoryCommand::Flip(first.id)));
        h.runtime
            .handle_command(Command::Memory(MemoryCommand::Flip(partner.id)));
        assert!(h.runtime.memory.has_pending_pair());

        h.pump().await;
        assert!(!h.runtime.memory.has_pending_pair());
        assert_eq!(h.runtime.memory.matched_pairs(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_memory_game_discards_pending_settle() {
        let mut h = Harness::new();
        h.runtime
            .handle_command(Command::Memory(MemoryCommand::Flip(0)));
        h.runtime
            .handle_command(Command::Memory(MemoryCommand::Flip(1)));
        let stale = Event::MemorySettle {
            generation: h.runtime.memory_generation,
        };
        h.runtime
            .handle_command(Command::Memory(MemoryCommand::NewGame));

        h.runtime.handle_event(stale);
        assert_eq!(h.runtime.memory.moves(), 0);
        assert!(h.runtime.memory.can_flip());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejections_are_reported() {
        let mut h = Harness::new();
        h.runtime
            .handle_command(Command::Memory(MemoryCommand::Flip(40)));
        h.runtime
            .handle_command(Command::Trivia(TriviaCommand::Answer(9)));
        let rejected = h
            .drain_updates()
            .into_iter()
            .filter(|u| matches!(u, Update::Rejected(_)))
            .count();
        assert_eq!(rejected, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_range_indices_are_rejected_without_panicking() {
        let mut h = Harness::new();
        h.runtime
            .handle_command(Command::Memory(MemoryCommand::Flip(usize::MAX)));
        h.runtime
            .handle_command(Command::Trivia(TriviaCommand::Answer(usize::MAX)));

        let rejected: Vec<Update> = h
            .drain_updates()
            .into_iter()
            .filter(|u| matches!(u, Update::Rejected(_)))
            .collect();
        assert_eq!(rejected.len(), 2);
        assert!(h.runtime.trivia.view() == TriviaQuiz::new().view());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawn_rejects_zero_tick_interval() {
        let config = MitraConfig {
            tick_interval_ms: 0,
            ..MitraConfig::default()
        };
        let err = spawn(config, StdRng::seed_from_u64(4)).err().unwrap();
        assert!(matches!(err, MitraError::Config(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_cancels_pending_reply() {
        let mut h = Harness::new();
        h.runtime.handle_command(Command::Say("worried".to_string()));
        h.runtime
            .handle_command(Command::Breathing(BreathingCommand::Start));
        h.shutdown.cancel();
        h.runtime.teardown();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(h.events.try_recv().is_err());
        // greeting + user message, no reply
        assert_eq!(h.runtime.transcript.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_runtime_round_trip() {
        let (handle, mut updates) =
            spawn(MitraConfig::default(), StdRng::seed_from_u64(2)).unwrap();

        match updates.recv().await {
            Some(Update::Message(greeting)) => assert!(greeting.text.contains("Mitra")),
            other => panic!("expected greeting, got {:?}", other),
        }

        handle
            .send(Command::Say("I'm so angry".to_string()))
            .await
            .unwrap();
        let mut reply = None;
        while let Some(update) = updates.recv().await {
            if let Update::Message(message) = update {
                if !message.is_from_user {
                    reply = Some(message);
                    break;
                }
            }
        }
        let reply = reply.unwrap();
        assert!(ReplyCategory::Angry.pool().contains(&reply.text.as_str()));

        let transcript = handle.shutdown().await.unwrap();
        assert_eq!(transcript.len(), 3);
    }
}
