//! Async playback driver
//!
//! Runs a [`PlaybackController`] inside a tokio task. The task sleeps until
//! the controller's next deadline or until a transport command arrives,
//! whichever comes first. Receiving a command drops the sleep, so a
//! cancelled timer never wakes the task.
//!
//! Every change is published twice: as the latest value on a `watch`
//! channel, and in order on each listener's mpsc channel. A late wake can
//! advance several steps at once; the `watch` keeps only the last of them,
//! while listeners receive each one.

use std::future;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use stepwise_core::Trace;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::clock::TokioClock;
use crate::controller::PlaybackController;
use crate::error::Result;
use crate::phase::Phase;

/// Published after every change to phase, cursor or speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackSnapshot {
    pub phase: Phase,
    pub cursor: usize,
    pub speed_ms: u64,
}

impl<P, C: crate::Clock> From<&PlaybackController<P, C>> for PlaybackSnapshot {
    fn from(controller: &PlaybackController<P, C>) -> Self {
        Self {
            phase: controller.phase(),
            cursor: controller.cursor(),
            speed_ms: controller.speed_ms(),
        }
    }
}

enum Command<P> {
    Play,
    Pause,
    Reset,
    SetSpeed(u64, oneshot::Sender<Result<()>>),
    JumpTo(usize, oneshot::Sender<Result<()>>),
    ReplaceTrace(Arc<Trace<P>>),
    Listen(mpsc::UnboundedSender<PlaybackSnapshot>),
    Dispose,
}

/// Handle to a running playback task.
///
/// Dropping the handle stops the task.
pub struct PlaybackDriver<P> {
    commands: mpsc::UnboundedSender<Command<P>>,
    snapshots: watch::Receiver<PlaybackSnapshot>,
    task: JoinHandle<()>,
}

impl<P> PlaybackDriver<P>
where
    P: Send + Sync + 'static,
{
    /// Spawn a driver for `trace` on the current tokio runtime.
    ///
    /// Fails without spawning if `speed_ms` is zero.
    pub fn spawn(trace: Arc<Trace<P>>, speed_ms: u64) -> Result<Self> {
        let controller = PlaybackController::with_clock(trace, speed_ms, TokioClock)?;
        let (snapshot_tx, snapshots) = watch::channel(PlaybackSnapshot::from(&controller));
        let (commands, command_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(controller, command_rx, snapshot_tx));
        Ok(Self {
            commands,
            snapshots,
            task,
        })
    }

    pub fn play(&self) {
        self.send(Command::Play);
    }

    pub fn pause(&self) {
        self.send(Command::Pause);
    }

    pub fn reset(&self) {
        self.send(Command::Reset);
    }

    pub fn replace_trace(&self, trace: Arc<Trace<P>>) {
        self.send(Command::ReplaceTrace(trace));
    }

    /// Change the step delay. A stopped driver accepts anything.
    pub async fn set_speed(&self, ms: u64) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::SetSpeed(ms, tx));
        rx.await.unwrap_or(Ok(()))
    }

    /// Move the cursor. A stopped driver accepts anything.
    pub async fn jump_to(&self, index: usize) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::JumpTo(index, tx));
        rx.await.unwrap_or(Ok(()))
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> PlaybackSnapshot {
        *self.snapshots.borrow()
    }

    /// A receiver holding the latest snapshot.
    ///
    /// Changes made in one wake are coalesced; use [`updates`](Self::updates)
    /// to see every step.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.snapshots.clone()
    }

    /// Every published change, in order, with nothing coalesced.
    ///
    /// The first item is the snapshot current when the task registers the
    /// listener, which happens before any command sent after this call.
    /// The channel closes when the task stops.
    pub fn updates(&self) -> mpsc::UnboundedReceiver<PlaybackSnapshot> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.send(Command::Listen(tx));
        rx
    }

    /// Wait until playback reaches the terminal step.
    ///
    /// Returns the final snapshot, or `None` if the task stopped first.
    pub async fn finished(&self) -> Option<PlaybackSnapshot> {
        let mut rx = self.snapshots.clone();
        let snapshot = rx.wait_for(|s| s.phase == Phase::Finished).await.ok()?;
        Some(*snapshot)
    }

    /// Stop the task and wait for it to exit.
    pub async fn dispose(self) {
        let Self { commands, task, .. } = self;
        let _ = commands.send(Command::Dispose);
        drop(commands);
        if let Err(err) = task.await {
            tracing::warn!(%err, "playback task ended abnormally");
        }
    }

    fn send(&self, command: Command<P>) {
        if self.commands.send(command).is_err() {
            tracing::trace!("playback task already stopped");
        }
    }
}

async fn run<P>(
    mut controller: PlaybackController<P, TokioClock>,
    mut commands: mpsc::UnboundedReceiver<Command<P>>,
    snapshots: watch::Sender<PlaybackSnapshot>,
) {
    tracing::debug!("playback task started");
    let changes = Arc::new(Mutex::new(Vec::new()));
    {
        let changes = changes.clone();
        controller.subscribe(move |u| changes.lock().push((u.phase, u.cursor)));
    }
    let mut publisher = Publisher {
        snapshots,
        listeners: Vec::new(),
    };

    loop {
        let deadline = controller.next_deadline();
        let mut reply = None;
        tokio::select! {
            biased;

            command = commands.recv() => match command {
                Some(Command::Dispose) | None => {
                    controller.dispose();
                    break;
                }
                Some(Command::Listen(tx)) => publisher.listen(tx),
                Some(command) => reply = apply(&mut controller, command),
            },
            _ = sleep_until(deadline) => {
                controller.tick();
            }
        }

        let speed_ms = controller.speed_ms();
        let drained = std::mem::take(&mut *changes.lock());
        for (phase, cursor) in drained {
            publisher.publish(PlaybackSnapshot {
                phase,
                cursor,
                speed_ms,
            });
        }
        // speed changes do not notify subscribers
        publisher.publish(PlaybackSnapshot::from(&controller));

        // answer only once the outcome is visible to watchers
        if let Some((tx, result)) = reply {
            let _ = tx.send(result);
        }
    }
    tracing::debug!("playback task stopped");
}

struct Publisher {
    snapshots: watch::Sender<PlaybackSnapshot>,
    listeners: Vec<mpsc::UnboundedSender<PlaybackSnapshot>>,
}

impl Publisher {
    fn listen(&mut self, tx: mpsc::UnboundedSender<PlaybackSnapshot>) {
        if tx.send(*self.snapshots.borrow()).is_ok() {
            self.listeners.push(tx);
        }
    }

    /// Publish `next` unless it equals the last published snapshot.
    fn publish(&mut self, next: PlaybackSnapshot) {
        if *self.snapshots.borrow() == next {
            return;
        }
        self.snapshots.send_replace(next);
        self.listeners.retain(|tx| tx.send(next).is_ok());
    }
}

type Reply = (oneshot::Sender<Result<()>>, Result<()>);

fn apply<P>(controller: &mut PlaybackController<P, TokioClock>, command: Command<P>) -> Option<Reply> {
    match command {
        Command::Play => controller.play(),
        Command::Pause => controller.pause(),
        Command::Reset => controller.reset(),
        Command::SetSpeed(ms, tx) => return Some((tx, controller.set_speed(ms))),
        Command::JumpTo(index, tx) => return Some((tx, controller.jump_to(index))),
        Command::ReplaceTrace(trace) => controller.replace_trace(trace),
        // handled by the task loop
        Command::Listen(_) => {}
        Command::Dispose => controller.dispose(),
    }
    None
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(due) => tokio::time::sleep_until(tokio::time::Instant::from_std(due)).await,
        None => future::pending().await,
    }
}
