//! Ordering of the test battery.
//!
//! [`Sequencer`] is a pure state machine that yields one [`Step`] at a time.
//! [`TestRunner`] executes those steps against a [`Canvas`], awaiting a
//! [`Pause`] for every delay, so a caller decides when to step, pause or stop.

use embassy_time::Duration;

use crate::{
    battery,
    graphics::Canvas,
};

/// The rendering demonstrations, in battery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TestId {
    LineNumber,
    FontScale,
    FontAlignment,
    ColorFont,
    BufferRotation,
    Path,
    Line,
    PolarLine,
}

impl TestId {
    pub const ALL: [TestId; 8] = [
        TestId::LineNumber,
        TestId::FontScale,
        TestId::FontAlignment,
        TestId::ColorFont,
        TestId::BufferRotation,
        TestId::Path,
        TestId::Line,
        TestId::PolarLine,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            TestId::LineNumber => "line number",
            TestId::FontScale => "font scale",
            TestId::FontAlignment => "font alignment",
            TestId::ColorFont => "color font",
            TestId::BufferRotation => "buffer rotation",
            TestId::Path => "path",
            TestId::Line => "draw lines",
            TestId::PolarLine => "polar lines",
        }
    }

    /// The following test in the full battery, wrapping around.
    pub const fn next(self) -> TestId {
        match self {
            TestId::LineNumber => TestId::FontScale,
            TestId::FontScale => TestId::FontAlignment,
            TestId::FontAlignment => TestId::ColorFont,
            TestId::ColorFont => TestId::BufferRotation,
            TestId::BufferRotation => TestId::Path,
            TestId::Path => TestId::Line,
            TestId::Line => TestId::PolarLine,
            TestId::PolarLine => TestId::LineNumber,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TestRunConfig {
    /// Run the whole battery, or only the line number test.
    pub run_all_tests: bool,
    /// How long each result stays on screen.
    pub inter_test_delay: Duration,
}

impl TestRunConfig {
    pub const DEFAULT: TestRunConfig = TestRunConfig {
        run_all_tests: true,
        inter_test_delay: Duration::from_secs(5),
    };
}

impl Default for TestRunConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    Run(TestId),
    Wait(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ready(TestId),
    /// Holding the finished test on screen; `TestId` runs after the delay.
    Delay(TestId),
    Cancelled,
}

/// Steps through the battery forever: a test, the inter-test delay, the next
/// test. Always starts with [`TestId::LineNumber`].
#[derive(Debug, Clone)]
pub struct Sequencer {
    config: TestRunConfig,
    state: State,
    paused: bool,
}

impl Sequencer {
    pub const fn new(config: TestRunConfig) -> Self {
        Self {
            config,
            state: State::Ready(TestId::LineNumber),
            paused: false,
        }
    }

    pub const fn config(&self) -> &TestRunConfig {
        &self.config
    }

    /// The next step, or `None` while paused or once cancelled.
    pub fn next_step(&mut self) -> Option<Step> {
        if self.paused {
            return None;
        }
        match self.state {
            State::Ready(test) => {
                self.state = State::Delay(self.successor(test));
                Some(Step::Run(test))
            }
            State::Delay(next) => {
                self.state = State::Ready(next);
                Some(Step::Wait(self.config.inter_test_delay))
            }
            State::Cancelled => None,
        }
    }

    /// The test the sequence will run next, if any.
    pub const fn upcoming(&self) -> Option<TestId> {
        match self.state {
            State::Ready(test) | State::Delay(test) => Some(test),
            State::Cancelled => None,
        }
    }

    /// Holds the sequence at its current position.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Ends the sequence; it cannot be resumed.
    pub fn cancel(&mut self) {
        self.state = State::Cancelled;
    }

    pub const fn is_cancelled(&self) -> bool {
        matches!(self.state, State::Cancelled)
    }

    const fn successor(&self, test: TestId) -> TestId {
        if self.config.run_all_tests {
            test.next()
        } else {
            TestId::LineNumber
        }
    }
}

/// Suspends the runner between tests and between frames of a test.
#[allow(async_fn_in_trait)]
pub trait Pause {
    async fn pause(&mut self, duration: Duration);
}

/// Drives a [`Sequencer`] against a canvas.
pub struct TestRunner<C, P> {
    canvas: C,
    pause: P,
    sequencer: Sequencer,
}

impl<C, P> TestRunner<C, P>
where
    C: Canvas,
    P: Pause,
{
    pub fn new(canvas: C, pause: P, config: TestRunConfig) -> Self {
        Self {
            canvas,
            pause,
            sequencer: Sequencer::new(config),
        }
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn pause_source(&self) -> &P {
        &self.pause
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn sequencer_mut(&mut self) -> &mut Sequencer {
        &mut self.sequencer
    }

    /// Executes exactly one step. Returns `None` without doing anything when
    /// the sequencer is paused or cancelled.
    pub async fn step(&mut self) -> Result<Option<Step>, C::Error> {
        let Some(step) = self.sequencer.next_step() else {
            return Ok(None);
        };
        match step {
            Step::Run(test) => {
                debug!("running {} test", test.name());
                battery::run(test, &mut self.canvas, &mut self.pause).await?;
            }
            Step::Wait(duration) => self.pause.pause(duration).await,
        }
        Ok(Some(step))
    }

    /// Steps until the sequencer is paused or cancelled.
    pub async fn run(&mut self) -> Result<(), C::Error> {
        info!("display test running...");
        while self.step().await?.is_some() {}
        info!("display test stopped");
        Ok(())
    }
}
