//! Notification sink and arming side effects
//!
//! The arming gate reports status text and arm/disarm events through a
//! `Notifier`, and triggers subsystem resets through `ArmingHooks`.

use core::fmt::Write;

/// Status text severity (MAVLink MAV_SEVERITY subset)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Severity {
    Critical,
    Warning,
    Info,
    Debug,
}

/// Ground-station / buzzer notification sink
pub trait Notifier {
    /// Send a bounded status text line
    fn send_text(&mut self, severity: Severity, text: &str);

    /// An arm attempt failed
    fn arming_failed(&mut self);

    /// Armed state changed
    fn armed_changed(&mut self, armed: bool);
}

/// Side effects run on arm/disarm transitions
pub trait ArmingHooks {
    /// Capture home references for dependent subsystems
    fn init_home_references(&mut self);

    /// Drop any pending autonomous mission
    fn reset_mission(&mut self);
}

// ============================================================================
// Mock Implementations (always available for testing)
// ============================================================================

/// Longest recorded text line
pub const RECORDED_TEXT_LEN: usize = 64;

/// Most text lines kept by `RecordingNotifier`
pub const RECORDED_TEXT_COUNT: usize = 16;

/// Notifier that records everything it is sent
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    texts: heapless::Vec<(Severity, heapless::String<RECORDED_TEXT_LEN>), RECORDED_TEXT_COUNT>,
    arming_failed: usize,
    armed_events: heapless::Vec<bool, RECORDED_TEXT_COUNT>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded text lines in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.texts.iter().map(|(_, text)| text.as_str())
    }

    pub fn contains(&self, text: &str) -> bool {
        self.texts().any(|t| t == text)
    }

    pub fn text_count(&self) -> usize {
        self.texts.len()
    }

    /// Number of arming-failed events
    pub fn arming_failed_count(&self) -> usize {
        self.arming_failed
    }

    /// Armed-changed events in order
    pub fn armed_events(&self) -> &[bool] {
        &self.armed_events
    }

    pub fn clear(&mut self) {
        self.texts.clear();
        self.arming_failed = 0;
        self.armed_events.clear();
    }
}

impl Notifier for RecordingNotifier {
    fn send_text(&mut self, severity: Severity, text: &str) {
        let mut line = heapless::String::new();
        for c in text.chars() {
            if line.push(c).is_err() {
                break;
            }
        }
        let _ = self.texts.push((severity, line));
    }

    fn arming_failed(&mut self) {
        self.arming_failed += 1;
    }

    fn armed_changed(&mut self, armed: bool) {
        let _ = self.armed_events.push(armed);
    }
}

/// Notifier that forwards status text to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send_text(&mut self, severity: Severity, text: &str) {
        match severity {
            Severity::Critical => crate::log_error!("{}", text),
            Severity::Warning => crate::log_warn!("{}", text),
            Severity::Info => crate::log_info!("{}", text),
            Severity::Debug => crate::log_debug!("{}", text),
        }
    }

    fn arming_failed(&mut self) {
        crate::log_warn!("Arming failed");
    }

    fn armed_changed(&mut self, armed: bool) {
        crate::log_info!("Armed state changed: {}", armed);
    }
}

/// Hooks that count how often each side effect ran
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordingHooks {
    pub home_inits: usize,
    pub mission_resets: usize,
}

impl ArmingHooks for RecordingHooks {
    fn init_home_references(&mut self) {
        self.home_inits += 1;
    }

    fn reset_mission(&mut self) {
        self.mission_resets += 1;
    }
}

/// Format into a fixed-size line, truncating at capacity
pub fn format_line<const N: usize>(args: core::fmt::Arguments<'_>) -> heapless::String<N> {
    struct Truncating<'a, const N: usize>(&'a mut heapless::String<N>);

    impl<const N: usize> Write for Truncating<'_, N> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            for c in s.chars() {
                if self.0.push(c).is_err() {
                    break;
                }
            }
            Ok(())
        }
    }

    let mut line = heapless::String::new();
    let _ = core::fmt::write(&mut Truncating(&mut line), args);
    line
}
