//! Input-side timing constants
//!
//! All times are in milliseconds and compared with wrapping arithmetic
//! against a free-running millisecond counter.

/// Minimum interval between two gamepad polls
pub const GAMEPAD_POLL_INTERVAL_MS: u32 = 20;

/// Cooldown after an invalid gamepad report before reinitializing
pub const GAMEPAD_RETRY_COOLDOWN_MS: u32 = 1000;

/// Time the gamepad receiver needs after power-up before it accepts init
pub const GAMEPAD_POWER_UP_MS: u32 = 2000;

/// Console reset pulse width
pub const RESET_PULSE_MS: u32 = 50;

/// Check whether `now` has reached `deadline` on a wrapping millisecond clock
pub const fn deadline_reached(now: u32, deadline: u32) -> bool {
    (now.wrapping_sub(deadline) as i32) >= 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_reached() {
        assert!(deadline_reached(100, 100));
        assert!(deadline_reached(101, 100));
        assert!(!deadline_reached(99, 100));
    }

    #[test]
    fn test_deadline_across_wrap() {
        let deadline = u32::MAX.wrapping_add(10);
        assert!(!deadline_reached(u32::MAX - 5, deadline));
        assert!(deadline_reached(10, deadline));
        assert!(deadline_reached(11, deadline));
    }
}
