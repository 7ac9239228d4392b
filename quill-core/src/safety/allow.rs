//! Commands permitted while halted

/// M-codes that may run while the machine is halted
///
/// Stop and power-down commands plus status queries. Nothing here starts
/// motion.
pub const HALT_ALLOWED_MCODES: AllowSet = AllowSet::new(&[
    2,   // program end
    5,   // spindle stop
    9,   // coolant off
    30,  // program end and rewind
    80,  // power supply on
    81,  // power supply off
    105, // report temperatures
    106, // fan on
    107, // fan off
    114, // report position
    119, // report endstops
    503, // report settings
    911, // report motor driver status
]);

/// Fixed set of M-code numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AllowSet {
    codes: &'static [u16],
}

impl AllowSet {
    /// Wrap a static list of M-code numbers
    pub const fn new(codes: &'static [u16]) -> Self {
        Self { codes }
    }

    /// Check if an M-code number is in the set
    pub fn contains(&self, mcode: u16) -> bool {
        self.codes.contains(&mcode)
    }

    /// M-code numbers in the set
    pub fn codes(&self) -> &'static [u16] {
        self.codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queries_allowed() {
        for code in [105, 114, 119, 503, 911] {
            assert!(HALT_ALLOWED_MCODES.contains(code), "M{}", code);
        }
    }

    #[test]
    fn test_motion_and_heating_refused() {
        for code in [0, 3, 104, 109, 140, 190, 999] {
            assert!(!HALT_ALLOWED_MCODES.contains(code), "M{}", code);
        }
    }

    #[test]
    fn test_custom_set() {
        let set = AllowSet::new(&[1, 2]);
        assert!(set.contains(2));
        assert!(!set.contains(3));
        assert_eq!(set.codes().len(), 2);
    }
}
