//! Edge-triggered gate for one-shot actions driven by a continuous signal.

/// Fires once per contiguous run of a true trigger.
///
/// The gate latches when it fires and only rearms after observing a false
/// trigger. There are no timers: holding a gesture for one frame or a
/// thousand produces exactly one firing.
#[derive(Debug, Default, Clone, Copy)]
pub struct CooldownGate {
    latched: bool,
}

impl CooldownGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds this frame's trigger value and reports whether the action fires.
    pub fn evaluate(&mut self, triggered: bool) -> bool {
        if !triggered {
            self.latched = false;
            return false;
        }
        if self.latched {
            return false;
        }
        self.latched = true;
        true
    }

    /// Rearms the gate without firing.
    pub fn reset(&mut self) {
        self.latched = false;
    }

    /// True while the gate is waiting for the trigger to drop.
    pub fn is_latched(&self) -> bool {
        self.latched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(triggers: &[bool]) -> Vec<bool> {
        let mut gate = CooldownGate::new();
        triggers.iter().map(|&t| gate.evaluate(t)).collect()
    }

    #[test]
    fn fires_once_per_contiguous_run() {
        let fires = run(&[false, true, true, true, false, true]);
        assert_eq!(fires, vec![false, true, false, false, false, true]);
    }

    #[test]
    fn long_run_fires_only_on_leading_edge() {
        let fires = run(&[true; 50]);
        assert_eq!(fires.iter().filter(|&&f| f).count(), 1);
        assert!(fires[0]);
    }

    #[test]
    fn never_fires_without_trigger() {
        assert!(run(&[false; 10]).iter().all(|&f| !f));
    }

    #[test]
    fn reset_rearms_latched_gate() {
        let mut gate = CooldownGate::new();
        assert!(gate.evaluate(true));
        assert!(gate.is_latched());
        gate.reset();
        assert!(!gate.is_latched());
        assert!(gate.evaluate(true));
    }
}
