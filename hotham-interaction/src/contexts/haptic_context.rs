use crate::components::Handedness;

/// A single vibration request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HapticPulse {
    pub handedness: Handedness,
    /// Amplitude, from 0 to 1
    pub strength: f32,
    pub duration_ms: f32,
}

/// Wrapper around XR haptics. Modules request pulses during a tick, and the host applies them to
/// the controllers afterwards.
#[derive(Clone, Debug, Default)]
pub struct HapticContext {
    pulses: Vec<HapticPulse>,
}

impl HapticContext {
    /// Request a haptic pulse be played this tick
    pub fn request_haptic_feedback(
        &mut self,
        strength: f32,
        duration_ms: f32,
        handedness: Handedness,
    ) {
        self.pulses.push(HapticPulse {
            handedness,
            strength,
            duration_ms,
        });
    }

    /// Strongest amplitude requested for this hand this tick, `0` if none
    pub fn amplitude_this_frame(&self, handedness: Handedness) -> f32 {
        self.pulses
            .iter()
            .filter(|p| p.handedness == handedness)
            .fold(0.0, |amplitude, p| amplitude.max(p.strength))
    }

    pub fn pulses(&self) -> &[HapticPulse] {
        &self.pulses
    }

    /// Take every pending pulse, resetting the context for the next tick
    pub fn drain(&mut self) -> Vec<HapticPulse> {
        std::mem::take(&mut self.pulses)
    }
}
