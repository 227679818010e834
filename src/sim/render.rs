use std::sync::mpsc::{self, Receiver, Sender};

use crate::body::MotionState;

// ---------------------------------------------------------------------------
// Plot frames and the best-effort sink that carries them
// ---------------------------------------------------------------------------

/// Number of plot channels in a frame.
pub const CHANNELS: usize = 4;

/// One render tick worth of plot data: a trajectory point plus the speed,
/// acceleration and jerk magnitudes against time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotFrame {
    /// `[x, y]` pairs: trajectory, then |v|, |a|, |j| over time.
    pub channels: [[f64; 2]; CHANNELS],
}

impl PlotFrame {
    pub fn from_state(time: f64, state: &MotionState) -> Self {
        let p = state.position();
        Self {
            channels: [
                [p.x, p.y],
                [time, state.velocity().norm()],
                [time, state.acceleration().norm()],
                [time, state.jerk().norm()],
            ],
        }
    }

    pub fn altitude(&self) -> f64 {
        self.channels[0][1]
    }

    pub fn speed(&self) -> f64 {
        self.channels[1][1]
    }
}

/// Cloneable frame producer. Sends are best-effort: a closed or missing
/// consumer never stalls or fails the simulation loop.
#[derive(Debug, Clone)]
pub struct PlotSink {
    tx: Sender<PlotFrame>,
}

impl PlotSink {
    pub fn channel() -> (PlotSink, Receiver<PlotFrame>) {
        let (tx, rx) = mpsc::channel();
        (PlotSink { tx }, rx)
    }

    /// A sink whose consumer is already gone; publishes are dropped.
    pub fn null() -> PlotSink {
        let (sink, _rx) = Self::channel();
        sink
    }

    pub fn publish(&self, frame: PlotFrame) {
        let _ = self.tx.send(frame);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn frame_captures_state_magnitudes() {
        let mut state = MotionState::new(3, 1.0);
        state.set_derivative(0, Vector3::new(100.0, 2_500.0, 0.0));
        state.set_derivative(1, Vector3::new(30.0, 40.0, 0.0));
        state.set_derivative(2, Vector3::new(0.0, 9.8, 0.0));
        let frame = PlotFrame::from_state(12.0, &state);
        assert_eq!(frame.channels[0], [100.0, 2_500.0]);
        assert_eq!(frame.channels[1], [12.0, 50.0]);
        assert_eq!(frame.channels[2], [12.0, 9.8]);
        assert_eq!(frame.altitude(), 2_500.0);
        assert_eq!(frame.speed(), 50.0);
    }

    #[test]
    fn frames_arrive_in_order() {
        let (sink, rx) = PlotSink::channel();
        let state = MotionState::new(3, 1.0);
        for t in 0..3 {
            sink.publish(PlotFrame::from_state(t as f64, &state));
        }
        let times: Vec<f64> = rx.try_iter().map(|f| f.channels[1][0]).collect();
        assert_eq!(times, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn publish_without_consumer_is_silent() {
        let sink = PlotSink::null();
        let state = MotionState::new(3, 1.0);
        sink.publish(PlotFrame::from_state(0.0, &state));
    }
}
