use crate::clusters::ClusterSet;
use crate::precision::Element;
use serde::Serialize;

/// Lifecycle of a clustering run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MonitorState {
    Init,
    Iterating,
    Converged,
    MaxIterReached,
}

impl MonitorState {
    pub fn is_terminal(self) -> bool {
        matches!(self, MonitorState::Converged | MonitorState::MaxIterReached)
    }
}

/// Decides after each update pass whether another iteration is needed.
///
/// `total_delta` is the L1 movement of the centroids over one iteration.
/// Convergence is checked before the cap, so an iteration that is both the
/// last allowed and below `epsilon` reports `Converged`.
#[derive(Clone, Debug)]
pub struct ConvergenceMonitor<T = f32> {
    epsilon: f64,
    max_iterations: usize,
    iterations: usize,
    state: MonitorState,
    previous: Vec<T>,
    last_delta: Option<f64>,
}

impl<T: Element> ConvergenceMonitor<T> {
    pub fn new(epsilon: f64, max_iterations: usize) -> Self {
        ConvergenceMonitor {
            epsilon,
            max_iterations,
            iterations: 0,
            state: MonitorState::Init,
            previous: Vec::new(),
            last_delta: None,
        }
    }

    /// Snapshots the centroids at the start of an iteration.
    pub fn begin_iteration(&mut self, clusters: &ClusterSet<T>) {
        debug_assert!(!self.state.is_terminal(), "run already finished");
        self.previous.clear();
        self.previous.extend_from_slice(clusters.centroids());
        self.state = MonitorState::Iterating;
    }

    /// Compares the updated centroids with the snapshot and moves the state
    /// machine forward.
    pub fn end_iteration(&mut self, clusters: &ClusterSet<T>) -> MonitorState {
        let delta = clusters.total_delta(&self.previous);
        self.iterations += 1;
        self.last_delta = Some(delta);

        self.state = if delta <= self.epsilon {
            MonitorState::Converged
        } else if self.iterations >= self.max_iterations {
            MonitorState::MaxIterReached
        } else {
            MonitorState::Iterating
        };
        self.state
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn last_delta(&self) -> Option<f64> {
        self.last_delta
    }
}
