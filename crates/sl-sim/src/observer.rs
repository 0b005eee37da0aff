//! Read-only hook into the loop between propagate and integrate.

use sl_core::{CompId, Real};

/// Temperature profile of one time-varying component at one iteration.
#[derive(Debug, Clone, Copy)]
pub struct ProfileSnapshot<'a> {
    pub id: CompId,
    pub name: &'a str,
    pub title: &'a str,
    /// One temperature per cell, inlet first.
    pub profile: &'a [Real],
}

impl ProfileSnapshot<'_> {
    pub fn min(&self) -> Real {
        self.profile.iter().copied().fold(Real::INFINITY, Real::min)
    }

    pub fn max(&self) -> Real {
        self.profile
            .iter()
            .copied()
            .fold(Real::NEG_INFINITY, Real::max)
    }

    pub fn mean(&self) -> Real {
        if self.profile.is_empty() {
            return Real::NAN;
        }
        self.profile.iter().sum::<Real>() / self.profile.len() as Real
    }
}

/// Receives profile snapshots while a simulation runs.
///
/// Observers cannot change the loop, so leaving one out does not change the
/// computed temperatures.
pub trait Observer {
    fn observe(&mut self, iteration: usize, snapshots: &[ProfileSnapshot<'_>]);
}

impl<F> Observer for F
where
    F: FnMut(usize, &[ProfileSnapshot<'_>]),
{
    fn observe(&mut self, iteration: usize, snapshots: &[ProfileSnapshot<'_>]) {
        self(iteration, snapshots)
    }
}

/// Logs min/mean/max of every profile at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn observe(&mut self, iteration: usize, snapshots: &[ProfileSnapshot<'_>]) {
        for snap in snapshots {
            tracing::debug!(
                iteration,
                component = snap.name,
                title = snap.title,
                min = snap.min(),
                mean = snap.mean(),
                max = snap.max(),
                "profile"
            );
        }
    }
}
