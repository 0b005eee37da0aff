//! Owned component arena plus the links between its members.

use sl_components::{ComponentError, FlowPort};
use sl_core::{CompId, LoopConfig};
use sl_graph::Topology;

use crate::error::{SimError, SimResult};
use crate::observer::ProfileSnapshot;

/// Components addressed by `CompId`, wired together by a `Topology`.
///
/// Component `i` has id `CompId::from_usize(i)` in both the arena and the
/// topology.
#[derive(Debug, Default)]
pub struct Circuit {
    components: Vec<Box<dyn FlowPort>>,
    topology: Topology,
}

impl Circuit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a component and return its id.
    pub fn add(&mut self, component: Box<dyn FlowPort>) -> CompId {
        let id = self.topology.add();
        self.components.push(component);
        id
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = CompId> + '_ {
        self.topology.ids()
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn component(&self, id: CompId) -> SimResult<&dyn FlowPort> {
        self.components
            .get(id.as_usize())
            .map(|c| &**c)
            .ok_or(SimError::InvalidArg {
                what: "component id out of range",
            })
    }

    fn component_mut(&mut self, id: CompId) -> SimResult<&mut Box<dyn FlowPort>> {
        self.components
            .get_mut(id.as_usize())
            .ok_or(SimError::InvalidArg {
                what: "component id out of range",
            })
    }

    pub fn inlet(&self, id: CompId) -> Option<CompId> {
        self.topology.inlet(id)
    }

    pub fn outlet(&self, id: CompId) -> Option<CompId> {
        self.topology.outlet(id)
    }

    /// Connect the outlet of `from` to the inlet of `to`.
    ///
    /// `to` immediately sees the outlet temperature of `from`, and its flow
    /// rate when `from` has one.
    pub fn attach(&mut self, from: CompId, to: CompId) -> SimResult<()> {
        self.topology.attach(from, to)?;
        let upstream = self.component(from)?.upstream();
        self.component_mut(to)?.on_attach(upstream);
        Ok(())
    }

    /// Pull inlet temperature and flow rate from the upstream neighbour.
    pub fn update(&mut self, id: CompId) -> SimResult<()> {
        let inlet = self.inlet(id).ok_or_else(|| self.not_connected(id))?;
        let upstream = self.component(inlet)?.upstream();
        self.component_mut(id)?.update(upstream);
        Ok(())
    }

    /// Advance one component by a time step; no-op without a profile.
    pub fn time_step(&mut self, id: CompId, config: &LoopConfig) -> SimResult<()> {
        if let Some(tv) = self.component_mut(id)?.as_time_varying_mut() {
            tv.time_step(config)?;
        }
        Ok(())
    }

    /// Read-only view of a time-varying component's profile.
    pub fn snapshot(&self, id: CompId) -> Option<ProfileSnapshot<'_>> {
        let component = self.components.get(id.as_usize())?;
        let tv = component.as_time_varying()?;
        Some(ProfileSnapshot {
            id,
            name: component.name(),
            title: tv.title(),
            profile: tv.temperature_profile(),
        })
    }

    fn not_connected(&self, id: CompId) -> SimError {
        let name = self
            .components
            .get(id.as_usize())
            .map(|c| c.name().to_string())
            .unwrap_or_default();
        ComponentError::NotConnected { name }.into()
    }
}
