use serde::{Deserialize, Serialize};
use thumbgrid_core::clamp_output_count;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortKind {
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPort {
    pub name: String,
    pub kind: PortKind,
}

impl OutputPort {
    /// Image output for the 1-based `position`.
    pub fn image(position: usize) -> Self {
        Self {
            name: format!("image_{position}"),
            kind: PortKind::Image,
        }
    }
}

/// Whatever owns a node's output ports.
pub trait PortHost {
    fn output_count(&self) -> usize;
    fn add_output(&mut self, port: OutputPort);
    fn remove_output(&mut self, index: usize);
}

/// Plain port list, used when the widget owns its node model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPorts {
    ports: Vec<OutputPort>,
}

impl OutputPorts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ports(&self) -> &[OutputPort] {
        &self.ports
    }

    pub fn names(&self) -> Vec<&str> {
        self.ports.iter().map(|p| p.name.as_str()).collect()
    }
}

impl PortHost for OutputPorts {
    fn output_count(&self) -> usize {
        self.ports.len()
    }

    fn add_output(&mut self, port: OutputPort) {
        self.ports.push(port);
    }

    fn remove_output(&mut self, index: usize) {
        if index < self.ports.len() {
            self.ports.remove(index);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArityChange {
    pub added: usize,
    pub removed: usize,
    pub count: usize,
}

/// Brings a node's output ports in line with the configured count.
pub struct OutputArityController;

impl OutputArityController {
    /// Trim or extend `host`'s outputs to `desired`, clamped to `[1, 6]`.
    /// Existing ports below the target are left untouched.
    pub fn apply<H: PortHost + ?Sized>(host: &mut H, desired: i64) -> ArityChange {
        let target = clamp_output_count(desired);
        let current = host.output_count();

        let mut removed = 0;
        for index in (target..current).rev() {
            host.remove_output(index);
            removed += 1;
        }

        let mut added = 0;
        for index in current..target {
            host.add_output(OutputPort::image(index + 1));
            added += 1;
        }

        if added + removed > 0 {
            tracing::debug!(
                "Output ports {} -> {} (+{} -{})",
                current,
                target,
                added,
                removed
            );
        }

        ArityChange {
            added,
            removed,
            count: host.output_count(),
        }
    }
}
