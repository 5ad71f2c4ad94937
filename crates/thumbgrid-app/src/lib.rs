pub mod arity;
pub mod decode;
pub mod entry;
pub mod painter;
pub mod pending;
pub mod reconciler;
pub mod selection;
pub mod settings;
pub mod state;
pub mod widget;

pub use arity::{ArityChange, OutputArityController, OutputPort, OutputPorts, PortHost, PortKind};
pub use decode::{DecodeWorker, decode_dimensions};
pub use entry::{DecodeState, Entry, EntryStore, ImageHandle};
pub use pending::PendingDeletions;
pub use reconciler::{SyncOutcome, SyncReconciler};
pub use selection::{SelectionChange, SelectionTracker};
pub use settings::WidgetSettings;
pub use state::GalleryState;
pub use widget::{GalleryWidget, NodeFields, PreviewRequest};
