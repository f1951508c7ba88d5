mod modal_overlay;
pub use modal_overlay::{ConfirmDialog, ModalOverlay};

mod search;
pub use search::{EmptyRow, SearchBox};

mod attendance;
pub use attendance::{CaptureView, PresentTable, RosterTable, ThresholdControls};

mod portrait;
pub use portrait::PortraitUpload;

mod gallery;
pub use gallery::ParentGallery;
