//! Per-screen state owned by each screen's controller and handed to the
//! renderer by reference. Nothing here is process-wide.

pub mod form;
pub mod panel;

pub use form::{Feedback, FormController, FormDraft};
pub use panel::{Loadable, RepositoryPanel, StatsPanel};
