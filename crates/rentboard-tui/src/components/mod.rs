pub mod chart_surface;
pub mod detail_surface;
pub mod error_panel;
pub mod help_modal;
pub mod spinner;
pub mod toast;
pub mod tooltip;

pub use chart_surface::{BarLayout, PointLayout};
pub use detail_surface::render_detail;
pub use error_panel::{render_empty_panel, render_error_panel};
pub use help_modal::HelpModal;
pub use spinner::Spinner;
pub use toast::{Toast, ToastManager, ToastType};
pub use tooltip::render_tooltip;
