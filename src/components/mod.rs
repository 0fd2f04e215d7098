mod category_modal;
mod spending_modal;
mod upload_modal;

pub use category_modal::CategoryModal;
pub use spending_modal::SpendingModal;
pub use upload_modal::UploadModal;
