mod button;
mod celebration;
mod choice;
mod contact_form;
mod dialog;
pub mod layout;
pub mod palette;
mod picture;
mod proposal;
mod receipt;
mod spinner;
mod text_input;
mod toast;

pub use button::Button;
pub use celebration::{CelebrationLayout, CelebrationView, RECEIPT_LINK};
pub use choice::{ChoiceLayout, ChoiceView};
pub use contact_form::{ContactFormLayout, ContactFormState, ContactFormView, FormField};
pub use dialog::{DialogFrame, InstructionBar};
pub use picture::{fit_rect, Picture};
pub use proposal::{ProposalFocus, ProposalLayout, ProposalView, ACCEPT_LABEL};
pub use receipt::{receipt_lines, ReceiptDialog};
pub use spinner::Spinner;
pub use text_input::TextInputState;
pub use toast::{ToastStack, ToastView};
