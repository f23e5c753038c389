pub mod contact;
pub mod controller;
pub mod directory;
pub mod filter;
pub mod format;
pub mod validation;


pub use contact::{Contact, NewContact, ContactUpdate};
pub use controller::ContactListController;
pub use directory::DirectoryClient;
pub use filter::ContactFilter;
pub use validation::ContactForm;
