//! Terminal output for the provisioned resources.

mod terminal;

pub use terminal::{format_field, format_nic, print_nic};
