pub mod address_input;
pub mod spinner;

pub use address_input::AddressInput;
pub use spinner::Spinner;
