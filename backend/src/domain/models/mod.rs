pub mod baby;
