mod design;

pub use design::{Design, DesignStatus, NewDesign};
