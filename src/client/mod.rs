mod shadow;

pub use shadow::*;
