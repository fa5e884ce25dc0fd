pub mod core;
pub mod linktype;


pub use self::core::*;
pub use self::linktype::*;
