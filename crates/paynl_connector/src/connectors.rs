pub mod paynl;

pub use self::paynl::Paynl;
