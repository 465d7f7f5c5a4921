pub mod bank;
pub mod tracker;
pub mod traits;

pub mod prelude {
    pub use super::bank::prelude::*;
    pub use super::tracker::prelude::*;
    pub use super::traits::Parser;
}
