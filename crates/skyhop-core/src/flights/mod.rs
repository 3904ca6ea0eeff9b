pub mod lookup;
pub mod model;
pub mod normalize;
pub mod raw;
pub mod synthetic;
pub mod transport;
