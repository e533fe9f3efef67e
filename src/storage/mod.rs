mod handoff;
mod store;

pub use handoff::{NO_RESULT_AVAILABLE, PREDICTION_RESULT_KEY, ResultHandoff};
pub use store::KeyValueStore;
