mod client;
mod types;

pub use client::{HttpPredictor, Predictor};
pub use types::{
    DatabaseEntry, Language, Prediction, PredictionRequest, PredictionResult, Probabilities,
};
