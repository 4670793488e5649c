//! Supervised movement prediction: feature encoding and the predictor
//! contract.
//!
//! The core defines the feature shape and the capability interface; concrete
//! trained models live behind [`MovementPredictor`] so any conforming
//! implementation can be swapped in without the tick path knowing.
mod features;
mod predictor;
mod sample;

pub use features::{FEATURE_LEN, FeatureVector};
pub use predictor::{DirectionDistribution, MovementPredictor, UniformPredictor};
pub use sample::TrainingSample;
