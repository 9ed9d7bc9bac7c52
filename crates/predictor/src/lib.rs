//! # Vitrine Category Predictor
//!
//! Given a trained dataset, answers "for store X in season Y, what is the
//! most likely next purchase category?" with a full probability distribution.
//!
//! The model is a bagged ensemble of decision trees over two encoded
//! features, (store, season), targeting the encoded category. The label
//! vocabularies are frozen into the model bundle at training time; prediction
//! always goes through the bundle's tables, never a freshly rebuilt one, so a
//! value unseen at training time is an explicit [`PredictorError::UnknownCategoryValue`]
//! rather than a silent cast.

pub mod cache;
pub mod encoder;
pub mod error;
pub mod model;

pub use cache::{ModelCache, dataset_fingerprint};
pub use encoder::LabelEncoder;
pub use error::PredictorError;
pub use model::{CategoryModel, Prediction};
