//! Bookkeeping for active-learning labelling: an unlabelled pool discovered
//! on disk, judgements persisted to CSV, train/test splits and the choice of
//! model family that trains on them.

pub mod config;
pub mod data;
pub mod dataset;
pub mod error;
pub mod model_select;

pub use config::Config;
pub use data::boxes::BoundingBox;
pub use data::model::{DataType, ImageShape, JudgementRecord, Stage, Stats};
pub use dataset::{Dataset, LabelledSet, UnlabelledSet};
pub use error::{DatasetError, Result};
pub use model_select::{select, LabelType, ModelKind};
