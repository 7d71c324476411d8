use std::collections::BTreeMap;
use std::path::Path;

use log::{info, warn};
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::config::Config;
use crate::data::boxes::{decode_boxes, BoundingBox};
use crate::data::filter::{select, tally, Partition};
use crate::data::loader::JudgementStore;
use crate::data::model::{DataType, ImageShape, Judgement, JudgementRecord, Stage, Stats};
use crate::data::raw::{ImageFileLoader, ImageTensor, OneHot, RawLoader};
use crate::data::scanner::UnlabelledScanner;
use crate::error::{DatasetError, Result};

/// Train judgements a model needs before it is worth fitting.
pub const MIN_TRAIN_EXAMPLES: usize = 10;
/// Test judgements collected before any judgement goes to train.
pub const MIN_TEST_EXAMPLES: usize = 20;
/// Default pool size for [`Dataset::unlabelled_set`].
pub const MIN_UNSUPERVISED_EXAMPLES: usize = 100;
/// Below this test:train ratio new judgements go back to the test split.
pub const TEST_TRAIN_RATIO: f64 = 0.33;
/// Labeller recorded when the caller has no user to attribute.
pub const DEFAULT_LABELLER: &str = "default";

// ---------------------------------------------------------------------------
// Training inputs
// ---------------------------------------------------------------------------

/// Features and labels of one split, shaped by the dataset kind.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelledSet {
    Images { images: Vec<ImageTensor>, labels: OneHot },
    Text { texts: Vec<String>, labels: Vec<String> },
    ObjectDetection { paths: Vec<String>, boxes: Vec<Vec<BoundingBox>> },
}

impl LabelledSet {
    fn empty(data_type: DataType) -> Self {
        match data_type {
            DataType::Images => LabelledSet::Images {
                images: Vec::new(),
                labels: OneHot::default(),
            },
            DataType::Text => LabelledSet::Text {
                texts: Vec::new(),
                labels: Vec::new(),
            },
            DataType::ObjectDetection => LabelledSet::ObjectDetection {
                paths: Vec::new(),
                boxes: Vec::new(),
            },
        }
    }

    pub fn len(&self) -> usize {
        match self {
            LabelledSet::Images { images, .. } => images.len(),
            LabelledSet::Text { texts, .. } => texts.len(),
            LabelledSet::ObjectDetection { paths, .. } => paths.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Features of unlabelled samples together with their paths.
#[derive(Debug, Clone, PartialEq)]
pub enum UnlabelledSet {
    Images { images: Vec<ImageTensor>, ids: Vec<String> },
    Text { texts: Vec<String>, ids: Vec<String> },
}

impl UnlabelledSet {
    pub fn ids(&self) -> &[String] {
        match self {
            UnlabelledSet::Images { ids, .. } | UnlabelledSet::Text { ids, .. } => ids,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Every known sample, labelled or not, keyed by path.
///
/// Built from the judgements file plus a scan of the sample directory.
/// `add_label` is the only mutation after construction and persists
/// immediately.
pub struct Dataset {
    data_type: DataType,
    image_shape: ImageShape,
    store: JudgementStore,
    scanner: UnlabelledScanner,
    records: BTreeMap<String, JudgementRecord>,
    current_stage: Stage,
    loader: Box<dyn RawLoader>,
}

impl std::fmt::Debug for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dataset")
            .field("data_type", &self.data_type)
            .field("directory", &self.scanner.directory())
            .field("judgements_file", &self.store.path())
            .field("records", &self.records.len())
            .field("current_stage", &self.current_stage)
            .finish_non_exhaustive()
    }
}

impl Dataset {
    /// Build the dataset described by `config`, loading images with the
    /// `image` crate.
    pub fn load_from(config: &Config) -> Result<Self> {
        Self::with_loader(config, Box::new(ImageFileLoader))
    }

    /// Like [`Dataset::load_from`] with a custom raw loader.
    ///
    /// Fails on an unknown data type, a judgements file with the wrong
    /// columns, or a sample directory without matching files.
    pub fn with_loader(config: &Config, loader: Box<dyn RawLoader>) -> Result<Self> {
        let data_type = config.data_type()?;
        let store = JudgementStore::new(&config.judgements_file, data_type);
        let scanner = UnlabelledScanner::new(&config.directory, data_type);

        let mut records = BTreeMap::new();
        for record in store.load()? {
            if let Some(previous) = records.insert(record.path.clone(), record) {
                warn!("duplicate judgement for {}, keeping the last one", previous.path);
            }
        }

        let mut dataset = Dataset {
            data_type,
            image_shape: config.image_shape(),
            store,
            scanner,
            records,
            current_stage: Stage::Test,
            loader,
        };
        dataset.rescan()?;
        Ok(dataset)
    }

    /// Merge files added to the sample directory since the last scan.
    /// Known paths keep their record untouched. Returns the number added.
    pub fn rescan(&mut self) -> Result<usize> {
        let fresh = self.scanner.scan_new(|path| self.records.contains_key(path))?;
        let added = fresh.len();
        for record in fresh {
            self.records.insert(record.path.clone(), record);
        }
        Ok(added)
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn directory(&self) -> &Path {
        self.scanner.directory()
    }

    pub fn judgements_file(&self) -> &Path {
        self.store.path()
    }

    pub fn image_shape(&self) -> ImageShape {
        self.image_shape
    }

    pub fn get(&self, path: &str) -> Option<&JudgementRecord> {
        self.records.get(path)
    }

    /// Sample contents for text datasets; `None` for image kinds.
    pub fn get_data(&self, path: &str) -> Option<&str> {
        if !self.data_type.carries_text() {
            return None;
        }
        self.records.get(path)?.text.as_deref()
    }

    // -- views --

    pub fn records(&self) -> impl Iterator<Item = &JudgementRecord> {
        self.records.values()
    }

    pub fn labelled(&self) -> impl Iterator<Item = &JudgementRecord> {
        select(self.records.values(), Partition::Labelled)
    }

    pub fn unlabelled(&self) -> impl Iterator<Item = &JudgementRecord> {
        select(self.records.values(), Partition::Unlabelled)
    }

    pub fn train_data(&self) -> impl Iterator<Item = &JudgementRecord> {
        select(self.records.values(), Partition::Stage(Stage::Train))
    }

    pub fn test_data(&self) -> impl Iterator<Item = &JudgementRecord> {
        select(self.records.values(), Partition::Stage(Stage::Test))
    }

    pub fn model_labelled_data(&self) -> impl Iterator<Item = &JudgementRecord> {
        select(self.records.values(), Partition::Stage(Stage::ModelLabelled))
    }

    pub fn stats(&self) -> Stats {
        tally(self.records.values())
    }

    // -- sampling --

    /// Up to `size` unlabelled records chosen uniformly at random, or all of
    /// them when fewer exist.
    pub fn sample(&self, size: usize) -> Vec<&JudgementRecord> {
        self.sample_with(&mut rand::rng(), size)
    }

    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R, size: usize) -> Vec<&JudgementRecord> {
        let pool: Vec<&JudgementRecord> = self.unlabelled().collect();
        if pool.len() <= size {
            return pool;
        }
        pool.choose_multiple(rng, size).copied().collect()
    }

    // -- stage policy --

    pub fn current_stage(&self) -> Stage {
        self.current_stage
    }

    /// Decide which split the next human judgement belongs to.
    pub fn set_current_stage(&mut self) -> Stage {
        let stats = self.stats();
        let next = next_stage(stats.labelled.test, stats.labelled.train);
        if next != self.current_stage {
            info!(
                "stage {} -> {next} (test={}, train={})",
                self.current_stage, stats.labelled.test, stats.labelled.train
            );
        }
        self.current_stage = next;
        next
    }

    // -- labelling --

    /// Record a judgement for a scanned sample and persist the table.
    ///
    /// Re-labelling a path overwrites the previous judgement. If the save
    /// fails the in-memory judgement is kept and the error returned.
    pub fn add_label(&mut self, path: &str, label: &str, stage: Stage, user: &str) -> Result<()> {
        let record = self
            .records
            .get_mut(path)
            .ok_or_else(|| DatasetError::UnknownPath(path.to_string()))?;
        record.judgement = Some(Judgement {
            label: label.to_string(),
            stage,
            labelled_by: user.to_string(),
        });
        self.save()?;
        Ok(())
    }

    /// Persist every labelled record. Returns the number of rows written.
    pub fn save(&self) -> Result<usize> {
        self.store.save(self.records.values())
    }

    // -- training inputs --

    pub fn train_set(&self) -> Result<LabelledSet> {
        self.labelled_set(Stage::Train)
    }

    pub fn test_set(&self) -> Result<LabelledSet> {
        self.labelled_set(Stage::Test)
    }

    fn labelled_set(&self, stage: Stage) -> Result<LabelledSet> {
        let rows: Vec<(&JudgementRecord, &Judgement)> = self
            .records
            .values()
            .filter_map(|r| r.judgement.as_ref().map(|j| (r, j)))
            .filter(|(_, j)| j.stage == stage)
            .collect();
        if rows.is_empty() {
            return Ok(LabelledSet::empty(self.data_type));
        }

        let paths: Vec<String> = rows.iter().map(|(r, _)| r.path.clone()).collect();
        let labels: Vec<String> = rows.iter().map(|(_, j)| j.label.clone()).collect();

        Ok(match self.data_type {
            DataType::Images => LabelledSet::Images {
                images: self.loader.load_images(&paths, self.image_shape)?,
                labels: self.loader.one_hot_encode(&labels),
            },
            DataType::Text => LabelledSet::Text {
                texts: rows
                    .iter()
                    .map(|(r, _)| r.text.clone().unwrap_or_default())
                    .collect(),
                labels,
            },
            DataType::ObjectDetection => LabelledSet::ObjectDetection {
                boxes: labels
                    .iter()
                    .map(|label| decode_boxes(label))
                    .collect::<Result<_>>()?,
                paths,
            },
        })
    }

    /// Features for a random draw of at most `size` unlabelled samples.
    pub fn unlabelled_set(&self, size: usize) -> Result<UnlabelledSet> {
        self.unlabelled_set_with(&mut rand::rng(), size)
    }

    pub fn unlabelled_set_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        size: usize,
    ) -> Result<UnlabelledSet> {
        let drawn = self.sample_with(rng, size);
        let ids: Vec<String> = drawn.iter().map(|r| r.path.clone()).collect();

        Ok(match self.data_type {
            DataType::Text => UnlabelledSet::Text {
                texts: drawn
                    .iter()
                    .map(|r| r.text.clone().unwrap_or_default())
                    .collect(),
                ids,
            },
            DataType::Images | DataType::ObjectDetection => {
                let images = if ids.is_empty() {
                    Vec::new()
                } else {
                    self.loader.load_images(&ids, self.image_shape)?
                };
                UnlabelledSet::Images { images, ids }
            }
        })
    }
}

/// Stay on test until it holds more than [`MIN_TEST_EXAMPLES`], then keep
/// test:train near [`TEST_TRAIN_RATIO`].
pub fn next_stage(test: usize, train: usize) -> Stage {
    if test <= MIN_TEST_EXAMPLES {
        return Stage::Test;
    }
    let ratio = test as f64 / (train + 1) as f64;
    if ratio < TEST_TRAIN_RATIO {
        Stage::Test
    } else {
        Stage::Train
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::boxes::encode_boxes;
    use image::{Rgb, RgbImage};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::{tempdir, TempDir};

    struct Fixture {
        _root: TempDir,
        samples: PathBuf,
        config: Config,
    }

    impl Fixture {
        fn new(data_type: &str, files: &[&str]) -> Self {
            let root = tempdir().unwrap();
            let samples = root.path().join("samples");
            fs::create_dir(&samples).unwrap();
            for name in files {
                fs::write(samples.join(name), format!("contents of {name}")).unwrap();
            }
            let judgements = root.path().join("labels/judgements.csv");
            let config = Config::new(data_type, &samples, judgements);
            Fixture {
                _root: root,
                samples,
                config,
            }
        }

        fn path(&self, name: &str) -> String {
            self.samples.join(name).to_string_lossy().into_owned()
        }
    }

    /// Records every load and returns blank tensors.
    #[derive(Default)]
    struct CountingLoader {
        loaded: Arc<AtomicUsize>,
    }

    impl RawLoader for CountingLoader {
        fn load_images(&self, paths: &[String], shape: ImageShape) -> Result<Vec<ImageTensor>> {
            self.loaded.fetch_add(paths.len(), Ordering::SeqCst);
            Ok(paths
                .iter()
                .map(|_| ImageTensor {
                    width: shape.width,
                    height: shape.height,
                    pixels: Vec::new(),
                })
                .collect())
        }
    }

    fn names(n: usize, ext: &str) -> Vec<String> {
        (0..n).map(|i| format!("{i:03}.{ext}")).collect()
    }

    #[test]
    fn fresh_dataset_is_all_unlabelled() {
        for (data_type, ext) in [("images", "png"), ("text", "txt"), ("object_detection", "jpg")] {
            let files = names(7, ext);
            let files: Vec<&str> = files.iter().map(String::as_str).collect();
            let fx = Fixture::new(data_type, &files);

            let dataset = Dataset::load_from(&fx.config).unwrap();
            let stats = dataset.stats();
            assert_eq!(stats.unlabelled, 7, "{data_type}");
            assert_eq!(stats.labelled.total, 0, "{data_type}");
            assert_eq!(dataset.current_stage(), Stage::Test);
        }
    }

    #[test]
    fn unknown_data_type_fails_construction() {
        let fx = Fixture::new("audio", &["a.wav"]);
        let err = Dataset::load_from(&fx.config).unwrap_err();
        assert!(matches!(err, DatasetError::UnsupportedDataType(_)));
    }

    #[test]
    fn schema_mismatch_fails_construction() {
        let fx = Fixture::new("images", &["a.png"]);
        fs::create_dir_all(fx.config.judgements_file.parent().unwrap()).unwrap();
        fs::write(&fx.config.judgements_file, "label,path,labelled,stage\n").unwrap();

        let err = Dataset::load_from(&fx.config).unwrap_err();
        assert!(matches!(err, DatasetError::Schema { .. }));
    }

    #[test]
    fn empty_directory_fails_construction() {
        let fx = Fixture::new("text", &["a.png"]);
        let err = Dataset::load_from(&fx.config).unwrap_err();
        assert!(matches!(err, DatasetError::EmptyDirectory { .. }));
    }

    #[test]
    fn relabelling_keeps_one_record_with_the_latest_judgement() {
        let fx = Fixture::new("images", &["a.png", "b.png"]);
        let mut dataset = Dataset::load_from(&fx.config).unwrap();
        let a = fx.path("a.png");

        dataset.add_label(&a, "cat", Stage::Test, DEFAULT_LABELLER).unwrap();
        dataset.add_label(&a, "dog", Stage::Train, "alice").unwrap();

        assert_eq!(dataset.records().filter(|r| r.path == a).count(), 1);
        let judgement = dataset.get(&a).unwrap().judgement.clone().unwrap();
        assert_eq!(judgement.label, "dog");
        assert_eq!(judgement.stage, Stage::Train);
        assert_eq!(judgement.labelled_by, "alice");

        let stats = dataset.stats();
        assert_eq!((stats.labelled.total, stats.labelled.train, stats.unlabelled), (1, 1, 1));

        let on_disk = JudgementStore::new(&fx.config.judgements_file, DataType::Images)
            .load()
            .unwrap();
        assert_eq!(on_disk.len(), 1);
        assert_eq!(on_disk[0].label(), Some("dog"));
    }

    #[test]
    fn failed_save_keeps_the_judgement_and_releases_the_lock() {
        let fx = Fixture::new("images", &["a.png"]);
        let blocker = fx.samples.parent().unwrap().join("blocker");
        fs::write(&blocker, b"a file where a directory should be").unwrap();
        let mut config = fx.config.clone();
        config.judgements_file = blocker.join("judgements.csv");

        let mut dataset = Dataset::load_from(&config).unwrap();
        let err = dataset
            .add_label(&fx.path("a.png"), "cat", Stage::Test, DEFAULT_LABELLER)
            .unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
        assert_eq!(dataset.stats().labelled.total, 1);

        // a second save on the same store must not block
        assert!(dataset.save().is_err());

        fs::remove_file(&blocker).unwrap();
        assert_eq!(dataset.save().unwrap(), 1);
        let on_disk = JudgementStore::new(&config.judgements_file, DataType::Images)
            .load()
            .unwrap();
        assert_eq!(on_disk[0].label(), Some("cat"));
    }

    #[test]
    fn labelling_an_unscanned_path_fails() {
        let fx = Fixture::new("images", &["a.png"]);
        let mut dataset = Dataset::load_from(&fx.config).unwrap();

        let err = dataset
            .add_label("elsewhere/x.png", "cat", Stage::Test, DEFAULT_LABELLER)
            .unwrap_err();
        assert!(matches!(err, DatasetError::UnknownPath(p) if p == "elsewhere/x.png"));
        assert!(!fx.config.judgements_file.exists());
    }

    #[test]
    fn rescan_is_idempotent_and_keeps_judgements() {
        let fx = Fixture::new("text", &["a.txt", "b.txt", "c.txt"]);
        let mut dataset = Dataset::load_from(&fx.config).unwrap();
        dataset
            .add_label(&fx.path("a.txt"), "positive", Stage::Test, DEFAULT_LABELLER)
            .unwrap();

        let before: Vec<String> = dataset.unlabelled().map(|r| r.path.clone()).collect();
        assert_eq!(dataset.rescan().unwrap(), 0);
        assert_eq!(dataset.rescan().unwrap(), 0);
        let after: Vec<String> = dataset.unlabelled().map(|r| r.path.clone()).collect();
        assert_eq!(before, after);
        assert!(dataset.get(&fx.path("a.txt")).unwrap().is_labelled());

        fs::write(fx.samples.join("d.txt"), "new").unwrap();
        assert_eq!(dataset.rescan().unwrap(), 1);
        assert_eq!(dataset.stats().unlabelled, 3);
    }

    #[test]
    fn reloading_merges_saved_judgements_with_new_files() {
        let fx = Fixture::new("text", &["a.txt", "b.txt"]);
        {
            let mut dataset = Dataset::load_from(&fx.config).unwrap();
            dataset
                .add_label(&fx.path("a.txt"), "negative", Stage::ModelLabelled, "model")
                .unwrap();
        }
        fs::write(fx.samples.join("c.txt"), "third").unwrap();

        let dataset = Dataset::load_from(&fx.config).unwrap();
        assert_eq!(dataset.records().count(), 3);
        assert_eq!(dataset.model_labelled_data().count(), 1);
        assert_eq!(dataset.stats().unlabelled, 2);
        assert_eq!(dataset.get_data(&fx.path("a.txt")), Some("contents of a.txt"));
        assert_eq!(dataset.get_data(&fx.path("c.txt")), Some("third"));
    }

    #[test]
    fn get_data_is_text_only() {
        let fx = Fixture::new("images", &["a.png"]);
        let dataset = Dataset::load_from(&fx.config).unwrap();
        assert_eq!(dataset.get_data(&fx.path("a.png")), None);
    }

    #[test]
    fn stage_policy_boundaries() {
        assert_eq!(next_stage(0, 0), Stage::Test);
        assert_eq!(next_stage(MIN_TEST_EXAMPLES, 0), Stage::Test);
        assert_eq!(next_stage(MIN_TEST_EXAMPLES, 1000), Stage::Test);
        // 21 / 1
        assert_eq!(next_stage(21, 0), Stage::Train);
        // 21 / 71 ≈ 0.296
        assert_eq!(next_stage(21, 70), Stage::Test);
        // 21 / 63 ≈ 0.333
        assert_eq!(next_stage(21, 62), Stage::Train);
    }

    #[test]
    fn set_current_stage_follows_the_counts() {
        let files = names(22, "png");
        let files: Vec<&str> = files.iter().map(String::as_str).collect();
        let fx = Fixture::new("images", &files);
        let mut dataset = Dataset::load_from(&fx.config).unwrap();

        for name in &files[..20] {
            dataset
                .add_label(&fx.path(name), "cat", Stage::Test, DEFAULT_LABELLER)
                .unwrap();
        }
        assert_eq!(dataset.set_current_stage(), Stage::Test);

        dataset
            .add_label(&fx.path(files[20]), "cat", Stage::Test, DEFAULT_LABELLER)
            .unwrap();
        assert_eq!(dataset.set_current_stage(), Stage::Train);
        assert_eq!(dataset.current_stage(), Stage::Train);

        // model labels do not count towards either split
        dataset
            .add_label(&fx.path(files[21]), "cat", Stage::ModelLabelled, "model")
            .unwrap();
        assert_eq!(dataset.set_current_stage(), Stage::Train);
    }

    #[test]
    fn sample_is_bounded_and_unlabelled_only() {
        let files = names(10, "png");
        let files: Vec<&str> = files.iter().map(String::as_str).collect();
        let fx = Fixture::new("images", &files);
        let mut dataset = Dataset::load_from(&fx.config).unwrap();
        dataset
            .add_label(&fx.path(files[0]), "cat", Stage::Test, DEFAULT_LABELLER)
            .unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let drawn = dataset.sample_with(&mut rng, 4);
        assert_eq!(drawn.len(), 4);
        assert!(drawn.iter().all(|r| !r.is_labelled()));

        let mut unique: Vec<&str> = drawn.iter().map(|r| r.path.as_str()).collect();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 4);

        assert_eq!(dataset.sample(100).len(), 9);
    }

    #[test]
    fn empty_splits_are_empty_for_every_kind() {
        for (data_type, ext) in [("images", "png"), ("text", "txt"), ("object_detection", "png")] {
            let file = format!("a.{ext}");
            let fx = Fixture::new(data_type, &[file.as_str()]);
            let loader = CountingLoader::default();
            let loaded = Arc::clone(&loader.loaded);
            let mut dataset = Dataset::with_loader(&fx.config, Box::new(loader)).unwrap();

            assert!(dataset.train_set().unwrap().is_empty(), "{data_type}");
            assert!(dataset.test_set().unwrap().is_empty(), "{data_type}");

            dataset
                .add_label(&fx.path(&file), "[]", Stage::ModelLabelled, "model")
                .unwrap();
            assert!(dataset.unlabelled_set(MIN_UNSUPERVISED_EXAMPLES).unwrap().is_empty());
            assert_eq!(loaded.load(Ordering::SeqCst), 0, "{data_type}");
        }
    }

    #[test]
    fn text_sets_carry_contents_and_labels() {
        let fx = Fixture::new("text", &["a.txt", "b.txt", "c.txt"]);
        let mut dataset = Dataset::load_from(&fx.config).unwrap();
        dataset
            .add_label(&fx.path("a.txt"), "positive", Stage::Train, DEFAULT_LABELLER)
            .unwrap();
        dataset
            .add_label(&fx.path("b.txt"), "negative", Stage::Test, DEFAULT_LABELLER)
            .unwrap();

        assert_eq!(
            dataset.train_set().unwrap(),
            LabelledSet::Text {
                texts: vec!["contents of a.txt".to_string()],
                labels: vec!["positive".to_string()],
            }
        );
        assert_eq!(
            dataset.test_set().unwrap(),
            LabelledSet::Text {
                texts: vec!["contents of b.txt".to_string()],
                labels: vec!["negative".to_string()],
            }
        );

        let mut rng = StdRng::seed_from_u64(1);
        match dataset.unlabelled_set_with(&mut rng, 5).unwrap() {
            UnlabelledSet::Text { texts, ids } => {
                assert_eq!(texts, ["contents of c.txt"]);
                assert_eq!(ids, [fx.path("c.txt")]);
            }
            other => panic!("expected text set, got {other:?}"),
        }
    }

    #[test]
    fn object_detection_sets_decode_boxes_per_split() {
        let fx = Fixture::new("object_detection", &["a.png", "b.png"]);
        let mut dataset =
            Dataset::with_loader(&fx.config, Box::new(CountingLoader::default())).unwrap();
        let car = BoundingBox {
            class_label: "car".to_string(),
            object_id: 9,
            x_top_left: 1.0,
            y_top_left: 2.0,
            width: 3.0,
            height: 4.0,
        };
        let person = BoundingBox {
            class_label: "person".to_string(),
            ..car.clone()
        };
        let car_label = encode_boxes(&[car.clone()]).unwrap();
        let person_label = encode_boxes(&[person]).unwrap();
        dataset
            .add_label(&fx.path("a.png"), &car_label, Stage::Train, DEFAULT_LABELLER)
            .unwrap();
        dataset
            .add_label(&fx.path("b.png"), &person_label, Stage::Test, DEFAULT_LABELLER)
            .unwrap();

        match dataset.train_set().unwrap() {
            LabelledSet::ObjectDetection { paths, boxes } => {
                assert_eq!(paths, [fx.path("a.png")]);
                assert_eq!(boxes[0][0], BoundingBox { object_id: 0, ..car });
            }
            other => panic!("expected object detection set, got {other:?}"),
        }
        match dataset.test_set().unwrap() {
            LabelledSet::ObjectDetection { paths, boxes } => {
                assert_eq!(paths, [fx.path("b.png")]);
                assert_eq!(boxes[0][0].class_label, "person");
            }
            other => panic!("expected object detection set, got {other:?}"),
        }
    }

    #[test]
    fn image_sets_load_pixels_and_one_hot_labels() {
        let fx = Fixture::new("images", &[]);
        let colours = [("a.png", [255, 0, 0]), ("b.png", [0, 0, 255]), ("c.png", [0, 255, 0])];
        for (name, colour) in colours {
            RgbImage::from_pixel(8, 8, Rgb(colour)).save(fx.samples.join(name)).unwrap();
        }
        let mut config = fx.config.clone();
        config.image_width = Some(4);
        config.image_height = Some(4);

        let mut dataset = Dataset::load_from(&config).unwrap();
        dataset.add_label(&fx.path("a.png"), "red", Stage::Train, DEFAULT_LABELLER).unwrap();
        dataset.add_label(&fx.path("b.png"), "blue", Stage::Train, DEFAULT_LABELLER).unwrap();

        match dataset.train_set().unwrap() {
            LabelledSet::Images { images, labels } => {
                assert_eq!(images.len(), 2);
                assert!(images.iter().all(|img| img.pixels.len() == 4 * 4 * 3));
                assert_eq!(labels.classes, ["blue", "red"]);
                // a.png (red) sorts first by path
                assert_eq!(labels.rows, vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
            }
            other => panic!("expected image set, got {other:?}"),
        }

        let unlabelled = dataset.unlabelled_set(10).unwrap();
        assert_eq!(unlabelled.ids(), [fx.path("c.png")]);
    }
}
