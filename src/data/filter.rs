use super::model::{JudgementRecord, Stage, Stats};

// ---------------------------------------------------------------------------
// Partition predicate: which records a view selects
// ---------------------------------------------------------------------------

/// A view over the dataset.
///
/// `Stage(_)` only ever matches labelled records; an unlabelled record has
/// no stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Labelled,
    Unlabelled,
    Stage(Stage),
}

impl Partition {
    pub fn matches(self, record: &JudgementRecord) -> bool {
        match self {
            Partition::Labelled => record.is_labelled(),
            Partition::Unlabelled => !record.is_labelled(),
            Partition::Stage(stage) => record.stage() == Some(stage),
        }
    }
}

/// Records passing `partition`, in input order.
pub fn select<'a, I>(records: I, partition: Partition) -> impl Iterator<Item = &'a JudgementRecord>
where
    I: IntoIterator<Item = &'a JudgementRecord>,
{
    records.into_iter().filter(move |r| partition.matches(r))
}

/// Tally every view in one pass.
pub fn tally<'a, I>(records: I) -> Stats
where
    I: IntoIterator<Item = &'a JudgementRecord>,
{
    let mut stats = Stats::default();
    for record in records {
        let Some(stage) = record.stage() else {
            stats.unlabelled += 1;
            continue;
        };
        let labelled = &mut stats.labelled;
        labelled.total += 1;
        match stage {
            Stage::Train => labelled.train += 1,
            Stage::Test => labelled.test += 1,
            Stage::ModelLabelled => labelled.model_labelled += 1,
        }
    }
    stats
}
