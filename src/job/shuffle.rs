use crate::job::mapper::TokenEmission;
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// Every token emitted for a title, in emission order. Titles iterate sorted.
pub type Groups = BTreeMap<String, Vec<String>>;

/// Routes a title to one of `partitions` reduce tasks. Deterministic across runs.
#[derive(Debug, Clone, Copy)]
pub struct Partitioner {
    partitions: usize,
}

impl Partitioner {
    pub fn new(partitions: usize) -> Self {
        Partitioner {
            partitions: partitions.max(1),
        }
    }

    #[inline]
    pub fn partitions(&self) -> usize {
        self.partitions
    }

    #[inline]
    pub fn partition(&self, title: &str) -> usize {
        if self.partitions == 1 {
            return 0;
        }

        let mut hasher = DefaultHasher::new();
        title.hash(&mut hasher);
        (hasher.finish() % self.partitions as u64) as usize
    }
}

/// Map-side buffer of one worker: emissions grouped by title, per partition.
#[derive(Debug)]
pub struct MapOutput {
    partitioner: Partitioner,
    partitions: Vec<Groups>,
    emissions: u64,
}

impl MapOutput {
    pub fn new(partitioner: Partitioner) -> Self {
        MapOutput {
            partitioner,
            partitions: (0..partitioner.partitions()).map(|_| Groups::new()).collect(),
            emissions: 0,
        }
    }

    pub fn emit(&mut self, title: &str, token: &str) {
        self.emissions += 1;

        let n = self.partitioner.partition(title);
        add_to_group(&mut self.partitions[n], title, token);
    }

    pub fn emissions(&self) -> u64 {
        self.emissions
    }

    pub fn into_partitions(self) -> Vec<Groups> {
        self.partitions
    }
}

/// Appends every group of `from` to the matching group of `into`.
pub fn merge_groups(into: &mut Groups, from: Groups) {
    for (title, mut tokens) in from {
        match into.get_mut(&title) {
            None => {
                into.insert(title, tokens);
            }
            Some(existing) => existing.append(&mut tokens),
        }
    }
}

/// Merges the map outputs of all workers into one `Groups` per partition.
///
/// Must only be called once every map worker is done: a group is not complete
/// before that, and the reduce phase relies on seeing whole groups.
pub fn shuffle(outputs: Vec<MapOutput>, partitioner: Partitioner) -> Vec<Groups> {
    let mut merged: Vec<Groups> = (0..partitioner.partitions()).map(|_| Groups::new()).collect();

    for output in outputs {
        for (n, groups) in output.into_partitions().into_iter().enumerate() {
            merge_groups(&mut merged[n], groups);
        }
    }

    merged
}

/// Appends `token` to the group of `title`, creating the group on first use.
pub fn add_to_group(groups: &mut Groups, title: &str, token: &str) {
    match groups.get_mut(title) {
        None => {
            groups.insert(title.to_string(), vec![token.to_string()]);
        }
        Some(tokens) => tokens.push(token.to_string()),
    }
}

/// Groups a flat emission stream by title.
pub fn group_by_title<I>(emissions: I) -> Groups
where
    I: IntoIterator<Item = TokenEmission>,
{
    let mut groups = Groups::new();
    for emission in emissions {
        add_to_group(&mut groups, &emission.title, &emission.token);
    }
    groups
}
