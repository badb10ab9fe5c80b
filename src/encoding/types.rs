use std::collections::HashMap;

/// Dense bijection between source identifiers and indices `0..N`.
///
/// Built once per training run from the sorted union of all sources seen in
/// the validation corpus, then frozen.
#[derive(Debug, Clone, Default)]
pub struct SourceIndexMapping {
    sources: Vec<String>,
    indices: HashMap<String, usize>,
}

impl SourceIndexMapping {
    /// Builds a mapping from an iterator that is already sorted and distinct.
    pub(crate) fn from_sorted<'a, I>(sorted_sources: I) -> Self
    where
        I: Iterator<Item = &'a str>,
    {
        let sources: Vec<String> = sorted_sources.map(str::to_owned).collect();
        let indices = sources
            .iter()
            .enumerate()
            .map(|(index, source)| (source.clone(), index))
            .collect();

        Self { sources, indices }
    }

    /// Number of distinct indexed sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Dense index of a source id, if it was seen during encoding.
    pub fn index_of(&self, source: &str) -> Option<usize> {
        self.indices.get(source).copied()
    }

    /// Source id carried by a dense index.
    pub fn source_of(&self, index: usize) -> Option<&str> {
        self.sources.get(index).map(String::as_str)
    }

    /// All source ids in index order.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }
}

/// Dense bijection between group identifiers and indices `0..G`.
#[derive(Debug, Clone, Default)]
pub struct GroupMapping {
    groups: Vec<String>,
    indices: HashMap<String, usize>,
}

impl GroupMapping {
    pub(crate) fn from_sorted<I>(sorted_groups: I) -> Self
    where
        I: Iterator<Item = String>,
    {
        let groups: Vec<String> = sorted_groups.collect();
        let indices = groups
            .iter()
            .enumerate()
            .map(|(index, group)| (group.clone(), index))
            .collect();

        Self { groups, indices }
    }

    /// Number of distinct groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Dense index of a group id.
    pub fn index_of(&self, group: &str) -> Option<usize> {
        self.indices.get(group).copied()
    }

    /// Group id carried by a dense index.
    pub fn group_of(&self, index: usize) -> Option<&str> {
        self.groups.get(index).map(String::as_str)
    }

    /// All group ids in index order.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }
}

/// Source-index → group-index assignment over the whole corpus.
#[derive(Debug, Clone)]
pub struct Grouping {
    num_groups: usize,
    assignment: Vec<usize>,
}

impl Grouping {
    /// Builds a grouping from an explicit assignment array.
    ///
    /// # Panics
    ///
    /// Panics if any assigned group index is out of `0..num_groups`.
    pub fn new(num_groups: usize, assignment: Vec<usize>) -> Self {
        assert!(
            assignment.iter().all(|&group| group < num_groups),
            "group assignment out of range"
        );

        Self {
            num_groups,
            assignment,
        }
    }

    /// Number of distinct groups.
    pub fn num_groups(&self) -> usize {
        self.num_groups
    }

    /// Group index per source index.
    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    /// Number of assigned sources.
    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }
}

/// One validation sample in index space.
///
/// `retrieved[i]` is the dense source index of the i-th retrieved result and
/// `utility_contributions[i]` the utility of the answer generated from it.
#[derive(Debug, Clone)]
pub struct EncodedRetrieval {
    retrieved: Vec<usize>,
    utility_contributions: Vec<f64>,
}

impl EncodedRetrieval {
    /// # Panics
    ///
    /// Panics if the two sequences differ in length.
    pub fn new(retrieved: Vec<usize>, utility_contributions: Vec<f64>) -> Self {
        assert_eq!(
            retrieved.len(),
            utility_contributions.len(),
            "retrieved indices and utility contributions must be aligned"
        );

        Self {
            retrieved,
            utility_contributions,
        }
    }

    /// Dense source indices in retrieval order.
    pub fn retrieved(&self) -> &[usize] {
        &self.retrieved
    }

    /// Utility of each generated answer, aligned with [`Self::retrieved`].
    pub fn utility_contributions(&self) -> &[f64] {
        &self.utility_contributions
    }

    /// Number of retrieved results in this sample.
    pub fn len(&self) -> usize {
        self.retrieved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.retrieved.is_empty()
    }
}
