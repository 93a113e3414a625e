use crate::expression::Leaf;

/// An ordered selection of operands (some possibly concatenated) that an
/// expression tree is built over
#[derive(Debug, Clone, PartialEq)]
pub struct Grouping {
    leaves: Vec<Leaf>,
}

impl Grouping {
    pub fn new(leaves: Vec<Leaf>) -> Self {
        Self { leaves }
    }

    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn values(&self) -> Vec<i64> {
        self.leaves.iter().map(|leaf| leaf.value).collect()
    }

    /// Number of operand instances the grouping consumes
    pub fn consumed(&self) -> usize {
        self.leaves.iter().map(|leaf| leaf.sources.len()).sum()
    }

    /// Sorted leaf values; two groupings with the same key describe the same
    /// multiset of terms
    pub fn key(&self) -> Vec<i64> {
        sorted_values(&self.leaves)
    }

    /// Every distinct ordering of the leaves, by value, in lexicographic order
    pub fn orderings(&self) -> Orderings {
        let mut current = self.leaves.clone();
        current.sort_by_key(|leaf| leaf.value);
        Orderings {
            current,
            done: self.leaves.is_empty(),
        }
    }
}

pub(crate) fn sorted_values(leaves: &[Leaf]) -> Vec<i64> {
    let mut values: Vec<i64> = leaves.iter().map(|leaf| leaf.value).collect();
    values.sort_unstable();
    values
}

/// Iterator over the distinct value orderings of a grouping.
///
/// Leaves with equal values are interchangeable, so `[5, 5, 2]` yields three
/// orderings rather than six.
#[derive(Debug, Clone)]
pub struct Orderings {
    current: Vec<Leaf>,
    done: bool,
}

impl Iterator for Orderings {
    type Item = Vec<Leaf>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let out = self.current.clone();
        if !next_permutation(&mut self.current) {
            self.done = true;
        }
        Some(out)
    }
}

/// Rearrange into the next lexicographic ordering by value; false once the
/// last ordering has been reached
fn next_permutation(leaves: &mut [Leaf]) -> bool {
    let n = leaves.len();
    if n < 2 {
        return false;
    }

    let mut i = n - 1;
    while i > 0 && leaves[i - 1].value >= leaves[i].value {
        i -= 1;
    }
    if i == 0 {
        return false;
    }

    let mut j = n - 1;
    while leaves[j].value <= leaves[i - 1].value {
        j -= 1;
    }
    leaves.swap(i - 1, j);
    leaves[i..].reverse();
    true
}
