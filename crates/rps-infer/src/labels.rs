use std::fmt;

/// A hand gesture the classifier can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    Rock,
    Paper,
    Scissor,
}

impl Gesture {
    pub const ALL: [Gesture; 3] = [Gesture::Rock, Gesture::Paper, Gesture::Scissor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gesture::Rock => "rock",
            Gesture::Paper => "paper",
            Gesture::Scissor => "scissor",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable mapping from classifier output index to gesture.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelTable {
    labels: Vec<Gesture>,
}

/// The order the bundled model was trained with: rock, paper, scissor.
impl Default for LabelTable {
    fn default() -> Self {
        Self::new(Gesture::ALL.to_vec())
    }
}

impl LabelTable {
    pub fn new(labels: Vec<Gesture>) -> Self {
        Self { labels }
    }

    pub fn label(&self, index: usize) -> Option<Gesture> {
        self.labels.get(index).copied()
    }

    pub fn labels(&self) -> &[Gesture] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
