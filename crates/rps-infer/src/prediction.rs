use crate::{Gesture, LabelTable};

/// Raw classifier scores, one per label, in label table order.
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    scores: Vec<f32>,
}

impl Prediction {
    pub fn new(scores: Vec<f32>) -> Self {
        Self { scores }
    }

    pub fn scores(&self) -> &[f32] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Index of the highest score.
    ///
    /// Ties go to the lowest index. NaN scores never win. Returns `None` when
    /// there is no comparable score.
    pub fn argmax(&self) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (index, &score) in self.scores.iter().enumerate() {
            if score.is_nan() {
                continue;
            }
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((index, score)),
            }
        }
        best.map(|(index, _)| index)
    }

    /// Label of the highest score, if the table has one for that index.
    pub fn top(&self, labels: &LabelTable) -> Option<Gesture> {
        self.argmax().and_then(|index| labels.label(index))
    }
}
