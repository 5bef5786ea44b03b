use std::collections::BTreeSet;

use crate::model::ReshapeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Negative,
    Neutral,
    Positive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalePoint {
    pub label: String,
    pub index: usize,
    pub side: Side,
}

/// Ordered response scale, most negative first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikertScale {
    points: Vec<ScalePoint>,
    midpoint: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ScalePreset {
    #[value(name = "agree5")]
    Agree5,
    #[value(name = "agree4")]
    Agree4,
    #[value(name = "agree7")]
    Agree7,
    #[value(name = "frequency5")]
    Frequency5,
}

impl ScalePreset {
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            ScalePreset::Agree5 => &[
                "Strongly disagree",
                "Disagree",
                "Neither agree nor disagree",
                "Agree",
                "Strongly agree",
            ],
            ScalePreset::Agree4 => &["Strongly disagree", "Disagree", "Agree", "Strongly agree"],
            ScalePreset::Agree7 => &[
                "Strongly disagree",
                "Disagree",
                "Somewhat disagree",
                "Neither agree nor disagree",
                "Somewhat agree",
                "Agree",
                "Strongly agree",
            ],
            ScalePreset::Frequency5 => &["Never", "Rarely", "Sometimes", "Often", "Always"],
        }
    }

    pub fn neutral(self) -> Option<&'static str> {
        match self {
            ScalePreset::Agree5 | ScalePreset::Agree7 => Some("Neither agree nor disagree"),
            ScalePreset::Agree4 => None,
            ScalePreset::Frequency5 => Some("Sometimes"),
        }
    }

    pub fn build(self) -> Result<LikertScale, ReshapeError> {
        let labels = self.labels().iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let neutral = self.neutral().map(|s| vec![s.to_string()]).unwrap_or_default();
        LikertScale::new(labels, &neutral)
    }
}

impl LikertScale {
    /// `neutrals` may hold at most one label; it must be a member of `labels`.
    pub fn new(labels: Vec<String>, neutrals: &[String]) -> Result<Self, ReshapeError> {
        if labels.len() < 2 {
            return Err(ReshapeError::DegenerateScale(format!(
                "scale needs at least 2 categories, got {}",
                labels.len()
            )));
        }

        let mut seen = BTreeSet::new();
        for label in &labels {
            if label.trim().is_empty() {
                return Err(ReshapeError::DegenerateScale(
                    "scale contains an empty label".to_string(),
                ));
            }
            if !seen.insert(label.as_str()) {
                return Err(ReshapeError::DegenerateScale(format!(
                    "duplicate scale label: {label}"
                )));
            }
        }

        if neutrals.len() > 1 {
            return Err(ReshapeError::DegenerateScale(format!(
                "only one neutral category is supported, got {}: {}",
                neutrals.len(),
                neutrals.join(", ")
            )));
        }

        let midpoint = match neutrals.first() {
            Some(neutral) => {
                let idx = labels.iter().position(|l| l == neutral).ok_or_else(|| {
                    ReshapeError::DegenerateScale(format!(
                        "neutral category {neutral} is not a scale label"
                    ))
                })?;
                if idx == 0 || idx == labels.len() - 1 {
                    return Err(ReshapeError::DegenerateScale(format!(
                        "neutral category {neutral} sits at the end of the scale"
                    )));
                }
                Some(idx)
            }
            None => {
                if labels.len() % 2 == 1 {
                    return Err(ReshapeError::DegenerateScale(format!(
                        "odd-length scale ({} categories) needs a designated neutral",
                        labels.len()
                    )));
                }
                None
            }
        };

        let split = labels.len() / 2;
        let points = labels
            .into_iter()
            .enumerate()
            .map(|(index, label)| {
                let side = match midpoint {
                    Some(mid) if index == mid => Side::Neutral,
                    Some(mid) if index < mid => Side::Negative,
                    Some(_) => Side::Positive,
                    None if index < split => Side::Negative,
                    None => Side::Positive,
                };
                ScalePoint { label, index, side }
            })
            .collect();

        Ok(Self { points, midpoint })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[ScalePoint] {
        &self.points
    }

    pub fn midpoint(&self) -> Option<usize> {
        self.midpoint
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    /// Indices on the negative side, nearest to neutral first.
    pub fn negative_outward(&self) -> Vec<usize> {
        self.points
            .iter()
            .rev()
            .filter(|p| p.side == Side::Negative)
            .map(|p| p.index)
            .collect()
    }

    /// Indices on the positive side, nearest to neutral first.
    pub fn positive_outward(&self) -> Vec<usize> {
        self.points
            .iter()
            .filter(|p| p.side == Side::Positive)
            .map(|p| p.index)
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/scale.rs"]
mod tests;
