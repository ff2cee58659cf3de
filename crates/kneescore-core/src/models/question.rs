use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One selectable answer of a radio question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerOption {
    pub label: String,
    pub value: f64,
}

impl AnswerOption {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// The answer domain of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum QuestionKind {
    /// A discrete set of options, each worth a fixed number of points.
    Radio { options: Vec<AnswerOption> },
    /// A bounded numeric scale, inclusive on both ends.
    Scale {
        min: f64,
        max: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_label: Option<String>,
    },
}

/// A single questionnaire item as authored in the instrument registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: String,
    pub text: String,
    /// Subscale membership, for instruments scored per section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Serialized inline: `type` plus `options` or `min`/`max`.
    #[serde(flatten)]
    pub kind: QuestionKind,
    /// Collected but never counted in a sum or a denominator.
    #[serde(default)]
    pub exclude_from_score: bool,
}

impl Question {
    pub fn radio(id: impl Into<String>, text: impl Into<String>, options: Vec<AnswerOption>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            section: None,
            kind: QuestionKind::Radio { options },
            exclude_from_score: false,
        }
    }

    pub fn scale(id: impl Into<String>, text: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            section: None,
            kind: QuestionKind::Scale {
                min,
                max,
                min_label: None,
                max_label: None,
            },
            exclude_from_score: false,
        }
    }

    pub fn in_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn excluded_from_score(mut self) -> Self {
        self.exclude_from_score = true;
        self
    }

    /// Attach end-point captions to a scale question. No-op for radios.
    pub fn with_scale_labels(mut self, low: impl Into<String>, high: impl Into<String>) -> Self {
        if let QuestionKind::Scale {
            min_label,
            max_label,
            ..
        } = &mut self.kind
        {
            *min_label = Some(low.into());
            *max_label = Some(high.into());
        }
        self
    }

    pub fn is_scorable(&self) -> bool {
        !self.exclude_from_score
    }

    pub fn options(&self) -> &[AnswerOption] {
        match &self.kind {
            QuestionKind::Radio { options } => options,
            QuestionKind::Scale { .. } => &[],
        }
    }

    /// Highest attainable value: the best option, or the top of the scale.
    /// A radio with no options is worth nothing.
    pub fn max_value(&self) -> f64 {
        match &self.kind {
            QuestionKind::Radio { options } => options
                .iter()
                .map(|o| o.value)
                .reduce(f64::max)
                .unwrap_or(0.0),
            QuestionKind::Scale { max, .. } => *max,
        }
    }

    pub fn min_value(&self) -> f64 {
        match &self.kind {
            QuestionKind::Radio { options } => options
                .iter()
                .map(|o| o.value)
                .reduce(f64::min)
                .unwrap_or(0.0),
            QuestionKind::Scale { min, .. } => *min,
        }
    }

    /// Whether `value` lies in this question's answer domain.
    pub fn accepts(&self, value: f64) -> bool {
        match &self.kind {
            QuestionKind::Radio { options } => options.iter().any(|o| o.value == value),
            QuestionKind::Scale { min, max, .. } => value >= *min && value <= *max,
        }
    }

    /// Label of the option whose value equals `value` exactly.
    pub fn option_label(&self, value: f64) -> Option<&str> {
        self.options()
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }
}
