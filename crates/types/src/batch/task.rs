//! Training task kinds for custom models.

use empath_core::{AdditionalProperties, tagged_union};
use serde::{Deserialize, Serialize};

/// Predict a discrete label.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskClassification {
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Predict a continuous value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskRegression {
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

tagged_union! {
    /// The kind of model a training job produces, keyed by `type`.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Task: "type" {
        Classification(TaskClassification) = "classification"
            => (is_classification, as_classification, into_classification),
        Regression(TaskRegression) = "regression"
            => (is_regression, as_regression, into_regression),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_roundtrip() {
        let task = Task::from(TaskRegression::default());
        assert_eq!(task.to_json().unwrap(), json!({"type": "regression"}));
        assert_eq!(Task::from_json(task.to_json().unwrap()).unwrap(), task);
    }

    #[test]
    fn test_task_wrong_accessor() {
        let task = Task::from_json(json!({"type": "classification"})).unwrap();
        assert!(task.as_classification().is_ok());
        assert!(task.as_regression().is_err());
    }
}
