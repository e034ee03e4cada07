//! Annotations recorded by analysis services, with their review state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bean::{extends, impl_bean};
use crate::element::{AdditionalProperties, ElementBase};
use crate::enums::AnnotationStatus;
use crate::timestamp::Timestamp;

/// A finding about an element, produced by an analysis step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Annotation {
    #[serde(flatten, with = "ElementBase")]
    pub base: ElementBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Percentage.
    #[serde(default)]
    pub confidence_level: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_step: Option<String>,

    /// Service-specific findings, as a JSON document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_properties: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation_status: Option<AnnotationStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_date: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steward: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_comment: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub additional_properties: AdditionalProperties,
}

impl Annotation {
    /// Records a steward's review.
    pub fn review(
        &mut self,
        steward: impl Into<String>,
        status: AnnotationStatus,
        comment: Option<String>,
        at: impl Into<Timestamp>,
    ) {
        self.steward = Some(steward.into());
        self.annotation_status = Some(status);
        self.review_comment = comment;
        self.review_date = Some(at.into());
    }

    /// Returns `true` once a steward has moved the annotation past `NEW`.
    pub fn is_reviewed(&self) -> bool {
        !matches!(
            self.annotation_status,
            None | Some(AnnotationStatus::New) | Some(AnnotationStatus::Unknown)
        )
    }

    /// Parses `json_properties`, if present.
    pub fn json_properties_value(&self) -> Option<Result<serde_json::Value, serde_json::Error>> {
        self.json_properties.as_deref().map(serde_json::from_str)
    }
}

extends!(Annotation => ElementBase, base);

impl_bean!(Annotation);
