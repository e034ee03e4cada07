//! Feedback attached to elements by their consumers: comments, ratings,
//! likes, tags, notes and search keywords.

use serde::{Deserialize, Serialize};

use crate::bean::{extends, impl_bean, is_false};
use crate::element::{ElementBase, Referenceable};
use crate::enums::{CommentType, StarRating};

/// A comment, question or answer about an element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Comment {
    #[serde(flatten, with = "ElementBase")]
    pub base: ElementBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_type: Option<CommentType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_public: bool,
}

impl Comment {
    /// A comment of the given type.
    pub fn new(comment_type: CommentType, text: impl Into<String>) -> Self {
        Self {
            comment_type: Some(comment_type),
            comment_text: Some(text.into()),
            ..Default::default()
        }
    }
}

/// A star rating with an optional review.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Rating {
    #[serde(flatten, with = "ElementBase")]
    pub base: ElementBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_rating: Option<StarRating>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_public: bool,
}

/// A "like" recorded against an element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Like {
    #[serde(flatten, with = "ElementBase")]
    pub base: ElementBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_public: bool,
}

/// A user-defined tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct InformalTag {
    #[serde(flatten, with = "ElementBase")]
    pub base: ElementBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Private tags are visible only to their creator.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_private_tag: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// An entry in a note log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Note {
    #[serde(flatten, with = "Referenceable")]
    pub referenceable: Referenceable,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// A log of notes kept about an element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct NoteLog {
    #[serde(flatten, with = "Referenceable")]
    pub referenceable: Referenceable,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_public: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,
}

impl NoteLog {
    /// Notes written by `user`, in log order.
    pub fn notes_by<'a>(&'a self, user: &'a str) -> impl Iterator<Item = &'a Note> + 'a {
        self.notes
            .iter()
            .filter(move |n| n.user.as_deref() == Some(user))
    }
}

/// A keyword that helps searches find an element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct SearchKeyword {
    #[serde(flatten, with = "ElementBase")]
    pub base: ElementBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

extends!(Comment => ElementBase, base);
extends!(Rating => ElementBase, base);
extends!(Like => ElementBase, base);
extends!(InformalTag => ElementBase, base);
extends!(Note => Referenceable, referenceable);
extends!(NoteLog => Referenceable, referenceable);
extends!(SearchKeyword => ElementBase, base);

impl_bean!(Comment, Rating, Like, InformalTag, Note, NoteLog, SearchKeyword);
