//! Course catalogue records and the inputs that create or change them.
//!
//! Serialisation uses camelCase field names and RFC 3339 UTC timestamps so
//! records can be returned to clients as-is.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BrochurePayload;

/// Duration label applied when a draft omits one.
pub const DEFAULT_DURATION: &str = "3 months";
/// Brochure download name applied when a draft omits one.
pub const DEFAULT_BROCHURE_FILE_NAME: &str = "brochure.pdf";
/// Fractional-second digits kept on course timestamps.
///
/// PostgreSQL `timestamptz` stores microseconds, so a record stamped with a
/// finer value would read back differently from the one returned on write.
pub const TIMESTAMP_PRECISION: u16 = 6;

/// Validation errors raised while building course inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseValidationError {
    EmptyName,
    EmptyDescription,
    InvalidId,
}

impl fmt::Display for CourseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyDescription => write!(f, "description must not be empty"),
            Self::InvalidId => write!(f, "course id must be a valid UUID"),
        }
    }
}

impl std::error::Error for CourseValidationError {}

/// Stable course identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(Uuid);

impl CourseId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier read from storage.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Borrow the underlying UUID for storage adapters.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for CourseId {
    type Err = CourseValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| CourseValidationError::InvalidId)
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Stored course record.
///
/// ## Invariants
/// - `updated_at >= created_at`.
/// - `id` never changes after creation.
/// - An empty `brochure_data` means no downloadable brochure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub description: String,
    pub duration: String,
    pub image_data: String,
    pub image_file_name: String,
    pub brochure_data: String,
    pub brochure_file_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// Classify the stored brochure payload.
    pub fn brochure(&self) -> BrochurePayload {
        BrochurePayload::classify(&self.brochure_data)
    }
}

fn non_blank(value: &str, error: CourseValidationError) -> Result<String, CourseValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(error)
    } else {
        Ok(trimmed.to_owned())
    }
}

/// Validated input for creating a course.
///
/// Optional fields fall back to [`DEFAULT_DURATION`],
/// [`DEFAULT_BROCHURE_FILE_NAME`], or an empty string. Blank values count as
/// omitted for the defaulted fields.
///
/// # Examples
/// ```
/// use backend::domain::{CourseDraft, DEFAULT_DURATION};
///
/// let draft = CourseDraft::try_new("Net101", "Networking basics")
///     .unwrap()
///     .with_duration(Some("   ".to_owned()));
/// assert_eq!(draft.duration(), DEFAULT_DURATION);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    name: String,
    description: String,
    duration: String,
    image_data: String,
    image_file_name: String,
    brochure_data: String,
    brochure_file_name: String,
}

impl CourseDraft {
    /// Validate the required fields and apply defaults to the rest.
    pub fn try_new(name: &str, description: &str) -> Result<Self, CourseValidationError> {
        Ok(Self {
            name: non_blank(name, CourseValidationError::EmptyName)?,
            description: non_blank(description, CourseValidationError::EmptyDescription)?,
            duration: DEFAULT_DURATION.to_owned(),
            image_data: String::new(),
            image_file_name: String::new(),
            brochure_data: String::new(),
            brochure_file_name: DEFAULT_BROCHURE_FILE_NAME.to_owned(),
        })
    }

    /// Override the duration label. Blank values keep the default.
    #[must_use]
    pub fn with_duration(mut self, duration: Option<String>) -> Self {
        if let Some(value) = duration.filter(|v| !v.trim().is_empty()) {
            self.duration = value;
        }
        self
    }

    /// Attach encoded image data and its file name.
    #[must_use]
    pub fn with_image(mut self, data: Option<String>, file_name: Option<String>) -> Self {
        self.image_data = data.unwrap_or_default();
        self.image_file_name = file_name.unwrap_or_default();
        self
    }

    /// Attach a brochure payload. A blank file name keeps
    /// [`DEFAULT_BROCHURE_FILE_NAME`].
    #[must_use]
    pub fn with_brochure(mut self, data: Option<String>, file_name: Option<String>) -> Self {
        self.brochure_data = data.unwrap_or_default();
        if let Some(value) = file_name.filter(|v| !v.trim().is_empty()) {
            self.brochure_file_name = value;
        }
        self
    }

    /// Trimmed course name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Trimmed course description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Duration label, defaulted when omitted.
    pub fn duration(&self) -> &str {
        self.duration.as_str()
    }

    /// Download file name, defaulted when omitted.
    pub fn brochure_file_name(&self) -> &str {
        self.brochure_file_name.as_str()
    }

    /// Materialise the draft as a stored record with equal timestamps.
    ///
    /// `now` is truncated to [`TIMESTAMP_PRECISION`] digits.
    pub fn into_course(self, id: CourseId, now: DateTime<Utc>) -> Course {
        let now = now.trunc_subsecs(TIMESTAMP_PRECISION);
        Course {
            id,
            name: self.name,
            description: self.description,
            duration: self.duration,
            image_data: self.image_data,
            image_file_name: self.image_file_name,
            brochure_data: self.brochure_data,
            brochure_file_name: self.brochure_file_name,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for an existing course. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoursePatch {
    name: Option<String>,
    description: Option<String>,
    pub duration: Option<String>,
    pub image_data: Option<String>,
    pub image_file_name: Option<String>,
    pub brochure_data: Option<String>,
    pub brochure_file_name: Option<String>,
}

impl CoursePatch {
    /// Set a new name. Blank names are rejected.
    pub fn with_name(mut self, name: Option<&str>) -> Result<Self, CourseValidationError> {
        self.name = name
            .map(|value| non_blank(value, CourseValidationError::EmptyName))
            .transpose()?;
        Ok(self)
    }

    /// Set a new description. Blank descriptions are rejected.
    pub fn with_description(
        mut self,
        description: Option<&str>,
    ) -> Result<Self, CourseValidationError> {
        self.description = description
            .map(|value| non_blank(value, CourseValidationError::EmptyDescription))
            .transpose()?;
        Ok(self)
    }

    /// Replacement name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Replacement description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Merge provided fields into `course` and refresh `updated_at`.
    ///
    /// `updated_at` is truncated to [`TIMESTAMP_PRECISION`] digits and clamped
    /// so it never precedes `created_at` or the previous `updated_at`.
    pub fn apply(self, course: &mut Course, now: DateTime<Utc>) {
        let Self {
            name,
            description,
            duration,
            image_data,
            image_file_name,
            brochure_data,
            brochure_file_name,
        } = self;
        let fields = [
            (name, &mut course.name),
            (description, &mut course.description),
            (duration, &mut course.duration),
            (image_data, &mut course.image_data),
            (image_file_name, &mut course.image_file_name),
            (brochure_data, &mut course.brochure_data),
            (brochure_file_name, &mut course.brochure_file_name),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        course.updated_at = now
            .trunc_subsecs(TIMESTAMP_PRECISION)
            .max(course.created_at)
            .max(course.updated_at);
    }
}
