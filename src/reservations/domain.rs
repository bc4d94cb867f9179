//! Reservation domain logic: per-type validation and field shaping.
//!
//! A [`ReservationDraft`] holds raw request fields. [`ReservationDraft::finalize`]
//! checks the rules for the draft's type and shapes the fields that do not
//! apply to it, producing a [`NewReservation`] ready to persist:
//!
//! - `table`: reservation_time and num_people (>= 1) are required,
//!   sunbed_type is forced to null.
//! - `sunbed`: sunbed_type is required, num_people is forced to null,
//!   reservation_time defaults to "All Day" when not supplied.
//!
//! Updates merge a [`ReservationPatch`] over the stored row first and then
//! finalize the merged draft, so a type change is validated against the
//! requirements of the new type even when the stored row predates it.

use serde::Deserialize;

use crate::db::models::{Reservation, ReservationType};
use crate::error::{AppError, AppResult};
use crate::serde_helpers::double_option;

/// Raw reservation fields as they arrive in a create request.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ReservationDraft {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub reservation_date: Option<String>,
    pub reservation_time: Option<String>,
    pub num_people: Option<i64>,
    pub sunbed_type: Option<String>,
}

/// A validated, shaped reservation ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub kind: ReservationType,
    pub reservation_date: String,
    pub reservation_time: String,
    pub num_people: Option<i64>,
    pub sunbed_type: Option<String>,
}

/// Partial update body. Every field distinguishes "absent" from "null":
/// an omitted key keeps the stored value, an explicit null overwrites it
/// (and the merged result must still pass validation).
#[derive(Debug, Default, Deserialize)]
pub struct ReservationPatch {
    #[serde(default, deserialize_with = "double_option")]
    pub user_id: Option<Option<i64>>,
    #[serde(rename = "type", default, deserialize_with = "double_option")]
    pub kind: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub reservation_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub reservation_time: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub num_people: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub sunbed_type: Option<Option<String>>,
}

impl ReservationDraft {
    /// Validate the draft and shape its fields by type.
    pub fn finalize(self) -> AppResult<NewReservation> {
        let (Some(kind_raw), Some(date)) =
            (present(&self.kind), present(&self.reservation_date))
        else {
            return Err(AppError::Validation(
                "Type and reservation_date are required.".into(),
            ));
        };
        let kind = ReservationType::parse(kind_raw)
            .ok_or_else(|| AppError::Validation("Type must be 'table' or 'sunbed'.".into()))?;
        let reservation_date = date.to_string();

        match kind {
            ReservationType::Table => {
                let reservation_time = present(&self.reservation_time)
                    .ok_or_else(|| {
                        AppError::Validation(
                            "Reservation time is required for table reservations.".into(),
                        )
                    })?
                    .to_string();
                let num_people = match self.num_people {
                    Some(n) if n >= 1 => n,
                    _ => {
                        return Err(AppError::Validation(
                            "Number of people (num_people) is required for table reservations \
                             and must be at least 1."
                                .into(),
                        ))
                    }
                };
                Ok(NewReservation {
                    kind,
                    reservation_date,
                    reservation_time,
                    num_people: Some(num_people),
                    sunbed_type: None,
                })
            }
            ReservationType::Sunbed => {
                let sunbed_type = present(&self.sunbed_type)
                    .ok_or_else(|| {
                        AppError::Validation(
                            "Sunbed type (sunbed_type) is required for sunbed reservations."
                                .into(),
                        )
                    })?
                    .to_string();
                let reservation_time = present(&self.reservation_time)
                    .unwrap_or("All Day")
                    .to_string();
                Ok(NewReservation {
                    kind,
                    reservation_date,
                    reservation_time,
                    num_people: None,
                    sunbed_type: Some(sunbed_type),
                })
            }
        }
    }
}

impl ReservationPatch {
    /// True when no updatable field is present at all.
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.reservation_date.is_none()
            && self.reservation_time.is_none()
            && self.num_people.is_none()
            && self.sunbed_type.is_none()
    }

    /// Merge the patch over a stored row: omitted fields keep the stored
    /// value, present fields (including explicit nulls) replace it. The
    /// result is a draft that still has to pass [`ReservationDraft::finalize`].
    pub fn merge_over(self, existing: &Reservation) -> ReservationDraft {
        ReservationDraft {
            kind: self
                .kind
                .unwrap_or_else(|| Some(existing.kind.as_str().to_string())),
            reservation_date: self
                .reservation_date
                .unwrap_or_else(|| Some(existing.reservation_date.clone())),
            reservation_time: self
                .reservation_time
                .unwrap_or_else(|| Some(existing.reservation_time.clone())),
            num_people: self.num_people.unwrap_or(existing.num_people),
            sunbed_type: self.sunbed_type.unwrap_or_else(|| existing.sunbed_type.clone()),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
