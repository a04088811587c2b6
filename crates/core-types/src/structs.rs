use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A person enrolled at camp. `age` is always within [`crate::AGE_RANGE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Camper {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

/// A camp-offered activity. Activities are seeded out-of-band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Activity {
    pub id: i64,
    pub name: String,
}

/// Books one camper onto one activity at an hour of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Signup {
    pub id: i64,
    pub camper_id: i64,
    pub activity_id: i64,
    /// Hour of day, within [`crate::TIME_RANGE`].
    pub time: i64,
}

/// A signup loaded together with the activity it books.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledSignup {
    pub signup: Signup,
    pub activity: Activity,
}

// --- Validated inputs ---
// These can only be produced by the functions in `validation`, so a value of
// one of these types has already passed every domain check.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCamper {
    pub name: String,
    pub age: i64,
}

/// The allow-listed fields a camper update may touch. `None` leaves the
/// stored value as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CamperChanges {
    pub name: Option<String>,
    pub age: Option<i64>,
}

impl CamperChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewSignup {
    pub camper_id: i64,
    pub activity_id: i64,
    pub time: i64,
}
