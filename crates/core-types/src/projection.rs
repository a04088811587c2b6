//! Shapes stored records into the JSON views returned to callers.
//!
//! Camper, Signup and Activity reference each other in a cycle, so every call
//! site names the view it wants and each view states exactly which
//! relationships it expands. A relationship that is not expanded is omitted
//! from the output rather than rendered as `null`.

use crate::structs::{Activity, Camper, ScheduledSignup, Signup};
use serde::Serialize;

/// Which relationships a camper view expands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CamperView {
    /// Scalar fields only. Used by listings and update results.
    Summary,
    /// Adds `signups`, each rendered with [`SignupView::WithActivity`].
    /// Used for fetch-by-id and creation results.
    WithSignups,
}

/// Which relationships a signup view expands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupView {
    /// Adds the booked `activity`. The back-reference to the camper is left
    /// out, which is what breaks the cycle when nested under a camper.
    WithActivity,
    /// Adds both `camper` and `activity`, each as a summary.
    WithCamperAndActivity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CamperJson {
    pub id: i64,
    pub name: String,
    pub age: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signups: Option<Vec<SignupJson>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityJson {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupJson {
    pub id: i64,
    pub camper_id: i64,
    pub activity_id: i64,
    pub time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camper: Option<CamperJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<ActivityJson>,
}

impl CamperView {
    /// Projects `camper`. `signups` is only read by [`CamperView::WithSignups`].
    pub fn project(self, camper: &Camper, signups: &[ScheduledSignup]) -> CamperJson {
        let signups = match self {
            CamperView::Summary => None,
            CamperView::WithSignups => Some(
                signups
                    .iter()
                    .map(|s| SignupView::WithActivity.project(&s.signup, None, Some(&s.activity)))
                    .collect(),
            ),
        };
        CamperJson {
            id: camper.id,
            name: camper.name.clone(),
            age: camper.age,
            signups,
        }
    }
}

impl SignupView {
    /// Projects `signup`, expanding whichever of the supplied relations this
    /// view allows. Relations the view excludes are ignored.
    pub fn project(
        self,
        signup: &Signup,
        camper: Option<&Camper>,
        activity: Option<&Activity>,
    ) -> SignupJson {
        let camper = match self {
            SignupView::WithActivity => None,
            SignupView::WithCamperAndActivity => {
                camper.map(|c| CamperView::Summary.project(c, &[]))
            }
        };
        SignupJson {
            id: signup.id,
            camper_id: signup.camper_id,
            activity_id: signup.activity_id,
            time: signup.time,
            camper,
            activity: activity.map(ActivityJson::from),
        }
    }
}

impl From<&Activity> for ActivityJson {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id,
            name: activity.name.clone(),
        }
    }
}
