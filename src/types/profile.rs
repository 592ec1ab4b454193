use serde::{Deserialize, Serialize};

/// The logged-in farmer. Created by the login form and owned by the root
/// controller; views only ever see it by shared reference.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub location: String,
    #[serde(rename = "cropType")]
    pub crop_type: String,
}

impl UserProfile {
    pub fn new(name: impl Into<String>, location: impl Into<String>, crop_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            crop_type: crop_type.into(),
        }
    }
}
