// Auxiliary advisory panels: risk, crop twin, heatmap, field report,
// treatment and voice. Each owns its form inputs, a request lifecycle and the
// last JSON body the backend sent back.

use serde_json::Value;
use std::path::Path;
use tracing::error;

use crate::api::{ApiError, FarmerReport};
use crate::session::lifecycle::RequestLifecycle;
use crate::session::request::{Request, ToolKind};
use crate::types::analysis::AnalysisResult;
use crate::types::media::AudioClip;
use crate::types::profile::UserProfile;

#[derive(Debug, Clone, Default)]
pub struct ToolPanel {
    lifecycle: RequestLifecycle,
    response: Option<Value>,
}

impl ToolPanel {
    pub fn lifecycle(&self) -> &RequestLifecycle {
        &self.lifecycle
    }

    pub fn is_busy(&self) -> bool {
        self.lifecycle.is_in_flight()
    }

    pub fn response(&self) -> Option<&Value> {
        self.response.as_ref()
    }

    fn start(&mut self, request: Request) -> Request {
        self.lifecycle.begin();
        request
    }

    fn refuse(&mut self, message: String) -> Result<Request, String> {
        self.lifecycle.reject(message.clone());
        Err(message)
    }

    /// Stores the body on success. Earlier responses survive a failure.
    pub fn apply(&mut self, result: Result<Value, ApiError>) -> Result<(), ApiError> {
        match result {
            Ok(body) => {
                self.lifecycle.succeed();
                self.response = Some(body);
                Ok(())
            }
            Err(err) => {
                if err.is_transport() {
                    error!(error = %err, "advisory request failed");
                }
                self.lifecycle.fail(&err);
                Err(err)
            }
        }
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[derive(Debug, Clone, Default)]
pub struct Tools {
    pub risk_location: String,
    pub risk_crop: String,
    pub risk: ToolPanel,

    pub twin_farmer: String,
    pub twin_crop: String,
    pub twin_update_json: String,
    pub twin: ToolPanel,

    pub heatmap_region: String,
    pub heatmap: ToolPanel,

    pub report_form: FarmerReport,
    pub report: ToolPanel,

    pub treatment_disease: String,
    pub treatment_severity: String,
    pub treatment: ToolPanel,

    pub voice_path: String,
    pub voice_clip: Option<AudioClip>,
    pub voice: ToolPanel,
}

impl Tools {
    /// Pre-fills every form from the logged-in profile.
    pub fn for_profile(profile: &UserProfile) -> Self {
        Self {
            risk_location: profile.location.clone(),
            risk_crop: profile.crop_type.clone(),
            twin_farmer: profile.name.clone(),
            twin_crop: profile.crop_type.clone(),
            twin_update_json: "{\n  \"growthStage\": \"Vegetative\"\n}".to_string(),
            heatmap_region: profile.location.clone(),
            report_form: FarmerReport {
                farmer_name: profile.name.clone(),
                location: profile.location.clone(),
                crop_type: profile.crop_type.clone(),
                ..Default::default()
            },
            treatment_severity: "Moderate".to_string(),
            ..Default::default()
        }
    }

    pub fn panel_mut(&mut self, kind: ToolKind) -> &mut ToolPanel {
        match kind {
            ToolKind::Risk => &mut self.risk,
            ToolKind::CropTwin | ToolKind::CropTwinUpdate => &mut self.twin,
            ToolKind::Heatmap => &mut self.heatmap,
            ToolKind::Report => &mut self.report,
            ToolKind::Treatment => &mut self.treatment,
            ToolKind::Voice => &mut self.voice,
        }
    }

    /// Copies the latest diagnosis into the treatment form.
    pub fn prefill_treatment(&mut self, analysis: &AnalysisResult) {
        self.treatment_disease = analysis.disease.disease.clone();
        self.treatment_severity = analysis.severity_label();
    }

    pub fn request_risk(&mut self) -> Result<Request, String> {
        if blank(&self.risk_location) || blank(&self.risk_crop) {
            return self.risk.refuse("Please enter a location and crop type.".to_string());
        }
        let request = Request::Risk {
            location: self.risk_location.trim().to_string(),
            crop_type: self.risk_crop.trim().to_string(),
        };
        Ok(self.risk.start(request))
    }

    pub fn request_twin(&mut self) -> Result<Request, String> {
        if blank(&self.twin_farmer) || blank(&self.twin_crop) {
            return self.twin.refuse("Please enter a farmer ID and crop type.".to_string());
        }
        let request = Request::CropTwin {
            farmer_id: self.twin_farmer.trim().to_string(),
            crop_type: self.twin_crop.trim().to_string(),
        };
        Ok(self.twin.start(request))
    }

    pub fn request_twin_update(&mut self) -> Result<Request, String> {
        if blank(&self.twin_farmer) {
            return self.twin.refuse("Please enter a farmer ID.".to_string());
        }
        let crop_data: Value = match serde_json::from_str(&self.twin_update_json) {
            Ok(value) => value,
            Err(e) => return self.twin.refuse(format!("Crop data must be valid JSON: {}", e)),
        };
        let request = Request::UpdateCropTwin {
            farmer_id: self.twin_farmer.trim().to_string(),
            crop_data,
        };
        Ok(self.twin.start(request))
    }

    pub fn request_heatmap(&mut self) -> Result<Request, String> {
        if blank(&self.heatmap_region) {
            return self.heatmap.refuse("Please enter a region.".to_string());
        }
        let request = Request::Heatmap { region: self.heatmap_region.trim().to_string() };
        Ok(self.heatmap.start(request))
    }

    pub fn request_report(&mut self) -> Result<Request, String> {
        let form = &self.report_form;
        let missing = [
            &form.farmer_name,
            &form.location,
            &form.crop_type,
            &form.disease_observed,
            &form.description,
        ]
        .iter()
        .any(|field| blank(field));
        if missing {
            return self.report.refuse("Please fill all fields!".to_string());
        }
        let request = Request::SubmitReport(self.report_form.clone());
        Ok(self.report.start(request))
    }

    pub fn request_treatment(&mut self) -> Result<Request, String> {
        if blank(&self.treatment_disease) || blank(&self.treatment_severity) {
            return self.treatment.refuse("Please enter a disease and severity.".to_string());
        }
        let request = Request::Treatment {
            disease_type: self.treatment_disease.trim().to_string(),
            severity: self.treatment_severity.trim().to_string(),
        };
        Ok(self.treatment.start(request))
    }

    /// Reads the recording named in the path field.
    pub fn load_voice_clip(&mut self) -> Result<(), String> {
        let path = self.voice_path.trim();
        if path.is_empty() {
            return Err("Please enter the path of an audio recording.".to_string());
        }
        match AudioClip::from_path(Path::new(path)) {
            Ok(clip) => {
                self.voice_clip = Some(clip);
                Ok(())
            }
            Err(e) => {
                self.voice_clip = None;
                Err(e.to_string())
            }
        }
    }

    pub fn request_voice(&mut self) -> Result<Request, String> {
        match self.voice_clip.clone() {
            Some(clip) => Ok(self.voice.start(Request::Voice(clip))),
            None => self.voice.refuse("Please select an audio recording first.".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FailureKind;
    use crate::session::lifecycle::RequestPhase;
    use serde_json::json;

    fn tools() -> Tools {
        Tools::for_profile(&UserProfile::new("Asha", "Thane", "wheat"))
    }

    #[test]
    fn forms_start_from_profile() {
        let tools = tools();
        assert_eq!(tools.risk_location, "Thane");
        assert_eq!(tools.twin_farmer, "Asha");
        assert_eq!(tools.report_form.crop_type, "wheat");
    }

    #[test]
    fn risk_request_carries_trimmed_inputs() {
        let mut tools = tools();
        tools.risk_crop = " wheat ".to_string();
        let request = tools.request_risk().unwrap();
        assert_eq!(request, Request::Risk { location: "Thane".into(), crop_type: "wheat".into() });
        assert!(tools.risk.is_busy());
    }

    #[test]
    fn invalid_twin_json_is_refused_without_request() {
        let mut tools = tools();
        tools.twin_update_json = "{ not json".to_string();
        let err = tools.request_twin_update().unwrap_err();
        assert!(err.starts_with("Crop data must be valid JSON"));
        assert!(matches!(tools.twin.lifecycle().phase(), RequestPhase::Failed { kind: FailureKind::Validation, .. }));
    }

    #[test]
    fn report_requires_every_field() {
        let mut tools = tools();
        assert_eq!(tools.request_report().unwrap_err(), "Please fill all fields!");
        tools.report_form.disease_observed = "Leaf rust".to_string();
        tools.report_form.description = "Orange pustules on lower leaves".to_string();
        assert!(matches!(tools.request_report(), Ok(Request::SubmitReport(_))));
    }

    #[test]
    fn voice_needs_a_clip() {
        let mut tools = tools();
        assert_eq!(tools.request_voice().unwrap_err(), "Please select an audio recording first.");
        assert!(tools.load_voice_clip().is_err());
    }

    #[test]
    fn failed_refresh_keeps_previous_response() {
        let mut tools = tools();
        tools.request_heatmap().unwrap();
        tools.panel_mut(ToolKind::Heatmap).apply(Ok(json!({"success": true, "hotspots": []}))).unwrap();
        tools.request_heatmap().unwrap();
        let err = tools.panel_mut(ToolKind::Heatmap).apply(Err(ApiError::Transport("timeout".into())));
        assert!(err.is_err());
        assert_eq!(tools.heatmap.response(), Some(&json!({"success": true, "hotspots": []})));
        assert_eq!(tools.heatmap.lifecycle().error(), Some("timeout"));
    }
}
