use std::path::Path;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::api::{AnalysisRequest, ApiError, FailureKind};
use crate::session::chat::ChatPanel;
use crate::session::lifecycle::RequestLifecycle;
use crate::session::navigation::Tab;
use crate::session::request::{Completion, Request};
use crate::session::toast::Toast;
use crate::session::tools::Tools;
use crate::types::analysis::AnalysisResult;
use crate::types::chat::ChatContext;
use crate::types::media::SelectedImage;
use crate::types::profile::UserProfile;
use crate::types::weather::CurrentWeather;

pub const NO_IMAGE_MESSAGE: &str = "Please upload an image before analyzing.";
pub const ANALYSIS_READY_MESSAGE: &str = "Analysis complete! Check the Results tab for details.";

/// Session-wide knobs the dashboard is built with.
#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub session_id: String,
    pub default_city: String,
    pub navigate_to_results: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            session_id: "web-session".to_string(),
            default_city: "Thane".to_string(),
            navigate_to_results: true,
        }
    }
}

/// All state below the root controller while a farmer is logged in. Dropped
/// wholesale on logout.
#[derive(Debug, Clone)]
pub struct Dashboard {
    tab: Tab,
    pub city: String,
    pub image_path: String,
    selected_image: Option<SelectedImage>,
    preview: Option<String>,
    analyzing: RequestLifecycle,
    analysis: Option<AnalysisResult>,
    current_weather: Option<CurrentWeather>,
    pub chat: ChatPanel,
    pub tools: Tools,
    crop_type: String,
    navigate_to_results: bool,
}

impl Dashboard {
    pub fn new(profile: &UserProfile, settings: &DashboardSettings) -> Self {
        let city = if profile.location.trim().is_empty() {
            settings.default_city.clone()
        } else {
            profile.location.clone()
        };
        Self {
            tab: Tab::default(),
            city,
            image_path: String::new(),
            selected_image: None,
            preview: None,
            analyzing: RequestLifecycle::new(),
            analysis: None,
            current_weather: None,
            chat: ChatPanel::new(settings.session_id.clone()),
            tools: Tools::for_profile(profile),
            crop_type: profile.crop_type.clone(),
            navigate_to_results: settings.navigate_to_results,
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn current_weather(&self) -> Option<&CurrentWeather> {
        self.current_weather.as_ref()
    }

    pub fn selected_image(&self) -> Option<&SelectedImage> {
        self.selected_image.as_ref()
    }

    /// `data:` URL of the picked image.
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing.is_in_flight()
    }

    pub fn analysis_lifecycle(&self) -> &RequestLifecycle {
        &self.analyzing
    }

    /// Switches tabs unconditionally. Opening the assistant also refreshes
    /// the weather for the current city.
    pub fn select_tab(&mut self, tab: Tab) -> Option<Request> {
        self.tab = tab;
        if tab == Tab::Chat && !self.city.trim().is_empty() {
            return Some(Request::Weather { city: self.city.trim().to_string() });
        }
        None
    }

    /// Tag-based switch; unknown tags leave the active tab alone.
    pub fn select_tag(&mut self, tag: &str) -> Option<Request> {
        match Tab::from_tag(tag) {
            Some(tab) => self.select_tab(tab),
            None => {
                warn!(tag, "ignoring unknown tab");
                None
            }
        }
    }

    pub fn set_image(&mut self, image: SelectedImage) {
        self.preview = Some(image.file().data_url());
        self.selected_image = Some(image);
    }

    /// Reads the image named in the path field.
    pub fn load_image(&mut self, toast: &mut Toast, now: Instant) {
        let path = self.image_path.trim().to_string();
        if path.is_empty() {
            toast.show("Please enter the path of a plant image.", now);
            return;
        }
        match SelectedImage::from_path(Path::new(&path)) {
            Ok(image) => {
                info!(file = %image.file().file_name, bytes = image.file().size(), "image selected");
                self.set_image(image);
                toast.dismiss();
            }
            Err(e) => toast.show(e.to_string(), now),
        }
    }

    pub fn remove_image(&mut self) {
        self.selected_image = None;
        self.preview = None;
        self.image_path.clear();
    }

    pub fn analyze(&mut self, toast: &mut Toast, now: Instant) -> Option<Request> {
        let Some(image) = self.selected_image.clone() else {
            self.analyzing.reject(NO_IMAGE_MESSAGE);
            toast.show(NO_IMAGE_MESSAGE, now);
            return None;
        };
        self.analyzing.begin();
        toast.dismiss();
        Some(Request::Analyze(AnalysisRequest {
            image,
            city: self.city.trim().to_string(),
            crop_type: Some(self.crop_type.clone()),
        }))
    }

    fn chat_context(&self) -> ChatContext {
        match &self.analysis {
            Some(analysis) => analysis.chat_context(self.current_weather.as_ref()),
            None => ChatContext {
                weather_current: self
                    .current_weather
                    .as_ref()
                    .and_then(|w| serde_json::to_value(w).ok()),
                ..Default::default()
            },
        }
    }

    pub fn send_chat(&mut self) -> Option<Request> {
        let context = self.chat_context();
        self.chat.send(context)
    }

    pub fn clear_chat(&mut self) -> Request {
        self.chat.clear()
    }

    /// Surfaces a refused tool trigger on the toast.
    pub fn run_tool(
        &mut self,
        trigger: impl FnOnce(&mut Tools) -> Result<Request, String>,
        toast: &mut Toast,
        now: Instant,
    ) -> Option<Request> {
        match trigger(&mut self.tools) {
            Ok(request) => Some(request),
            Err(message) => {
                toast.show(message, now);
                None
            }
        }
    }

    pub fn apply(&mut self, completion: Completion, toast: &mut Toast, now: Instant) {
        match completion {
            Completion::Analysis(result) => self.apply_analysis(result, toast, now),
            Completion::Weather(Ok(current)) => {
                if let Some(analysis) = self.analysis.as_mut() {
                    analysis.merge_current_weather(current.clone());
                }
                self.current_weather = Some(current);
            }
            Completion::Weather(Err(err)) => warn!(error = %err, "Weather fetch error"),
            Completion::Chat(result) => self.chat.apply_reply(result),
            Completion::ChatCleared(result) => self.chat.apply_cleared(result),
            Completion::Tool(kind, result) => {
                if let Err(err) = self.tools.panel_mut(kind).apply(result) {
                    toast.show(err.to_string(), now);
                }
            }
            Completion::Health(_) => {}
        }
    }

    fn apply_analysis(&mut self, result: Result<AnalysisResult, ApiError>, toast: &mut Toast, now: Instant) {
        match result {
            Ok(analysis) => {
                info!(plant = %analysis.disease.plant, disease = %analysis.disease.disease, "analysis complete");
                self.analyzing.succeed();
                self.tools.prefill_treatment(&analysis);
                self.analysis = Some(analysis);
                if self.navigate_to_results {
                    self.tab = Tab::Results;
                } else {
                    toast.notify(ANALYSIS_READY_MESSAGE, now);
                }
            }
            Err(err) => {
                self.analyzing.fail(&err);
                let message = match err.kind() {
                    FailureKind::Application => format!("Analysis failed: {}", err),
                    FailureKind::Transport => {
                        error!(error = %err, "Analyze error");
                        format!("Connection Error: {}", err)
                    }
                    FailureKind::Validation => err.to_string(),
                };
                toast.show(message, now);
            }
        }
    }
}
