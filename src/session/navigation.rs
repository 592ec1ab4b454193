/// Dashboard views. `tag` gives the stable string used by `select_tag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Scan,
    Results,
    Chat,
    Risk,
    Twin,
    Heatmap,
    Voice,
    Treatment,
    Report,
}

impl Tab {
    pub const ALL: [Tab; 10] = [
        Tab::Overview,
        Tab::Scan,
        Tab::Results,
        Tab::Chat,
        Tab::Risk,
        Tab::Twin,
        Tab::Heatmap,
        Tab::Voice,
        Tab::Treatment,
        Tab::Report,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::Scan => "scan",
            Tab::Results => "results",
            Tab::Chat => "chat",
            Tab::Risk => "risk",
            Tab::Twin => "twin",
            Tab::Heatmap => "heatmap",
            Tab::Voice => "voice",
            Tab::Treatment => "treatment",
            Tab::Report => "report",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Tab> {
        Tab::ALL.into_iter().find(|t| t.tag() == tag)
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Dashboard Overview",
            Tab::Scan => "Scan Plant",
            Tab::Results => "Results",
            Tab::Chat => "AI Assistant",
            Tab::Risk => "Risk Predictor",
            Tab::Twin => "Digital Crop Twin",
            Tab::Heatmap => "Disease Heatmap",
            Tab::Voice => "Voice Diagnosis",
            Tab::Treatment => "Treatment Guide",
            Tab::Report => "Field Report",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Tab::Overview => "📊",
            Tab::Scan => "📸",
            Tab::Results => "🔬",
            Tab::Chat => "💬",
            Tab::Risk => "⚠",
            Tab::Twin => "🌱",
            Tab::Heatmap => "🗺",
            Tab::Voice => "🎤",
            Tab::Treatment => "💊",
            Tab::Report => "📝",
        }
    }
}
