use serde::{Deserialize, Serialize};

use crate::catalog::{
    CameraProfile, CharacterProfile, FxIntensity, FxProfile, LocationProfile, MoodProfile,
    TimeProfile, VocabularyCatalog,
};
use crate::cue::{CueMatch, CueValue};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneMetadata {
    pub location: String,
    pub mood: String,
    pub time_of_day: String,
    pub camera_style: String,
    pub characters: String,
    pub fx_palette: String,
}

/// Escalation tier driving render and export recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneComplexity {
    Standard,
    Elevated,
    Heavy,
}

impl SceneComplexity {
    /// FX intensity sets the base tier; a charged mood bumps it one step.
    pub fn derive(fx: FxIntensity, charged_mood: bool) -> Self {
        let base = match fx {
            FxIntensity::Subtle => Self::Standard,
            FxIntensity::Moderate => Self::Elevated,
            FxIntensity::Heavy => Self::Heavy,
        };
        if charged_mood {
            base.bumped()
        } else {
            base
        }
    }

    fn bumped(self) -> Self {
        match self {
            Self::Standard => Self::Elevated,
            Self::Elevated | Self::Heavy => Self::Heavy,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Elevated => "elevated",
            Self::Heavy => "heavy",
        }
    }
}

/// Resolved profile for every metadata field of one prompt.
#[derive(Debug, Clone, Copy)]
pub struct SceneAnalysis<'c> {
    pub location: CueMatch<'c, LocationProfile>,
    pub time_of_day: CueMatch<'c, TimeProfile>,
    pub mood: CueMatch<'c, MoodProfile>,
    pub camera_style: CueMatch<'c, CameraProfile>,
    pub characters: CueMatch<'c, CharacterProfile>,
    pub fx_palette: CueMatch<'c, FxProfile>,
    /// True when the prompt carried no text at all.
    pub blank: bool,
}

/// One row of the `explain` view: field name, resolved label and the cue that
/// selected it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldResolution {
    pub field: &'static str,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cue: Option<String>,
}

impl<'c> SceneAnalysis<'c> {
    pub fn extract(catalog: &'c VocabularyCatalog, normalized: &str) -> Self {
        let analysis = Self {
            location: catalog.location.resolve(normalized),
            time_of_day: catalog.time_of_day.resolve(normalized),
            mood: catalog.mood.resolve(normalized),
            camera_style: catalog.camera_style.resolve(normalized),
            characters: catalog.characters.resolve(normalized),
            fx_palette: catalog.fx_palette.resolve(normalized),
            blank: normalized.is_empty(),
        };

        for resolution in analysis.resolutions() {
            tracing::debug!(
                field = resolution.field,
                cue = resolution.cue.as_deref().unwrap_or("fallback"),
                value = %resolution.value,
                "resolved scene attribute"
            );
        }
        analysis
    }

    pub fn location(&self) -> &'c LocationProfile {
        self.location.value
    }

    pub fn time_of_day(&self) -> &'c TimeProfile {
        self.time_of_day.value
    }

    pub fn mood(&self) -> &'c MoodProfile {
        self.mood.value
    }

    pub fn camera(&self) -> &'c CameraProfile {
        self.camera_style.value
    }

    pub fn characters(&self) -> &'c CharacterProfile {
        self.characters.value
    }

    pub fn fx(&self) -> &'c FxProfile {
        self.fx_palette.value
    }

    pub fn complexity(&self) -> SceneComplexity {
        SceneComplexity::derive(self.fx().intensity, self.mood().charged)
    }

    pub fn metadata(&self) -> SceneMetadata {
        SceneMetadata {
            location: self.location().label.clone(),
            mood: self.mood().label.clone(),
            time_of_day: self.time_of_day().label.clone(),
            camera_style: self.camera().label.clone(),
            characters: self.characters().label.clone(),
            fx_palette: self.fx().label.clone(),
        }
    }

    pub fn resolutions(&self) -> Vec<FieldResolution> {
        vec![
            field_resolution("location", &self.location),
            field_resolution("mood", &self.mood),
            field_resolution("timeOfDay", &self.time_of_day),
            field_resolution("cameraStyle", &self.camera_style),
            field_resolution("characters", &self.characters),
            field_resolution("fxPalette", &self.fx_palette),
        ]
    }
}

fn field_resolution<T: CueValue>(field: &'static str, hit: &CueMatch<'_, T>) -> FieldResolution {
    FieldResolution {
        field,
        value: hit.value.label().to_owned(),
        cue: hit.cue.map(ToOwned::to_owned),
    }
}
