use serde::{Deserialize, Serialize};

use crate::catalog::FxIntensity;
use crate::metadata::{SceneAnalysis, SceneComplexity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalItem {
    pub label: String,
    pub value: String,
}

impl TechnicalItem {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_owned(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    pub title: String,
    pub description: String,
    pub steps: Vec<String>,
    pub technical: Vec<TechnicalItem>,
}

/// Fixed production stage catalog, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StageId {
    Previs,
    Simulation,
    Lighting,
    Compositing,
    Finishing,
}

impl StageId {
    pub const ALL: [StageId; 5] = [
        Self::Previs,
        Self::Simulation,
        Self::Lighting,
        Self::Compositing,
        Self::Finishing,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Self::Previs => "previs",
            Self::Simulation => "simulation",
            Self::Lighting => "lighting",
            Self::Compositing => "compositing",
            Self::Finishing => "finishing",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Previs => "Previsualization / प्रीव्हिज्युअलायझेशन",
            Self::Simulation => "FX Simulation / सिम्युलेशन",
            Self::Lighting => "Lighting & Lookdev / प्रकाशयोजना",
            Self::Compositing => "Compositing / कंपोझिटिंग",
            Self::Finishing => "Color & Finishing / रंगसंगती",
        }
    }
}

pub fn assemble_stages(scene: &SceneAnalysis<'_>) -> Vec<Stage> {
    StageId::ALL
        .iter()
        .map(|&id| {
            let (description, steps, technical) = match id {
                StageId::Previs => previs(scene),
                StageId::Simulation => simulation(scene),
                StageId::Lighting => lighting(scene),
                StageId::Compositing => compositing(scene),
                StageId::Finishing => finishing(scene),
            };
            Stage {
                id: id.slug().to_owned(),
                title: id.title().to_owned(),
                description,
                steps: distinct(steps),
                technical,
            }
        })
        .collect()
}

type StageContent = (String, Vec<String>, Vec<TechnicalItem>);

/// Drops repeated steps, keeping the first occurrence in place.
fn distinct(steps: Vec<String>) -> Vec<String> {
    let mut kept: Vec<String> = Vec::with_capacity(steps.len());
    for step in steps {
        if !kept.contains(&step) {
            kept.push(step);
        }
    }
    kept
}

fn previs(scene: &SceneAnalysis<'_>) -> StageContent {
    let location = scene.location();
    let camera = scene.camera();

    let description = format!(
        "Block the {} beat by beat with {} framing before any heavy work starts.",
        location.label,
        camera.label
    );
    let steps = vec![
        format!("Build the proxy set: {}", location.set_dressing),
        camera.previs_step.clone(),
        format!("Stand in {} with proxy rigs for timing", scene.characters().label),
        "Cut a temp-sound animatic and lock shot durations with editorial".to_owned(),
    ];

    let mut technical = vec![
        TechnicalItem::new("Camera", camera.lens.clone()),
        TechnicalItem::new("Layout", "USD layout stage with proxy payloads"),
        TechnicalItem::new("Animatic", "24 fps, 1920x1080 review"),
    ];
    if camera.overscan_percent > 0 {
        technical.push(TechnicalItem::new(
            "Overscan",
            format!("{}% for stabilization headroom", camera.overscan_percent),
        ));
    }

    (description, steps, technical)
}

fn simulation(scene: &SceneAnalysis<'_>) -> StageContent {
    let fx = scene.fx();
    let mood = scene.mood();

    let description = format!(
        "Simulate the {} palette at {} intensity for the {} set.",
        fx.label,
        fx.intensity.as_str(),
        scene.location().label
    );

    let mut steps = fx.steps.clone();
    if fx.intensity >= FxIntensity::Moderate {
        steps.push("Wedge solver settings and review flipbooks before final caching".to_owned());
    }
    steps.push(format!(
        "Collide simulations against {} proxies",
        scene.characters().label
    ));

    let turbulence = match (fx.intensity, mood.charged) {
        (FxIntensity::Heavy, true) => "Aggressive: high vorticity, strong disturbance",
        (FxIntensity::Heavy, false) | (FxIntensity::Moderate, true) => {
            "High: layered turbulence with disturbance"
        }
        (FxIntensity::Moderate, false) => "Moderate: curl noise drift",
        (FxIntensity::Subtle, true) => "Low: gusty drift",
        (FxIntensity::Subtle, false) => "Low: gentle drift",
    };
    let cache = match fx.intensity {
        FxIntensity::Heavy => "VDB + bgeo.sc sequences on NVMe scratch",
        FxIntensity::Moderate => "bgeo.sc sequences",
        FxIntensity::Subtle => "Alembic points",
    };

    let technical = vec![
        TechnicalItem::new("Solver", fx.solver.clone()),
        TechnicalItem::new("Resolution", fx.resolution.clone()),
        TechnicalItem::new("Turbulence", turbulence),
        TechnicalItem::new("Cache", cache),
    ];

    (description, steps, technical)
}

fn lighting(scene: &SceneAnalysis<'_>) -> StageContent {
    let time = scene.time_of_day();
    let mood = scene.mood();
    let fx = scene.fx();

    let description = format!(
        "Light for {} with a {} mood and lookdev every hero asset in context.",
        time.label,
        mood.label
    );

    let mut steps = vec![
        format!("Establish the rig: {}", time.light_rig),
        format!("Shape the palette toward {}", mood.palette.to_lowercase()),
        "Lookdev hero assets on the turntable under the shot rig".to_owned(),
    ];
    if fx.emissive {
        steps.push(format!(
            "Drive interactive light from the {} emitters onto set and characters",
            fx.label
        ));
    }

    let mut technical = vec![
        TechnicalItem::new("Color Temperature", time.color_temperature.clone()),
        TechnicalItem::new("Contrast", mood.contrast.clone()),
        TechnicalItem::new(
            "Light Groups",
            if fx.emissive {
                "key, fill, rim, practicals, fx_emission"
            } else {
                "key, fill, rim, practicals"
            },
        ),
    ];
    if fx.intensity >= FxIntensity::Moderate {
        technical.push(TechnicalItem::new(
            "Volume Lighting",
            "Volumetric scatter enabled, step size tuned per shot",
        ));
    }

    (description, steps, technical)
}

fn compositing(scene: &SceneAnalysis<'_>) -> StageContent {
    let mood = scene.mood();
    let fx = scene.fx();
    let complexity = scene.complexity();

    let description = format!(
        "Integrate CG and {} elements into the plate with a {} finish.",
        fx.label,
        mood.label
    );

    let mut steps = vec![
        "Rebuild the beauty from AOVs and match plate black levels".to_owned(),
        format!("Integrate {} with depth-aware holdouts", fx.label),
        format!("Apply the mood treatment: {}", mood.comp_treatment),
        "Match grain, lens distortion and chromatic aberration to the plate".to_owned(),
    ];
    if scene.camera().stabilization {
        steps.push("Re-apply camera shake after stabilization and crop overscan".to_owned());
    }

    let technical = vec![
        TechnicalItem::new("Compositor", "Nuke (ACES OCIO config)"),
        TechnicalItem::new(
            "Deep",
            if complexity == SceneComplexity::Heavy {
                "Deep compositing for volumes"
            } else {
                "Flat EXR with cryptomatte holdouts"
            },
        ),
        TechnicalItem::new("Denoise", "Intel OIDN per light group"),
    ];

    (description, steps, technical)
}

fn finishing(scene: &SceneAnalysis<'_>) -> StageContent {
    let mood = scene.mood();

    let description = format!(
        "Grade and conform the sequence, then package deliverables for {}.",
        scene.location().label
    );

    let steps = vec![
        format!("Grade toward {}", mood.palette.to_lowercase()),
        "Conform against the locked edit and check shot continuity".to_owned(),
        "Run technical QC: gamut, flicker, dead pixels, frame count".to_owned(),
    ];

    let technical = vec![
        TechnicalItem::new("Grading", "DaVinci Resolve, ACES 1.3 color management"),
        TechnicalItem::new("Look", mood.contrast.clone()),
        TechnicalItem::new("Output Transform", "Rec.709 100 nits, P3-D65 48 nits"),
    ];

    (description, steps, technical)
}
